//! The definition of the [`Component`] trait.

use crate::generic_node::GenericNode;
use crate::reactive::*;
use crate::view::View;

/// Trait that is implemented by components. Should not be implemented manually: any
/// `Fn(Scope, Props) -> View<G>` is a component.
pub trait Component<G: GenericNode, Props> {
    /// Create a new component with an instance of the properties.
    fn create_component(&self, ctx: Scope, props: Props) -> View<G>;
}

impl<G: GenericNode, Props, T> Component<G, Props> for T
where
    T: Fn(Scope, Props) -> View<G>,
{
    fn create_component(&self, ctx: Scope, props: Props) -> View<G> {
        self(ctx, props)
    }
}

/// Instantiates a component.
///
/// The component body runs untracked so that signals read while building the view do not
/// subscribe an enclosing effect.
#[inline(always)]
pub fn instantiate<G: GenericNode, Props>(
    component: impl Component<G, Props>,
    ctx: Scope,
    props: Props,
) -> View<G> {
    untrack(|| component.create_component(ctx, props))
}
