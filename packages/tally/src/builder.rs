//! Builder API for constructing element views without a template macro.
//!
//! # Example
//! ```
//! use tally::builder::h;
//! use tally::prelude::*;
//!
//! fn label<G: Html>(ctx: Scope) -> View<G> {
//!     let name = ctx.create_signal("World");
//!     h("p")
//!         .dyn_t(ctx, move || format!("Hello {}!", name.get()))
//!         .build()
//! }
//! ```

use crate::generic_node::GenericNode;
use crate::reactive::Scope;
use crate::view::View;

/// Create a new [`ElementBuilder`] for the element `tag`.
pub fn h<G: GenericNode>(tag: &str) -> ElementBuilder<G> {
    ElementBuilder {
        el: G::element(tag),
    }
}

/// A builder for an element node.
#[derive(Debug)]
pub struct ElementBuilder<G: GenericNode> {
    el: G,
}

impl<G: GenericNode> ElementBuilder<G> {
    /// Append a static text node.
    pub fn t(self, text: &str) -> Self {
        // Static text is likely to be constructed many times.
        #[cfg(target_arch = "wasm32")]
        wasm_bindgen::intern(text);
        self.el.append_child(&G::text_node(text));
        self
    }

    /// Set the text content of the element to the output of `f`, and keep it up to date whenever
    /// a signal read in `f` changes.
    ///
    /// This replaces any previous children of the element.
    pub fn dyn_t(self, ctx: Scope, f: impl Fn() -> String + 'static) -> Self {
        let el = self.el.clone();
        ctx.create_effect(move || el.update_inner_text(&f()));
        self
    }

    /// Attach an event listener for the event `name`. The listener lives as long as `ctx`.
    pub fn on(self, ctx: Scope, name: &str, handler: impl Fn(G::EventType) + 'static) -> Self {
        self.el.event(ctx, name, Box::new(handler));
        self
    }

    /// Finish building the element.
    pub fn build(self) -> View<G> {
        View::new_node(self.el)
    }
}
