//! Abstractions for representing UI views.

use std::rc::Rc;

use crate::generic_node::GenericNode;

/// Internal type for [`View`].
#[derive(Clone, Debug)]
pub(crate) enum ViewType<G: GenericNode> {
    /// A view node.
    Node(G),
    /// A fragment (aka. list) of view nodes.
    Fragment(Rc<[View<G>]>),
}

/// Represents an UI view. Usually constructed using the [`builder`](crate::builder).
#[derive(Clone, Debug)]
pub struct View<G: GenericNode> {
    pub(crate) inner: ViewType<G>,
}

impl<G: GenericNode> View<G> {
    /// Create a new [`View`] from a raw node.
    pub fn new_node(node: G) -> Self {
        Self {
            inner: ViewType::Node(node),
        }
    }

    /// Create a new [`View`] fragment from a `Vec` of [`View`]s.
    pub fn new_fragment(fragment: Vec<View<G>>) -> Self {
        Self {
            inner: ViewType::Fragment(fragment.into()),
        }
    }

    /// Create a new [`View`] with no nodes.
    pub fn empty() -> Self {
        Self::new_fragment(Vec::new())
    }

    /// Returns `Some` with the node if the [`View`] is a single node.
    pub fn as_node(&self) -> Option<&G> {
        match &self.inner {
            ViewType::Node(node) => Some(node),
            ViewType::Fragment(_) => None,
        }
    }

    /// Returns `Some` with the children if the [`View`] is a fragment.
    pub fn as_fragment(&self) -> Option<&[View<G>]> {
        match &self.inner {
            ViewType::Node(_) => None,
            ViewType::Fragment(fragment) => Some(&fragment[..]),
        }
    }

    /// Returns the top-level nodes of the [`View`], with nested fragments inlined.
    pub fn flatten(self) -> Vec<G> {
        match self.inner {
            ViewType::Node(node) => vec![node],
            ViewType::Fragment(fragment) => fragment
                .iter()
                .flat_map(|view| view.clone().flatten())
                .collect(),
        }
    }
}

impl<G: GenericNode> Default for View<G> {
    fn default() -> Self {
        Self::empty()
    }
}
