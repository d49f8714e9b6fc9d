//! Tally: a counter widget built on a fine-grained reactive view layer.
//!
//! The widget lives in [`counter`]. It renders through any [`GenericNode`](generic_node::GenericNode)
//! backend: [`DomNode`](generic_node::DomNode) in the browser (feature `dom`, enabled by default)
//! or [`SsrNode`](generic_node::SsrNode) for server side rendering (feature `ssr`).

pub mod builder;
pub mod component;
pub mod counter;
pub mod error;
pub mod generic_node;
#[cfg(feature = "dom")]
pub mod logging;
pub mod reactive {
    pub use tally_reactive::*;
}
pub mod view;

pub use error::Error;
#[cfg(feature = "dom")]
pub use generic_node::dom_node::{render, render_to};
#[cfg(feature = "ssr")]
pub use generic_node::ssr_node::{render_to_string, view_to_string};

/// The tally prelude.
pub mod prelude {
    pub use crate::component::{instantiate, Component};
    pub use crate::counter::{Counter, CounterMsg, CounterState};
    pub use crate::generic_node::{GenericNode, Html};
    pub use crate::reactive::*;
    pub use crate::view::View;
}
