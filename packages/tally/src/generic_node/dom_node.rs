//! Rendering backend for the DOM.

use wasm_bindgen::prelude::*;
use wasm_bindgen::{intern, JsCast};
use web_sys::{Document, Event, Node};

use crate::error::Error;
use crate::generic_node::{GenericNode, Html};
use crate::reactive::*;
use crate::view::View;

fn document() -> Document {
    thread_local! {
        static DOCUMENT: Document = web_sys::window()
            .unwrap_throw()
            .document()
            .unwrap_throw();
    }
    DOCUMENT.with(Clone::clone)
}

/// Rendering backend for the DOM.
///
/// _This API requires the following crate features to be activated: `dom`_
#[derive(Clone, Debug)]
pub struct DomNode {
    node: Node,
}

impl DomNode {
    /// Wrap an existing [`web_sys::Node`].
    pub fn from_web_sys(node: Node) -> Self {
        Self { node }
    }

    /// Get the underlying [`web_sys::Node`].
    pub fn inner_node(&self) -> &Node {
        &self.node
    }
}

impl GenericNode for DomNode {
    type EventType = Event;

    fn element(tag: &str) -> Self {
        let node = document().create_element(intern(tag)).unwrap_throw().into();
        Self { node }
    }

    fn text_node(text: &str) -> Self {
        let node = document().create_text_node(text).into();
        Self { node }
    }

    fn append_child(&self, child: &Self) {
        self.node.append_child(&child.node).unwrap_throw();
    }

    fn update_inner_text(&self, text: &str) {
        self.node.set_text_content(Some(text));
    }

    fn event(&self, ctx: Scope, name: &str, handler: Box<dyn Fn(Event)>) {
        let closure = Closure::wrap(handler);
        self.node
            .add_event_listener_with_callback(
                intern(name),
                closure.as_ref().unchecked_ref::<js_sys::Function>(),
            )
            .unwrap_throw();

        let node = self.node.clone();
        let name = name.to_string();
        ctx.on_cleanup(move || {
            // The listener has to be detached before the closure is dropped.
            let _ = node.remove_event_listener_with_callback(
                &name,
                closure.as_ref().unchecked_ref::<js_sys::Function>(),
            );
            drop(closure);
        });
    }
}

impl Html for DomNode {
    const IS_BROWSER: bool = true;
}

/// Render a [`View`] into the DOM. Alias for [`render_to`] with `parent` being the `<body>` tag.
///
/// The rendered view stays mounted for the rest of the program.
///
/// _This API requires the following crate features to be activated: `dom`_
pub fn render(f: impl FnOnce(Scope) -> View<DomNode>) -> Result<(), Error> {
    let window = web_sys::window().ok_or(Error::NoWindow)?;
    let document = window.document().ok_or(Error::NoDocument)?;
    let body = document.body().ok_or(Error::NoBody)?;

    // Never disposed: the view lives as long as the page.
    let _disposer = render_to(f, &body)?;
    Ok(())
}

/// Render a [`View`] under a `parent` node.
///
/// Returns a [`ScopeDisposer`]. Disposing it unmounts the view: the nodes are removed from
/// `parent` and every event listener is detached.
///
/// _This API requires the following crate features to be activated: `dom`_
pub fn render_to(
    f: impl FnOnce(Scope) -> View<DomNode>,
    parent: &Node,
) -> Result<ScopeDisposer, Error> {
    let parent = parent.clone();
    let mut result = Ok(());
    let disposer = create_scope(|ctx| {
        let nodes = f(ctx).flatten();

        // Registered before appending so that a failed mount still removes what was appended.
        ctx.on_cleanup({
            let parent = parent.clone();
            let nodes = nodes.clone();
            move || {
                for node in nodes {
                    if node.inner_node().parent_node().as_ref() == Some(&parent) {
                        let _ = parent.remove_child(node.inner_node());
                    }
                }
                tracing::debug!("view unmounted");
            }
        });

        for node in &nodes {
            if let Err(err) = parent.append_child(node.inner_node()) {
                result = Err(Error::from(err));
                return;
            }
        }
        tracing::debug!(nodes = nodes.len(), "view mounted");
    });

    match result {
        Ok(()) => Ok(disposer),
        Err(err) => {
            disposer.dispose();
            Err(err)
        }
    }
}
