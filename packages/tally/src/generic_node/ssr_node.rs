//! Rendering backend for Server Side Rendering, aka. SSR.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use once_cell::sync::Lazy;
use web_sys::Event;

use crate::generic_node::{GenericNode, Html};
use crate::reactive::*;
use crate::view::View;

static VOID_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr", "command", "keygen", "menuitem",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug)]
enum SsrNodeType {
    Element { tag: String, children: Vec<SsrNode> },
    Text(String),
}

/// Rendering backend for Server Side Rendering, aka. SSR.
///
/// Nodes are kept in memory and serialized to an HTML string. Event handlers are ignored.
///
/// _This API requires the following crate features to be activated: `ssr`_
#[derive(Debug, Clone)]
pub struct SsrNode(Rc<RefCell<SsrNodeType>>);

impl SsrNode {
    fn new(ty: SsrNodeType) -> Self {
        Self(Rc::new(RefCell::new(ty)))
    }

    /// Serialize the node and its descendants as HTML into `s`.
    pub fn write_to_string(&self, s: &mut String) {
        match &*self.0.borrow() {
            SsrNodeType::Element { tag, children } => {
                s.push('<');
                s.push_str(tag);
                s.push('>');
                // Void elements cannot have children or a closing tag.
                if VOID_ELEMENTS.contains(tag.as_str()) {
                    return;
                }
                for child in children {
                    child.write_to_string(s);
                }
                s.push_str("</");
                s.push_str(tag);
                s.push('>');
            }
            SsrNodeType::Text(text) => {
                html_escape::encode_text_to_string(text, s);
            }
        }
    }
}

impl GenericNode for SsrNode {
    type EventType = Event;

    fn element(tag: &str) -> Self {
        Self::new(SsrNodeType::Element {
            tag: tag.to_string(),
            children: Vec::new(),
        })
    }

    fn text_node(text: &str) -> Self {
        Self::new(SsrNodeType::Text(text.to_string()))
    }

    fn append_child(&self, child: &Self) {
        match &mut *self.0.borrow_mut() {
            SsrNodeType::Element { children, .. } => children.push(child.clone()),
            SsrNodeType::Text(_) => panic!("text nodes cannot have children"),
        }
    }

    fn update_inner_text(&self, text: &str) {
        match &mut *self.0.borrow_mut() {
            SsrNodeType::Element { children, .. } => *children = vec![SsrNode::text_node(text)],
            SsrNodeType::Text(t) => *t = text.to_string(),
        }
    }

    fn event(&self, _ctx: Scope, _name: &str, _handler: Box<dyn Fn(Event)>) {
        // Noop. Events are attached on client side.
    }
}

impl Html for SsrNode {
    const IS_BROWSER: bool = false;
}

/// Serialize the current state of a [`View`] to HTML.
///
/// _This API requires the following crate features to be activated: `ssr`_
pub fn view_to_string(view: &View<SsrNode>) -> String {
    let mut ret = String::new();
    for node in view.clone().flatten() {
        node.write_to_string(&mut ret);
    }
    ret
}

/// Render a [`View`] into a static [`String`]. Useful for rendering to a string on the server
/// side.
///
/// The scope is disposed once the view has been serialized.
///
/// _This API requires the following crate features to be activated: `ssr`_
pub fn render_to_string(f: impl FnOnce(Scope) -> View<SsrNode>) -> String {
    let mut ret = String::new();
    create_scope_immediate(|ctx| {
        let view = f(ctx);
        ret = view_to_string(&view);
    });
    ret
}
