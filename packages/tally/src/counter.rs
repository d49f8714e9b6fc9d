//! The counter widget: a number and two buttons that step it up and down.

use std::fmt;
use std::rc::Rc;

use crate::builder::h;
use crate::generic_node::Html;
use crate::reactive::*;
use crate::view::View;

/// A message sent to the counter by one of its controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterMsg {
    Increment,
    Decrement,
}

impl CounterMsg {
    /// The label of the control that sends this message.
    pub fn label(self) -> &'static str {
        match self {
            CounterMsg::Increment => "+",
            CounterMsg::Decrement => "-",
        }
    }

    /// Look up the message sent by the control labelled `label`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "+" => Some(CounterMsg::Increment),
            "-" => Some(CounterMsg::Decrement),
            _ => None,
        }
    }

    /// Apply the message to a counter value. Wraps around at the bounds of `i64`.
    fn apply(self, value: i64) -> i64 {
        match self {
            CounterMsg::Increment => value.wrapping_add(1),
            CounterMsg::Decrement => value.wrapping_sub(1),
        }
    }
}

/// The state of a mounted counter.
///
/// Cloning a `CounterState` yields another handle to the same counter.
#[derive(Clone)]
pub struct CounterState {
    value: ReadSignal<i64>,
    dispatch: Rc<dyn Fn(CounterMsg)>,
}

impl CounterState {
    /// Mount a new counter in `ctx`, starting at `0`.
    ///
    /// The state is dropped when `ctx` is disposed.
    pub fn new(ctx: Scope) -> Self {
        let (value, dispatch) =
            ctx.create_reducer(0i64, |value, msg: CounterMsg| msg.apply(*value));
        tracing::debug!("counter mounted");
        ctx.on_cleanup(|| tracing::debug!("counter unmounted"));
        Self { value, dispatch }
    }

    /// The reactive value. Reading it with [`get`](ReadSignal::get) inside an effect subscribes
    /// the effect to every update.
    pub fn value(&self) -> ReadSignal<i64> {
        self.value
    }

    /// The current value, untracked.
    pub fn get(&self) -> i64 {
        *self.value.get_untracked()
    }

    pub fn increment(&self) {
        self.dispatch(CounterMsg::Increment);
    }

    pub fn decrement(&self) {
        self.dispatch(CounterMsg::Decrement);
    }

    /// Send `msg` to the counter and re-run everything that depends on its value.
    pub fn dispatch(&self, msg: CounterMsg) {
        (self.dispatch)(msg);
        tracing::debug!(?msg, value = self.get(), "counter updated");
    }
}

impl fmt::Debug for CounterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CounterState")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// The counter component.
///
/// Renders three nodes: a `div` holding the current value, then the `-` and `+` buttons. The
/// `div` is updated in place whenever the value changes.
#[allow(non_snake_case)]
pub fn Counter<G: Html>(ctx: Scope, state: CounterState) -> View<G> {
    let value = state.value();
    let display = h::<G>("div")
        .dyn_t(ctx, move || lexical::to_string(*value.get()))
        .build();

    let decrement = h::<G>("button")
        .on(ctx, "click", {
            let state = state.clone();
            move |_| state.decrement()
        })
        .t(CounterMsg::Decrement.label())
        .build();

    let increment = h::<G>("button")
        .on(ctx, "click", move |_| state.increment())
        .t(CounterMsg::Increment.label())
        .build();

    View::new_fragment(vec![display, decrement, increment])
}
