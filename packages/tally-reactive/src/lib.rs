//! Reactive primitives for Tally.
//!
//! All reactive state lives in a thread-local runtime. [`Scope`]s, [`Signal`]s and effects are
//! cheap `Copy` handles into that runtime, so they can be moved freely into event handlers and
//! effect callbacks without any lifetime gymnastics.

mod effect;
mod memo;
mod signal;

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexSet;
use slotmap::{new_key_type, SlotMap};

pub use effect::*;
pub use signal::*;

use effect::EffectState;
use signal::SignalState;

new_key_type! {
    pub(crate) struct ScopeId;
    pub(crate) struct SignalId;
    pub(crate) struct EffectId;
}

/// Owner of every reactive node on the current thread.
#[derive(Default)]
pub(crate) struct Runtime {
    pub(crate) scopes: RefCell<SlotMap<ScopeId, ScopeState>>,
    pub(crate) signals: RefCell<SlotMap<SignalId, SignalState>>,
    pub(crate) effects: RefCell<SlotMap<EffectId, EffectState>>,
    /// Stack of the effects currently executing. A `None` entry is pushed by [`untrack`].
    pub(crate) tracker: RefCell<Vec<Option<EffectId>>>,
}

thread_local! {
    pub(crate) static RUNTIME: Runtime = Runtime::default();
}

#[derive(Default)]
pub(crate) struct ScopeState {
    parent: Option<ScopeId>,
    children: Vec<ScopeId>,
    signals: Vec<SignalId>,
    effects: Vec<EffectId>,
    cleanups: Vec<Box<dyn FnOnce()>>,
}

/// A reactive scope.
///
/// A scope owns the signals and effects created through it, as well as any child scopes. Nothing
/// is freed until the scope is disposed using the disposer returned by [`create_scope`] or
/// [`Scope::create_child_scope`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scope {
    id: ScopeId,
}

impl Scope {
    fn new() -> Self {
        let id = RUNTIME.with(|rt| rt.scopes.borrow_mut().insert(ScopeState::default()));
        Self { id }
    }

    /// Returns `true` if the scope has not been disposed yet.
    pub fn is_alive(self) -> bool {
        RUNTIME.with(|rt| rt.scopes.borrow().contains_key(self.id))
    }

    /// Runs `f` with mutable access to the scope state. Does nothing if the scope is disposed.
    fn with_state(self, f: impl FnOnce(&mut ScopeState)) {
        RUNTIME.with(|rt| {
            if let Some(state) = rt.scopes.borrow_mut().get_mut(self.id) {
                f(state);
            }
        });
    }
}

/// Releases a [`Scope`] when [`dispose`](Self::dispose) is called.
///
/// Dropping a `ScopeDisposer` without calling [`dispose`](Self::dispose) leaves the scope alive
/// for the rest of the program.
#[must_use = "not calling the disposer will result in a memory leak"]
#[derive(Debug)]
pub struct ScopeDisposer {
    scope: Scope,
}

impl ScopeDisposer {
    /// Disposes the scope, its child scopes, effects and signals, and runs its cleanup callbacks.
    pub fn dispose(self) {
        self.scope.dispose();
    }

    /// The scope released by this disposer.
    pub fn scope(&self) -> Scope {
        self.scope
    }
}

/// Creates a reactive scope.
///
/// Returns a [`ScopeDisposer`] which will release everything owned by the [`Scope`].
///
/// # Examples
///
/// ```
/// # use tally_reactive::*;
/// let disposer = create_scope(|ctx| {
///     // Use ctx here.
/// });
/// disposer.dispose();
/// ```
pub fn create_scope(f: impl FnOnce(Scope)) -> ScopeDisposer {
    let ctx = Scope::new();
    untrack(|| f(ctx));
    ScopeDisposer { scope: ctx }
}

/// Creates a reactive scope, runs the callback, and disposes the scope immediately.
pub fn create_scope_immediate(f: impl FnOnce(Scope)) {
    create_scope(f).dispose();
}

impl Scope {
    /// Create a new [`Signal`] under the current [`Scope`].
    /// The created signal lasts as long as the scope.
    pub fn create_signal<T: 'static>(self, value: T) -> Signal<T> {
        let id = RUNTIME.with(|rt| {
            rt.signals.borrow_mut().insert(SignalState {
                value: Rc::new(value),
                subscribers: IndexSet::new(),
            })
        });
        self.with_state(|state| state.signals.push(id));
        Signal::new(id)
    }

    /// Adds a callback that is called when the scope is destroyed.
    ///
    /// Does nothing if the scope has already been disposed.
    pub fn on_cleanup(self, f: impl FnOnce() + 'static) {
        self.with_state(|state| state.cleanups.push(Box::new(f)));
    }

    /// Create a child scope.
    ///
    /// The child is disposed together with its parent, or earlier by calling the returned
    /// disposer.
    pub fn create_child_scope(self, f: impl FnOnce(Scope)) -> ScopeDisposer {
        let child = Scope::new();
        child.with_state(|state| state.parent = Some(self.id));
        self.with_state(|state| state.children.push(child.id));
        f(child);
        ScopeDisposer { scope: child }
    }

    /// Cleanup the resources owned by the [`Scope`].
    ///
    /// If a [`Scope`] has already been disposed, calling it again does nothing.
    pub(crate) fn dispose(self) {
        let Some(state) = RUNTIME.with(|rt| rt.scopes.borrow_mut().remove(self.id)) else {
            return;
        };
        let ScopeState {
            parent,
            children,
            signals,
            effects,
            cleanups,
        } = state;

        // Unlink from the parent so that repeated mount/unmount cycles do not accumulate ids.
        if let Some(parent) = parent {
            Scope { id: parent }.with_state(|state| state.children.retain(|id| *id != self.id));
        }

        // Drop effects. The callbacks are dropped after the runtime borrows are released because
        // they may own values that reach back into the runtime when dropped.
        let dropped_effects = RUNTIME.with(|rt| {
            let mut all_effects = rt.effects.borrow_mut();
            let mut all_signals = rt.signals.borrow_mut();
            effects
                .into_iter()
                .filter_map(|id| {
                    let effect = all_effects.remove(id)?;
                    for dependency in &effect.dependencies {
                        if let Some(signal) = all_signals.get_mut(*dependency) {
                            signal.subscribers.shift_remove(&id);
                        }
                    }
                    Some(effect)
                })
                .collect::<Vec<_>>()
        });
        drop(dropped_effects);

        // Drop child scopes.
        for child in children {
            Scope { id: child }.dispose();
        }

        // Call cleanup functions.
        for cb in cleanups {
            cb();
        }

        // Drop signals.
        let dropped_signals = RUNTIME.with(|rt| {
            let mut all_signals = rt.signals.borrow_mut();
            signals
                .into_iter()
                .filter_map(|id| all_signals.remove(id))
                .collect::<Vec<_>>()
        });
        drop(dropped_signals);
    }
}
