use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use crate::effect::{track_signal, trigger_subscribers};
use crate::*;

pub(crate) struct SignalState {
    pub(crate) value: Rc<dyn Any>,
    /// Effects to re-run when the value changes, in subscription order.
    pub(crate) subscribers: IndexSet<EffectId>,
}

/// A read-only handle to a reactive value.
///
/// Reading the value with [`get`](Self::get) inside an effect subscribes the effect to future
/// changes.
pub struct ReadSignal<T> {
    id: SignalId,
    /// `*const T` keeps the handle `!Send`: the runtime is thread-local.
    _phantom: PhantomData<*const T>,
}

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ReadSignal<T> {}

impl<T: 'static> ReadSignal<T> {
    /// Get the current value of the state and track it in the enclosing effect, if any.
    ///
    /// # Panics
    /// Panics if the scope owning the signal has been disposed.
    #[track_caller]
    pub fn get(&self) -> Rc<T> {
        self.track();
        self.get_untracked()
    }

    /// Get the current value of the state without tracking it.
    ///
    /// # Panics
    /// Panics if the scope owning the signal has been disposed.
    #[track_caller]
    pub fn get_untracked(&self) -> Rc<T> {
        self.try_get_untracked()
            .expect("signal accessed after its scope was disposed")
    }

    /// Like [`get_untracked`](Self::get_untracked), but returns `None` instead of panicking when
    /// the owning scope has been disposed.
    pub fn try_get_untracked(&self) -> Option<Rc<T>> {
        RUNTIME.with(|rt| {
            let value = rt.signals.borrow().get(self.id)?.value.clone();
            value.downcast::<T>().ok()
        })
    }

    /// Track the current signal in the enclosing effect.
    pub fn track(&self) {
        track_signal(self.id);
    }

    /// Returns `true` if the owning scope has not been disposed yet.
    pub fn is_alive(&self) -> bool {
        RUNTIME.with(|rt| rt.signals.borrow().contains_key(self.id))
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for ReadSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_get_untracked() {
            Some(value) => f.debug_tuple("ReadSignal").field(&value).finish(),
            None => f.write_str("ReadSignal(<disposed>)"),
        }
    }
}

/// Reactive state that can be updated.
///
/// A `Signal` dereferences to a [`ReadSignal`] for all the read operations.
pub struct Signal<T>(ReadSignal<T>);

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Signal<T> {}

impl<T: 'static> Signal<T> {
    pub(crate) fn new(id: SignalId) -> Self {
        Self(ReadSignal {
            id,
            _phantom: PhantomData,
        })
    }

    /// Set the current value of the state and re-run every subscribed effect.
    ///
    /// Does nothing if the owning scope has been disposed.
    pub fn set(&self, value: T) {
        self.set_silent(value);
        self.trigger_subscribers();
    }

    /// Set the current value of the state without notifying subscribers.
    pub fn set_silent(&self, value: T) {
        let old = RUNTIME.with(|rt| {
            let mut signals = rt.signals.borrow_mut();
            let state = signals.get_mut(self.0.id)?;
            Some(std::mem::replace(&mut state.value, Rc::new(value)))
        });
        // The previous value is dropped outside of the runtime borrow.
        drop(old);
    }

    /// Re-run every effect subscribed to this signal.
    pub fn trigger_subscribers(&self) {
        trigger_subscribers(self.0.id);
    }

    /// Get a read-only handle to this signal.
    pub fn handle(&self) -> ReadSignal<T> {
        self.0
    }
}

impl<T> Deref for Signal<T> {
    type Target = ReadSignal<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_get_untracked() {
            Some(value) => f.debug_tuple("Signal").field(&value).finish(),
            None => f.write_str("Signal(<disposed>)"),
        }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize + 'static> serde::Serialize for ReadSignal<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.try_get_untracked() {
            Some(value) => value.as_ref().serialize(serializer),
            None => Err(serde::ser::Error::custom(
                "signal accessed after its scope was disposed",
            )),
        }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize + 'static> serde::Serialize for Signal<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
