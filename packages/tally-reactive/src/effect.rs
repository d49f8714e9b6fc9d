use crate::*;

pub(crate) struct EffectState {
    /// The callback when the effect is re-executed.
    cb: Rc<RefCell<dyn FnMut()>>,
    pub(crate) dependencies: IndexSet<SignalId>,
}

impl Scope {
    /// Creates an effect on signals used inside the effect closure.
    ///
    /// The closure runs once immediately and then again every time one of the signals it read
    /// with [`get`](ReadSignal::get) is updated. Dependencies are recollected on every run.
    ///
    /// # Example
    /// ```
    /// # use std::cell::Cell;
    /// # use std::rc::Rc;
    /// # use tally_reactive::*;
    /// # create_scope_immediate(|ctx| {
    /// let state = ctx.create_signal(0);
    /// let seen = Rc::new(Cell::new(-1));
    ///
    /// ctx.create_effect({
    ///     let seen = seen.clone();
    ///     move || seen.set(*state.get())
    /// });
    /// assert_eq!(seen.get(), 0);
    ///
    /// state.set(1);
    /// assert_eq!(seen.get(), 1);
    /// # });
    /// ```
    pub fn create_effect(self, f: impl FnMut() + 'static) {
        let cb: Rc<RefCell<dyn FnMut()>> = Rc::new(RefCell::new(f));
        let id = RUNTIME.with(|rt| {
            rt.effects.borrow_mut().insert(EffectState {
                cb,
                dependencies: IndexSet::new(),
            })
        });
        self.with_state(|state| state.effects.push(id));

        // Initial callback call to get everything started.
        run_effect(id);
    }
}

/// Run the passed closure without tracking any of the signals read inside it.
///
/// # Example
/// ```
/// # use tally_reactive::*;
/// # create_scope_immediate(|ctx| {
/// let state = ctx.create_signal(1);
/// let double = ctx.create_memo(move || untrack(|| *state.get() * 2));
/// assert_eq!(*double.get(), 2);
///
/// state.set(2);
/// // double was not subscribed to state.
/// assert_eq!(*double.get(), 2);
/// # });
/// ```
pub fn untrack<T>(f: impl FnOnce() -> T) -> T {
    let _guard = TrackerGuard::push(None);
    f()
}

/// Keeps an entry on the tracker stack for as long as it is alive, including while unwinding.
struct TrackerGuard;

impl TrackerGuard {
    fn push(entry: Option<EffectId>) -> Self {
        RUNTIME.with(|rt| rt.tracker.borrow_mut().push(entry));
        TrackerGuard
    }
}

impl Drop for TrackerGuard {
    fn drop(&mut self) {
        // The runtime may already be gone if this runs during thread teardown.
        let _ = RUNTIME.try_with(|rt| rt.tracker.borrow_mut().pop());
    }
}

/// Clears the dependencies (both links and backlinks) of an effect.
fn clear_dependencies(id: EffectId) {
    RUNTIME.with(|rt| {
        let mut effects = rt.effects.borrow_mut();
        let Some(effect) = effects.get_mut(id) else {
            return;
        };
        let mut signals = rt.signals.borrow_mut();
        for dependency in effect.dependencies.drain(..) {
            if let Some(signal) = signals.get_mut(dependency) {
                signal.subscribers.shift_remove(&id);
            }
        }
    });
}

pub(crate) fn run_effect(id: EffectId) {
    let Some(cb) = RUNTIME.with(|rt| rt.effects.borrow().get(id).map(|effect| effect.cb.clone()))
    else {
        return;
    };
    // Might already be inside the callback if the effect updates one of its own dependencies.
    // Do nothing in that case instead of looping forever.
    let Ok(mut f) = cb.try_borrow_mut() else {
        return;
    };

    clear_dependencies(id);
    // Push the effect onto the tracker stack so that it is visible by signals.
    let _guard = TrackerGuard::push(Some(id));
    (*f)();
}

/// Track the signal in the effect at the top of the tracker stack, if any.
pub(crate) fn track_signal(signal: SignalId) {
    RUNTIME.with(|rt| {
        let Some(Some(id)) = rt.tracker.borrow().last().copied() else {
            return;
        };
        if let Some(effect) = rt.effects.borrow_mut().get_mut(id) {
            effect.dependencies.insert(signal);
            if let Some(state) = rt.signals.borrow_mut().get_mut(signal) {
                state.subscribers.insert(id);
            }
        }
    });
}

pub(crate) fn trigger_subscribers(signal: SignalId) {
    // Clone subscribers to prevent modifying list when calling callbacks.
    let subscribers: Vec<EffectId> = RUNTIME.with(|rt| {
        rt.signals
            .borrow()
            .get(signal)
            .map(|state| state.subscribers.iter().copied().collect())
            .unwrap_or_default()
    });
    // Reverse order of subscribers to trigger outer effects before inner effects.
    for id in subscribers.into_iter().rev() {
        run_effect(id);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn effect() {
        create_scope_immediate(|ctx| {
            let state = ctx.create_signal(0);
            let double = ctx.create_signal(-1);

            ctx.create_effect(move || double.set(*state.get() * 2));
            assert_eq!(*double.get(), 0); // calling create_effect should call the effect at least once

            state.set(1);
            assert_eq!(*double.get(), 2);
            state.set(2);
            assert_eq!(*double.get(), 4);
        });
    }

    #[test]
    fn effect_cannot_create_infinite_loop() {
        create_scope_immediate(|ctx| {
            let state = ctx.create_signal(0);
            ctx.create_effect(move || {
                state.track();
                state.set(0);
            });
            state.set(0);
        });
    }

    #[test]
    fn effect_should_only_subscribe_once_to_same_signal() {
        create_scope_immediate(|ctx| {
            let state = ctx.create_signal(0);
            let counter = Rc::new(Cell::new(0));

            ctx.create_effect({
                let counter = counter.clone();
                move || {
                    counter.set(counter.get() + 1);

                    // call state.get() twice but should subscribe once
                    state.get();
                    state.get();
                }
            });

            assert_eq!(counter.get(), 1);

            state.set(1);
            assert_eq!(counter.get(), 2);
        });
    }

    #[test]
    fn effect_should_recreate_dependencies() {
        create_scope_immediate(|ctx| {
            let condition = ctx.create_signal(true);
            let state1 = ctx.create_signal(0);
            let state2 = ctx.create_signal(1);
            let counter = Rc::new(Cell::new(0));

            ctx.create_effect({
                let counter = counter.clone();
                move || {
                    counter.set(counter.get() + 1);

                    if *condition.get() {
                        state1.track();
                    } else {
                        state2.track();
                    }
                }
            });

            assert_eq!(counter.get(), 1);

            state1.set(1);
            assert_eq!(counter.get(), 2);

            state2.set(1);
            assert_eq!(counter.get(), 2); // not tracked

            condition.set(false);
            assert_eq!(counter.get(), 3);

            state1.set(2);
            assert_eq!(counter.get(), 3); // not tracked

            state2.set(2);
            assert_eq!(counter.get(), 4); // tracked after condition.set
        });
    }

    #[test]
    fn tracker_is_restored_when_effect_panics() {
        let result = std::panic::catch_unwind(|| {
            create_scope_immediate(|ctx| {
                ctx.create_effect(|| panic!("effect failed"));
            });
        });
        assert!(result.is_err());
        RUNTIME.with(|rt| assert!(rt.tracker.borrow().is_empty()));

        // Reads outside of any effect must not be attributed to the effect that panicked.
        create_scope_immediate(|ctx| {
            let state = ctx.create_signal(0);
            state.get();
            assert!(state.is_alive());
        });
    }

    #[test]
    fn tracker_is_restored_when_untracked_closure_panics() {
        let result = std::panic::catch_unwind(|| untrack(|| panic!("untracked failed")));
        assert!(result.is_err());
        RUNTIME.with(|rt| assert!(rt.tracker.borrow().is_empty()));
    }

    #[test]
    fn untracked_read_does_not_subscribe() {
        create_scope_immediate(|ctx| {
            let state = ctx.create_signal(0);
            let counter = Rc::new(Cell::new(0));

            ctx.create_effect({
                let counter = counter.clone();
                move || {
                    counter.set(counter.get() + 1);
                    state.get_untracked();
                    untrack(|| state.get());
                }
            });
            assert_eq!(counter.get(), 1);

            state.set(1);
            assert_eq!(counter.get(), 1);
        });
    }
}
