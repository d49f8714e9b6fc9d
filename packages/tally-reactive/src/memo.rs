use std::cell::Cell;

use crate::*;

impl Scope {
    /// Creates a memoized value from some signals. Also know as "derived stores".
    ///
    /// # Example
    /// ```
    /// # use tally_reactive::*;
    /// # create_scope_immediate(|ctx| {
    /// let state = ctx.create_signal(0);
    ///
    /// let double = ctx.create_memo(move || *state.get() * 2);
    /// assert_eq!(*double.get(), 0);
    ///
    /// state.set(1);
    /// assert_eq!(*double.get(), 2);
    /// # });
    /// ```
    pub fn create_memo<U: 'static>(self, f: impl FnMut() -> U + 'static) -> ReadSignal<U> {
        self.create_selector_with(f, |_, _| false)
    }

    /// Creates a memoized value from some signals. Also know as "derived stores".
    /// Unlike [`create_memo`](Self::create_memo), this function will not notify dependents of a
    /// change if the output is the same. That is why the output of the function must implement
    /// [`PartialEq`].
    ///
    /// To specify a custom comparison function, use
    /// [`create_selector_with`](Self::create_selector_with).
    pub fn create_selector<U: PartialEq + 'static>(
        self,
        f: impl FnMut() -> U + 'static,
    ) -> ReadSignal<U> {
        self.create_selector_with(f, PartialEq::eq)
    }

    /// Creates a memoized value from some signals. Also know as "derived stores".
    /// Unlike [`create_memo`](Self::create_memo), this function will not notify dependents of a
    /// change if the output is the same.
    ///
    /// It takes a comparison function to compare the old and new value, which returns `true` if
    /// they are the same and `false` otherwise.
    ///
    /// To use the type's [`PartialEq`] implementation instead of a custom function, use
    /// [`create_selector`](Self::create_selector).
    pub fn create_selector_with<U: 'static>(
        self,
        mut f: impl FnMut() -> U + 'static,
        eq_f: impl Fn(&U, &U) -> bool + 'static,
    ) -> ReadSignal<U> {
        let signal: Rc<Cell<Option<Signal<U>>>> = Default::default();

        self.create_effect({
            let signal = signal.clone();
            move || {
                let new = f();
                if let Some(signal) = signal.get() {
                    // Check if new value is different from old value.
                    if !eq_f(&new, &signal.get_untracked()) {
                        signal.set(new);
                    }
                } else {
                    signal.set(Some(self.create_signal(new)));
                }
            }
        });

        signal
            .get()
            .expect("selector effect runs once on creation")
            .handle()
    }

    /// An alternative to [`create_signal`](Self::create_signal) that uses a reducer to get the
    /// next value.
    ///
    /// It uses a reducer function that takes the previous value and a message and returns the
    /// next value.
    ///
    /// Returns a [`ReadSignal`] and a dispatch function to send messages to the reducer.
    ///
    /// # Params
    /// * `initial` - The initial value of the state.
    /// * `reducer` - A function that takes the previous value and a message and returns the next
    ///   value.
    ///
    /// # Example
    /// ```
    /// # use tally_reactive::*;
    /// enum Msg {
    ///     Increment,
    ///     Decrement,
    /// }
    ///
    /// # create_scope_immediate(|ctx| {
    /// let (state, dispatch) = ctx.create_reducer(0, |state, msg: Msg| match msg {
    ///     Msg::Increment => *state + 1,
    ///     Msg::Decrement => *state - 1,
    /// });
    ///
    /// assert_eq!(*state.get(), 0);
    /// dispatch(Msg::Increment);
    /// assert_eq!(*state.get(), 1);
    /// dispatch(Msg::Decrement);
    /// assert_eq!(*state.get(), 0);
    /// # });
    /// ```
    pub fn create_reducer<U: 'static, Msg>(
        self,
        initial: U,
        reduce: impl Fn(&U, Msg) -> U + 'static,
    ) -> (ReadSignal<U>, Rc<impl Fn(Msg)>) {
        let memo = self.create_signal(initial);

        let dispatcher = move |msg| {
            memo.set(reduce(&memo.get_untracked(), msg));
        };

        (memo.handle(), Rc::new(dispatcher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memo() {
        create_scope_immediate(|ctx| {
            let state = ctx.create_signal(0);

            let double = ctx.create_memo(move || *state.get() * 2);
            assert_eq!(*double.get(), 0);

            state.set(1);
            assert_eq!(*double.get(), 2);

            state.set(2);
            assert_eq!(*double.get(), 4);
        });
    }

    /// Make sure value is memoized rather than executed on demand.
    #[test]
    fn memo_only_run_once() {
        create_scope_immediate(|ctx| {
            let state = ctx.create_signal(0);

            let counter = ctx.create_signal(0);
            let double = ctx.create_memo(move || {
                counter.set(*counter.get_untracked() + 1);
                *state.get() * 2
            });

            assert_eq!(*counter.get(), 1); // once for calculating initial derived state
            state.set(2);
            assert_eq!(*counter.get(), 2);
            assert_eq!(*double.get(), 4);
            assert_eq!(*counter.get(), 2); // should still be 2 after access
        });
    }

    #[test]
    fn dependency_on_memo() {
        create_scope_immediate(|ctx| {
            let state = ctx.create_signal(0);

            let double = ctx.create_memo(move || *state.get() * 2);
            let quadruple = ctx.create_memo(move || *double.get() * 2);

            assert_eq!(*quadruple.get(), 0);

            state.set(1);
            assert_eq!(*quadruple.get(), 4);
        });
    }

    #[test]
    fn selector() {
        create_scope_immediate(|ctx| {
            let state = ctx.create_signal(0);
            let double = ctx.create_selector(move || *state.get() * 2);

            let counter = ctx.create_signal(0);
            ctx.create_effect(move || {
                counter.set(*counter.get_untracked() + 1);
                double.track();
            });
            assert_eq!(*double.get(), 0);
            assert_eq!(*counter.get(), 1);

            state.set(0);
            assert_eq!(*double.get(), 0);
            assert_eq!(*counter.get(), 1); // calling set with same value should not trigger the effect

            state.set(2);
            assert_eq!(*double.get(), 4);
            assert_eq!(*counter.get(), 2);
        });
    }

    #[test]
    fn selector_with_custom_eq() {
        create_scope_immediate(|ctx| {
            let state = ctx.create_signal(0);
            let parity = ctx.create_selector_with(move || *state.get(), |a, b| a % 2 == b % 2);

            state.set(2);
            assert_eq!(*parity.get(), 0); // same parity, not updated

            state.set(3);
            assert_eq!(*parity.get(), 3);
        });
    }

    #[test]
    fn reducer() {
        pub enum Msg {
            Increment,
            Decrement,
        }

        create_scope_immediate(|ctx| {
            let (state, dispatch) = ctx.create_reducer(0, |state, msg: Msg| match msg {
                Msg::Increment => *state + 1,
                Msg::Decrement => *state - 1,
            });

            assert_eq!(*state.get(), 0);
            dispatch(Msg::Increment);
            assert_eq!(*state.get(), 1);
            dispatch(Msg::Decrement);
            assert_eq!(*state.get(), 0);
            dispatch(Msg::Increment);
            dispatch(Msg::Increment);
            assert_eq!(*state.get(), 2);
        });
    }

    #[test]
    fn memo_after_reducer() {
        create_scope_immediate(|ctx| {
            let (state, dispatch) = ctx.create_reducer(0, |state, delta: i32| *state + delta);
            let doubled = ctx.create_memo(move || *state.get() * 2);

            dispatch(5);
            assert_eq!(*doubled.get(), 10);
        });
    }
}
