use expect_test::{expect, Expect};
use tally::generic_node::SsrNode;
use tally::prelude::*;
use tally::{render_to_string, view_to_string};

fn check_after(msgs: &[CounterMsg], expected: Expect) {
    let html = render_to_string(|ctx| {
        let state = CounterState::new(ctx);
        let view = instantiate(Counter, ctx, state.clone());
        for msg in msgs {
            state.dispatch(*msg);
        }
        view
    });
    expected.assert_eq(&html);
}

#[test]
fn mount_shows_zero() {
    check_after(
        &[],
        expect![[r#"<div>0</div><button>-</button><button>+</button>"#]],
    );
}

#[test]
fn click_plus_once() {
    check_after(
        &[CounterMsg::Increment],
        expect![[r#"<div>1</div><button>-</button><button>+</button>"#]],
    );
}

#[test]
fn three_plus_then_one_minus() {
    use CounterMsg::*;
    check_after(
        &[Increment, Increment, Increment, Decrement],
        expect![[r#"<div>2</div><button>-</button><button>+</button>"#]],
    );
}

#[test]
fn five_minus_from_initial() {
    check_after(
        &[CounterMsg::Decrement; 5],
        expect![[r#"<div>-5</div><button>-</button><button>+</button>"#]],
    );
}

#[test]
fn view_rerenders_on_every_update() {
    create_scope_immediate(|ctx| {
        let state = CounterState::new(ctx);
        let view: View<SsrNode> = instantiate(Counter, ctx, state.clone());
        assert_eq!(view.as_fragment().map(<[_]>::len), Some(3));

        let shown = || view_to_string(&view);
        assert!(shown().starts_with("<div>0</div>"));

        state.increment();
        assert!(shown().starts_with("<div>1</div>"));

        state.decrement();
        state.decrement();
        assert!(shown().starts_with("<div>-1</div>"));
    });
}

#[test]
fn render_is_idempotent() {
    create_scope_immediate(|ctx| {
        let state = CounterState::new(ctx);
        state.increment();
        let view: View<SsrNode> = instantiate(Counter, ctx, state.clone());

        let first = view_to_string(&view);
        for _ in 0..10 {
            assert_eq!(view_to_string(&view), first);
        }
        assert_eq!(state.get(), 1);
    });
}

#[test]
fn instantiate_does_not_subscribe_enclosing_effect() {
    let reads_value = |_: Scope, value: ReadSignal<i64>| -> View<SsrNode> {
        value.get();
        View::empty()
    };

    create_scope_immediate(|ctx| {
        let state = CounterState::new(ctx);
        let runs = ctx.create_signal(0);
        ctx.create_effect({
            let value = state.value();
            move || {
                runs.set(*runs.get_untracked() + 1);
                instantiate(reads_value, ctx, value);
            }
        });
        assert_eq!(*runs.get(), 1);

        state.increment();
        assert_eq!(*runs.get(), 1);
    });
}
