use tally::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    // Logging is optional: keep going without it.
    _ = tally::logging::init_console(log::Level::Debug);

    if let Err(err) = tally::render(|ctx| {
        let state = CounterState::new(ctx);
        instantiate(Counter, ctx, state)
    }) {
        tracing::error!(%err, "failed to mount the counter");
    }
}
