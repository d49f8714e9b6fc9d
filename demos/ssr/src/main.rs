use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tally::generic_node::SsrNode;
use tally::prelude::*;
use tally::view_to_string;
use tracing_subscriber::EnvFilter;

/// Render the counter to HTML after replaying a sequence of clicks.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Labels of the controls to click, in order, e.g. `++-`.
    #[arg(short, long, default_value_t = String::new())]
    clicks: String,
    /// Print a JSON snapshot with the value and the markup instead of bare HTML.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Snapshot {
    value: ReadSignal<i64>,
    html: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing();

    let clicks = parse_clicks(&args.clicks)?;
    tracing::info!(clicks = clicks.len(), json = args.json, "rendering counter");
    let mut output = Ok(String::new());
    create_scope_immediate(|ctx| {
        output = render(ctx, &clicks, args.json);
    });
    println!("{}", output?);

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .expect("`info` is a valid filter");

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_clicks(clicks: &str) -> anyhow::Result<Vec<CounterMsg>> {
    clicks
        .chars()
        .map(|c| {
            CounterMsg::from_label(c.encode_utf8(&mut [0; 4]))
                .with_context(|| format!("no control is labelled `{c}`"))
        })
        .collect()
}

fn render(ctx: Scope, clicks: &[CounterMsg], json: bool) -> anyhow::Result<String> {
    let state = CounterState::new(ctx);
    let view: View<SsrNode> = instantiate(Counter, ctx, state.clone());
    for msg in clicks {
        state.dispatch(*msg);
    }

    let html = view_to_string(&view);
    if !json {
        return Ok(html);
    }
    let snapshot = Snapshot {
        value: state.value(),
        html,
    };
    serde_json::to_string_pretty(&snapshot).context("failed to serialize the snapshot")
}
