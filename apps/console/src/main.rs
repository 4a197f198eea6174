use anyhow::{anyhow, bail, Result};
use clap::Parser;
use shared::{
    domain::{Algorithm, ElementState, Highlight, Phase, Speed},
    snapshot::StepSnapshot,
};
use sort_engine::{EngineEvent, SortController};
use tokio_stream::{wrappers::BroadcastStream, StreamExt};

#[derive(Parser, Debug)]
struct Args {
    /// Sort algorithm: bubble, selection, or insertion
    #[arg(long, default_value = "bubble")]
    algorithm: String,
    /// Animation speed, 1 (slowest) to 100 (fastest)
    #[arg(long, default_value_t = 50)]
    speed: u8,
    /// Comma-separated values to sort instead of a random sequence
    #[arg(long)]
    values: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let algorithm = parse_algorithm(&args.algorithm)?;
    let speed = Speed::new(args.speed)?;
    tracing::debug!(algorithm = %args.algorithm, speed = args.speed, "console renderer starting");

    let controller = match &args.values {
        Some(raw) => SortController::with_sequence(&parse_values(raw)?),
        None => SortController::new(),
    };
    controller.set_algorithm(algorithm).await;
    controller.set_speed(speed).await;

    let mut events = BroadcastStream::new(controller.subscribe_events());
    controller.start().await;

    while let Some(event) = events.next().await {
        match event {
            Ok(EngineEvent::Step(snapshot)) => render_step(&snapshot),
            Ok(EngineEvent::PhaseChanged(Phase::Completed)) => break,
            Ok(EngineEvent::PhaseChanged(_)) => {}
            // A lagging receiver only skips frames; the run is unaffected.
            Err(_) => continue,
        }
    }

    println!("{}", serde_json::to_string(&controller.state().await)?);
    Ok(())
}

fn parse_algorithm(raw: &str) -> Result<Algorithm> {
    match raw {
        "bubble" => Ok(Algorithm::Bubble),
        "selection" => Ok(Algorithm::Selection),
        "insertion" => Ok(Algorithm::Insertion),
        other => bail!("unknown algorithm '{other}' (expected bubble, selection, or insertion)"),
    }
}

fn parse_values(raw: &str) -> Result<Vec<u16>> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<u16>()
                .map_err(|err| anyhow!("invalid value '{}': {err}", part.trim()))
        })
        .collect()
}

const BAR_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

fn render_step(snapshot: &StepSnapshot) {
    let max = snapshot
        .elements
        .iter()
        .map(|element| element.value)
        .max()
        .unwrap_or(1)
        .max(1);
    let bars: String = snapshot
        .elements
        .iter()
        .map(|element| bar_glyph(element, max))
        .collect();
    let marks: String = snapshot.elements.iter().map(marker_glyph).collect();
    println!(
        "{bars}  cmp={} swp={}  {}",
        snapshot.comparisons, snapshot.swaps, snapshot.step_label
    );
    println!("{marks}");
}

fn bar_glyph(element: &ElementState, max: u16) -> char {
    let level = (usize::from(element.value) * (BAR_LEVELS.len() - 1)) / usize::from(max);
    BAR_LEVELS[level.min(BAR_LEVELS.len() - 1)]
}

fn marker_glyph(element: &ElementState) -> char {
    match element.highlight() {
        Highlight::Sorted => '=',
        Highlight::Swapping => 'x',
        Highlight::Comparing => '^',
        Highlight::Unsorted => ' ',
    }
}
