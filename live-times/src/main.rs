use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;
use live_times::domain::{LiveBus, LiveBusTimes, Prediction, StopCode};
use live_times::tracker::{ClientConfig, FixtureClient, TrackerClient};
use tracing_subscriber::EnvFilter;

/// Show live departures for one or more bus stops.
///
/// Reads `BUSTRACKER_API_KEY` (and optionally `BUSTRACKER_BASE_URL`) from
/// the environment unless `--fixtures` is given.
#[derive(Debug, Parser)]
#[command(name = "live-times", version, about)]
struct Args {
    /// Serve recorded responses from this directory instead of the API
    #[arg(long, value_name = "DIR")]
    fixtures: Option<PathBuf>,

    /// Stop codes to look up
    #[arg(required = true, value_name = "STOPCODE", value_parser = StopCode::from_str)]
    stops: Vec<StopCode>,
}

/// Short flag summary for one prediction, e.g. `est, terminus`.
fn flags(prediction: &impl Prediction) -> String {
    let mut flags = Vec::new();
    if prediction.is_estimated_time() {
        flags.push("est");
    }
    if prediction.is_delayed() {
        flags.push("delayed");
    }
    if prediction.is_diverted() {
        flags.push("diverted");
    }
    if prediction.is_terminus() {
        flags.push("terminus");
    }
    if prediction.is_part_route() {
        flags.push("part route");
    }
    flags.join(", ")
}

fn print_bus(bus: &LiveBus) {
    let flags = flags(bus);
    let when = bus.departure_time().format("%H:%M");
    if flags.is_empty() {
        println!("      {:>4} min  {when}  {}", bus.departure_minutes(), bus.destination());
    } else {
        println!(
            "      {:>4} min  {when}  {} ({flags})",
            bus.departure_minutes(),
            bus.destination()
        );
    }
}

fn print_times(times: &LiveBusTimes) {
    if times.has_global_disruption() {
        println!("Network-wide disruption in effect");
        println!();
    }

    if times.is_empty() {
        println!("No live times available");
        return;
    }

    for stop in times.stops() {
        let name = stop.stop_name().unwrap_or("(unnamed stop)");
        if stop.is_disrupted() {
            println!("{} {name} [disrupted]", stop.stop_code());
        } else {
            println!("{} {name}", stop.stop_code());
        }

        for service in stop.services() {
            let mut notes = Vec::new();
            if service.is_disrupted() {
                notes.push("disrupted");
            }
            if service.is_diverted() {
                notes.push("diverted");
            }
            match (service.route(), notes.is_empty()) {
                (Some(route), true) => println!("  {}  {route}", service.name()),
                (Some(route), false) => {
                    println!("  {}  {route} [{}]", service.name(), notes.join(", "))
                }
                (None, true) => println!("  {}", service.name()),
                (None, false) => println!("  {} [{}]", service.name(), notes.join(", ")),
            }

            for bus in service.buses() {
                print_bus(bus);
            }
        }
        println!();
    }
}

async fn run(args: Args) -> Result<LiveBusTimes, Box<dyn std::error::Error>> {
    if let Some(dir) = args.fixtures {
        let client = FixtureClient::new(dir)?;
        return Ok(client.get_bus_times(&args.stops)?);
    }

    let api_key = std::env::var("BUSTRACKER_API_KEY")
        .map_err(|_| "BUSTRACKER_API_KEY not set (or use --fixtures DIR)")?;

    let mut config = ClientConfig::new(api_key);
    if let Ok(url) = std::env::var("BUSTRACKER_BASE_URL") {
        config = config.with_base_url(url);
    }

    let client = TrackerClient::new(config)?;
    Ok(client.get_bus_times(&args.stops).await?)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(times) => {
            print_times(&times);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
