//! Query a running envwatch server from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use envwatch_cli::EnvwatchClient;
use envwatch_core::{compose_prompt, AssistantMode, Coordinate, WeatherObservation};

/// Environmental hazard reports for a location
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// envwatch server URL
    #[arg(long, env = "ENVWATCH_URL", default_value = "http://localhost:8002")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the report for a location
    Report {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Print pretty JSON instead of summary lines
        #[arg(long)]
        json: bool,
    },
    /// Ask the assistant a question with the location's report as context
    Ask {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, value_enum, default_value_t = Mode::Disaster)]
        mode: Mode,
        /// Print the composed prompt without sending it
        #[arg(long)]
        dry_run: bool,
        message: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Disaster,
    Firstaid,
    Mental,
}

impl From<Mode> for AssistantMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Disaster => AssistantMode::Disaster,
            Mode::Firstaid => AssistantMode::FirstAid,
            Mode::Mental => AssistantMode::Mental,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = EnvwatchClient::new(&args.url);

    match args.command {
        Command::Report { lat, lon, json } => {
            let point = Coordinate::new(lat, lon)?;
            let report = client.report(&point).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let air = match (report.air_quality.aqi, report.air_quality.category) {
                    (Some(aqi), Some(category)) => format!("{aqi} ({category})"),
                    _ => "unknown".to_string(),
                };
                let power = match report.power_outage {
                    Some(true) => "outage reported",
                    Some(false) => "no outage",
                    None => "unknown",
                };
                println!("Report for {lat}, {lon} at {}", report.timestamp);
                println!("  Air quality: {air}");
                println!("  {}", report.flood_risk);
                if let Some(name) = report.flood_risk.station_name.as_deref() {
                    println!("  Nearest gauge: {name}");
                }
                println!("  Power: {power}");
                let weather = WeatherObservation {
                    conditions: report.weather.conditions.clone(),
                    temperature_celsius: report.weather.temperature_celsius,
                };
                println!("  {weather}");
            }
        }
        Command::Ask {
            lat,
            lon,
            mode,
            dry_run,
            message,
        } => {
            let point = Coordinate::new(lat, lon)?;
            let report = client.report(&point).await?;
            let prompt = compose_prompt(
                mode.into(),
                &report.status_context(Some(&point)),
                &message,
            );
            if dry_run {
                println!("{prompt}");
            } else {
                println!("{}", client.analyze(&prompt).await?);
            }
        }
    }

    Ok(())
}
