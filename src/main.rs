use anyhow::Context;
use clap::Parser;
use heartwatch::{Alert, DetectionConfig, HeartbeatEvent, InputError, MissedHeartbeatDetector};
use heartwatch::sample::sample_events;
use log::{error, info, warn};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Command-line arguments for the heartbeat analyzer
#[derive(Parser)]
#[command(
    name = "heartwatch",
    about = "Report services that missed heartbeats beyond a tolerance",
    long_about = "Analyzes a batch of service heartbeat events and reports, per service, the \
                  earliest point at which an expected heartbeat was missed. Without --events \
                  the built-in sample dataset is analyzed."
)]
struct Cli {
    /// Path to a JSON array of heartbeat events
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "JSON file with an array of {service, timestamp} events ('-' reads stdin)"
    )]
    events: Option<PathBuf>,

    /// Expected seconds between heartbeats
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        default_value_t = 60.0,
        allow_negative_numbers = true
    )]
    interval: f64,

    /// Consecutive heartbeats a service may miss before an alert
    #[arg(
        short = 'm',
        long,
        value_name = "N",
        default_value_t = 3,
        allow_negative_numbers = true
    )]
    allowed_misses: i64,

    /// Enable verbose logging
    #[arg(
        short,
        long,
        help = "Enable verbose logging output (sets RUST_LOG=debug)"
    )]
    verbose: bool,
}

impl Cli {
    /// Validate the CLI arguments
    ///
    /// # Returns
    ///
    /// `Ok(())` if all arguments are valid, `Err(String)` with error message otherwise
    fn validate(&self) -> Result<(), String> {
        if let Some(ref path) = self.events {
            if path != Path::new("-") && path.is_dir() {
                return Err(format!("Events path is a directory: {}", path.display()));
            }
        }

        Ok(())
    }

    fn detection_config(&self) -> DetectionConfig {
        DetectionConfig::new(self.interval, self.allowed_misses)
    }
}

/// Load heartbeat events from a file, or from stdin when the path is `-`
///
/// The document must be a JSON array. Elements that are not objects become empty
/// events, which validation later discards like any other malformed event.
///
/// # Errors
///
/// Returns `InputError::ReadError` if the file cannot be read and
/// `InputError::ParseError` if the document is not a JSON array.
fn load_events(path: &Path) -> Result<Vec<HeartbeatEvent>, InputError> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| InputError::ReadError(format!("{}: {}", path.display(), e)))?
    };

    parse_events(&content)
}

fn parse_events(content: &str) -> Result<Vec<HeartbeatEvent>, InputError> {
    let document: Value = serde_json::from_str(content)?;

    let elements = match document {
        Value::Array(elements) => elements,
        other => {
            return Err(InputError::ParseError(format!(
                "expected a JSON array of events, found {}",
                json_kind(&other)
            )))
        }
    };

    Ok(elements
        .into_iter()
        .map(|element| match element {
            Value::Object(_) => serde_json::from_value(element).unwrap_or_default(),
            _ => HeartbeatEvent::default(),
        })
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Run detection and render the alerts as pretty-printed JSON
fn render_alerts(events: &[HeartbeatEvent], config: DetectionConfig) -> anyhow::Result<String> {
    let alerts: Vec<Alert> = MissedHeartbeatDetector::new(config).detect(events);
    serde_json::to_string_pretty(&alerts).context("Failed to serialize alerts")
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.detection_config();
    if let Err(e) = config.validate() {
        warn!("{}; running detection with the given values anyway", e);
    }

    let events = match cli.events {
        Some(ref path) => {
            info!("Loading events from: {}", path.display());
            load_events(path)
                .with_context(|| format!("Failed to load events from {}", path.display()))?
        }
        None => {
            info!("Using the built-in sample dataset");
            sample_events()
        }
    };

    let output = render_alerts(&events, config)?;
    println!("{}", output);
    Ok(())
}

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    if cli.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }
    env_logger::init();

    if let Err(e) = cli.validate() {
        error!("Invalid arguments: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
