use std::env;
use std::sync::Arc;
use std::time::Duration;

use alert_api::{AlertApiRepository, ApiConfig, ConfigurationProvider};
use alert_core::{AlertError, AlertRepository};
use alert_monitor::{
    CancellationToken, RegionAlertEvent, RegionAlertMonitor, StatusUpdatesMonitor,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_INTERVAL_MS: u64 = 1000;

const USAGE: &str = "Usage:
  alert-console regions
  alert-console snapshot
  alert-console track <region name|number> [interval_ms]";

enum Command {
    Regions,
    Snapshot,
    Track { region: String, interval: Duration },
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Option<Command> {
    match args.next()?.as_str() {
        "regions" => Some(Command::Regions),
        "snapshot" => Some(Command::Snapshot),
        "track" => {
            let region = args.next()?;
            let interval_ms = match args.next() {
                Some(value) => value.parse().ok()?,
                None => DEFAULT_INTERVAL_MS,
            };
            Some(Command::Track {
                region,
                interval: Duration::from_millis(interval_ms),
            })
        }
        _ => None,
    }
}

/// Accept either a configured name or its 1-based position from `regions`.
fn resolve_region(config: &ApiConfig, region: &str) -> Result<String, AlertError> {
    let names = config.region_names()?;

    if let Ok(number) = region.parse::<usize>() {
        if let Some(name) = number.checked_sub(1).and_then(|i| names.get(i)) {
            return Ok(name.clone());
        }
    }

    Ok(region.to_string())
}

fn print_checked(event: &RegionAlertEvent) {
    let RegionAlertEvent::Checked(status) = event else {
        return;
    };

    if status.is_alert {
        println!("There is an air alert in {}!", status.region_name);
    } else {
        println!("There are no air alerts in {}.", status.region_name);
    }
}

async fn track(
    repository: Arc<dyn AlertRepository>,
    region: &str,
    interval: Duration,
) -> Result<(), AlertError> {
    let token = CancellationToken::new();

    let mut region_monitor = RegionAlertMonitor::new(Arc::clone(&repository));
    region_monitor.subscribe(print_checked);
    region_monitor.subscribe(|event| {
        if let RegionAlertEvent::Changed(status) = event {
            info!(region = %status.region_name, is_alert = status.is_alert, "Alert status changed");
        }
    });

    let mut status_monitor = StatusUpdatesMonitor::new(repository);
    status_monitor.subscribe(|_| info!("Upstream alert data updated"));

    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, stopping");
        }
        ctrl_c.cancel();
    });

    println!("Tracking {} every {:?}. Press Ctrl-C to stop.", region, interval);

    let region_token = token.clone();
    let status_token = token.clone();
    let (region_result, status_result) = tokio::join!(
        async {
            let result = region_monitor.start_tracking(region, interval, region_token).await;
            token.cancel();
            result
        },
        async {
            let result = status_monitor.start_tracking(interval, status_token).await;
            if let Err(e) = &result {
                warn!("Status tracking failed: {}", e);
            }
            result
        }
    );

    region_result?;
    status_result
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let command = match parse_args(env::args().skip(1)) {
        Some(command) => command,
        None => {
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    let config = ApiConfig::from_env()?;

    match command {
        Command::Regions => {
            for (i, name) in config.region_names()?.iter().enumerate() {
                println!("{} - {}", i + 1, name);
            }
        }
        Command::Snapshot => {
            let repository = AlertApiRepository::connect(config)?;
            let monitor = RegionAlertMonitor::new(Arc::new(repository));
            let statuses = monitor.get_all_regions_alert_status().await?;
            println!("{}", serde_json::to_string_pretty(&statuses)?);
        }
        Command::Track { region, interval } => {
            let region = resolve_region(&config, &region)?;
            let repository = AlertApiRepository::connect(config)?;

            if let Err(e) = track(Arc::new(repository), &region, interval).await {
                eprintln!("There was an error: {}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
