//! agenda-notify - desktop notifications for upcoming events.
//!
//! Scans the event document on a fixed tick and alerts once per event
//! when it enters its notification lead window. Read-only: the document
//! is never written, and the notified set is not persisted across runs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use agenda_core::EventCollection;
use agenda_core::notifier::Notifier;
use anyhow::Result;
use chrono::Local;
use clap::Parser;
use notify_rust::Notification;

const DEFAULT_EVENTS_PATH: &str = "data/events.json";

#[derive(Parser)]
#[command(
    name = "agenda-notify",
    about = "Desktop notifications for upcoming agenda events"
)]
struct Args {
    /// Path to the event document (falls back to AGENDA_EVENTS_PATH)
    #[arg(long)]
    events_path: Option<PathBuf>,

    /// Seconds between scans
    #[arg(long, default_value_t = 60)]
    interval: u64,

    /// Scan once and exit instead of looping
    #[arg(long)]
    once: bool,
}

impl Args {
    fn resolve_events_path(&self) -> PathBuf {
        self.events_path
            .clone()
            .or_else(|| std::env::var("AGENDA_EVENTS_PATH").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EVENTS_PATH))
    }
}

/// Load the document and raise a desktop alert for every event that
/// entered its lead window since the last scan.
fn scan(path: &Path, notifier: &mut Notifier) -> Result<()> {
    let collection = EventCollection::load(path)?;
    let due = notifier.tick(&collection.events, Local::now().naive_local());

    for alert in due {
        tracing::info!(event_id = %alert.event_id, title = %alert.title, "raising notification");
        Notification::new()
            .summary("Upcoming event")
            .body(&alert.message)
            .show()?;
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agenda_notify=info".into()),
        )
        .init();

    let args = Args::parse();
    let path = args.resolve_events_path();
    tracing::info!(path = %path.display(), interval = args.interval, "watching event document");

    let mut notifier = Notifier::new();

    loop {
        if let Err(err) = scan(&path, &mut notifier) {
            tracing::warn!(error = %err, "scan failed");
        }
        if args.once {
            break;
        }
        std::thread::sleep(Duration::from_secs(args.interval));
    }

    Ok(())
}
