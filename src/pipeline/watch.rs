// src/pipeline/watch.rs

//! One watch run: read → extract → parse → filter → notify → persist.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::{Config, Credentials, MailConfig, NewRows, Policy};
use crate::services::{Digest, Mailer, SmtpMailer};
use crate::storage::{SeenSet, SeenStore};

use super::extract::{marked_rows, table_rows};
use super::filter::{filter_recent, filter_unseen};
use super::parse::{parse_rows, track_rows};

/// Where a rendered digest goes.
pub enum Outbox {
    /// Deliver through a configured mailer
    Mail(Box<dyn Mailer>),
    /// Mail is not configured; carries the reason
    Unavailable(AppError),
    /// Render only; neither send nor persist
    Preview,
}

impl Outbox {
    /// SMTP outbox for the given credentials.
    ///
    /// Only missing credentials are tolerated here; a malformed address or
    /// relay setting is returned as an error.
    pub fn smtp(mail: &MailConfig, credentials: Result<Credentials>) -> Result<Self> {
        match credentials {
            Ok(creds) => Ok(Outbox::Mail(Box::new(SmtpMailer::new(mail, &creds)?))),
            Err(missing @ AppError::MissingCredentials(_)) => Ok(Outbox::Unavailable(missing)),
            Err(e) => Err(e),
        }
    }
}

/// What happened to the digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    NothingNew,
    Sent,
    Skipped(String),
    Previewed(Digest),
}

/// Counters and outcome of a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub policy: Policy,
    pub started_at: DateTime<Utc>,
    /// Candidate rows found by the extractor
    pub scanned: usize,
    /// Rows the parser rejected
    pub rejected: usize,
    /// Rows that passed the novelty filter
    pub new_rows: usize,
    pub delivery: Delivery,
}

/// Rows selected by a scan together with extractor/parser counters.
#[derive(Debug, Clone)]
pub struct Scan {
    pub rows: NewRows,
    pub scanned: usize,
    pub rejected: usize,
}

/// Read the markdown source.
pub async fn read_source(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::unreadable_source(path.display().to_string(), e))
}

/// Listings posted within `max_age_minutes`.
pub fn scan_recent(markdown: &str, max_age_minutes: u64) -> Scan {
    let lines = table_rows(markdown);
    let scanned = lines.len();
    let report = parse_rows(lines);

    Scan {
        rows: NewRows::Recent(filter_recent(report.rows, max_age_minutes)),
        scanned,
        rejected: report.errors.len(),
    }
}

/// Marked rows whose identifiers are not in `seen`.
pub fn scan_unseen(markdown: &str, seen: &SeenSet) -> Scan {
    let lines = marked_rows(markdown);
    let scanned = lines.len();

    Scan {
        rows: NewRows::Unseen(filter_unseen(track_rows(lines), seen)),
        scanned,
        rejected: 0,
    }
}

/// Render and hand off a digest according to the outbox.
///
/// Missing mail configuration is fatal for the recency policy and a
/// logged skip for the seen policy.
async fn deliver(
    rows: &NewRows,
    config: &Config,
    outbox: Outbox,
    checked_at: DateTime<Utc>,
) -> Result<Delivery> {
    let Some(digest) = Digest::render(rows, &config.mail, checked_at) else {
        return Ok(Delivery::NothingNew);
    };

    match outbox {
        Outbox::Mail(mailer) => {
            mailer.send(&digest).await?;
            Ok(Delivery::Sent)
        }
        Outbox::Preview => Ok(Delivery::Previewed(digest)),
        Outbox::Unavailable(reason) => match config.watch.policy {
            Policy::Recency => Err(reason),
            Policy::Seen => {
                log::warn!("Email not sent: {}", reason);
                Ok(Delivery::Skipped(reason.to_string()))
            }
        },
    }
}

/// Execute one run of the configured policy.
pub async fn run_watch(config: &Config, store: &dyn SeenStore, outbox: Outbox) -> Result<RunSummary> {
    let started_at = Utc::now();
    let policy = config.watch.policy;
    let markdown = read_source(&config.source.path).await?;

    log::info!(
        "Scanning {} with {} policy",
        config.source.path.display(),
        policy
    );

    let (scan, delivery) = match policy {
        Policy::Recency => {
            let scan = scan_recent(&markdown, config.watch.max_age_minutes);
            let delivery = deliver(&scan.rows, config, outbox, started_at).await?;
            (scan, delivery)
        }
        Policy::Seen => {
            let mut seen = store.load().await;
            let scan = scan_unseen(&markdown, &seen);
            let delivery = deliver(&scan.rows, config, outbox, started_at).await?;

            if matches!(delivery, Delivery::Sent | Delivery::NothingNew) {
                if let NewRows::Unseen(rows) = &scan.rows {
                    seen.mark(rows);
                }
                store.save(&seen).await?;
            }
            (scan, delivery)
        }
    };

    if scan.rejected > 0 {
        log::info!("Skipped {} malformed rows", scan.rejected);
    }
    match &delivery {
        Delivery::NothingNew => log::info!("No new jobs among {} rows.", scan.scanned),
        Delivery::Sent => log::info!("Sent {} new job alerts.", scan.rows.len()),
        Delivery::Skipped(_) => log::info!("Found {} new jobs; email skipped.", scan.rows.len()),
        Delivery::Previewed(_) => log::info!("Previewed {} new jobs.", scan.rows.len()),
    }

    Ok(RunSummary {
        policy,
        started_at,
        scanned: scan.scanned,
        rejected: scan.rejected,
        new_rows: scan.rows.len(),
        delivery,
    })
}
