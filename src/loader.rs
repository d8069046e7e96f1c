use std::fs;

use crate::config::DataSource;
use crate::csv_rows::parse_records;
use crate::error::IngestError;
use crate::http_client::fetch_text;
use crate::normalize::{RejectionReport, normalize_with_report};
use crate::player::Player;

/// The session's immutable player collection plus how it was built.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub source: String,
    pub players: Vec<Player>,
    pub report: RejectionReport,
}

impl Dataset {
    /// Parse and normalize CSV text. Only a blank document is an error; bad rows are dropped
    /// and counted.
    pub fn from_csv(source: &str, text: &str) -> Result<Self, IngestError> {
        if text.trim().is_empty() {
            return Err(IngestError::MissingHeader(source.to_string()));
        }
        let rows = parse_records(text);
        let normalized = normalize_with_report(&rows);
        let report = normalized.report;
        log::info!(
            "loaded {source}: {} rows, {} players (unknown league {}, under minutes {}, duplicate {})",
            report.rows_seen,
            report.accepted,
            report.unknown_league,
            report.insufficient_minutes,
            report.duplicate,
        );
        Ok(Self {
            source: source.to_string(),
            players: normalized.players,
            report,
        })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }
}

pub fn read_source(source: &DataSource) -> Result<String, IngestError> {
    match source {
        DataSource::File(path) => {
            log::debug!("reading dataset from {path}");
            fs::read_to_string(path).map_err(|source| IngestError::Read {
                path: path.clone(),
                source,
            })
        }
        DataSource::Url(url) => {
            log::debug!("fetching dataset from {url}");
            fetch_text(url)
        }
    }
}

/// The single ingestion step: fetch once, parse, normalize.
pub fn load_dataset(source: &DataSource) -> Result<Dataset, IngestError> {
    let text = read_source(source)?;
    Dataset::from_csv(&source.to_string(), &text)
}
