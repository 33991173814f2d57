//! Training-data manager: the cached record list, the pure search filter,
//! and the form-to-record builder.
//!
//! The cache is a transient full copy of the last `GET /training-data`
//! response; filtering is purely a view over that copy and never touches the
//! server.

use chrono::{DateTime, Utc};

use crate::api::{NewTrainingRecord, TrainingRecord};

#[derive(Debug, Default)]
pub struct TrainingState {
    /// Full replacement copy of the latest list response.
    pub records: Vec<TrainingRecord>,
    /// Current search term; applied view-side via [`filter_records`].
    pub search_term: String,
    /// True while a train-model request is in flight; blocks re-triggering.
    pub training_in_progress: bool,
    /// True when the last list request failed (renders "Veri yüklenemedi").
    pub load_failed: bool,
}

impl TrainingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The records matching the current search term.
    pub fn visible_records(&self) -> Vec<&TrainingRecord> {
        filter_records(&self.records, &self.search_term)
    }
}

/// Case-insensitive substring filter over intent, any question, or answer.
/// An empty term returns the full list.
pub fn filter_records<'a>(records: &'a [TrainingRecord], term: &str) -> Vec<&'a TrainingRecord> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| {
            r.intent.to_lowercase().contains(&needle)
                || r.questions.iter().any(|q| q.to_lowercase().contains(&needle))
                || r.answer.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Builds a record from raw form input: questions are comma-separated,
/// trimmed, with empty entries dropped; a blank intent is synthesized from
/// the current timestamp.
pub fn build_record(
    intent: &str,
    questions: &str,
    answer: &str,
    now: DateTime<Utc>,
) -> NewTrainingRecord {
    let questions: Vec<String> = questions
        .split(',')
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect();

    let intent = intent.trim();
    let intent = if intent.is_empty() {
        format!("custom_{}", now.timestamp_millis())
    } else {
        intent.to_string()
    };

    NewTrainingRecord {
        intent,
        questions,
        answer: answer.trim().to_string(),
        created_at: now.to_rfc3339(),
    }
}
