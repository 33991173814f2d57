//! Relative-time labels for the conversation list, matching the admin
//! panel's Turkish wording: "Az önce", "n dakika önce", "n saat önce",
//! "n gün önce". Bucket counts are floor divisions of the elapsed time.

use chrono::{DateTime, Utc};
use log::debug;

const MINUTE_SECS: i64 = 60;
const HOUR_SECS: i64 = 3600;
const DAY_SECS: i64 = 86400;

/// Formats the elapsed time between `then` and `now` as a Turkish
/// relative-time label. A `then` in the future clamps to "Az önce".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed_secs = (now - then).num_seconds().max(0);

    if elapsed_secs < MINUTE_SECS {
        "Az önce".to_string()
    } else if elapsed_secs < HOUR_SECS {
        format!("{} dakika önce", elapsed_secs / MINUTE_SECS)
    } else if elapsed_secs < DAY_SECS {
        format!("{} saat önce", elapsed_secs / HOUR_SECS)
    } else {
        format!("{} gün önce", elapsed_secs / DAY_SECS)
    }
}

/// Parses an ISO-8601 timestamp and formats it relative to `now`.
///
/// The original panel fed unparseable timestamps through `Date` arithmetic
/// and displayed NaN-derived text; that behavior is undefined, so here an
/// unparseable timestamp falls back to "Az önce".
pub fn time_ago_from_str(timestamp: &str, now: DateTime<Utc>) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(then) => time_ago(then.with_timezone(&Utc), now),
        Err(e) => {
            debug!("Unparseable timestamp {:?}: {}", timestamp, e);
            "Az önce".to_string()
        }
    }
}
