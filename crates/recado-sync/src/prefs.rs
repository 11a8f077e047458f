//! Persisted surface preferences
//!
//! Records when the user last dismissed or reopened each conversation so a
//! dismissed bubble stays closed across polls and restarts. A bubble is
//! suppressed while the dismissal is at least as new as the sender's latest
//! message and the conversation has not been reopened since; a newer
//! message always wins and brings the bubble back.
//!
//! Serialized as a small JSON document keyed by correspondent id string.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use recado_core::Snowflake;
use serde::{Deserialize, Serialize};

/// Errors loading or saving preferences.
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid preferences file: {0}")]
    Format(#[from] serde_json::Error),
}

/// Per-correspondent dismissal and reopen timestamps (unix millis).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurfacePrefs {
    #[serde(default)]
    closed_at: HashMap<String, i64>,
    #[serde(default)]
    opened_at: HashMap<String, i64>,
}

impl SurfacePrefs {
    /// Load preferences from a JSON file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, PrefsError> {
        match fs::read_to_string(path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist preferences to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), PrefsError> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }

    /// Record that the user dismissed this conversation's surface.
    pub fn mark_closed(&mut self, correspondent: Snowflake, at: DateTime<Utc>) {
        self.closed_at
            .insert(correspondent.to_string(), at.timestamp_millis());
    }

    /// Record that the user opened this conversation again.
    pub fn mark_opened(&mut self, correspondent: Snowflake, at: DateTime<Utc>) {
        self.opened_at
            .insert(correspondent.to_string(), at.timestamp_millis());
    }

    /// Whether the bubble for this correspondent should stay closed given
    /// their latest message timestamp.
    pub fn is_suppressed(&self, correspondent: Snowflake, latest_message_at: DateTime<Utc>) -> bool {
        let key = correspondent.to_string();
        let Some(&closed) = self.closed_at.get(&key) else {
            return false;
        };
        if closed < latest_message_at.timestamp_millis() {
            // The sender wrote after the dismissal.
            return false;
        }
        match self.opened_at.get(&key) {
            Some(&opened) => opened <= closed,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn fresh_prefs_suppress_nothing() {
        let prefs = SurfacePrefs::default();
        assert!(!prefs.is_suppressed(Snowflake::new(1), at(100)));
    }

    #[test]
    fn dismissal_after_latest_message_suppresses() {
        let mut prefs = SurfacePrefs::default();
        prefs.mark_closed(Snowflake::new(1), at(150));

        assert!(prefs.is_suppressed(Snowflake::new(1), at(100)));
        // Dismissal at the exact message time still counts.
        assert!(prefs.is_suppressed(Snowflake::new(1), at(150)));
    }

    #[test]
    fn newer_message_lifts_suppression() {
        let mut prefs = SurfacePrefs::default();
        prefs.mark_closed(Snowflake::new(1), at(150));

        assert!(!prefs.is_suppressed(Snowflake::new(1), at(200)));
    }

    #[test]
    fn reopening_lifts_suppression() {
        let mut prefs = SurfacePrefs::default();
        prefs.mark_closed(Snowflake::new(1), at(150));
        prefs.mark_opened(Snowflake::new(1), at(160));

        assert!(!prefs.is_suppressed(Snowflake::new(1), at(100)));
    }

    #[test]
    fn closing_again_after_reopen_suppresses_again() {
        let mut prefs = SurfacePrefs::default();
        prefs.mark_closed(Snowflake::new(1), at(150));
        prefs.mark_opened(Snowflake::new(1), at(160));
        prefs.mark_closed(Snowflake::new(1), at(170));

        assert!(prefs.is_suppressed(Snowflake::new(1), at(100)));
    }

    #[test]
    fn prefs_round_trip_through_disk() {
        let dir = std::env::temp_dir().join(format!("recado-prefs-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("prefs.json");

        let mut prefs = SurfacePrefs::default();
        prefs.mark_closed(Snowflake::new(42), at(500));
        prefs.mark_opened(Snowflake::new(7), at(300));
        prefs.save(&path).unwrap();

        let loaded = SurfacePrefs::load(&path).unwrap();
        assert!(loaded.is_suppressed(Snowflake::new(42), at(400)));
        assert!(!loaded.is_suppressed(Snowflake::new(7), at(400)));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn loading_a_missing_file_yields_defaults() {
        let path = Path::new("/definitely/not/here/prefs.json");
        let prefs = SurfacePrefs::load(path).unwrap();
        assert!(!prefs.is_suppressed(Snowflake::new(1), at(1)));
    }
}
