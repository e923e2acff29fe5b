//! Host-supplied core configuration.
//!
//! # Responsibility
//! - Describe storage slot naming, id generation and logging defaults.
//! - Parse configuration handed over by the embedding host as JSON.
//!
//! # Invariants
//! - Every field has a default; an empty JSON object is a valid config.
//! - `slot_name` is never blank after parsing and never contains a path
//!   separator or `..`.

use crate::logging::default_log_level;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Default slot holding the serialized note collection.
pub const DEFAULT_SLOT_NAME: &str = "notes";

/// How fresh note ids are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Creation instant in epoch milliseconds, rendered as decimal text.
    ///
    /// Uniqueness is best-effort: two notes created in the same millisecond
    /// share an id.
    #[default]
    EpochMillis,
    /// Random v4 UUID text.
    Uuid,
}

impl IdStrategy {
    /// Produces the id for a note created at `now`.
    pub fn next_id(self, now: DateTime<Utc>) -> String {
        match self {
            Self::EpochMillis => now.timestamp_millis().to_string(),
            Self::Uuid => Uuid::new_v4().to_string(),
        }
    }
}

/// Configuration parse failure.
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    BlankSlotName,
    /// Slot name would escape or nest below the storage root.
    InvalidSlotName(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid core config: {err}"),
            Self::BlankSlotName => write!(f, "invalid core config: slot_name cannot be blank"),
            Self::InvalidSlotName(name) => write!(
                f,
                "invalid core config: slot_name `{name}` must not contain `/`, `\\` or `..`"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::BlankSlotName | Self::InvalidSlotName(_) => None,
        }
    }
}

/// Core runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Storage slot holding the note snapshot.
    pub slot_name: String,
    pub id_strategy: IdStrategy,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; logging stays off when unset.
    pub log_dir: Option<String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            slot_name: DEFAULT_SLOT_NAME.to_string(),
            id_strategy: IdStrategy::default(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Parses a JSON config blob, filling omitted fields with defaults.
    pub fn from_json_str(value: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(value).map_err(ConfigError::Json)?;
        let trimmed = config.slot_name.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::BlankSlotName);
        }
        if trimmed.contains(['/', '\\']) || trimmed.contains("..") {
            return Err(ConfigError::InvalidSlotName(trimmed.to_string()));
        }
        config.slot_name = trimmed.to_string();
        Ok(config)
    }

    /// Starts logging when `log_dir` is configured.
    ///
    /// Returns `Ok(false)` when no directory is set.
    pub fn init_logging(&self) -> Result<bool, String> {
        match self.log_dir.as_deref() {
            Some(dir) => crate::logging::init_logging(&self.log_level, dir).map(|()| true),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, IdStrategy, DEFAULT_SLOT_NAME};
    use chrono::{TimeZone, Utc};

    #[test]
    fn empty_object_uses_defaults() {
        let config = CoreConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.slot_name, DEFAULT_SLOT_NAME);
        assert_eq!(config.id_strategy, IdStrategy::EpochMillis);
    }

    #[test]
    fn parses_uuid_strategy_and_trims_slot() {
        let config =
            CoreConfig::from_json_str(r#"{"slot_name":" work ","id_strategy":"uuid"}"#).unwrap();
        assert_eq!(config.slot_name, "work");
        assert_eq!(config.id_strategy, IdStrategy::Uuid);
    }

    #[test]
    fn blank_slot_name_is_rejected() {
        let err = CoreConfig::from_json_str(r#"{"slot_name":"  "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::BlankSlotName));
    }

    #[test]
    fn slot_names_with_path_parts_are_rejected() {
        for raw in [
            r#"{"slot_name":"work/notes"}"#,
            r#"{"slot_name":"../escaped"}"#,
            r#"{"slot_name":"win\\notes"}"#,
        ] {
            let err = CoreConfig::from_json_str(raw).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidSlotName(_)),
                "accepted {raw}"
            );
        }
        assert!(CoreConfig::from_json_str(r#"{"slot_name":"work.notes"}"#).is_ok());
    }

    #[test]
    fn epoch_millis_ids_follow_the_clock() {
        let now = Utc.timestamp_millis_opt(1_760_000_000_123).unwrap();
        assert_eq!(IdStrategy::EpochMillis.next_id(now), "1760000000123");
    }

    #[test]
    fn init_logging_is_skipped_without_dir() {
        assert_eq!(CoreConfig::default().init_logging(), Ok(false));
    }
}
