use std::{collections::HashMap, fmt::Display, str::FromStr};

use log::level_filters::LevelFilter;
use serde::{de::Error as _, Deserialize, Deserializer};
use thiserror::Error;
use tracing_subscriber::{
    filter::Targets, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, Layer,
};

use crate::{Formatting, MaybeSystemTime, TargetsExt};

pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Failed to install the global subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Logging configuration, usually read from a config file section like
///
/// ```toml
/// [log]
/// level = "debug"
/// timestamps = false
/// tags = { ordo_collections = "trace" }
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogSettings {
    /// Level of the ordo crates. Other crates log at [`DEFAULT_LEVEL`].
    #[serde(default, deserialize_with = "deserialize_string_option")]
    pub level: Option<LevelFilter>,
    #[serde(default = "LogSettings::default_timestamps")]
    pub timestamps: bool,
    /// Per-target level overrides.
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: HashMap<String, LevelFilter>,
}

impl LogSettings {
    fn default_timestamps() -> bool {
        true
    }

    /// Builds the target filter: defaults, then the ordo level, then tags,
    /// then `RUST_LOG`.
    pub fn targets(&self) -> Targets {
        Targets::new()
            .with_default(DEFAULT_LEVEL)
            .with_ordo_targets(self.level.unwrap_or(DEFAULT_LEVEL))
            .with_targets(self.tags.clone())
            .with_env()
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: None,
            timestamps: Self::default_timestamps(),
            tags: HashMap::new(),
        }
    }
}

/// Installs a global subscriber writing formatted events to stderr.
pub fn initialize_logging(settings: Option<&LogSettings>) -> Result<(), LogError> {
    let settings = settings.cloned().unwrap_or_default();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .event_format(Formatting(MaybeSystemTime(settings.timestamps)))
                .with_filter(settings.targets()),
        )
        .try_init()?;
    Ok(())
}

fn deserialize_string_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(ref value) => Ok(Some(T::from_str(value).map_err(D::Error::custom)?)),
    }
}

fn deserialize_tags<'de, D, T>(deserializer: D) -> Result<HashMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let str_tags = HashMap::<String, String>::deserialize(deserializer)?;
    let mut tags = HashMap::with_capacity(str_tags.len());
    for (k, v) in str_tags {
        tags.insert(k, T::from_str(&v).map_err(D::Error::custom)?);
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;

    #[test]
    fn it_deserializes_settings() {
        let settings: LogSettings = serde_json::from_str(
            r#"{"level": "debug", "timestamps": false, "tags": {"my_app": "trace"}}"#,
        )
        .unwrap();
        assert_eq!(settings.level, Some(LevelFilter::DEBUG));
        assert!(!settings.timestamps);
        assert_eq!(settings.tags.get("my_app"), Some(&LevelFilter::TRACE));
    }

    #[test]
    fn it_fills_in_defaults() {
        let settings: LogSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, LogSettings::default());
        assert!(settings.timestamps);
    }

    #[test]
    fn it_rejects_unknown_levels() {
        assert!(serde_json::from_str::<LogSettings>(r#"{"level": "loud"}"#).is_err());
        assert!(serde_json::from_str::<LogSettings>(r#"{"tags": {"a": "loud"}}"#).is_err());
    }

    #[test]
    fn tags_override_the_ordo_level() {
        let settings = LogSettings {
            level: Some(LevelFilter::WARN),
            timestamps: false,
            tags: HashMap::from([("ordo_collections".to_string(), LevelFilter::TRACE)]),
        };
        let targets = settings.targets();
        if std::env::var(crate::ENV).is_err() {
            assert!(targets.would_enable("ordo_collections", &Level::TRACE));
            assert!(!targets.would_enable("ordo_log", &Level::INFO));
        }
    }
}
