//! Parameter-store abstraction (spec.md §6). Mirrors the shape of the
//! original `Params().get(...)` calls this planner polls at ~1 Hz.

use crate::error::ConfigSourceError;

/// A backend that can answer parameter-store lookups by key.
///
/// Implementations return the raw string value; typed helpers below parse
/// it the way the planner expects, so a new backend only has to implement
/// this one method.
pub trait ConfigSource: Send + Sync {
    fn get_string(&self, key: &str) -> Result<String, ConfigSourceError>;

    fn get_bool(&self, key: &str) -> Result<bool, ConfigSourceError> {
        match self.get_string(key)?.as_str() {
            "1" | "true" | "True" => Ok(true),
            "0" | "false" | "False" => Ok(false),
            other => Err(ConfigSourceError::Malformed {
                key: key.to_string(),
                value: other.to_string(),
            }),
        }
    }

    fn get_u8(&self, key: &str) -> Result<u8, ConfigSourceError> {
        let raw = self.get_string(key)?;
        raw.trim().parse::<u8>().map_err(|_| ConfigSourceError::Malformed {
            key: key.to_string(),
            value: raw,
        })
    }
}

/// `config`-crate-backed source: layered file + environment configuration,
/// the way the rest of this workspace's services load their settings.
pub struct FileConfigSource {
    inner: config::Config,
}

impl FileConfigSource {
    pub fn load(path: &str) -> Result<Self, ConfigSourceError> {
        let inner = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("LATERAL_PLANNER"))
            .build()?;
        Ok(Self { inner })
    }
}

impl ConfigSource for FileConfigSource {
    fn get_string(&self, key: &str) -> Result<String, ConfigSourceError> {
        self.inner
            .get_string(key)
            .map_err(|_| ConfigSourceError::Missing(key.to_string()))
    }
}

/// In-memory source for tests and for defaults before the first poll
/// succeeds.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigSource {
    values: std::collections::HashMap<String, String>,
}

impl StaticConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl ConfigSource for StaticConfigSource {
    fn get_string(&self, key: &str) -> Result<String, ConfigSourceError> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigSourceError::Missing(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_source_round_trips_typed_lookups() {
        let source = StaticConfigSource::new()
            .with("EndToEndToggle", "1")
            .with("LanelessMode", "2");
        assert!(source.get_bool("EndToEndToggle").unwrap());
        assert_eq!(source.get_u8("LanelessMode").unwrap(), 2);
    }

    #[test]
    fn missing_key_errors() {
        let source = StaticConfigSource::new();
        assert!(matches!(
            source.get_string("Missing"),
            Err(ConfigSourceError::Missing(_))
        ));
    }
}
