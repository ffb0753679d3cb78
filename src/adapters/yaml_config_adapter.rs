//! YAML file configuration adapter.

use crate::domain::config::{AppConfig, TICKERS_KEY};
use crate::domain::error::StockscanError;
use crate::ports::config_port::ConfigPort;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub struct YamlConfigAdapter {
    document: Value,
}

impl YamlConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StockscanError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|reason| StockscanError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })
    }

    pub fn from_string(content: &str) -> Result<Self, StockscanError> {
        Self::parse(content).map_err(|reason| StockscanError::ConfigParse {
            file: "<string>".to_string(),
            reason,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, StockscanError> {
        let document = serde_yaml::to_value(config).map_err(|e| StockscanError::ConfigParse {
            file: "<defaults>".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { document })
    }

    pub fn defaults() -> Result<Self, StockscanError> {
        Self::from_config(&AppConfig::default())
    }

    /// Reads `path`, or falls back to the built-in defaults when the file
    /// does not exist. A file that exists but cannot be parsed is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, StockscanError> {
        let path = path.as_ref();
        if path.exists() {
            tracing::info!(path = %path.display(), "loading config");
            Self::from_file(path)
        } else {
            tracing::info!(path = %path.display(), "config not found, using defaults");
            Self::defaults()
        }
    }

    fn parse(content: &str) -> Result<Self, String> {
        let document: Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        match document {
            Value::Mapping(_) | Value::Null => Ok(Self { document }),
            _ => Err("top level must be a mapping".to_string()),
        }
    }

    /// Replaces the ticker list, leaving every other key in place.
    pub fn set_tickers(&mut self, tickers: &[String]) {
        if !self.document.is_mapping() {
            self.document = Value::Mapping(Mapping::new());
        }
        if let Value::Mapping(map) = &mut self.document {
            let list = tickers.iter().cloned().map(Value::String).collect();
            map.insert(Value::String(TICKERS_KEY.to_string()), Value::Sequence(list));
        }
    }

    pub fn to_yaml(&self) -> Result<String, StockscanError> {
        serde_yaml::to_string(&self.document).map_err(|e| StockscanError::ConfigParse {
            file: "<document>".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StockscanError> {
        let path = path.as_ref();
        fs::write(path, self.to_yaml()?)?;
        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }

    fn scalar_to_string(value: &Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => serde_yaml::to_string(other)
                .ok()
                .map(|s| s.trim().to_string()),
        }
    }
}

impl ConfigPort for YamlConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.document
            .get(section)
            .and_then(|s| s.get(key))
            .and_then(Self::scalar_to_string)
    }

    fn get_integer(&self, section: &str, key: &str) -> Option<Result<i64, String>> {
        let value = self.document.get(section)?.get(key)?;
        match value {
            Value::Null => None,
            Value::Number(n) => Some(n.as_i64().ok_or_else(|| n.to_string())),
            other => Some(Err(Self::scalar_to_string(other).unwrap_or_default())),
        }
    }

    fn get_list(&self, key: &str) -> Option<Vec<String>> {
        match self.document.get(key)? {
            Value::Sequence(items) => {
                Some(items.iter().filter_map(Self::scalar_to_string).collect())
            }
            Value::Null => None,
            scalar => Self::scalar_to_string(scalar).map(|s| vec![s]),
        }
    }
}
