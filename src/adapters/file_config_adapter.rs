//! INI file configuration adapter.

use crate::domain::error::DcalabError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DcalabError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| DcalabError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, DcalabError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| DcalabError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn bad_value(section: &str, key: &str, expected: &str, raw: &str) -> DcalabError {
    DcalabError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("{} must be {}, got '{}'", key, expected, raw.trim()),
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> Result<i64, DcalabError> {
        match self.config.get(section, key) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| bad_value(section, key, "an integer", &raw)),
        }
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> Result<f64, DcalabError> {
        match self.config.get(section, key) {
            None => Ok(default),
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(bad_value(section, key, "a number", &raw)),
            },
        }
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> Result<bool, DcalabError> {
        match self.config.get(section, key) {
            None => Ok(default),
            Some(raw) => {
                parse_bool(&raw).ok_or_else(|| bad_value(section, key, "true or false", &raw))
            }
        }
    }

    fn section_keys(&self, section: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .config
            .get_map_ref()
            .get(section)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}
