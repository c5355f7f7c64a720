//! Configuration access port trait.
//!
//! Sections and keys follow the INI layout (`[study]`, `[trend]`). Typed
//! getters return `default` when the key is absent and `ConfigInvalid` when
//! it is present but does not parse; range checks live in
//! `domain::config_validation`.

use crate::domain::error::DcalabError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> Result<i64, DcalabError>;
    fn get_double(&self, section: &str, key: &str, default: f64) -> Result<f64, DcalabError>;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> Result<bool, DcalabError>;

    /// Keys present in `section`, sorted. Empty if the section is absent.
    fn section_keys(&self, section: &str) -> Vec<String>;
}
