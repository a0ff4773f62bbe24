//! Editor configuration: key bindings plus typed settings.
//!
//! Defaults are compiled in from `user_config.rs`; command-line flags
//! override them afterwards.

use std::collections::HashMap;

use crate::core::shell::DEFAULT_TAB_WIDTH;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub keybindings: HashMap<String, String>,
    pub settings: HashMap<String, ConfigValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl Config {
    /// Compiled-in configuration from `user_config.rs`
    pub fn load() -> Self {
        let mut config = Self::default();
        crate::user_config::configure(&mut config);
        config
    }

    /// Bind a key sequence to a command
    pub fn bind(&mut self, key: &str, command: &str) {
        self.keybindings
            .insert(key.to_string(), command.to_string());
    }

    /// Set a configuration value
    pub fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        self.settings.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.settings.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ConfigValue::as_bool)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(ConfigValue::as_int)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_str)
    }

    // ==================== Settings ====================

    /// Columns per tab stop; non-positive values are ignored
    pub fn tab_width(&self) -> usize {
        match self.get_int("tab_width") {
            Some(n) if n > 0 => n as usize,
            _ => DEFAULT_TAB_WIDTH,
        }
    }

    pub fn show_status_line(&self) -> bool {
        self.get_bool("show_status_line").unwrap_or(true)
    }

    pub fn theme(&self) -> &str {
        self.get_string("theme").unwrap_or("dark")
    }
}

impl ConfigValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(config.keybindings.is_empty());
        assert!(config.settings.is_empty());
        assert_eq!(config.tab_width(), DEFAULT_TAB_WIDTH);
        assert!(config.show_status_line());
        assert_eq!(config.theme(), "dark");
    }

    #[test]
    fn test_bind_key() {
        let mut config = Config::default();
        config.bind("C-c", "copy");
        assert_eq!(config.keybindings.get("C-c"), Some(&"copy".to_string()));
    }

    #[test]
    fn test_set_get_settings() {
        let mut config = Config::default();

        config.set("show_status_line", false);
        assert_eq!(config.get_bool("show_status_line"), Some(false));
        assert!(!config.show_status_line());

        config.set("tab_width", 8);
        assert_eq!(config.tab_width(), 8);

        config.set("theme", "light");
        assert_eq!(config.theme(), "light");
    }

    #[test]
    fn test_type_mismatch_falls_back() {
        let mut config = Config::default();
        config.set("tab_width", "wide");
        assert_eq!(config.get_int("tab_width"), None);
        assert_eq!(config.tab_width(), DEFAULT_TAB_WIDTH);

        config.set("tab_width", 0);
        assert_eq!(config.tab_width(), DEFAULT_TAB_WIDTH);
    }

    #[test]
    fn test_load_applies_user_config() {
        let config = Config::load();
        assert_eq!(config.keybindings.get("C-S-s").map(String::as_str), Some("save-as"));
        assert_eq!(config.tab_width(), 4);
        assert_eq!(ConfigValue::from("x").as_bool(), None);
        assert_eq!(ConfigValue::from(3i64).as_int(), Some(3));
    }
}
