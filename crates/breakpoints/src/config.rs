//! Engine options and the immutable configuration merged from them.

use crate::error::ConfigError;
use crate::host::{ModuleSelector, WidthBox};
use crate::table::BreakpointTable;
use serde::Deserialize;

/// When the startup sequence runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InitOn {
    /// Run discovery and classification inside `init`.
    Immediate,
    /// Wait for the structural-ready signal.
    DocumentReady,
    /// Wait for the full resource load signal.
    #[default]
    WindowLoad,
}

/// Caller-supplied overrides. Every `None` falls back to the stock default.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Options {
    pub init_on: Option<InitOn>,
    /// Attribute holding a per-element JSON breakpoint table.
    pub prefix: Option<String>,
    /// Attribute recording the current breakpoint.
    pub current_prefix: Option<String>,
    pub module_class: Option<String>,
    pub ready_class: Option<String>,
    /// Default breakpoint table for modules without an override.
    pub bps: Option<BreakpointTable>,
    pub fire_events: Option<bool>,
    pub event_name: Option<String>,
    pub bind_resize: Option<bool>,
    pub width_box: Option<WidthBox>,
}

impl Options {
    /// Parse options from a JSON object using the camelCase option names.
    ///
    /// # Errors
    /// Returns [`ConfigError::Json`] for malformed JSON, unknown keys or an
    /// invalid `bps` table.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Fully resolved engine configuration. Built once per engine and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub init_on: InitOn,
    pub prefix: String,
    pub current_prefix: String,
    pub module_class: String,
    pub ready_class: String,
    pub bps: BreakpointTable,
    pub fire_events: bool,
    pub event_name: String,
    pub bind_resize: bool,
    pub width_box: WidthBox,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            init_on: InitOn::default(),
            prefix: "data-js-bp".to_owned(),
            current_prefix: "data-js-bp-current".to_owned(),
            module_class: "js-bp".to_owned(),
            ready_class: "js-bp-ready".to_owned(),
            bps: BreakpointTable::new()
                .with(300, "bp-300")
                .with(500, "bp-500")
                .with(700, "bp-700"),
            fire_events: false,
            event_name: "js-bp:updated".to_owned(),
            bind_resize: true,
            width_box: WidthBox::default(),
        }
    }
}

impl Config {
    /// Merge `options` over the defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyName`] when a name option is set to an
    /// empty string.
    pub fn from_options(options: Options) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            init_on: options.init_on.unwrap_or(defaults.init_on),
            prefix: options.prefix.unwrap_or(defaults.prefix),
            current_prefix: options.current_prefix.unwrap_or(defaults.current_prefix),
            module_class: options.module_class.unwrap_or(defaults.module_class),
            ready_class: options.ready_class.unwrap_or(defaults.ready_class),
            bps: options.bps.unwrap_or(defaults.bps),
            fire_events: options.fire_events.unwrap_or(defaults.fire_events),
            event_name: options.event_name.unwrap_or(defaults.event_name),
            bind_resize: options.bind_resize.unwrap_or(defaults.bind_resize),
            width_box: options.width_box.unwrap_or(defaults.width_box),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("prefix", &self.prefix),
            ("currentPrefix", &self.current_prefix),
            ("moduleClass", &self.module_class),
            ("readyClass", &self.ready_class),
            ("eventName", &self.event_name),
        ];
        match names.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((option, _)) => Err(ConfigError::EmptyName(option)),
            None => Ok(()),
        }
    }

    /// Selector matching every module element.
    pub fn selector(&self) -> ModuleSelector {
        ModuleSelector::new(self.prefix.clone(), self.module_class.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unspecified_options_take_defaults() {
        let config = Config::from_options(Options::default()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.init_on, InitOn::WindowLoad);
        assert_eq!(config.selector().to_string(), "[data-js-bp], .js-bp");
    }

    #[test]
    fn explicit_options_override_defaults() {
        let options = Options::from_json(
            r#"{
                "initOn": "immediate",
                "moduleClass": "card",
                "bps": {"480": "card-md", "960": "card-lg"},
                "fireEvents": true,
                "widthBox": "content"
            }"#,
        )
        .unwrap();
        let config = Config::from_options(options).unwrap();
        assert_eq!(config.init_on, InitOn::Immediate);
        assert_eq!(config.module_class, "card");
        assert_eq!(config.prefix, "data-js-bp");
        assert!(config.fire_events);
        assert!(config.bind_resize);
        assert_eq!(config.width_box, WidthBox::Content);
        assert_eq!(config.bps.get(960), Some("card-lg"));
        assert_eq!(config.bps.get(300), None);
    }

    #[test]
    fn rejects_bad_options() {
        assert!(matches!(
            Options::from_json(r#"{"bps": {"x": "y"}}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            Options::from_json(r#"{"initOn": "later"}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            Options::from_json(r#"{"unknown": 1}"#),
            Err(ConfigError::Json(_))
        ));
        let options = Options {
            module_class: Some(String::new()),
            ..Options::default()
        };
        assert!(matches!(
            Config::from_options(options),
            Err(ConfigError::EmptyName("moduleClass"))
        ));
    }
}
