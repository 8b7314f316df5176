use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::context::{DEFAULT_TRANSITION_DURATION, MenuContext, SidebarContext};
use crate::error::SettingsError;

/// Sidebar-level options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarSettings {
    pub collapsed: bool,
    pub rtl: bool,
    pub transition_duration_ms: u64,
}

impl Default for SidebarSettings {
    fn default() -> Self {
        Self {
            collapsed: false,
            rtl: false,
            transition_duration_ms: default_duration_ms(),
        }
    }
}

impl SidebarSettings {
    pub fn to_context(&self) -> SidebarContext {
        SidebarContext {
            collapsed: self.collapsed,
            rtl: self.rtl,
            transition_duration: Duration::from_millis(
                self.transition_duration_ms,
            ),
        }
    }
}

/// Menu-level options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    pub close_on_click: bool,
    pub transition_duration_ms: u64,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            close_on_click: false,
            transition_duration_ms: default_duration_ms(),
        }
    }
}

impl MenuSettings {
    /// Build a menu context; renderers and style maps are added by the
    /// caller since they are code, not data.
    pub fn to_context<Message>(&self) -> MenuContext<Message> {
        MenuContext::new()
            .close_on_click(self.close_on_click)
            .transition_duration(Duration::from_millis(
                self.transition_duration_ms,
            ))
    }
}

/// Typed settings payload for a sidebar menu.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub sidebar: SidebarSettings,
    pub menu: MenuSettings,
}

/// Status describing how settings were loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsLoadStatus {
    Loaded,
    Missing,
    Invalid(String),
}

/// Result of loading settings from disk.
#[derive(Debug, Clone)]
pub struct SettingsLoad {
    settings: SettingsData,
    status: SettingsLoadStatus,
}

impl SettingsLoad {
    pub fn new(settings: SettingsData, status: SettingsLoadStatus) -> Self {
        Self { settings, status }
    }

    pub fn settings(&self) -> &SettingsData {
        &self.settings
    }

    pub fn status(&self) -> &SettingsLoadStatus {
        &self.status
    }

    /// Consume the value and return both payload and status.
    pub fn into_parts(self) -> (SettingsData, SettingsLoadStatus) {
        (self.settings, self.status)
    }
}

/// Load settings from `path`, falling back to defaults when the file is
/// missing or malformed.
pub fn load_settings_from_path(
    path: &Path,
) -> Result<SettingsLoad, SettingsError> {
    let data = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(SettingsLoad::new(
                SettingsData::default(),
                SettingsLoadStatus::Missing,
            ));
        },
        Err(err) => return Err(err.into()),
    };

    parse_settings(&data)
}

/// Parse settings from a JSON string.
pub fn parse_settings(data: &str) -> Result<SettingsLoad, SettingsError> {
    match serde_json::from_str::<SettingsData>(data) {
        Ok(settings) => {
            Ok(SettingsLoad::new(settings, SettingsLoadStatus::Loaded))
        },
        Err(err) if err.is_syntax() || err.is_data() || err.is_eof() => {
            log::warn!("sidebar settings invalid: {err}");
            Ok(SettingsLoad::new(
                SettingsData::default(),
                SettingsLoadStatus::Invalid(format!("{err}")),
            ))
        },
        Err(err) => Err(err.into()),
    }
}

fn default_duration_ms() -> u64 {
    DEFAULT_TRANSITION_DURATION.as_millis() as u64
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use super::{
        MenuSettings, SettingsData, SettingsLoadStatus, load_settings_from_path,
        parse_settings,
    };
    use crate::context::DEFAULT_TRANSITION_DURATION;

    #[test]
    fn given_partial_json_when_parsed_then_missing_fields_use_defaults() {
        let loaded = parse_settings(
            r#"{
                "sidebar": { "collapsed": true },
                "menu": { "close_on_click": true }
            }"#,
        )
        .expect("settings should parse");
        let (settings, status) = loaded.into_parts();

        assert_eq!(status, SettingsLoadStatus::Loaded);
        assert!(settings.sidebar.collapsed);
        assert!(!settings.sidebar.rtl);
        assert_eq!(settings.sidebar.transition_duration_ms, 300);
        assert!(settings.menu.close_on_click);
    }

    #[test]
    fn given_loaded_settings_when_building_contexts_then_values_carry_over() {
        let loaded = parse_settings(
            r#"{ "sidebar": { "rtl": true, "transition_duration_ms": 150 },
                 "menu": { "transition_duration_ms": 500 } }"#,
        )
        .expect("settings should parse");

        let sidebar = loaded.settings().sidebar.to_context();
        let menu = loaded.settings().menu.to_context::<()>();

        assert!(sidebar.rtl);
        assert_eq!(sidebar.transition_duration, Duration::from_millis(150));
        assert_eq!(menu.duration(), Duration::from_millis(500));
        assert!(!menu.closes_on_click());
    }

    #[test]
    fn given_wrong_field_type_when_parsed_then_status_is_invalid() {
        let loaded =
            parse_settings(r#"{ "sidebar": { "collapsed": "yes" } }"#)
                .expect("data errors fall back to defaults");

        assert_eq!(loaded.settings(), &SettingsData::default());
        match loaded.status() {
            SettingsLoadStatus::Invalid(reason) => {
                assert!(reason.contains("invalid type"));
            },
            other => panic!("expected invalid status, got {other:?}"),
        }
    }

    #[test]
    fn given_truncated_json_when_parsed_then_status_is_invalid() {
        let loaded = parse_settings(r#"{ "menu": { "close_on_click": tr"#)
            .expect("syntax errors fall back to defaults");

        assert!(matches!(loaded.status(), SettingsLoadStatus::Invalid(_)));
        assert!(!loaded.settings().menu.close_on_click);
    }

    #[test]
    fn given_missing_file_when_loaded_then_defaults_are_reported_missing() {
        let path = std::env::temp_dir()
            .join(format!("sidebar-ui-absent-{}", std::process::id()))
            .join("sidebar.json");

        let loaded = load_settings_from_path(&path)
            .expect("a missing file is not an error");

        assert_eq!(loaded.status(), &SettingsLoadStatus::Missing);
        assert_eq!(loaded.settings(), &SettingsData::default());
    }

    #[test]
    fn given_partial_file_when_loaded_then_defaults_fill_the_rest() {
        let path = std::env::temp_dir().join(format!(
            "sidebar-ui-partial-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "sidebar": { "rtl": true } }"#)
            .expect("settings file should be written");

        let loaded = load_settings_from_path(&path);
        let _ = fs::remove_file(&path);
        let (settings, status) = loaded
            .expect("a readable file should load")
            .into_parts();

        assert_eq!(status, SettingsLoadStatus::Loaded);
        assert!(settings.sidebar.rtl);
        assert!(!settings.sidebar.collapsed);
        assert_eq!(settings.menu, MenuSettings::default());
        assert_eq!(
            settings.sidebar.to_context().transition_duration,
            DEFAULT_TRANSITION_DURATION
        );
    }
}
