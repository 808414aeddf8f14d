//! Display settings and preferences
//!
//! Persisted in LocalStorage. Physics constants are not settings; they are
//! fixed at build time in [`crate::consts`].

use serde::{Deserialize, Serialize};

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Dark,
    HighContrast,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::HighContrast => "High contrast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "high contrast" | "high-contrast" | "contrast" => Some(Theme::HighContrast),
            _ => None,
        }
    }

    /// The other theme
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::HighContrast,
            Theme::HighContrast => Theme::Dark,
        }
    }
}

/// Display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Color theme
    pub theme: Theme,
    /// Show the energy readout line
    pub show_diagnostics: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// Flatten the ball against the ground while it is compressed
    #[serde(default = "default_squash")]
    pub squash: bool,
}

fn default_squash() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            show_diagnostics: true,
            show_fps: false,
            squash: true,
        }
    }
}

impl Settings {
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "energy_bounce_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_names() {
        for theme in [Theme::Dark, Theme::HighContrast] {
            assert_eq!(Theme::from_str(theme.as_str()), Some(theme));
        }
        assert_eq!(Theme::from_str("contrast"), Some(Theme::HighContrast));
        assert_eq!(Theme::from_str("sepia"), None);
    }

    #[test]
    fn test_toggle_theme() {
        let mut settings = Settings::default();
        settings.toggle_theme();
        assert_eq!(settings.theme, Theme::HighContrast);
        settings.toggle_theme();
        assert_eq!(settings.theme, Theme::Dark);
    }

    #[test]
    fn test_older_settings_without_squash() {
        let json = r#"{"theme":"Dark","show_diagnostics":false,"show_fps":true}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(settings.squash);
        assert!(!settings.show_diagnostics);
        assert!(settings.show_fps);
    }
}
