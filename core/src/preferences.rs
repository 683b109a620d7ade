use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// String key/value storage that survives page reloads.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// User preferences, loaded once at startup and written back key by key whenever one changes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    theme: Theme,
    is_muted: bool,
    volume: f32,
}

impl Preferences {
    pub const THEME_KEY: &'static str = "theme";
    pub const MUTED_KEY: &'static str = "isMuted";
    pub const VOLUME_KEY: &'static str = "volume";
    pub const DEFAULT_VOLUME: f32 = 0.5;

    /// Reads every key, falling back to the default for any that is missing or unreadable.
    pub fn load(store: &impl PreferenceStore) -> Self {
        let defaults = Self::default();

        let theme = store
            .get(Self::THEME_KEY)
            .and_then(|value| Theme::from_scheme(&value))
            .unwrap_or(defaults.theme);
        let is_muted = store
            .get(Self::MUTED_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.is_muted);
        let volume = store
            .get(Self::VOLUME_KEY)
            .and_then(|value| value.trim().parse::<f32>().ok())
            .filter(|volume| volume.is_finite())
            .map(clamp_volume)
            .unwrap_or(defaults.volume);

        let prefs = Self {
            theme,
            is_muted,
            volume,
        };
        log::debug!("loaded preferences: {:?}", prefs);
        prefs
    }

    pub const fn theme(&self) -> Theme {
        self.theme
    }

    pub const fn is_muted(&self) -> bool {
        self.is_muted
    }

    pub const fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_theme(&mut self, theme: Theme, store: &mut impl PreferenceStore) {
        self.theme = theme;
        store.set(Self::THEME_KEY, theme.scheme());
    }

    pub fn toggle_theme(&mut self, store: &mut impl PreferenceStore) -> Theme {
        self.set_theme(self.theme.toggled(), store);
        self.theme
    }

    /// Flips mute and returns the new state.
    pub fn toggle_muted(&mut self, store: &mut impl PreferenceStore) -> bool {
        self.is_muted = !self.is_muted;
        store.set(Self::MUTED_KEY, if self.is_muted { "true" } else { "false" });
        self.is_muted
    }

    /// Stores `volume` clamped to `0.0..=1.0`. Non-finite input is ignored.
    pub fn set_volume(&mut self, volume: f32, store: &mut impl PreferenceStore) {
        if !volume.is_finite() {
            log::warn!("ignoring volume {}", volume);
            return;
        }
        self.volume = clamp_volume(volume);
        store.set(Self::VOLUME_KEY, &self.volume.to_string());
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            is_muted: false,
            volume: Self::DEFAULT_VOLUME,
        }
    }
}

fn clamp_volume(volume: f32) -> f32 {
    volume.clamp(0.0, 1.0)
}
