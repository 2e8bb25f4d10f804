//! Game settings and preferences
//!
//! Read once at startup from the page query string
//! (`?quality=low&shake=0&volume=0.5`), or from `CLEAR_MIND_SETTINGS` natively.
//! Nothing is ever written back.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Fraction of fog blobs and mist particles to draw
    pub fn particle_scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.4,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.0,
        }
    }

    /// Triangle fan segments for round shapes
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 16,
            QualityPreset::Medium => 28,
            QualityPreset::High => 48,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Screen shake when a thought hits
    pub screen_shake: bool,
    /// Red flash when a thought hits
    pub red_flash: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Ambient drone and heartbeat (0.0 - 1.0)
    pub ambient_volume: f32,
    /// One-shot effects (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, no flashes)
    pub reduced_motion: bool,

    /// Fixed RNG seed for reproducible runs (None = time-based)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            screen_shake: true,
            red_flash: true,

            master_volume: 0.8,
            ambient_volume: 0.6,
            sfx_volume: 1.0,
            muted: false,

            reduced_motion: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective red flash (respects reduced_motion)
    pub fn effective_red_flash(&self) -> bool {
        self.red_flash && !self.reduced_motion
    }

    /// Final gain for the ambient bus
    pub fn ambient_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.ambient_volume
        }
    }

    /// Final gain for one-shot effects
    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Parse `key=value` pairs separated by `&`, starting from defaults.
    ///
    /// A leading `?` is allowed. Unknown keys and bad values are skipped.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, "1"));
            if !settings.apply(key.trim(), value.trim()) && !key.is_empty() {
                log::warn!("Ignoring setting {}={}", key, value);
            }
        }
        settings
    }

    /// Apply one setting; false when the key or value is not understood
    fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "quality" => QualityPreset::from_str(value).map(|q| self.quality = q),
            "shake" => parse_flag(value).map(|b| self.screen_shake = b),
            "flash" => parse_flag(value).map(|b| self.red_flash = b),
            "reduced_motion" => parse_flag(value).map(|b| self.reduced_motion = b),
            "muted" => parse_flag(value).map(|b| self.muted = b),
            "volume" => parse_volume(value).map(|v| self.master_volume = v),
            "ambient" => parse_volume(value).map(|v| self.ambient_volume = v),
            "sfx" => parse_volume(value).map(|v| self.sfx_volume = v),
            "seed" => value.parse().ok().map(|s| self.seed = Some(s)),
            _ => None,
        }
        .is_some()
    }

    /// Load settings from the page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let query = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let settings = Self::from_query(&query);
        log::info!("Settings: {}", settings.to_json());
        settings
    }

    /// Load settings from the `CLEAR_MIND_SETTINGS` environment variable
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let query = std::env::var("CLEAR_MIND_SETTINGS").unwrap_or_default();
        let settings = Self::from_query(&query);
        log::info!("Settings: {}", settings.to_json());
        settings
    }

    /// Compact JSON for logging
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn parse_volume(value: &str) -> Option<f32> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_default() {
        assert_eq!(Settings::from_query(""), Settings::default());
        assert_eq!(Settings::from_query("?"), Settings::default());
    }

    #[test]
    fn test_query_overrides() {
        let s = Settings::from_query("?quality=low&shake=0&volume=0.5&seed=42&muted");
        assert_eq!(s.quality, QualityPreset::Low);
        assert!(!s.screen_shake);
        assert_eq!(s.master_volume, 0.5);
        assert_eq!(s.seed, Some(42));
        assert!(s.muted);
        assert!(s.red_flash);
    }

    #[test]
    fn test_bad_values_are_ignored() {
        let s = Settings::from_query("quality=ultra&volume=loud&bogus=1&seed=-3");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_volume_is_clamped() {
        let s = Settings::from_query("volume=7&sfx=-1");
        assert_eq!(s.master_volume, 1.0);
        assert_eq!(s.sfx_volume, 0.0);
    }

    #[test]
    fn test_reduced_motion_wins() {
        let s = Settings::from_query("reduced_motion=1");
        assert!(s.screen_shake);
        assert!(!s.effective_screen_shake());
        assert!(!s.effective_red_flash());
    }

    #[test]
    fn test_muted_gains() {
        let s = Settings::from_query("muted=true");
        assert_eq!(s.ambient_gain(), 0.0);
        assert_eq!(s.sfx_gain(), 0.0);
        let s = Settings::default();
        assert!((s.ambient_gain() - 0.48).abs() < 1e-6);
    }

    #[test]
    fn test_quality_round_trip_names() {
        for q in [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High] {
            assert_eq!(QualityPreset::from_str(q.as_str()), Some(q));
        }
    }

    #[test]
    fn test_settings_json_has_fields() {
        let json = Settings::default().to_json();
        assert!(json.contains("\"quality\":\"Medium\""));
        assert!(json.contains("\"seed\":null"));
    }
}
