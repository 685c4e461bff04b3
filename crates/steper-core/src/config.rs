use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub drag: DragConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Progress curve used by step slides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingType {
    /// Constant speed
    Linear,
    /// Quadratic ease-in-out
    Quadratic,
    /// Piecewise cubic ease-in-out (default)
    #[default]
    Cubic,
}

/// Step slide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Duration of one step slide in seconds
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f64,
    /// Progress-to-position curve
    #[serde(default)]
    pub easing: EasingType,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
            easing: EasingType::default(),
        }
    }
}

/// Drag and snap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragConfig {
    /// Ease curve sample point used as per-frame follow damping while dragging
    #[serde(default = "default_follow_progress")]
    pub follow_progress: f64,
    /// Per-frame damping applied while snapping to the nearest slide
    #[serde(default = "default_snap_damping")]
    pub snap_damping: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            follow_progress: default_follow_progress(),
            snap_damping: default_snap_damping(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds when nothing is animating
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Width of one slide in terminal columns
    #[serde(default = "default_slide_width")]
    pub slide_width: u16,
    /// Gap between slides in terminal columns
    #[serde(default = "default_slide_gap")]
    pub slide_gap: u16,
    /// Number of slides shown by the demo
    #[serde(default = "default_slide_count")]
    pub slide_count: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            slide_width: default_slide_width(),
            slide_gap: default_slide_gap(),
            slide_count: default_slide_count(),
        }
    }
}

impl UiConfig {
    /// Frame interval while animating, falling back to ~60fps
    pub fn frame_interval_ms(&self) -> u64 {
        if self.animation_fps == 0 {
            16
        } else {
            (1000 / self.animation_fps as u64).max(1)
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("steper")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_duration_secs() -> f64 {
    1.0
}

fn default_follow_progress() -> f64 {
    crate::motion::FOLLOW_PROGRESS
}

fn default_snap_damping() -> f64 {
    crate::motion::SNAP_DAMPING
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_slide_width() -> u16 {
    24
}

fn default_slide_gap() -> u16 {
    2
}

fn default_slide_count() -> usize {
    5
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Reject values the animation loops cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if !self.slider.duration_secs.is_finite() || self.slider.duration_secs < 0.0 {
            return Err(crate::Error::Config(format!(
                "slider.duration_secs must be a non-negative number, got {}",
                self.slider.duration_secs
            )));
        }
        for (name, value) in [
            ("drag.follow_progress", self.drag.follow_progress),
            ("drag.snap_damping", self.drag.snap_damping),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(crate::Error::Config(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }
        if self.ui.slide_width == 0 {
            return Err(crate::Error::Config("ui.slide_width must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/steper/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("steper")
            .join("config.toml")
    }

    /// Get the log file path used by the terminal demo
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("steper.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!((config.slider.duration_secs - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.slider.easing, EasingType::Cubic);
        assert!((config.drag.follow_progress - 0.2).abs() < f64::EPSILON);
        assert!((config.drag.snap_damping - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.ui.animation_fps, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [slider]
            duration_secs = 0.5
            easing = "linear"

            [ui]
            slide_count = 8
            "#,
        )
        .unwrap();

        assert!((config.slider.duration_secs - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.slider.easing, EasingType::Linear);
        assert_eq!(config.ui.slide_count, 8);
        assert_eq!(config.ui.slide_width, 24);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_invalid_damping_rejected() {
        let result = AppConfig::from_toml("[drag]\nsnap_damping = 0.0\n");
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_frame_interval_fallback() {
        let ui = UiConfig {
            animation_fps: 0,
            ..Default::default()
        };
        assert_eq!(ui.frame_interval_ms(), 16);
        assert_eq!(UiConfig::default().frame_interval_ms(), 16);
    }

    #[test]
    fn test_expand_tilde_passthrough() {
        let path = PathBuf::from("/tmp/steper");
        assert_eq!(expand_tilde(&path), path);
    }
}
