use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::chart::ChartStyle;
use crate::color::parse_hex;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WindowConfig {
    #[serde(default = "WindowConfig::default_width")]
    pub width: f32,
    #[serde(default = "WindowConfig::default_height")]
    pub height: f32,
}

impl WindowConfig {
    fn default_width() -> f32 {
        1200.0
    }
    fn default_height() -> f32 {
        800.0
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    #[serde(default = "StyleConfig::default_line_width")]
    pub line_width: f32,
    #[serde(default = "StyleConfig::default_marker_radius")]
    pub marker_radius: f32,
    #[serde(default = "StyleConfig::default_prediction_color")]
    pub prediction_color: String,
    #[serde(default = "StyleConfig::default_measurement_color")]
    pub measurement_color: String,
}

impl StyleConfig {
    fn default_line_width() -> f32 {
        1.5
    }
    fn default_marker_radius() -> f32 {
        1.5
    }
    fn default_prediction_color() -> String {
        "#CA6702".to_string()
    }
    fn default_measurement_color() -> String {
        "#005F73".to_string()
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            line_width: Self::default_line_width(),
            marker_radius: Self::default_marker_radius(),
            prediction_color: Self::default_prediction_color(),
            measurement_color: Self::default_measurement_color(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TickConfig {
    /// Finest π fraction on phase/time axes (4 → ticks every π/4).
    #[serde(default = "TickConfig::default_pi_denominator")]
    pub pi_denominator: u64,
}

impl TickConfig {
    fn default_pi_denominator() -> u64 {
        4
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            pi_denominator: Self::default_pi_denominator(),
        }
    }
}

/// Viewer settings, read from an optional TOML file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ViewerConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub ticks: TickConfig,
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config '{}'", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("parsing config '{}'", path.display()))?;
        log::debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.window.width > 0.0 && self.window.height > 0.0) {
            bail!("window size must be positive");
        }
        if !(self.style.line_width > 0.0 && self.style.marker_radius > 0.0) {
            bail!("line_width and marker_radius must be positive");
        }
        if self.ticks.pi_denominator == 0 {
            bail!("ticks.pi_denominator must be at least 1");
        }
        self.chart_style().map(|_| ())
    }

    pub fn chart_style(&self) -> Result<ChartStyle> {
        let color = |name: &str, value: &str| {
            parse_hex(value).with_context(|| format!("style.{name} '{value}' is not a #RRGGBB colour"))
        };
        Ok(ChartStyle {
            line_width: self.style.line_width,
            marker_radius: self.style.marker_radius,
            prediction_color: color("prediction_color", &self.style.prediction_color)?,
            measurement_color: color("measurement_color", &self.style.measurement_color)?,
            pi_denominator: self.ticks.pi_denominator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ViewerConfig::from_toml("").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.chart_style().unwrap(), ChartStyle::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = ViewerConfig::from_toml(
            "[window]\nwidth = 900.0\n\n[ticks]\npi_denominator = 2\n",
        )
        .unwrap();
        assert_eq!(config.window.width, 900.0);
        assert_eq!(config.window.height, 800.0);
        assert_eq!(config.ticks.pi_denominator, 2);
        assert_eq!(config.style, StyleConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ViewerConfig::from_toml("[window]\ndepth = 3\n").is_err());
        assert!(ViewerConfig::from_toml("[colours]\n").is_err());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(ViewerConfig::from_toml("[ticks]\npi_denominator = 0\n").is_err());
        assert!(ViewerConfig::from_toml("[style]\nline_width = -1.0\n").is_err());
        let err = ViewerConfig::from_toml("[style]\nprediction_color = \"orange\"\n").unwrap_err();
        assert!(err.to_string().contains("prediction_color"));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.toml");
        std::fs::write(&path, "[style]\nmeasurement_color = \"#112233\"\n").unwrap();
        let style = ViewerConfig::load(&path).unwrap().chart_style().unwrap();
        assert_eq!(style.measurement_color, eframe::egui::Color32::from_rgb(0x11, 0x22, 0x33));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ViewerConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }
}
