use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketConfig {
    /// Bracket leg height as a fraction of the axis frame height.
    pub height_ratio: f32,
    /// Step between stacking tiers as a fraction of the axis frame height.
    pub spacing_ratio: f32,
    pub mark_font_size: f32,
    /// Measured box width; derived from `dodge_width` when absent.
    pub box_width: Option<f32>,
    /// Horizontal band shared by all sub-groups of one category.
    pub dodge_width: f32,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            height_ratio: 0.02,
            spacing_ratio: 0.1,
            mark_font_size: 10.0,
            box_width: None,
            dodge_width: 0.8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub enabled: bool,
    /// IQR multiplier for the fences outside which values are left out of the mean.
    pub whisker: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            whisker: 1.5,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub bracket: BracketConfig,
    pub marker: MarkerConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BracketConfigFile {
    height_ratio: Option<f32>,
    spacing_ratio: Option<f32>,
    mark_font_size: Option<f32>,
    box_width: Option<f32>,
    dodge_width: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkerConfigFile {
    enabled: Option<bool>,
    whisker: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    bracket: Option<BracketConfigFile>,
    #[serde(alias = "meanMarker")]
    marker: Option<MarkerConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(bracket) = parsed.bracket {
        if let Some(v) = bracket.height_ratio {
            config.bracket.height_ratio = v;
        }
        if let Some(v) = bracket.spacing_ratio {
            config.bracket.spacing_ratio = v;
        }
        if let Some(v) = bracket.mark_font_size {
            config.bracket.mark_font_size = v;
        }
        if bracket.box_width.is_some() {
            config.bracket.box_width = bracket.box_width;
        }
        if let Some(v) = bracket.dodge_width {
            config.bracket.dodge_width = v;
        }
    }

    if let Some(marker) = parsed.marker {
        if let Some(v) = marker.enabled {
            config.marker.enabled = v;
        }
        if let Some(v) = marker.whisker {
            config.marker.whisker = v;
        }
    }

    if config.bracket.spacing_ratio <= 0.0 {
        anyhow::bail!(
            "bracket.spacingRatio must be positive, got {}",
            config.bracket.spacing_ratio
        );
    }
    if config.bracket.height_ratio <= 0.0 {
        anyhow::bail!(
            "bracket.heightRatio must be positive, got {}",
            config.bracket.height_ratio
        );
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_gives_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.bracket.height_ratio, 0.02);
        assert_eq!(config.bracket.spacing_ratio, 0.1);
        assert_eq!(config.marker.whisker, 1.5);
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let config = parse_config(r#"{"bracket": {"spacingRatio": 0.05, "boxWidth": 0.3}}"#).unwrap();
        assert_eq!(config.bracket.spacing_ratio, 0.05);
        assert_eq!(config.bracket.box_width, Some(0.3));
        assert_eq!(config.bracket.height_ratio, 0.02);
        assert!(config.marker.enabled);
    }

    #[test]
    fn marker_alias_is_accepted() {
        let config = parse_config(r#"{"meanMarker": {"enabled": false}}"#).unwrap();
        assert!(!config.marker.enabled);
    }

    #[test]
    fn non_positive_spacing_is_rejected() {
        assert!(parse_config(r#"{"bracket": {"spacingRatio": 0}}"#).is_err());
    }
}
