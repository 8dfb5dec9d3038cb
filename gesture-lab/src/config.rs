use crate::consts::{CONFIG_ENV, CONFIG_FILE};
use crate::errors::LabError;
use egui::Color32;
use egui_gestures::SlideConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub slide: SlideSection,
    pub popout: PopoutSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SlideSection {
    pub idle_text: String,
    pub in_progress_text: String,
    pub confirmation_text: String,
    /// `#rrggbb`
    pub tint: String,
    pub foreground: String,
    pub track_height: f32,
}

impl Default for SlideSection {
    fn default() -> Self {
        Self {
            idle_text: "Swipe to pay".to_owned(),
            in_progress_text: "Confirms payment".to_owned(),
            confirmation_text: "Success!".to_owned(),
            tint: "#34c759".to_owned(),
            foreground: "#ffffff".to_owned(),
            track_height: 70.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PopoutSection {
    pub title: String,
    pub subtitle: String,
}

impl Default for PopoutSection {
    fn default() -> Self {
        Self {
            title: "general".to_owned(),
            subtitle: "36 Members 4 - online".to_owned(),
        }
    }
}

impl LabConfig {
    /// `$GESTURE_LAB_CONFIG`, or `gesture-lab.toml` in the working directory.
    pub fn path() -> PathBuf {
        env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    pub fn load(path: &Path) -> Result<Self, LabError> {
        if !path.exists() {
            debug!("no config file at {path:?}, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        info!("config loaded from {path:?}");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, LabError> {
        Ok(toml::from_str(content)?)
    }

    pub fn slide_config(&self) -> Result<SlideConfig, LabError> {
        let slide = &self.slide;
        let config = SlideConfig::new(
            slide.idle_text.as_str(),
            slide.in_progress_text.as_str(),
            slide.confirmation_text.as_str(),
        )
        .tint(parse_color(&slide.tint)?)
        .foreground(parse_color(&slide.foreground)?)
        .track_height(slide.track_height);
        config.validate()?;
        Ok(config)
    }
}

fn parse_color(hex: &str) -> Result<Color32, LabError> {
    Color32::from_hex(hex.trim()).map_err(|_| LabError::Color(hex.to_owned()))
}
