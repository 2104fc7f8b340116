// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::{ViewerConfig, COUNTDOWN_FORMAT};
use crate::context::Variant;
use crate::error::Result;

#[derive(Parser, Debug, Clone)]
#[command(name = "model-showcase")]
#[command(about = "Rotating 3D model viewer", long_about = None)]
pub struct Cli {
    /// Which page to show
    #[arg(long, value_enum, default_value_t = Variant::Showcase)]
    pub variant: Variant,

    /// glTF/GLB model for the launch page
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// JSON file overriding the built-in constants
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Countdown target as local time, e.g. 2025-09-05T00:00:00
    #[arg(long = "countdown-target", value_parser = parse_countdown_target)]
    pub countdown_target: Option<String>,

    /// Disable the overlay (loading indicator, buttons, countdown, confetti)
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Start with auto-rotation switched off
    #[arg(long = "no-auto-rotate", default_value = "false")]
    pub no_auto_rotate: bool,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied
    pub fn viewer_config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)?,
            None => ViewerConfig::default(),
        };
        if let Some(model) = &self.model {
            config.model_path = model.clone();
        }
        if let Some(target) = &self.countdown_target {
            config.countdown_target = target.clone();
        }
        if self.no_auto_rotate {
            config.auto_rotate = false;
        }
        config.countdown_target()?;
        Ok(config)
    }
}

fn parse_countdown_target(value: &str) -> std::result::Result<String, String> {
    chrono::NaiveDateTime::parse_from_str(value, COUNTDOWN_FORMAT)
        .map(|_| value.to_string())
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM:SS: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_showcase() {
        let cli = Cli::parse_from(["model-showcase"]);
        assert_eq!(cli.variant, Variant::Showcase);
        assert!(!cli.no_ui);
        let config = cli.viewer_config().unwrap();
        assert!(config.auto_rotate);
    }

    #[test]
    fn overrides_apply() {
        let cli = Cli::parse_from([
            "model-showcase",
            "--variant",
            "launch",
            "--model",
            "other.glb",
            "--countdown-target",
            "2030-01-01T12:00:00",
            "--no-auto-rotate",
        ]);
        assert_eq!(cli.variant, Variant::Launch);
        let config = cli.viewer_config().unwrap();
        assert_eq!(config.model_path, PathBuf::from("other.glb"));
        assert_eq!(config.countdown_target, "2030-01-01T12:00:00");
        assert!(!config.auto_rotate);
    }

    #[test]
    fn bad_countdown_target_rejected() {
        let parsed = Cli::try_parse_from(["model-showcase", "--countdown-target", "tomorrow"]);
        assert!(parsed.is_err());
    }
}
