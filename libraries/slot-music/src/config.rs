//! Music configuration

use crate::error::{MusicError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MusicConfig {
    /// Root directory for classic numbered level tracks
    #[serde(default = "default_music_dir")]
    pub music_dir: PathBuf,

    /// Extensions tried for classic tracks, most preferred first
    #[serde(default = "default_classic_extensions")]
    pub classic_extensions: Vec<String>,

    /// Initial level playlist order
    #[serde(default)]
    pub random_order: bool,

    /// Volume the Level slot starts each track at
    #[serde(default = "default_volume")]
    pub level_volume: f32,

    /// Volume used when the intro is replayed
    #[serde(default = "default_volume")]
    pub intro_volume: f32,
}

impl MusicConfig {
    /// Load configuration from an optional TOML file and the environment
    ///
    /// Environment variables are prefixed with `MUSIC_`, e.g.
    /// `MUSIC_LEVEL_VOLUME=0.5`. `MUSIC_CLASSIC_EXTENSIONS` takes a
    /// comma-separated list.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// `load` with an explicit environment map in place of the process one
    fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path));
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("MUSIC")
                .prefix_separator("_")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("classic_extensions")
                .source(env),
        );

        let config: Self = settings
            .build()
            .map_err(|e| MusicError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| MusicError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.classic_extensions.is_empty() {
            return Err(MusicError::Config(
                "At least one classic track extension is required".to_string(),
            ));
        }

        for (name, volume) in [
            ("level_volume", self.level_volume),
            ("intro_volume", self.intro_volume),
        ] {
            if !(0.0..=1.0).contains(&volume) {
                return Err(MusicError::Config(format!(
                    "{} must be within 0.0-1.0, got {}",
                    name, volume
                )));
            }
        }

        Ok(())
    }
}

// Default values
fn default_music_dir() -> PathBuf {
    PathBuf::from("Music")
}

fn default_classic_extensions() -> Vec<String> {
    vec!["ogg".to_string(), "mp3".to_string()]
}

fn default_volume() -> f32 {
    1.0
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            music_dir: default_music_dir(),
            classic_extensions: default_classic_extensions(),
            random_order: false,
            level_volume: default_volume(),
            intro_volume: default_volume(),
        }
    }
}
