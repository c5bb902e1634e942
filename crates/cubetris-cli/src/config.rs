use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use cubetris_engine::{PieceSeed, Variant, VariantKind};
use serde::{Deserialize, Serialize};

use crate::util;

/// Game settings, as stored in a `--config` JSON file.
///
/// Missing fields take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub variant: VariantKind,
    pub drop_interval_ms: u64,
    pub seed: Option<PieceSeed>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variant: VariantKind::default(),
            drop_interval_ms: 1000,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config = util::read_json_file("config", path)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn variant(&self) -> Variant {
        self.variant.variant()
    }

    pub fn drop_interval(&self) -> Duration {
        Duration::from_millis(self.drop_interval_ms)
    }
}

/// Game settings shared by every mode.
#[derive(Default, Debug, Clone, clap::Args)]
pub struct GameArg {
    /// Game variant: `side` (x/y movement) or `top` (x/z movement)
    #[clap(long)]
    variant: Option<VariantKind>,
    /// Milliseconds between automatic drops
    #[clap(long)]
    drop_interval_ms: Option<u64>,
    /// Piece seed as 32 hex characters (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// JSON file with default settings; flags override its values
    #[clap(long)]
    config: Option<PathBuf>,
}

impl GameArg {
    /// Loads `--config` if given and applies the explicit flags on top.
    pub fn resolve(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        if let Some(ms) = self.drop_interval_ms {
            config.drop_interval_ms = ms;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        anyhow::ensure!(
            config.drop_interval_ms > 0,
            "drop interval must be at least 1 ms"
        );
        log::debug!("resolved {config:?}");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.variant(), Variant::SIDE);
        assert_eq!(config.drop_interval(), Duration::from_secs(1));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: GameConfig = serde_json::from_str(r#"{ "variant": "top" }"#).unwrap();
        assert_eq!(config.variant, VariantKind::Top);
        assert_eq!(config.drop_interval_ms, 1000);
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "variant": "side",
            "drop_interval_ms": 250,
            "seed": "000000000000000000000000000000ff"
        }"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.drop_interval(), Duration::from_millis(250));
        assert_eq!(config.seed, Some(PieceSeed::from_u128(0xff)));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = serde_json::from_str::<GameConfig>(r#"{ "level": 3 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let path =
            std::env::temp_dir().join(format!("cubetris-config-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{ "variant": "top", "drop_interval_ms": 400, "seed": "0000000000000000000000000000002a" }"#,
        )
        .unwrap();

        let arg = GameArg {
            drop_interval_ms: Some(100),
            config: Some(path.clone()),
            ..GameArg::default()
        };
        let config = arg.resolve().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.variant, VariantKind::Top);
        assert_eq!(config.drop_interval_ms, 100);
        assert_eq!(config.seed, Some(PieceSeed::from_u128(42)));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let arg = GameArg {
            drop_interval_ms: Some(0),
            ..GameArg::default()
        };
        assert!(arg.resolve().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let arg = GameArg {
            config: Some(PathBuf::from("/nonexistent/cubetris.json")),
            ..GameArg::default()
        };
        let err = arg.resolve().unwrap_err();
        assert!(err.to_string().contains("Failed to open config file"));
    }
}
