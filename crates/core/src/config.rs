//! Application configuration backed by the `config` crate.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "missiongen";
const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "MISSIONGEN";

const DEFAULT_CONFIG: &str = r#"# missiongen configuration
resources_root = "resources"
output_dir = "missions"
# aircraft_overrides = "resources/aircraft.json"

[generation]
awacs_enabled = true
ca_slots = 0
perf_destroyed_units = true
perf_smoke_gen = true
jtac_smoke_on = true
state_file = "state.json"
"#;

/// Switches that shape a generation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Whether AWACS are generated and preset on client radios.
    pub awacs_enabled: bool,
    /// Combined-arms tactical commander slots for the player's coalition.
    pub ca_slots: u32,
    /// Place wreckage of previously destroyed units.
    pub perf_destroyed_units: bool,
    /// Generate smoke effects.
    pub perf_smoke_gen: bool,
    /// JTACs mark their targets with smoke.
    pub jtac_smoke_on: bool,
    /// File the in-mission state script writes its results to.
    pub state_file: PathBuf,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            awacs_enabled: true,
            ca_slots: 0,
            perf_destroyed_units: true,
            perf_smoke_gen: true,
            jtac_smoke_on: true,
            state_file: PathBuf::from("state.json"),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding terrains, scripts and the base option table.
    pub resources_root: PathBuf,
    /// Directory generated missions are written to.
    pub output_dir: PathBuf,
    /// Optional JSON file with extra aircraft channel profiles.
    pub aircraft_overrides: Option<PathBuf>,
    /// Generation switches.
    pub generation: GenerationSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resources_root: PathBuf::from("resources"),
            output_dir: PathBuf::from("missions"),
            aircraft_overrides: None,
            generation: GenerationSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load from the default config file, layered with `MISSIONGEN_*` variables.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from a specific file (which may be missing), layered with environment variables.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_layered(path.as_ref(), environment())
    }

    fn load_layered(path: &Path, environment: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(environment)
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        let config = settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(config)
    }
}

/// `MISSIONGEN_OUTPUT_DIR` sets a top-level key, `MISSIONGEN_GENERATION__CA_SLOTS`
/// a nested one.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Location of the default config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the default config file if none exists yet, returning its path.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    write_default_config(&path)?;
    Ok(path)
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Default configuration written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_file_matches_default_struct() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("missiongen/config.toml");
        write_default_config(&path)?;
        assert!(path.exists());

        let loaded = AppConfig::load_from(&path)?;
        assert_eq!(loaded, AppConfig::default());
        Ok(())
    }

    #[test]
    fn partial_file_keeps_other_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "output_dir = \"/tmp/out\"\n[generation]\nawacs_enabled = false\nca_slots = 4\n",
        )?;

        let loaded = AppConfig::load_from(&path)?;
        assert_eq!(loaded.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(loaded.resources_root, PathBuf::from("resources"));
        assert!(!loaded.generation.awacs_enabled);
        assert_eq!(loaded.generation.ca_slots, 4);
        assert!(loaded.generation.jtac_smoke_on);
        Ok(())
    }

    #[test]
    fn environment_overrides_file_values() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "output_dir = \"from-file\"\n")?;

        let variables = ::config::Map::from([
            ("MISSIONGEN_OUTPUT_DIR".to_string(), "/srv/missions".to_string()),
            ("MISSIONGEN_GENERATION__CA_SLOTS".to_string(), "2".to_string()),
        ]);
        let loaded = AppConfig::load_layered(&path, environment().source(Some(variables)))?;
        assert_eq!(loaded.output_dir, PathBuf::from("/srv/missions"));
        assert_eq!(loaded.generation.ca_slots, 2);
        assert!(loaded.generation.awacs_enabled);
        Ok(())
    }

    #[test]
    fn existing_file_is_left_alone() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "output_dir = \"kept\"\n")?;
        write_default_config(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "output_dir = \"kept\"\n");
        Ok(())
    }
}
