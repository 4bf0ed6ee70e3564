//! Fixed files every mission embeds.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tracing::info;

use crate::error::GenerationError;

/// Base option table, relative to the resources root.
pub const DEFAULT_OPTIONS_FILE: &str = "default_options.json";
/// Script framework loaded first.
pub const MIST_SCRIPT: &str = "scripts/mist.lua";
/// JTAC auto-lase script.
pub const JTAC_SCRIPT: &str = "scripts/jtac_autolase.lua";
/// Script exporting mission state for the debriefing.
pub const STATE_SCRIPT: &str = "scripts/mission_state.lua";
/// JSON library the state script loads at runtime.
pub const JSON_LIBRARY: &str = "scripts/json.lua";

/// Option table and script payloads, read once before a pass starts.
#[derive(Debug, Clone)]
pub struct MissionResources {
    /// Base mission options.
    pub options: Map<String, Value>,
    /// Script framework source.
    pub mist: String,
    /// JTAC auto-lase source.
    pub jtac_autolase: String,
    /// Mission state template.
    pub mission_state: String,
    /// Absolute location of the JSON library.
    pub json_library: PathBuf,
}

impl MissionResources {
    /// Read every resource below `root`. Any missing or malformed file fails the load.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, GenerationError> {
        let root = root.as_ref();
        let options = load_options(&root.join(DEFAULT_OPTIONS_FILE))?;
        let mist = read_script(&root.join(MIST_SCRIPT))?;
        let jtac_autolase = read_script(&root.join(JTAC_SCRIPT))?;
        let mission_state = read_script(&root.join(STATE_SCRIPT))?;
        let json_library = absolute(&root.join(JSON_LIBRARY));

        info!(root = %root.display(), options = options.len(), "Mission resources loaded");
        Ok(Self {
            options,
            mist,
            jtac_autolase,
            mission_state,
            json_library,
        })
    }
}

fn load_options(path: &Path) -> Result<Map<String, Value>, GenerationError> {
    let contents =
        fs::read_to_string(path).map_err(|err| GenerationError::load_failure(path, err))?;
    let mut document: Value =
        serde_json::from_str(&contents).map_err(|err| GenerationError::load_failure(path, err))?;
    match document.get_mut("options").map(Value::take) {
        Some(Value::Object(options)) => Ok(options),
        Some(_) => Err(GenerationError::load_failure(path, "\"options\" is not an object")),
        None => Err(GenerationError::load_failure(path, "missing \"options\" table")),
    }
}

fn read_script(path: &Path) -> Result<String, GenerationError> {
    fs::read_to_string(path).map_err(|err| GenerationError::load_failure(path, err))
}

/// Absolute form of `path`, falling back to joining onto the working directory.
pub(crate) fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    /// Write a minimal, valid resources tree below `root`.
    fn write_resources(root: &Path) -> Result<()> {
        fs::create_dir_all(root.join("scripts"))?;
        fs::write(
            root.join(DEFAULT_OPTIONS_FILE),
            r#"{ "options": { "labels": 2, "externalViews": true } }"#,
        )?;
        fs::write(root.join(MIST_SCRIPT), "mist = {}")?;
        fs::write(root.join(JTAC_SCRIPT), "function JTACAutoLase() end")?;
        fs::write(
            root.join(STATE_SCRIPT),
            "json = loadfile({{json_file_abs_location}})()\nlocal out = {{debriefing_file_location}}",
        )?;
        fs::write(root.join(JSON_LIBRARY), "return {}")?;
        Ok(())
    }

    #[test]
    fn loads_options_and_scripts() -> Result<()> {
        let dir = tempdir()?;
        write_resources(dir.path())?;

        let resources = MissionResources::load(dir.path())?;
        assert_eq!(resources.options.get("labels"), Some(&Value::from(2)));
        assert_eq!(resources.mist, "mist = {}");
        assert!(resources.json_library.is_absolute());
        assert!(resources.json_library.ends_with("scripts/json.lua"));
        Ok(())
    }

    #[test]
    fn missing_script_is_a_load_failure() -> Result<()> {
        let dir = tempdir()?;
        write_resources(dir.path())?;
        fs::remove_file(dir.path().join(JTAC_SCRIPT))?;

        let err = MissionResources::load(dir.path()).unwrap_err();
        match err {
            GenerationError::ResourceLoadFailure { path, .. } => {
                assert!(path.ends_with(JTAC_SCRIPT))
            }
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[test]
    fn options_without_table_are_rejected() -> Result<()> {
        let dir = tempdir()?;
        write_resources(dir.path())?;
        fs::write(dir.path().join(DEFAULT_OPTIONS_FILE), r#"{ "labels": 2 }"#)?;
        assert!(matches!(
            MissionResources::load(dir.path()),
            Err(GenerationError::ResourceLoadFailure { .. })
        ));

        fs::write(dir.path().join(DEFAULT_OPTIONS_FILE), "{ not json")?;
        assert!(matches!(
            MissionResources::load(dir.path()),
            Err(GenerationError::ResourceLoadFailure { .. })
        ));
        Ok(())
    }
}
