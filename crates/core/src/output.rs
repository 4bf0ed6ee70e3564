//! Persistence of generated missions.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::mission::GeneratedMission;

/// A mission file found in the output directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionEntry {
    /// Absolute path to the mission file.
    pub path: PathBuf,
    /// Campaign the mission was generated for.
    pub campaign: String,
    /// Terrain the mission is set on.
    pub terrain: String,
    /// When the file was written.
    pub written_at: DateTime<Utc>,
}

/// On-disk representation of a generated mission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionFile {
    campaign: String,
    written_at: DateTime<Utc>,
    generated: GeneratedMission,
}

impl MissionFile {
    /// The generated mission stored in the file.
    pub fn generated(&self) -> &GeneratedMission {
        &self.generated
    }

    /// Consume the file and return the generated mission.
    pub fn into_generated(self) -> GeneratedMission {
        self.generated
    }
}

/// Writes generated missions into a directory and lists earlier ones.
pub struct MissionWriter {
    root: PathBuf,
}

impl MissionWriter {
    /// Create a writer rooted at the provided directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write a mission and return its entry.
    pub fn write(&self, campaign: &str, generated: &GeneratedMission) -> Result<MissionEntry> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create {}", self.root.display()))?;

        let written_at = Utc::now();
        let file_name = format!(
            "{}_{}.json",
            sanitize_component(&generated.mission.terrain),
            written_at.format("%Y%m%d%H%M%S%3f")
        );
        let path = self.root.join(file_name);
        let file = MissionFile {
            campaign: campaign.to_string(),
            written_at,
            generated: generated.clone(),
        };
        self.write_file(&path, &file)?;
        info!(path = %path.display(), "Mission written");

        Ok(MissionEntry {
            path,
            campaign: file.campaign,
            terrain: generated.mission.terrain.clone(),
            written_at,
        })
    }

    /// All mission files sorted by timestamp (most recent first).
    pub fn entries(&self) -> Result<Vec<MissionEntry>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.root).context("failed to read mission directory")? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if entry.path().extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            match self.read(entry.path()) {
                Ok(file) => entries.push(MissionEntry {
                    path: entry.path(),
                    campaign: file.campaign,
                    terrain: file.generated.mission.terrain,
                    written_at: file.written_at,
                }),
                Err(err) => {
                    warn!("Failed to read mission {:?}: {err}", entry.path());
                }
            }
        }

        entries.sort_by(|a, b| b.written_at.cmp(&a.written_at));
        Ok(entries)
    }

    /// Most recent mission, if any.
    pub fn latest(&self) -> Result<Option<MissionEntry>> {
        Ok(self.entries()?.into_iter().next())
    }

    /// Read a mission file.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<MissionFile> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(file)
    }

    fn write_file(&self, path: &Path, file: &MissionFile) -> Result<()> {
        let serialised = serde_json::to_vec_pretty(file)?;
        fs::write(path, serialised).with_context(|| format!("failed to write {}", path.display()))
    }
}

fn sanitize_component(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_') {
            result.push(ch);
        }
    }
    if result.is_empty() {
        "mission".to_string()
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mission::{Jtac, Mission},
        report::GenerationReport,
        support::AirSupport,
    };
    use serde_json::Map;
    use tempfile::tempdir;

    fn sample(terrain: &str) -> GeneratedMission {
        GeneratedMission {
            mission: Mission::new(terrain, Map::new()),
            flights: Vec::new(),
            air_support: AirSupport::default(),
            jtacs: vec![Jtac {
                region: "Gori".to_string(),
                code: 1688,
                name: "JTAC1".to_string(),
            }],
            report: GenerationReport::new(),
        }
    }

    #[test]
    fn write_and_list() -> Result<()> {
        let dir = tempdir()?;
        let writer = MissionWriter::new(dir.path().join("missions"));
        assert!(writer.entries()?.is_empty());

        let first = writer.write("Op Test", &sample("Caucasus"))?;
        assert!(first.path.exists());
        assert!(first
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("Caucasus_")));
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = writer.write("Op Test", &sample("Persian Gulf"))?;

        let entries = writer.entries()?;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, second.path);
        assert_eq!(entries[0].terrain, "Persian Gulf");

        let latest = writer.latest()?.expect("expected latest entry");
        let file = writer.read(&latest.path)?;
        assert_eq!(file.generated().jtacs[0].name, "JTAC1");
        Ok(())
    }

    #[test]
    fn unreadable_files_are_skipped() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("broken.json"), "{")?;
        fs::write(dir.path().join("notes.txt"), "hello")?;
        let writer = MissionWriter::new(dir.path());
        assert!(writer.entries()?.is_empty());
        Ok(())
    }

    #[test]
    fn sanitize_creates_safe_filenames() {
        assert_eq!(sanitize_component("Persian Gulf"), "PersianGulf");
        assert_eq!(sanitize_component("??"), "mission");
    }
}
