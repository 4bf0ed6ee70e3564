#![allow(missing_docs)]

//! Campaign state a mission is generated from.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::EnvironmentSettings;
use crate::models::{Coalition, Position};

/// A flight a control point's planner wants in the mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedFlight {
    pub name: String,
    pub aircraft_type: String,
    #[serde(default = "default_flight_size")]
    pub size: u8,
    #[serde(default)]
    pub client_slots: Vec<String>,
    /// Arrival airfield; the departure airfield when absent.
    #[serde(default)]
    pub arrival: Option<String>,
    #[serde(default)]
    pub divert: Option<String>,
}

fn default_flight_size() -> u8 {
    2
}

/// Flights planned for one control point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightPlanner {
    #[serde(default)]
    pub flights: Vec<PlannedFlight>,
}

/// A location on the campaign map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub id: u32,
    pub name: String,
    /// Owned by the player.
    pub captured: bool,
    #[serde(default)]
    pub airfield: Option<String>,
    pub position: Position,
    #[serde(default)]
    pub planner: Option<FlightPlanner>,
}

/// A contested pair of adjacent control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontline {
    pub player_cp: u32,
    pub enemy_cp: u32,
}

/// A unit destroyed in an earlier mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestroyedUnit {
    pub unit_type: String,
    pub position: Position,
    #[serde(default)]
    pub orientation: f64,
}

/// Circular region of the active play area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayZone {
    pub center: Position,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TankerRequest {
    pub callsign: String,
    pub variant: String,
}

/// Air-support units the campaign asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportRequest {
    #[serde(default)]
    pub tankers: Vec<TankerRequest>,
    #[serde(default)]
    pub awacs: Vec<String>,
}

/// Persistent campaign state consumed by a generation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub name: String,
    pub terrain: String,
    pub player_country: String,
    pub enemy_country: String,
    #[serde(default = "default_player_coalition")]
    pub player_coalition: Coalition,
    #[serde(default = "default_start_time")]
    pub start_time: DateTime<Utc>,
    /// Seed for the data-driven generators.
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub control_points: Vec<ControlPoint>,
    #[serde(default)]
    pub frontlines: Vec<Frontline>,
    #[serde(default)]
    pub destroyed_units: Vec<DestroyedUnit>,
    /// Active play area; empty means the whole map.
    #[serde(default)]
    pub play_area: Vec<PlayZone>,
    #[serde(default)]
    pub air_support: SupportRequest,
    /// Environment of the previous pass, reused verbatim when present.
    #[serde(default)]
    pub environment: Option<EnvironmentSettings>,
}

fn default_player_coalition() -> Coalition {
    Coalition::Blue
}

fn default_start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2011, 6, 1, 8, 0, 0)
        .single()
        .unwrap_or_default()
}

impl Campaign {
    /// Read a campaign file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read campaign {}", path.display()))?;
        let campaign = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse campaign {}", path.display()))?;
        Ok(campaign)
    }

    /// Write the campaign back, creating parent directories if needed.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create campaign directory {}", parent.display())
            })?;
        }
        let serialized =
            serde_json::to_string_pretty(self).context("failed to serialize campaign")?;
        fs::write(path, serialized)
            .with_context(|| format!("failed to write campaign {}", path.display()))?;
        Ok(path.to_path_buf())
    }

    pub fn control_point(&self, id: u32) -> Option<&ControlPoint> {
        self.control_points.iter().find(|cp| cp.id == id)
    }

    /// Whether a position lies outside the active play area.
    pub fn position_culled(&self, position: &Position) -> bool {
        !self.play_area.is_empty()
            && !self
                .play_area
                .iter()
                .any(|zone| zone.center.distance_to(position) <= zone.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn minimal_campaign_fills_defaults_and_round_trips() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("campaign.json");
        fs::write(
            &path,
            r#"{
                "name": "Op Test",
                "terrain": "Caucasus",
                "player_country": "USA",
                "enemy_country": "Russia"
            }"#,
        )?;

        let campaign = Campaign::load(&path)?;
        assert_eq!(campaign.player_coalition, Coalition::Blue);
        assert!(campaign.environment.is_none());
        assert!(campaign.control_points.is_empty());

        let written = campaign.persist(dir.path().join("nested/campaign.json"))?;
        assert_eq!(Campaign::load(written)?, campaign);
        Ok(())
    }

    #[test]
    fn culling_only_applies_with_a_play_area() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("campaign.json");
        fs::write(
            &path,
            r#"{ "name": "A", "terrain": "T", "player_country": "USA", "enemy_country": "Russia" }"#,
        )?;
        let mut campaign = Campaign::load(&path)?;
        let far = Position { x: 50_000.0, z: 0.0 };
        assert!(!campaign.position_culled(&far));

        campaign.play_area.push(PlayZone {
            center: Position { x: 0.0, z: 0.0 },
            radius: 10_000.0,
        });
        assert!(campaign.position_culled(&far));
        assert!(!campaign.position_culled(&Position { x: 100.0, z: 100.0 }));
        Ok(())
    }
}
