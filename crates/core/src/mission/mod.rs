//! Mission assembly: the artifact under construction and the phases that fill it.

pub mod briefing;
pub mod campaign;
pub mod context;
pub mod orchestrator;
pub mod phases;
pub mod resources;
pub mod scenario;
pub mod scripts;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{Coalition, Position};

pub use briefing::{Briefing, BriefingBuilder, BriefingFrequency, KneeboardPage};
pub use campaign::{
    Campaign, ControlPoint, DestroyedUnit, FlightPlanner, Frontline, PlannedFlight, PlayZone,
    SupportRequest, TankerRequest,
};
pub use context::MissionGenerationContext;
pub use orchestrator::{GeneratedMission, MissionOrchestrator};
pub use phases::PhaseGenerators;
pub use resources::MissionResources;
pub use scenario::ScenarioGenerators;

/// Sky condition of a generated environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    /// No clouds.
    Clear,
    /// Scattered to broken clouds.
    Clouds,
    /// Overcast with rain.
    Rain,
    /// Thunderstorms.
    Thunderstorm,
}

/// Weather and time of day. Once generated for a campaign it is reused verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSettings {
    /// Mission start.
    pub start_time: DateTime<Utc>,
    /// Sky condition.
    pub weather: Weather,
    /// Ground wind speed in metres per second.
    pub wind_speed: f64,
    /// Direction the wind blows from, degrees.
    pub wind_direction: u16,
    /// Sea level temperature, Celsius.
    pub temperature: f64,
}

/// A JTAC registered by a frontline conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jtac {
    /// Frontline or zone the JTAC covers.
    pub region: String,
    /// Laser code.
    pub code: u16,
    /// Unit name the auto-lase script drives.
    pub name: String,
}

/// Countries assigned to each coalition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coalitions {
    /// Blue coalition countries.
    pub blue: Vec<String>,
    /// Red coalition countries.
    pub red: Vec<String>,
}

/// A static object placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticGroup {
    /// Owning country.
    pub country: String,
    /// Group name.
    pub name: String,
    /// Unit type identifier.
    pub unit_type: String,
    /// Map position.
    pub position: Position,
    /// Heading in degrees.
    pub heading: f64,
    /// Hidden on the map for both sides.
    pub hidden: bool,
    /// Placed as wreckage.
    pub dead: bool,
}

/// Combined-arms settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundControl {
    /// Whether pilots may take control of ground vehicles.
    pub pilot_can_control_vehicles: bool,
    /// Tactical commander slots for blue.
    pub blue_tactical_commander: u32,
    /// Tactical commander slots for red.
    pub red_tactical_commander: u32,
}

/// When a trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Once at mission start.
    MissionStart,
    /// Once when its condition is met.
    Once,
    /// Every time its condition is met.
    Continuous,
}

/// What a trigger does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TriggerAction {
    /// Run a Lua chunk.
    DoScript {
        /// Script source.
        script: String,
    },
    /// Show a message to a coalition.
    Message {
        /// Receiving coalition.
        coalition: Coalition,
        /// Message text.
        text: String,
    },
    /// Set a mission flag.
    SetFlag {
        /// Flag name.
        flag: String,
    },
}

/// A mission trigger rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    /// Editor comment.
    pub comment: String,
    /// Firing behaviour.
    pub kind: TriggerKind,
    /// Actions in order.
    pub actions: Vec<TriggerAction>,
}

impl Trigger {
    /// A mission-start trigger running one script.
    pub fn start_script(comment: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            kind: TriggerKind::MissionStart,
            actions: vec![TriggerAction::DoScript {
                script: script.into(),
            }],
        }
    }
}

/// A visual effect such as a smoke column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualEffect {
    /// Effect preset name.
    pub kind: String,
    /// Map position.
    pub position: Position,
}

/// The mission being assembled by a generation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    /// Terrain the mission is set on.
    pub terrain: String,
    /// When the pass ran.
    pub generated_at: DateTime<Utc>,
    /// Countries per coalition.
    pub coalitions: Coalitions,
    /// Mission options, seeded from the base option table.
    pub options: Map<String, Value>,
    /// Weather and time of day.
    pub environment: Option<EnvironmentSettings>,
    /// Static objects.
    #[serde(default)]
    pub static_groups: Vec<StaticGroup>,
    /// Combined-arms settings.
    #[serde(default)]
    pub ground_control: GroundControl,
    /// Trigger rules in execution order.
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    /// Visual effects.
    #[serde(default)]
    pub effects: Vec<VisualEffect>,
    /// Briefing text.
    #[serde(default)]
    pub briefing: Briefing,
    /// Kneeboard pages.
    #[serde(default)]
    pub kneeboard: Vec<KneeboardPage>,
}

impl Mission {
    /// Empty mission on a terrain with the given base options.
    pub fn new(terrain: impl Into<String>, options: Map<String, Value>) -> Self {
        Self {
            terrain: terrain.into(),
            generated_at: Utc::now(),
            coalitions: Coalitions::default(),
            options,
            environment: None,
            static_groups: Vec::new(),
            ground_control: GroundControl::default(),
            triggers: Vec::new(),
            effects: Vec::new(),
            briefing: Briefing::default(),
            kneeboard: Vec::new(),
        }
    }
}
