use anyhow::{bail, Context, Result};
use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
};

use missiongen_core::{
    config::{self, AppConfig},
    mission::{Campaign, MissionOrchestrator, MissionResources, ScenarioGenerators},
    output::MissionWriter,
    reference::{AircraftCatalog, TerrainCatalog},
};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

const USAGE: &str = "usage: missiongen <campaign.json> [output-dir]\n       missiongen --terrains";

fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("--terrains") => list_terrains(&config),
        Some("-h") | Some("--help") => {
            println!("{USAGE}");
            Ok(())
        }
        Some(campaign) => {
            let output = args.next().map(PathBuf::from);
            generate(&config, PathBuf::from(campaign), output)
        }
        None => bail!(USAGE),
    }
}

fn list_terrains(config: &AppConfig) -> Result<()> {
    let catalog = TerrainCatalog::new(&config.resources_root);
    for name in catalog.available()? {
        println!("{name}");
    }
    Ok(())
}

fn generate(config: &AppConfig, campaign_path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let mut campaign = Campaign::load(&campaign_path)?;

    let resources = MissionResources::load(&config.resources_root)?;
    let terrain = TerrainCatalog::new(&config.resources_root)
        .terrain(&campaign.terrain)
        .with_context(|| {
            format!(
                "campaign {} needs terrain {}",
                campaign.name, campaign.terrain
            )
        })?;

    let overrides;
    let aircraft = match &config.aircraft_overrides {
        Some(path) => {
            overrides = AircraftCatalog::with_overrides(path)?;
            &overrides
        }
        None => AircraftCatalog::builtin(),
    };

    let orchestrator =
        MissionOrchestrator::new(&terrain, aircraft, &resources, &config.generation);
    let generated = orchestrator.generate(&mut campaign, &mut ScenarioGenerators::new())?;

    let writer = MissionWriter::new(output.unwrap_or_else(|| config.output_dir.clone()));
    let entry = writer.write(&campaign.name, &generated)?;
    campaign.persist(&campaign_path)?;

    if !generated.report.is_clean() {
        warn!(
            skipped = generated.report.diagnostics().len(),
            "Some entities were skipped"
        );
        println!("{}", serde_json::to_string_pretty(generated.report.diagnostics())?);
    }
    info!(campaign = %campaign.name, path = %entry.path.display(), "Done");
    println!("{}", entry.path.display());
    Ok(())
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("missiongen.log");

    let env_filter = EnvFilter::from_default_env();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stdout);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(())
}
