//! Support scripts injected as mission-start triggers.

use std::{borrow::Cow, collections::HashMap, path::Path};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use super::{Jtac, MissionResources, Trigger};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("invalid placeholder regex")
});

/// Replace every `{{name}}` with its value. Unknown names are left as they are.
pub fn render_template<'a>(template: &'a str, values: &HashMap<&str, String>) -> Cow<'a, str> {
    PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| match values.get(&caps[1]) {
        Some(value) => value.clone(),
        None => caps[0].to_string(),
    })
}

/// Lua long-bracket string literal for a path.
pub fn lua_path_literal(path: &Path) -> String {
    format!("[[{}]]", path.display())
}

/// The JTAC script followed by one auto-lase call per JTAC.
pub fn jtac_script(base: &str, jtacs: &[Jtac], smoke: bool) -> String {
    let mut script = String::with_capacity(base.len() + jtacs.len() * 64);
    script.push_str(base);
    script.push('\n');
    for jtac in jtacs {
        script.push_str(&format!(
            "\nJTACAutoLase('{}', {}, {}, \"vehicle\")\n",
            jtac.name, jtac.code, smoke
        ));
    }
    script
}

/// The three start triggers, in load order: framework, JTAC, mission state.
pub fn support_triggers(
    resources: &MissionResources,
    jtacs: &[Jtac],
    smoke: bool,
    state_file: &Path,
) -> Vec<Trigger> {
    let values = HashMap::from([
        (
            "json_file_abs_location",
            lua_path_literal(&resources.json_library),
        ),
        (
            "debriefing_file_location",
            lua_path_literal(&super::resources::absolute(state_file)),
        ),
    ]);
    let state = render_template(&resources.mission_state, &values);
    debug!(jtacs = jtacs.len(), smoke, "Support scripts rendered");

    vec![
        Trigger::start_script("Load Mist Lua Framework", resources.mist.clone()),
        Trigger::start_script(
            "Load JTAC script",
            jtac_script(&resources.jtac_autolase, jtacs, smoke),
        ),
        Trigger::start_script("Load mission state script", state.into_owned()),
    ]
}
