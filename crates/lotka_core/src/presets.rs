use crate::config::SimulationConfig;
use serde::Serialize;

/// A named example scenario the user can load into the form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    pub slug: &'static str,
    pub name: &'static str,
    pub config: SimulationConfig,
}

pub fn presets() -> Vec<Preset> {
    let base = SimulationConfig::default();
    vec![
        Preset {
            slug: "default",
            name: "Default",
            config: base,
        },
        Preset {
            slug: "wolves-vs-elk",
            name: "Wolves vs Elk",
            config: SimulationConfig {
                growth_rate: 0.1,
                predation_rate: 0.02,
                death_rate: 0.05,
                efficiency_rate: 0.01,
                initial_prey: 10.0,
                initial_predator: 10.0,
                duration: 200.0,
                ..base
            },
        },
        Preset {
            slug: "foxes-vs-hares",
            name: "Foxes vs Hares",
            config: SimulationConfig {
                growth_rate: 1.0,
                predation_rate: 0.2,
                death_rate: 1.0,
                efficiency_rate: 0.1,
                initial_prey: 5.0,
                initial_predator: 10.0,
                duration: 50.0,
                ..base
            },
        },
    ]
}

/// Looks a preset up by slug or display name, ignoring case.
pub fn find_preset(name: &str) -> Option<Preset> {
    let needle = name.trim();
    presets()
        .into_iter()
        .find(|p| p.slug.eq_ignore_ascii_case(needle) || p.name.eq_ignore_ascii_case(needle))
}
