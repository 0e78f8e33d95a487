use crate::professions::simulation::xp_required_for_level;
use crate::shared::*;

fn task(
    id: &str,
    name: &str,
    description: &str,
    required_level: u32,
    experience: u64,
    time_to_complete: u64,
    resource_id: &str,
) -> SkillTask {
    SkillTask {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        required_level,
        experience,
        time_to_complete,
        resource_id: resource_id.into(),
        resource_quantity: 1,
    }
}

/// Populate the ProfessionCatalog with every trainable profession and its
/// ordered task list.
///
/// Task order is load-bearing: a player's active task is stored as an index
/// into this list, so entries must only ever be appended.
pub fn populate_professions(catalog: &mut ProfessionCatalog) {
    catalog.templates = vec![
        ProfessionTemplate {
            id: "mining",
            name: "Mining",
            tasks: vec![
                task(
                    "copper_ore",
                    "Mine Copper Ore",
                    "Basic ore found in surface rocks.",
                    1,
                    10,
                    3000,
                    "Copper Ore",
                ),
                task(
                    "tin_ore",
                    "Mine Tin Ore",
                    "A soft metal often mixed with copper.",
                    1,
                    10,
                    3000,
                    "Tin Ore",
                ),
                task(
                    "iron_ore",
                    "Mine Iron Ore",
                    "A common and sturdy metal.",
                    15,
                    35,
                    5000,
                    "Iron Ore",
                ),
                task(
                    "coal",
                    "Mine Coal",
                    "A vital fuel for smelting.",
                    30,
                    50,
                    7000,
                    "Coal",
                ),
            ],
        },
        ProfessionTemplate {
            id: "woodcutting",
            name: "Woodcutting",
            tasks: vec![
                task(
                    "logs",
                    "Chop Trees",
                    "Standard logs from common trees.",
                    1,
                    25,
                    4000,
                    "Logs",
                ),
                task(
                    "oak_logs",
                    "Chop Oak Trees",
                    "Sturdy logs from mighty oaks.",
                    15,
                    60,
                    8000,
                    "Oak Logs",
                ),
            ],
        },
        ProfessionTemplate {
            id: "fishing",
            name: "Fishing",
            tasks: vec![
                task(
                    "shrimp",
                    "Net Shrimp",
                    "Easy pickings in the harbor shallows.",
                    1,
                    10,
                    3500,
                    "Raw Shrimp",
                ),
                task(
                    "trout",
                    "Catch Trout",
                    "Patience and a steady line upstream.",
                    15,
                    40,
                    6000,
                    "Raw Trout",
                ),
            ],
        },
        ProfessionTemplate {
            id: "farming",
            name: "Farming",
            tasks: vec![
                task(
                    "potatoes",
                    "Harvest Potatoes",
                    "Dig rows of the guild's staple crop.",
                    1,
                    12,
                    4000,
                    "Potatoes",
                ),
                task(
                    "wheat",
                    "Harvest Wheat",
                    "Scythe work under the open sky.",
                    10,
                    30,
                    6500,
                    "Wheat",
                ),
            ],
        },
    ];
}

/// Stamp a fresh level-1 roster from the catalog. Used by new-game.
pub fn initial_professions(catalog: &ProfessionCatalog) -> Vec<ProfessionState> {
    catalog
        .templates
        .iter()
        .map(|template| ProfessionState {
            id: template.id.to_string(),
            name: template.name.to_string(),
            level: 1,
            current_xp: 0,
            xp_to_next_level: xp_required_for_level(1),
            active_task_index: None,
            is_paused: false,
            task_progress: 0,
            tasks: template.tasks.clone(),
        })
        .collect()
}
