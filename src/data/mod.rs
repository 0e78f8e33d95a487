//! Data layer — populates the static content registries at startup.
//!
//! This plugin runs in OnEnter(GameState::Loading) and fills the
//! ItemRegistry and ProfessionCatalog from the hard-coded game-design data
//! in the submodules. The session controller (save plugin) chains after it
//! and moves the game on to the main menu once the saved-game directory has
//! been fetched, so every other domain can assume the registries are ready
//! once GameState has advanced past Loading.

pub mod items;
pub mod professions;

use bevy::prelude::*;

use crate::shared::*;

pub use self::items::{default_item_def, item_definition};
pub use self::professions::initial_professions;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

fn load_all_data(
    mut item_registry: ResMut<ItemRegistry>,
    mut profession_catalog: ResMut<ProfessionCatalog>,
) {
    info!("[Data] Populating registries…");

    items::populate_items(&mut item_registry);
    info!("  Items loaded: {}", item_registry.items.len());

    professions::populate_professions(&mut profession_catalog);
    let total_tasks: usize = profession_catalog
        .templates
        .iter()
        .map(|t| t.tasks.len())
        .sum();
    info!(
        "  Professions loaded: {} with {} tasks",
        profession_catalog.templates.len(),
        total_tasks
    );
}
