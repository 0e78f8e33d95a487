mod auth;
mod currency;
mod data;
mod economy;
mod inventory;
mod professions;
mod save;
mod settings;
mod shared;
mod ui;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use crate::shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Gildenhall".into(),
                    resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                    present_mode: PresentMode::AutoVsync,
                    resizable: true,
                    ..default()
                }),
                ..default()
            }),
        )
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<SessionStatus>()
        .init_resource::<ResourceLedger>()
        .init_resource::<Professions>()
        .init_resource::<PlayerInventory>()
        .init_resource::<ItemRegistry>()
        .init_resource::<ProfessionCatalog>()
        // Events
        .add_event::<SetTaskEvent>()
        .add_event::<SellItemEvent>()
        .add_event::<MoveItemEvent>()
        .add_event::<EquipItemEvent>()
        .add_event::<UpgradeInventoryEvent>()
        .add_event::<NewGameEvent>()
        .add_event::<ContinueEvent>()
        .add_event::<LoadSlotEvent>()
        .add_event::<SaveRequestEvent>()
        .add_event::<LootGainedEvent>()
        .add_event::<LootRejectedEvent>()
        .add_event::<NotificationEvent>()
        // Domain plugins
        .add_plugins(auth::AuthPlugin)
        .add_plugins(settings::SettingsPlugin)
        .add_plugins(data::DataPlugin)
        .add_plugins(professions::ProfessionsPlugin)
        .add_plugins(inventory::InventoryPlugin)
        .add_plugins(economy::EconomyPlugin)
        .add_plugins(save::SavePlugin)
        .add_plugins(ui::UiPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
