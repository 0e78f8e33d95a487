//! Presentation boundary — toasts, HUD text, and the keyboard main menu.
//!
//! Deliberately thin: everything here either renders shared state or
//! translates input into the shared command events. No game rule lives in
//! this module.

pub mod hud;
pub mod input;
pub mod main_menu;
pub mod toast;

use bevy::prelude::*;

use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<hud::RecentLoot>();

        // ─── NOTIFICATIONS — always live, events can fire in any state ───
        app.add_systems(Startup, toast::spawn_toast_container);
        app.add_systems(
            Update,
            (
                toast::wire_loot_toasts,
                toast::wire_rejected_toasts,
                toast::handle_notifications,
                toast::update_toasts,
            )
                .chain(),
        );
        app.add_systems(Update, (hud::track_recent_loot, hud::expire_recent_loot));

        // ─── MAIN MENU ───
        app.add_systems(OnEnter(GameState::MainMenu), main_menu::open_main_menu);
        app.add_systems(OnExit(GameState::MainMenu), main_menu::close_main_menu);
        app.add_systems(
            Update,
            (
                main_menu::rebuild_main_menu,
                main_menu::update_menu_visuals,
                main_menu::main_menu_navigation,
            )
                .run_if(in_state(GameState::MainMenu)),
        );

        // ─── HUD — visible during Playing state ───
        app.add_systems(OnEnter(GameState::Playing), hud::spawn_hud);
        app.add_systems(OnExit(GameState::Playing), hud::despawn_hud);
        app.add_systems(
            Update,
            (
                hud::update_gold_display,
                hud::update_profession_rows,
                hud::update_inventory_display,
                hud::update_hint_visibility,
                input::global_input_handler,
                input::command_keybinds,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}
