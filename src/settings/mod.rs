//! Player settings — a small JSON blob under a fixed namespaced key.
//!
//! Stored fields are merged over hardcoded defaults on load, so documents
//! written by older builds (or hand-edited ones missing fields) still load;
//! corrupt data silently falls back to the defaults. Persisted whenever the
//! resource changes.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
pub const SETTINGS_STORAGE_KEY: &str = "gildenhall::settings";

#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    pub music_volume: u8,
    pub effects_volume: u8,
    pub show_tooltips: bool,
    pub show_notifications: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            music_volume: 70,
            effects_volume: 80,
            show_tooltips: true,
            show_notifications: true,
        }
    }
}

/// Settings as they appear on disk: every field optional, unknown fields
/// ignored, so partial documents merge cleanly over the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSettings {
    music_volume: Option<u8>,
    effects_volume: Option<u8>,
    show_tooltips: Option<bool>,
    show_notifications: Option<bool>,
}

fn merge_over_defaults(stored: StoredSettings) -> GameSettings {
    let defaults = GameSettings::default();
    GameSettings {
        music_volume: stored.music_volume.unwrap_or(defaults.music_volume),
        effects_volume: stored.effects_volume.unwrap_or(defaults.effects_volume),
        show_tooltips: stored.show_tooltips.unwrap_or(defaults.show_tooltips),
        show_notifications: stored
            .show_notifications
            .unwrap_or(defaults.show_notifications),
    }
}

/// Parse a settings blob. Anything unparseable is treated as absent.
fn parse_settings(raw: Option<&str>) -> GameSettings {
    let Some(raw) = raw else {
        return GameSettings::default();
    };
    match serde_json::from_str::<StoredSettings>(raw) {
        Ok(stored) => merge_over_defaults(stored),
        Err(err) => {
            warn!("[Settings] Failed to parse saved settings: {err}");
            GameSettings::default()
        }
    }
}

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(parse_settings(read_settings_blob().as_deref()))
            .add_systems(Update, persist_settings);
    }
}

fn persist_settings(settings: Res<GameSettings>) {
    if !settings.is_changed() || settings.is_added() {
        return;
    }
    match serde_json::to_string(&*settings) {
        Ok(json) => {
            if let Err(err) = write_settings_blob(&json) {
                warn!("[Settings] Failed to persist settings: {err}");
            }
        }
        Err(err) => warn!("[Settings] Failed to serialize settings: {err}"),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// STORAGE — file next to the executable on native, localStorage on wasm
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
fn settings_path() -> std::path::PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    exe_dir.join("settings.json")
}

#[cfg(not(target_arch = "wasm32"))]
fn read_settings_blob() -> Option<String> {
    std::fs::read_to_string(settings_path()).ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn write_settings_blob(json: &str) -> Result<(), String> {
    std::fs::write(settings_path(), json).map_err(|e| e.to_string())
}

#[cfg(target_arch = "wasm32")]
fn read_settings_blob() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(SETTINGS_STORAGE_KEY).ok()?
}

#[cfg(target_arch = "wasm32")]
fn write_settings_blob(json: &str) -> Result<(), String> {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| "localStorage unavailable".to_string())?;
    storage
        .set_item(SETTINGS_STORAGE_KEY, json)
        .map_err(|_| "localStorage write failed".to_string())
}
