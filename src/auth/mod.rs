//! Anonymous authentication — a persistent generated identity.
//!
//! There are no accounts. The first launch generates an opaque anonymous
//! user id and stores it locally; every later launch signs back in as that
//! id. The id is only used to key the saved-game document. If the identity
//! store is unusable the session runs signed out: fully playable, nothing
//! persisted.

use bevy::prelude::*;
use rand::distributions::Alphanumeric;
use rand::Rng;

#[cfg(target_arch = "wasm32")]
pub const IDENTITY_STORAGE_KEY: &str = "gildenhall::identity";

const USER_ID_LEN: usize = 28;

/// Signed-in state. `None` means signed out; persistence is disabled.
#[derive(Resource, Debug, Clone, Default)]
pub struct AuthSession {
    pub user_id: Option<String>,
}

impl AuthSession {
    pub fn signed_in(&self) -> bool {
        self.user_id.is_some()
    }
}

pub struct AuthPlugin;

impl Plugin for AuthPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AuthSession>();
    }
}

/// Load the stored identity, or mint and store a fresh one. Runs during
/// Loading, before the saved-game directory fetch that needs the id.
pub fn sign_in_anonymously(mut auth: ResMut<AuthSession>) {
    if let Some(existing) = read_identity() {
        info!("[Auth] Signed in as {}", existing);
        auth.user_id = Some(existing);
        return;
    }

    let fresh: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(USER_ID_LEN)
        .map(char::from)
        .collect();

    match write_identity(&fresh) {
        Ok(()) => {
            info!("[Auth] Created anonymous identity {}", fresh);
            auth.user_id = Some(fresh);
        }
        Err(err) => {
            warn!("[Auth] Could not store identity ({err}); playing signed out");
            auth.user_id = None;
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// STORAGE — file in the saves directory on native, localStorage on wasm
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
fn identity_path() -> std::path::PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    exe_dir.join("saves").join("identity")
}

#[cfg(not(target_arch = "wasm32"))]
fn read_identity() -> Option<String> {
    let text = std::fs::read_to_string(identity_path()).ok()?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn write_identity(id: &str) -> Result<(), String> {
    let path = identity_path();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| e.to_string())?;
    }
    std::fs::write(path, id).map_err(|e| e.to_string())
}

#[cfg(target_arch = "wasm32")]
fn read_identity() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(IDENTITY_STORAGE_KEY).ok()?
}

#[cfg(target_arch = "wasm32")]
fn write_identity(id: &str) -> Result<(), String> {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| "localStorage unavailable".to_string())?;
    storage
        .set_item(IDENTITY_STORAGE_KEY, id)
        .map_err(|_| "localStorage write failed".to_string())
}
