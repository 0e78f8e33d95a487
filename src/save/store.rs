//! Per-user document store.
//!
//! One JSON document per user id: a file under `saves/` next to the
//! executable on native, a localStorage entry on wasm. Writes are merging
//! at the document level: a slot write reads the stored document, updates
//! only `slots.<slug>`, `current`, and `lastSlot`, and writes the result
//! back, so sibling slots survive every save. Native writes go through a
//! temp file and a rename for atomicity.

use serde_json::Value;

use super::document::SavedGameState;

/// Read the raw stored document. `Ok(None)` means the user has never
/// saved; an unreadable document is an error for the caller to log (the
/// migrating parser then starts from an empty directory).
pub fn read_document(user_id: &str) -> Result<Option<Value>, String> {
    read_raw(user_id)
}

/// Merge one snapshot into the stored document under `slug`, updating
/// `current` and `lastSlot` to point at it.
pub fn write_slot(user_id: &str, slug: &str, snapshot: &SavedGameState) -> Result<(), String> {
    // Best effort on a damaged document: start over from an empty one
    // rather than refusing to save forever.
    let mut doc = match read_raw(user_id) {
        Ok(Some(value)) if value.is_object() => value,
        _ => Value::Object(serde_json::Map::new()),
    };

    let snapshot_value =
        serde_json::to_value(snapshot).map_err(|e| format!("Serialization failed: {e}"))?;

    if let Some(obj) = doc.as_object_mut() {
        let slots = obj
            .entry("slots")
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
        if !slots.is_object() {
            *slots = Value::Object(serde_json::Map::new());
        }
        if let Some(slots) = slots.as_object_mut() {
            slots.insert(slug.to_string(), snapshot_value.clone());
        }
        obj.insert("current".to_string(), snapshot_value);
        obj.insert("lastSlot".to_string(), Value::String(slug.to_string()));
    }

    write_raw(user_id, &doc)
}

// ═══════════════════════════════════════════════════════════════════════
// NATIVE — saves/<user_id>.json next to the executable
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
fn saves_directory() -> std::path::PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    exe_dir.join("saves")
}

#[cfg(not(target_arch = "wasm32"))]
fn document_path(user_id: &str) -> std::path::PathBuf {
    saves_directory().join(format!("{user_id}.json"))
}

#[cfg(not(target_arch = "wasm32"))]
fn read_raw(user_id: &str) -> Result<Option<Value>, String> {
    let path = document_path(user_id);
    if !path.exists() {
        return Ok(None);
    }
    let json = std::fs::read_to_string(&path)
        .map_err(|e| format!("Read failed for {}: {}", path.display(), e))?;
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| format!("Deserialization failed: {e}"))
}

#[cfg(not(target_arch = "wasm32"))]
fn write_raw(user_id: &str, doc: &Value) -> Result<(), String> {
    let dir = saves_directory();
    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("Could not create saves directory: {e}"))?;
    }

    let json =
        serde_json::to_string_pretty(doc).map_err(|e| format!("Serialization failed: {e}"))?;

    let path = document_path(user_id);
    // Write to a temp file first, then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &json)
        .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
    std::fs::rename(&tmp_path, &path).map_err(|e| format!("Rename failed: {e}"))
}

// ═══════════════════════════════════════════════════════════════════════
// WASM — localStorage under gildenhall::saves::<user_id>
// ═══════════════════════════════════════════════════════════════════════

#[cfg(target_arch = "wasm32")]
fn storage_key(user_id: &str) -> String {
    format!("gildenhall::saves::{user_id}")
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| "localStorage unavailable".to_string())
}

#[cfg(target_arch = "wasm32")]
fn read_raw(user_id: &str) -> Result<Option<Value>, String> {
    let storage = local_storage()?;
    let Some(json) = storage
        .get_item(&storage_key(user_id))
        .map_err(|_| "localStorage read failed".to_string())?
    else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| format!("Deserialization failed: {e}"))
}

#[cfg(target_arch = "wasm32")]
fn write_raw(user_id: &str, doc: &Value) -> Result<(), String> {
    let storage = local_storage()?;
    let json = serde_json::to_string(doc).map_err(|e| format!("Serialization failed: {e}"))?;
    storage
        .set_item(&storage_key(user_id), &json)
        .map_err(|_| "localStorage write failed".to_string())
}
