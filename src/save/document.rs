//! The persisted save format: snapshots, the multi-slot document, and the
//! schema-migrating parser.
//!
//! Save format is self-contained: dedicated serde structs decouple the
//! wire shape from the in-memory resources, and every field is optional or
//! defaulted so damaged or out-of-date documents hydrate to something
//! playable instead of erroring. Field names are camelCase on the wire;
//! they predate this codebase and are part of the document contract.
//!
//! Two historical shapes exist besides the current one:
//! - absent: the player has never saved
//! - legacy: a single flat snapshot with a top-level `resources` field
//! `parse_document` normalizes all three into the current multi-slot form
//! and never fails.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::currency::Coin;
use crate::shared::*;

/// Slot key used when a save is written with no explicit name, which is
/// also what the periodic autosave does.
pub const AUTOSAVE_SLOT: &str = "autosave";
pub const AUTOSAVE_NAME: &str = "Autosave";

// ═══════════════════════════════════════════════════════════════════════
// WIRE TYPES
// ═══════════════════════════════════════════════════════════════════════

/// One serialized game snapshot. Resource amounts travel as decimal
/// strings; everything else mirrors the in-memory types.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGameState {
    /// `None` and an empty map are distinct: an absent field hydrates to
    /// the starting ledger, an empty map hydrates empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub professions: Vec<ProfessionState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Vec<InventorySlot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_capacity: Option<usize>,
    /// Unix milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_name: Option<String>,
}

/// The per-user document: a directory of named slots, a pointer to the
/// most recently touched one, and a convenience mirror of it as `current`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGameDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<SavedGameState>,
    #[serde(default)]
    pub slots: BTreeMap<String, SavedGameState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_slot: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// SNAPSHOT / HYDRATE
// ═══════════════════════════════════════════════════════════════════════

/// Serialize the live session into a snapshot, stamped with the current
/// time and the given slot/display names.
pub fn snapshot_game(
    ledger: &ResourceLedger,
    professions: &Professions,
    inventory: &PlayerInventory,
    slot_name: &str,
    save_name: &str,
) -> SavedGameState {
    let resources = ledger
        .amounts
        .iter()
        .map(|(id, amount)| (id.clone(), amount.to_string()))
        .collect();

    SavedGameState {
        resources: Some(resources),
        professions: professions.list.clone(),
        inventory: Some(inventory.slots.clone()),
        inventory_capacity: Some(inventory.capacity),
        saved_at: Some(now_millis()),
        save_name: Some(save_name.to_string()),
        slot_name: Some(slot_name.to_string()),
    }
}

/// Rebuild the in-memory session from a snapshot.
///
/// Capacity defaults to the base capacity; the inventory is rebuilt at
/// exactly capacity length, copying positionally (slots beyond the
/// snapshot stay empty, slots beyond capacity are dropped). Professions
/// are trusted to match current content by id; no task-list migration is
/// attempted.
pub fn hydrate(saved: &SavedGameState) -> (ResourceLedger, Professions, PlayerInventory) {
    let capacity = saved.inventory_capacity.unwrap_or(BASE_INVENTORY_CAPACITY);

    let mut slots: Vec<InventorySlot> = vec![None; capacity];
    if let Some(saved_slots) = &saved.inventory {
        for (index, slot) in saved_slots.iter().enumerate() {
            if index < slots.len() {
                slots[index] = slot.clone();
            }
        }
    }

    let mut amounts = HashMap::new();
    match &saved.resources {
        Some(map) => {
            for (id, text) in map {
                amounts.insert(id.clone(), Coin::from_text(text));
            }
        }
        None => {
            amounts.insert(GOLD.to_string(), Coin::from(STARTING_GOLD));
        }
    }

    (
        ResourceLedger { amounts },
        Professions {
            list: saved.professions.clone(),
        },
        PlayerInventory { slots, capacity },
    )
}

// ═══════════════════════════════════════════════════════════════════════
// SCHEMA MIGRATION
// ═══════════════════════════════════════════════════════════════════════

/// Normalize whatever is stored under the user's key into the current
/// document shape. Total over absent, legacy, and current documents;
/// unparseable slots degrade to being skipped, never to an error.
pub fn parse_document(raw: Option<&Value>) -> SavedGameDocument {
    let Some(raw) = raw.filter(|v| v.is_object()) else {
        return SavedGameDocument::default();
    };

    // Legacy single-save shape: a snapshot at the top level, recognized by
    // its `resources` field. Wrap it as the sole autosave slot.
    if raw.get("resources").is_some() {
        let Ok(mut legacy) = serde_json::from_value::<SavedGameState>(raw.clone()) else {
            return SavedGameDocument::default();
        };
        legacy.saved_at = legacy.saved_at.or_else(|| Some(now_millis()));
        legacy.slot_name.get_or_insert_with(|| AUTOSAVE_SLOT.to_string());
        legacy.save_name.get_or_insert_with(|| AUTOSAVE_NAME.to_string());

        let mut slots = BTreeMap::new();
        slots.insert(AUTOSAVE_SLOT.to_string(), legacy.clone());
        return SavedGameDocument {
            current: Some(legacy),
            slots,
            last_slot: Some(AUTOSAVE_SLOT.to_string()),
        };
    }

    let mut slots = BTreeMap::new();
    if let Some(raw_slots) = raw.get("slots").and_then(Value::as_object) {
        for (key, value) in raw_slots {
            let Ok(mut snapshot) = serde_json::from_value::<SavedGameState>(value.clone()) else {
                continue;
            };
            snapshot.slot_name.get_or_insert_with(|| key.clone());
            snapshot.save_name.get_or_insert_with(|| key.clone());
            snapshot.saved_at = snapshot.saved_at.or_else(|| Some(now_millis()));
            slots.insert(key.clone(), snapshot);
        }
    }

    let stored_last_slot = raw
        .get("lastSlot")
        .and_then(Value::as_str)
        .map(str::to_string);

    if let Some(raw_current) = raw.get("current") {
        if let Ok(mut current) = serde_json::from_value::<SavedGameState>(raw_current.clone()) {
            current.slot_name.get_or_insert_with(|| AUTOSAVE_SLOT.to_string());
            current.save_name.get_or_insert_with(|| AUTOSAVE_NAME.to_string());
            current.saved_at = current.saved_at.or_else(|| Some(now_millis()));

            let slot_key = current
                .slot_name
                .clone()
                .unwrap_or_else(|| AUTOSAVE_SLOT.to_string());
            slots.insert(slot_key.clone(), current.clone());

            return SavedGameDocument {
                current: Some(current),
                slots,
                last_slot: stored_last_slot.or(Some(slot_key)),
            };
        }
    }

    SavedGameDocument {
        current: None,
        slots,
        last_slot: stored_last_slot,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// HELPERS
// ═══════════════════════════════════════════════════════════════════════

/// Turn a player-entered save name into a slot key: lowercase, runs of
/// non-alphanumerics collapsed to single dashes, trimmed. A name with no
/// usable characters falls back to a timestamped key.
pub fn slugify(input: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for ch in input.trim().to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch);
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        format!("save-{}", now_millis())
    } else {
        slug
    }
}

/// Human age of a save: "Just now", "5m ago", "3h ago", then a date.
/// `None` for an unstamped save (wasm stamps 0, which counts as unstamped).
pub fn last_save_label(saved_at: Option<u64>, now: u64) -> Option<String> {
    let timestamp = saved_at.filter(|&t| t > 0)?;
    let minutes = now.saturating_sub(timestamp) / 60_000;
    if minutes < 1 {
        return Some("Just now".to_string());
    }
    if minutes < 60 {
        return Some(format!("{minutes}m ago"));
    }
    let hours = minutes / 60;
    if hours < 24 {
        return Some(format!("{hours}h ago"));
    }
    let (year, month, day) = civil_from_days((timestamp / 86_400_000) as i64);
    Some(format!("{year:04}-{month:02}-{day:02}"))
}

/// Gregorian date from days since the Unix epoch.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = (z - era * 146_097) as u64;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    (if month <= 2 { year + 1 } else { year }, month, day)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> u64 {
    0
}
