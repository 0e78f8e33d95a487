//! Shared resources, events, and states for Gildenhall.
//!
//! This is the type contract. Every domain plugin imports from here, and
//! domains talk to each other through these types and events. Two seams go
//! beyond the contract by design: the `Coin` currency type lives in
//! `crate::currency`, and the simulation tick in `professions` is the one
//! orchestration point that calls the catalog lookup and the inventory
//! merge engine directly (a tick is atomic; splitting it across events
//! would expose half-applied state).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::currency::Coin;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

/// Loading: registries are populated, the anonymous identity is resolved,
/// and the saved-game directory is fetched. MainMenu: no simulation runs.
/// Playing: the tick and autosave systems are live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    MainMenu,
    Playing,
}

/// Whether a play session exists behind the menu. Opening the menu from
/// Playing does not end the session; "Continue" just returns to it.
#[derive(Resource, Debug, Clone, Default)]
pub struct SessionStatus {
    pub active: bool,
}

/// Run condition: a play session exists. The simulation and autosave keep
/// running while the menu overlays a live session; only states gate UI.
pub fn session_active(session: Res<SessionStatus>) -> bool {
    session.active
}

// ═══════════════════════════════════════════════════════════════════════
// PROFESSIONS
// ═══════════════════════════════════════════════════════════════════════

/// A timed, repeatable action within a profession. Static content; a task
/// is addressed by its position in the owning profession's task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillTask {
    pub id: String,
    pub name: String,
    pub description: String,
    pub required_level: u32,
    pub experience: u64,
    /// Duration of one completion in milliseconds.
    pub time_to_complete: u64,
    pub resource_id: String,
    pub resource_quantity: u64,
}

/// Per-player state of one trainable profession.
///
/// Invariant: `current_xp < xp_to_next_level` after every update; overflow
/// experience is converted to levels at award time, never left pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionState {
    pub id: String,
    pub name: String,
    pub level: u32,
    #[serde(rename = "currentXP")]
    pub current_xp: u64,
    pub xp_to_next_level: u64,
    pub active_task_index: Option<usize>,
    /// Only meaningful while a task is assigned; a cleared task resets it.
    pub is_paused: bool,
    /// Progress into the current completion cycle, in milliseconds.
    pub task_progress: u64,
    pub tasks: Vec<SkillTask>,
}

/// The player's profession roster. Owned by the session; replaced wholesale
/// on new-game and load.
#[derive(Resource, Debug, Clone, Default)]
pub struct Professions {
    pub list: Vec<ProfessionState>,
}

impl Professions {
    pub fn by_id_mut(&mut self, id: &str) -> Option<&mut ProfessionState> {
        self.list.iter_mut().find(|p| p.id == id)
    }
}

/// Immutable template a fresh profession is stamped from.
#[derive(Debug, Clone)]
pub struct ProfessionTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub tasks: Vec<SkillTask>,
}

/// Static profession content, populated by the data layer during Loading.
#[derive(Resource, Debug, Clone, Default)]
pub struct ProfessionCatalog {
    pub templates: Vec<ProfessionTemplate>,
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS & INVENTORY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Resource,
    Weapon,
    Armor,
    Consumable,
    Tool,
    Misc,
}

/// Display/economic metadata for one resource id, as found in the catalog.
#[derive(Debug, Clone)]
pub struct ItemDef {
    pub name: String,
    pub value: u64,
    pub description: String,
    pub category: ItemCategory,
    pub icon: String,
    pub lore: Option<String>,
    pub uses: Option<Vec<String>>,
}

/// One occupied inventory slot: a stack of a single item id.
/// Stacks are unbounded in size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub quantity: u64,
    pub value: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: ItemCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lore: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<Vec<String>>,
}

pub type InventorySlot = Option<InventoryItem>;

/// Fixed-length slotted inventory. `capacity` is authoritative: merge pads
/// or truncates `slots` to it.
#[derive(Resource, Debug, Clone)]
pub struct PlayerInventory {
    pub slots: Vec<InventorySlot>,
    pub capacity: usize,
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self {
            slots: vec![None; BASE_INVENTORY_CAPACITY],
            capacity: BASE_INVENTORY_CAPACITY,
        }
    }
}

impl PlayerInventory {
    pub fn slots_used(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// Static item catalog, populated by the data layer during Loading.
#[derive(Resource, Debug, Clone, Default)]
pub struct ItemRegistry {
    pub items: HashMap<String, ItemDef>,
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCE LEDGER
// ═══════════════════════════════════════════════════════════════════════

/// Running totals per resource id. Always contains `gold`; grows as new
/// resource ids are earned. Mutated only by loot credit, sell, and
/// capacity-upgrade handling.
#[derive(Resource, Debug, Clone)]
pub struct ResourceLedger {
    pub amounts: HashMap<String, Coin>,
}

impl Default for ResourceLedger {
    fn default() -> Self {
        let mut amounts = HashMap::new();
        amounts.insert(GOLD.to_string(), Coin::from(STARTING_GOLD));
        Self { amounts }
    }
}

impl ResourceLedger {
    /// Current amount for a resource id; zero if it was never earned.
    pub fn amount(&self, id: &str) -> Coin {
        self.amounts.get(id).cloned().unwrap_or_default()
    }

    pub fn gold(&self) -> Coin {
        self.amount(GOLD)
    }

    pub fn credit(&mut self, id: &str, quantity: u64) {
        let entry = self.amounts.entry(id.to_string()).or_default();
        *entry = entry.add(&Coin::from(quantity));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — player commands (the presentation boundary)
// ═══════════════════════════════════════════════════════════════════════

/// Assign a task to a profession, or toggle pause if it is already active.
#[derive(Event, Debug, Clone)]
pub struct SetTaskEvent {
    pub profession_id: String,
    pub task_index: usize,
}

/// Sell a quantity out of one inventory slot. Quantity is clamped to what
/// the slot holds; selling from an empty or out-of-range slot is a no-op.
#[derive(Event, Debug, Clone)]
pub struct SellItemEvent {
    pub slot_index: usize,
    pub quantity: u64,
}

/// Swap the contents of two inventory slots.
#[derive(Event, Debug, Clone)]
pub struct MoveItemEvent {
    pub from_index: usize,
    pub to_index: usize,
}

/// Equip the item in a slot. Informational only; no stat effects.
#[derive(Event, Debug, Clone)]
pub struct EquipItemEvent {
    pub slot_index: usize,
}

/// Buy the next inventory capacity upgrade, if affordable.
#[derive(Event, Debug, Clone)]
pub struct UpgradeInventoryEvent;

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — session lifecycle
// ═══════════════════════════════════════════════════════════════════════

/// Start a fresh session, replacing any current one.
#[derive(Event, Debug, Clone)]
pub struct NewGameEvent;

/// Resume the live session, or hydrate the most recently touched slot.
#[derive(Event, Debug, Clone)]
pub struct ContinueEvent;

/// Hydrate a specific save slot and enter the session.
#[derive(Event, Debug, Clone)]
pub struct LoadSlotEvent {
    pub slot_key: String,
}

/// Serialize the current session into a named slot and persist it.
/// `name` is the display name; the slot key is its slug. `None` targets
/// the default autosave slot.
#[derive(Event, Debug, Clone)]
pub struct SaveRequestEvent {
    pub name: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// LOOT
// ═══════════════════════════════════════════════════════════════════════

/// A quantity of one item id moving toward (or bouncing off) the
/// inventory. Produced by the tick, consumed by the merge engine, and
/// reported back per id in merge outcomes.
#[derive(Debug, Clone, PartialEq)]
pub struct LootGain {
    pub id: String,
    pub name: String,
    pub quantity: u64,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — simulation output
// ═══════════════════════════════════════════════════════════════════════

/// Loot accepted into the inventory this quantum (aggregated per item id).
#[derive(Event, Debug, Clone)]
pub struct LootGainedEvent {
    pub item_id: String,
    pub name: String,
    pub quantity: u64,
}

/// Loot that found neither an existing stack nor an empty slot.
#[derive(Event, Debug, Clone)]
pub struct LootRejectedEvent {
    pub name: String,
    pub quantity: u64,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — notifications
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Gain,
    Sell,
    Warning,
}

impl NotificationKind {
    /// How long a notification of this kind stays on screen.
    pub fn lifetime_secs(self) -> f32 {
        match self {
            NotificationKind::Gain => 3.2,
            NotificationKind::Sell => 2.6,
            NotificationKind::Warning => 3.6,
        }
    }
}

/// User-facing notification. Warnings are always shown; gain/sell respect
/// the `show_notifications` setting.
#[derive(Event, Debug, Clone)]
pub struct NotificationEvent {
    pub message: String,
    pub kind: NotificationKind,
}

impl NotificationEvent {
    pub fn gain(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: NotificationKind::Gain }
    }

    pub fn sell(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: NotificationKind::Sell }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: NotificationKind::Warning }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const GOLD: &str = "gold";
pub const STARTING_GOLD: u64 = 10;

pub const BASE_INVENTORY_CAPACITY: usize = 25;
pub const INVENTORY_UPGRADE_STEP: usize = 5;

/// One simulation quantum in milliseconds.
pub const TICK_MILLIS: u64 = 100;

/// Seconds between autosaves while a session is live and signed in.
pub const AUTOSAVE_SECONDS: f32 = 10.0;

/// Most notifications visible at once; older ones are dropped.
pub const MAX_NOTIFICATIONS: usize = 6;

/// Seconds a freshly looted item stays highlighted.
pub const LOOT_HIGHLIGHT_SECS: f32 = 2.0;

pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;
