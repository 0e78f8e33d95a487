//! Save domain — the session controller.
//!
//! Responsible for:
//! - Fetching and migrating the per-user save directory during Loading
//! - New game / continue / load-slot transitions into a live session
//! - Manual saves into named slots (names are slugged into slot keys)
//! - The 10 second autosave while a session is live and signed in
//!
//! Saves serialize the resource values as they stand when the handler
//! runs, which is always a fully-computed tick's state: systems run to
//! completion, so a snapshot can never observe half of a quantum.
//! Autosave failures are logged and swallowed (the next cycle retries);
//! manual save/load failures surface a warning notification.

pub mod document;
pub mod store;

use std::time::Duration;

use bevy::prelude::*;

use crate::auth::AuthSession;
use crate::data::initial_professions;
use crate::professions::SimClock;
use crate::shared::*;
use self::document::{
    parse_document, slugify, snapshot_game, SavedGameDocument, SavedGameState, AUTOSAVE_NAME,
    AUTOSAVE_SLOT,
};

/// The parsed save directory, kept in sync with every successful persist.
#[derive(Resource, Debug, Clone, Default)]
pub struct SaveDirectory {
    pub doc: SavedGameDocument,
}

#[derive(Resource, Debug)]
pub struct AutosaveTimer {
    pub timer: Timer,
}

impl Default for AutosaveTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(AUTOSAVE_SECONDS, TimerMode::Repeating),
        }
    }
}

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SaveDirectory>()
            .init_resource::<AutosaveTimer>()
            // Identity first, then the directory fetch that needs it.
            .add_systems(
                OnEnter(GameState::Loading),
                (crate::auth::sign_in_anonymously, fetch_saved_document).chain(),
            )
            // Session commands originate from the menu.
            .add_systems(
                Update,
                (
                    handle_new_game,
                    handle_continue,
                    handle_load_slot,
                    handle_save_request,
                )
                    .run_if(in_state(GameState::MainMenu)),
            )
            // Autosave keeps running while the menu overlays a live session.
            .add_systems(Update, autosave);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// LOADING
// ═══════════════════════════════════════════════════════════════════════

/// Fetch and migrate the user's save document, then open the menu.
/// Signed out, or on a fetch error, the menu opens over an empty
/// directory; nothing here is fatal.
pub fn fetch_saved_document(
    auth: Res<AuthSession>,
    mut directory: ResMut<SaveDirectory>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let doc = match &auth.user_id {
        Some(user_id) => match store::read_document(user_id) {
            Ok(raw) => parse_document(raw.as_ref()),
            Err(err) => {
                error!("[Save] Failed to retrieve saved games: {err}");
                SavedGameDocument::default()
            }
        },
        None => SavedGameDocument::default(),
    };

    info!("[Save] Save directory ready: {} slot(s).", doc.slots.len());
    directory.doc = doc;
    next_state.set(GameState::MainMenu);
}

// ═══════════════════════════════════════════════════════════════════════
// SESSION COMMANDS
// ═══════════════════════════════════════════════════════════════════════

pub fn handle_new_game(
    mut events: EventReader<NewGameEvent>,
    catalog: Res<ProfessionCatalog>,
    auth: Res<AuthSession>,
    mut directory: ResMut<SaveDirectory>,
    mut ledger: ResMut<ResourceLedger>,
    mut professions: ResMut<Professions>,
    mut inventory: ResMut<PlayerInventory>,
    mut session: ResMut<SessionStatus>,
    mut clock: ResMut<SimClock>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for _ in events.read() {
        *ledger = ResourceLedger::default();
        professions.list = initial_professions(&catalog);
        *inventory = PlayerInventory::default();
        clock.accumulator = Duration::ZERO;
        session.active = true;
        next_state.set(GameState::Playing);
        info!("[Save] New game started.");

        if auth.signed_in() {
            let snapshot =
                snapshot_game(&ledger, &professions, &inventory, AUTOSAVE_SLOT, AUTOSAVE_NAME);
            if let Err(err) = persist_snapshot(&auth, &mut directory, AUTOSAVE_SLOT, snapshot) {
                error!("[Save] Failed to create initial save: {err}");
            }
        }
    }
}

pub fn handle_continue(
    mut events: EventReader<ContinueEvent>,
    mut directory: ResMut<SaveDirectory>,
    mut ledger: ResMut<ResourceLedger>,
    mut professions: ResMut<Professions>,
    mut inventory: ResMut<PlayerInventory>,
    mut session: ResMut<SessionStatus>,
    mut clock: ResMut<SimClock>,
    mut next_state: ResMut<NextState<GameState>>,
    mut notify_writer: EventWriter<NotificationEvent>,
) {
    for _ in events.read() {
        // A live session just needs the menu dismissed.
        if session.active {
            next_state.set(GameState::Playing);
            continue;
        }

        // Prefer the most recently touched slot, then the first available
        // slot, then the bare `current` mirror. A dangling lastSlot (its
        // slot was pruned) falls through rather than blocking the load.
        let chosen = directory
            .doc
            .last_slot
            .as_ref()
            .and_then(|key| {
                directory
                    .doc
                    .slots
                    .get(key)
                    .map(|snapshot| (key.clone(), snapshot.clone()))
            })
            .or_else(|| {
                directory
                    .doc
                    .slots
                    .iter()
                    .next()
                    .map(|(key, snapshot)| (key.clone(), snapshot.clone()))
            })
            .or_else(|| {
                directory.doc.current.clone().map(|snapshot| {
                    let key = snapshot
                        .slot_name
                        .clone()
                        .unwrap_or_else(|| AUTOSAVE_SLOT.to_string());
                    (key, snapshot)
                })
            });

        match chosen {
            Some((slot_key, snapshot)) => {
                apply_saved_game(
                    snapshot,
                    slot_key,
                    &mut directory,
                    &mut ledger,
                    &mut professions,
                    &mut inventory,
                    &mut session,
                    &mut clock,
                );
                next_state.set(GameState::Playing);
            }
            None => {
                notify_writer.send(NotificationEvent::warning("No saved game available."));
            }
        }
    }
}

pub fn handle_load_slot(
    mut events: EventReader<LoadSlotEvent>,
    mut directory: ResMut<SaveDirectory>,
    mut ledger: ResMut<ResourceLedger>,
    mut professions: ResMut<Professions>,
    mut inventory: ResMut<PlayerInventory>,
    mut session: ResMut<SessionStatus>,
    mut clock: ResMut<SimClock>,
    mut next_state: ResMut<NextState<GameState>>,
    mut notify_writer: EventWriter<NotificationEvent>,
) {
    for ev in events.read() {
        let Some(snapshot) = directory.doc.slots.get(&ev.slot_key).cloned() else {
            notify_writer.send(NotificationEvent::warning("Save slot not found."));
            continue;
        };

        apply_saved_game(
            snapshot,
            ev.slot_key.clone(),
            &mut directory,
            &mut ledger,
            &mut professions,
            &mut inventory,
            &mut session,
            &mut clock,
        );
        next_state.set(GameState::Playing);
    }
}

pub fn handle_save_request(
    mut events: EventReader<SaveRequestEvent>,
    auth: Res<AuthSession>,
    session: Res<SessionStatus>,
    ledger: Res<ResourceLedger>,
    professions: Res<Professions>,
    inventory: Res<PlayerInventory>,
    mut directory: ResMut<SaveDirectory>,
    mut notify_writer: EventWriter<NotificationEvent>,
) {
    for ev in events.read() {
        if !session.active {
            notify_writer.send(NotificationEvent::warning("Start a game before saving."));
            continue;
        }

        let (slug, display_name) = match &ev.name {
            Some(name) => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    notify_writer.send(NotificationEvent::warning("Save name cannot be empty."));
                    continue;
                }
                (slugify(trimmed), trimmed.to_string())
            }
            None => (AUTOSAVE_SLOT.to_string(), AUTOSAVE_NAME.to_string()),
        };

        if !auth.signed_in() {
            warn!("[Save] Signed out; save request for '{display_name}' skipped.");
            continue;
        }

        let snapshot = snapshot_game(&ledger, &professions, &inventory, &slug, &display_name);
        match persist_snapshot(&auth, &mut directory, &slug, snapshot) {
            Ok(()) => {
                info!("[Save] Saved slot '{slug}'.");
                if ev.name.is_some() {
                    notify_writer.send(NotificationEvent::gain(format!(
                        "Saved game as \"{display_name}\""
                    )));
                }
            }
            Err(err) => {
                error!("[Save] Save to slot '{slug}' failed: {err}");
                notify_writer.send(NotificationEvent::warning("Save failed. Please try again."));
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// AUTOSAVE
// ═══════════════════════════════════════════════════════════════════════

/// Silently persist to the autosave slot every 10 seconds. The timer only
/// advances while a session is live and the user is signed in; failures
/// are logged and retried on the next cycle.
pub fn autosave(
    time: Res<Time>,
    mut autosave_timer: ResMut<AutosaveTimer>,
    session: Res<SessionStatus>,
    auth: Res<AuthSession>,
    ledger: Res<ResourceLedger>,
    professions: Res<Professions>,
    inventory: Res<PlayerInventory>,
    mut directory: ResMut<SaveDirectory>,
) {
    if !session.active || !auth.signed_in() {
        return;
    }

    autosave_timer.timer.tick(time.delta());
    if !autosave_timer.timer.just_finished() {
        return;
    }

    let snapshot = snapshot_game(&ledger, &professions, &inventory, AUTOSAVE_SLOT, AUTOSAVE_NAME);
    match persist_snapshot(&auth, &mut directory, AUTOSAVE_SLOT, snapshot) {
        Ok(()) => info!("[Save] Autosaved."),
        Err(err) => warn!("[Save] Auto-save failed: {err}"),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// HELPERS
// ═══════════════════════════════════════════════════════════════════════

/// Replace the live session with a hydrated snapshot and record it as the
/// most recently touched slot in the local directory.
#[allow(clippy::too_many_arguments)]
fn apply_saved_game(
    snapshot: SavedGameState,
    slot_key: String,
    directory: &mut SaveDirectory,
    ledger: &mut ResourceLedger,
    professions: &mut Professions,
    inventory: &mut PlayerInventory,
    session: &mut SessionStatus,
    clock: &mut SimClock,
) {
    let (new_ledger, new_professions, new_inventory) = document::hydrate(&snapshot);
    *ledger = new_ledger;
    *professions = new_professions;
    *inventory = new_inventory;
    clock.accumulator = Duration::ZERO;
    session.active = true;

    directory.doc.slots.insert(slot_key.clone(), snapshot.clone());
    directory.doc.current = Some(snapshot);
    directory.doc.last_slot = Some(slot_key.clone());
    info!("[Save] Loaded slot '{slot_key}'.");
}

/// Write one slot through the store and mirror it into the local
/// directory. The directory is only updated after the store accepts the
/// write, so a failed save leaves the directory truthful.
fn persist_snapshot(
    auth: &AuthSession,
    directory: &mut SaveDirectory,
    slug: &str,
    snapshot: SavedGameState,
) -> Result<(), String> {
    let user_id = auth
        .user_id
        .as_deref()
        .ok_or_else(|| "not signed in".to_string())?;

    store::write_slot(user_id, slug, &snapshot)?;

    directory.doc.slots.insert(slug.to_string(), snapshot.clone());
    directory.doc.current = Some(snapshot);
    directory.doc.last_slot = Some(slug.to_string());
    Ok(())
}
