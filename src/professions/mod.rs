//! Professions domain — the idle heartbeat of Gildenhall.
//!
//! Responsible for:
//! - Converting wall-clock time into fixed 100 ms simulation quanta
//! - Advancing every profession per quantum (XP, level cascades, loot)
//! - Aggregating each quantum's loot and handing it to the merge engine
//! - Crediting accepted loot to the resource ledger
//! - Handling task assignment / pause-toggle commands
//!
//! A frame that arrives late drains every owed quantum in one go, so idle
//! progress is exact regardless of frame pacing. The simulation keeps
//! running while the menu overlays a live session; the accumulator is
//! zeroed when a session is replaced (new game or load), so a fresh
//! session never inherits owed ticks.

pub mod simulation;

use std::time::Duration;

use bevy::prelude::*;

use crate::data::item_definition;
use crate::inventory::merge::merge_loot;
use crate::shared::*;
use self::simulation::advance_profession;

/// Wall-clock time not yet converted into simulation quanta.
#[derive(Resource, Debug, Clone, Default)]
pub struct SimClock {
    pub accumulator: Duration,
}

pub struct ProfessionsPlugin;

impl Plugin for ProfessionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimClock>()
            .add_systems(
                Update,
                (accumulate_time, run_simulation)
                    .chain()
                    .run_if(session_active),
            )
            .add_systems(
                Update,
                handle_set_task.run_if(in_state(GameState::Playing)),
            );
    }
}

fn accumulate_time(time: Res<Time>, mut clock: ResMut<SimClock>) {
    clock.accumulator += time.delta();
}

/// Drain the accumulator in 100 ms quanta. Each quantum advances every
/// profession, merges the quantum's aggregated loot into the inventory
/// once, credits the ledger for what fit, and reports gains/rejections.
pub fn run_simulation(
    mut clock: ResMut<SimClock>,
    mut professions: ResMut<Professions>,
    mut inventory: ResMut<PlayerInventory>,
    mut ledger: ResMut<ResourceLedger>,
    registry: Res<ItemRegistry>,
    mut gained_writer: EventWriter<LootGainedEvent>,
    mut rejected_writer: EventWriter<LootRejectedEvent>,
) {
    let quantum = Duration::from_millis(TICK_MILLIS);

    while clock.accumulator >= quantum {
        clock.accumulator -= quantum;

        // Aggregate this quantum's loot across all professions, keyed by
        // resource id in first-seen order.
        let mut loot: Vec<LootGain> = Vec::new();
        for prof in professions.list.iter_mut() {
            let Some(result) = advance_profession(prof, TICK_MILLIS) else {
                continue;
            };
            match loot.iter_mut().find(|g| g.id == result.resource_id) {
                Some(gain) => gain.quantity += result.quantity,
                None => {
                    let definition = item_definition(&registry, &result.resource_id);
                    loot.push(LootGain {
                        id: result.resource_id,
                        name: definition.name,
                        quantity: result.quantity,
                    });
                }
            }
        }

        if loot.is_empty() {
            continue;
        }

        let outcome = merge_loot(&inventory.slots, &loot, inventory.capacity, &registry);
        inventory.slots = outcome.slots;

        for gain in &outcome.added {
            ledger.credit(&gain.id, gain.quantity);
            gained_writer.send(LootGainedEvent {
                item_id: gain.id.clone(),
                name: gain.name.clone(),
                quantity: gain.quantity,
            });
        }
        for gain in &outcome.rejected {
            rejected_writer.send(LootRejectedEvent {
                name: gain.name.clone(),
                quantity: gain.quantity,
            });
        }
    }
}

/// Assign a task, or toggle pause when the task is already active.
///
/// No level or bounds validation happens here: the simulation step clears
/// assignments it cannot honor, which also covers a stale index arriving
/// from the presentation layer.
pub fn handle_set_task(
    mut events: EventReader<SetTaskEvent>,
    mut professions: ResMut<Professions>,
) {
    for ev in events.read() {
        let Some(prof) = professions.by_id_mut(&ev.profession_id) else {
            warn!("[Professions] Unknown profession '{}'", ev.profession_id);
            continue;
        };

        if prof.active_task_index == Some(ev.task_index) {
            prof.is_paused = !prof.is_paused;
            info!(
                "[Professions] {} task {} {}",
                prof.name,
                ev.task_index,
                if prof.is_paused { "paused" } else { "resumed" }
            );
        } else {
            prof.active_task_index = Some(ev.task_index);
            prof.is_paused = false;
            prof.task_progress = 0;
            info!("[Professions] {} now working task {}", prof.name, ev.task_index);
        }
    }
}
