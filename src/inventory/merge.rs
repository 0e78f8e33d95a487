//! The inventory merge engine: fold a batch of loot into a fixed-capacity
//! slotted inventory.
//!
//! Pure function, no events, no logging. The caller decides what to do
//! with the per-id accepted/rejected reports (notifications, ledger
//! credit, highlighting).

use crate::data::item_definition;
use crate::shared::*;

/// Result of one merge call. `added` and `rejected` aggregate quantities
/// per item id across the whole batch, in first-seen order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergeOutcome {
    pub slots: Vec<InventorySlot>,
    pub added: Vec<LootGain>,
    pub rejected: Vec<LootGain>,
}

/// Merge `loot` into `slots`, processing entries in the order supplied.
///
/// Per entry: an existing stack of the same id absorbs the full quantity
/// (stacks are unbounded); otherwise the first empty slot takes a new
/// stack built from the catalog definition; otherwise the entire quantity
/// is rejected. Partial placement is never attempted.
///
/// `capacity` is authoritative: a shorter inventory is padded with empty
/// slots before merging, a longer one is truncated afterwards.
pub fn merge_loot(
    slots: &[InventorySlot],
    loot: &[LootGain],
    capacity: usize,
    registry: &ItemRegistry,
) -> MergeOutcome {
    if loot.is_empty() {
        return MergeOutcome {
            slots: slots.to_vec(),
            added: Vec::new(),
            rejected: Vec::new(),
        };
    }

    let mut slots: Vec<InventorySlot> = slots.to_vec();
    while slots.len() < capacity {
        slots.push(None);
    }

    let mut added: Vec<LootGain> = Vec::new();
    let mut rejected: Vec<LootGain> = Vec::new();

    for gain in loot {
        if let Some(slot) = slots
            .iter_mut()
            .flatten()
            .find(|item| item.id == gain.id)
        {
            slot.quantity += gain.quantity;
            record_gain(&mut added, gain);
            continue;
        }

        if let Some(empty) = slots.iter_mut().find(|slot| slot.is_none()) {
            let definition = item_definition(registry, &gain.id);
            *empty = Some(InventoryItem {
                id: gain.id.clone(),
                name: definition.name,
                quantity: gain.quantity,
                value: definition.value,
                description: Some(definition.description),
                category: definition.category,
                icon: Some(definition.icon),
                lore: definition.lore,
                uses: definition.uses,
            });
            record_gain(&mut added, gain);
            continue;
        }

        record_gain(&mut rejected, gain);
    }

    slots.truncate(capacity);

    MergeOutcome {
        slots,
        added,
        rejected,
    }
}

fn record_gain(tracker: &mut Vec<LootGain>, gain: &LootGain) {
    match tracker.iter_mut().find(|g| g.id == gain.id) {
        Some(existing) => existing.quantity += gain.quantity,
        None => tracker.push(gain.clone()),
    }
}
