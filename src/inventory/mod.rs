//! Inventory domain — slot manipulation commands.
//!
//! The merge engine lives in `merge.rs`; the tick calls it directly. This
//! module handles the player-facing slot commands: moving stacks between
//! slots and the (informational) equip action. Selling lives in `economy`
//! because it touches the resource ledger.

pub mod merge;

use bevy::prelude::*;

use crate::shared::*;

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_move_item, handle_equip_item).run_if(in_state(GameState::Playing)),
        );
    }
}

/// Swap two slots. Out-of-range indices and an empty source slot are
/// silent no-ops; a swap only permutes positions, so it cannot violate the
/// one-stack-per-id invariant the merge engine maintains.
pub fn move_slot(inventory: &mut PlayerInventory, from_index: usize, to_index: usize) {
    if from_index == to_index {
        return;
    }
    let len = inventory.slots.len();
    if from_index >= len || to_index >= len {
        return;
    }
    if inventory.slots[from_index].is_none() {
        return;
    }
    inventory.slots.swap(from_index, to_index);
}

pub fn handle_move_item(
    mut events: EventReader<MoveItemEvent>,
    mut inventory: ResMut<PlayerInventory>,
) {
    for ev in events.read() {
        move_slot(&mut inventory, ev.from_index, ev.to_index);
    }
}

/// Equip a weapon or armor piece. Purely informational: no stat effects
/// are modeled, the player just gets told whether the item is equippable.
pub fn handle_equip_item(
    mut events: EventReader<EquipItemEvent>,
    inventory: Res<PlayerInventory>,
    mut notify_writer: EventWriter<NotificationEvent>,
) {
    for ev in events.read() {
        let Some(Some(item)) = inventory.slots.get(ev.slot_index) else {
            continue;
        };

        match item.category {
            ItemCategory::Weapon | ItemCategory::Armor => {
                notify_writer.send(NotificationEvent::gain(format!("Equipped {}.", item.name)));
            }
            _ => {
                notify_writer.send(NotificationEvent::warning(format!(
                    "{} cannot be equipped.",
                    item.name
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory_with(slots: Vec<InventorySlot>) -> PlayerInventory {
        let capacity = slots.len();
        PlayerInventory { slots, capacity }
    }

    fn stack(id: &str, quantity: u64) -> InventorySlot {
        Some(InventoryItem {
            id: id.into(),
            name: id.into(),
            quantity,
            value: 1,
            description: None,
            category: ItemCategory::Resource,
            icon: None,
            lore: None,
            uses: None,
        })
    }

    #[test]
    fn test_swap_moves_stack_into_empty_slot() {
        let mut inv = inventory_with(vec![stack("Logs", 5), None]);
        move_slot(&mut inv, 0, 1);
        assert!(inv.slots[0].is_none());
        assert_eq!(inv.slots[1].as_ref().unwrap().id, "Logs");
    }

    #[test]
    fn test_swap_exchanges_two_stacks() {
        let mut inv = inventory_with(vec![stack("Logs", 5), stack("Coal", 2)]);
        move_slot(&mut inv, 0, 1);
        assert_eq!(inv.slots[0].as_ref().unwrap().id, "Coal");
        assert_eq!(inv.slots[1].as_ref().unwrap().id, "Logs");
    }

    #[test]
    fn test_out_of_range_and_empty_source_are_no_ops() {
        let original = vec![stack("Logs", 5), None];
        let mut inv = inventory_with(original.clone());
        move_slot(&mut inv, 0, 7);
        move_slot(&mut inv, 7, 0);
        move_slot(&mut inv, 1, 0);
        assert_eq!(inv.slots, original);
    }
}
