//! Economy domain — selling loot and buying inventory capacity.
//!
//! All gold mutation funnels through here and the tick's ledger credit.
//! Sell quantities are clamped to what the slot actually holds; ledger
//! subtraction clamps at zero with a warning, since a short ledger entry
//! means some earlier state went inconsistent, not that the sale is wrong.

use bevy::prelude::*;

use crate::currency::{format_gold, Coin};
use crate::shared::*;

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_sell_item, handle_upgrade_inventory).run_if(in_state(GameState::Playing)),
        );
    }
}

/// Gold cost of the next capacity upgrade, given the current capacity.
/// Geometric in the number of upgrades already purchased, so capacity
/// never becomes indefinitely cheap to expand.
pub fn inventory_upgrade_cost(capacity: usize) -> u64 {
    let purchases = capacity.saturating_sub(BASE_INVENTORY_CAPACITY) / INVENTORY_UPGRADE_STEP;
    (250.0 * 1.6_f64.powi(purchases as i32)).round() as u64
}

pub fn handle_sell_item(
    mut events: EventReader<SellItemEvent>,
    mut inventory: ResMut<PlayerInventory>,
    mut ledger: ResMut<ResourceLedger>,
    mut notify_writer: EventWriter<NotificationEvent>,
) {
    for ev in events.read() {
        if ev.quantity == 0 {
            continue;
        }
        let Some(slot) = inventory.slots.get_mut(ev.slot_index) else {
            continue;
        };
        let Some(item) = slot.as_mut() else {
            continue;
        };

        let sell_quantity = ev.quantity.min(item.quantity);
        let sale_value = Coin::from(item.value).mul(sell_quantity);
        let name = item.name.clone();
        let item_id = item.id.clone();

        let gold_before = ledger.gold();
        ledger
            .amounts
            .insert(GOLD.to_string(), gold_before.add(&sale_value));

        // The sold resource leaves the ledger too. A ledger entry shorter
        // than the stack means earlier state went inconsistent; clamp and
        // warn rather than lose the sale.
        if let Some(held) = ledger.amounts.get_mut(&item_id) {
            if *held < Coin::from(sell_quantity) {
                warn!(
                    "[Economy] Ledger holds {} '{}' but {} were sold. Clamping to 0.",
                    held, item_id, sell_quantity
                );
            }
            *held = held.saturating_sub(&Coin::from(sell_quantity));
        }

        if item.quantity > sell_quantity {
            item.quantity -= sell_quantity;
        } else {
            *slot = None;
        }

        info!(
            "[Economy] Sold {} {} for {}. Gold: {}",
            sell_quantity,
            name,
            format_gold(&sale_value),
            format_gold(&ledger.gold())
        );
        notify_writer.send(NotificationEvent::sell(format!(
            "Sold {} {} for +{} Gold",
            sell_quantity, name, sale_value
        )));
    }
}

pub fn handle_upgrade_inventory(
    mut events: EventReader<UpgradeInventoryEvent>,
    mut inventory: ResMut<PlayerInventory>,
    mut ledger: ResMut<ResourceLedger>,
    mut notify_writer: EventWriter<NotificationEvent>,
) {
    for _ in events.read() {
        let cost = Coin::from(inventory_upgrade_cost(inventory.capacity));
        let gold = ledger.gold();

        if gold < cost {
            notify_writer.send(NotificationEvent::warning(
                "Not enough gold to upgrade your inventory.",
            ));
            continue;
        }

        ledger
            .amounts
            .insert(GOLD.to_string(), gold.saturating_sub(&cost));
        inventory.capacity += INVENTORY_UPGRADE_STEP;
        let capacity = inventory.capacity;
        inventory
            .slots
            .extend(std::iter::repeat(None).take(INVENTORY_UPGRADE_STEP));

        info!(
            "[Economy] Inventory upgraded to {} slots for {}.",
            capacity,
            format_gold(&cost)
        );
        notify_writer.send(NotificationEvent::gain(format!(
            "Inventory expanded to {} slots!",
            capacity
        )));
    }
}
