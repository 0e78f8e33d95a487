use bevy::prelude::*;

use crate::shared::*;

/// Esc opens the menu over the live session. The simulation keeps
/// running; only the HUD goes away.
pub fn global_input_handler(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::MainMenu);
    }
}

/// Keyboard commands while playing. These only translate keys into the
/// shared command events; all validation lives in the handlers.
pub fn command_keybinds(
    keyboard: Res<ButtonInput<KeyCode>>,
    professions: Res<Professions>,
    inventory: Res<PlayerInventory>,
    mut set_task_writer: EventWriter<SetTaskEvent>,
    mut sell_writer: EventWriter<SellItemEvent>,
    mut equip_writer: EventWriter<EquipItemEvent>,
    mut upgrade_writer: EventWriter<UpgradeInventoryEvent>,
) {
    const PROFESSION_KEYS: [KeyCode; 4] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
    ];

    for (index, key) in PROFESSION_KEYS.iter().enumerate() {
        if !keyboard.just_pressed(*key) {
            continue;
        }
        let Some(prof) = professions.list.get(index) else {
            continue;
        };
        // Work the best task the profession currently qualifies for;
        // pressing again toggles pause.
        let best = prof
            .tasks
            .iter()
            .enumerate()
            .rev()
            .find(|(_, task)| prof.level >= task.required_level)
            .map(|(i, _)| i);
        if let Some(task_index) = best {
            set_task_writer.send(SetTaskEvent {
                profession_id: prof.id.clone(),
                task_index,
            });
        }
    }

    if keyboard.just_pressed(KeyCode::KeyX) {
        // Sell the whole first stack; the handler clamps the quantity.
        if let Some(slot_index) = inventory.slots.iter().position(|s| s.is_some()) {
            sell_writer.send(SellItemEvent {
                slot_index,
                quantity: u64::MAX,
            });
        }
    }

    if keyboard.just_pressed(KeyCode::KeyE) {
        if let Some(slot_index) = inventory.slots.iter().position(|s| s.is_some()) {
            equip_writer.send(EquipItemEvent { slot_index });
        }
    }

    if keyboard.just_pressed(KeyCode::KeyU) {
        upgrade_writer.send(UpgradeInventoryEvent);
    }
}
