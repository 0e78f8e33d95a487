use std::collections::HashMap;

use bevy::prelude::*;

use crate::currency::format_gold;
use crate::economy::inventory_upgrade_cost;
use crate::settings::GameSettings;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS & RESOURCES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HudGoldText;

/// One line per profession, indexed into the roster.
#[derive(Component)]
pub struct HudProfessionRow {
    pub index: usize,
}

#[derive(Component)]
pub struct HudInventoryText;

#[derive(Component)]
pub struct HudHintText;

/// Item ids looted recently, each with its highlight expiry. Repeat gains
/// refresh the timer.
#[derive(Resource, Debug, Default)]
pub struct RecentLoot {
    pub entries: HashMap<String, Timer>,
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(mut commands: Commands, professions: Res<Professions>) {
    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
        ))
        .with_children(|parent| {
            parent.spawn((
                HudGoldText,
                Text::new("0g"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.9, 0.5)),
            ));

            for index in 0..professions.list.len() {
                parent.spawn((
                    HudProfessionRow { index },
                    Text::new(""),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.85, 0.9, 0.85)),
                ));
            }

            parent.spawn((
                HudInventoryText,
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.75, 0.8, 0.9)),
            ));

            parent.spawn((
                HudHintText,
                Text::new(
                    "[1-4] work profession  [X] sell first stack  [E] equip  [U] upgrade bags  [Esc] menu",
                ),
                TextFont {
                    font_size: 11.0,
                    ..default()
                },
                TextColor(Color::srgb(0.5, 0.55, 0.5)),
            ));
        });
}

pub fn despawn_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn update_gold_display(
    ledger: Res<ResourceLedger>,
    mut query: Query<&mut Text, With<HudGoldText>>,
) {
    for mut text in &mut query {
        text.0 = format_gold(&ledger.gold());
    }
}

pub fn update_profession_rows(
    professions: Res<Professions>,
    mut query: Query<(&HudProfessionRow, &mut Text)>,
) {
    for (row, mut text) in &mut query {
        let Some(prof) = professions.list.get(row.index) else {
            text.0.clear();
            continue;
        };

        let task_part = match prof.active_task_index.and_then(|i| prof.tasks.get(i)) {
            Some(task) => {
                let duration = task.time_to_complete.max(1);
                let percent = (prof.task_progress * 100) / duration;
                if prof.is_paused {
                    format!("{} (paused)", task.name)
                } else {
                    format!("{} {}%", task.name, percent)
                }
            }
            None => "idle".to_string(),
        };

        text.0 = format!(
            "{} Lv {}  {}/{} XP  {}",
            prof.name, prof.level, prof.current_xp, prof.xp_to_next_level, task_part
        );
    }
}

pub fn update_inventory_display(
    inventory: Res<PlayerInventory>,
    recent: Res<RecentLoot>,
    mut query: Query<&mut Text, With<HudInventoryText>>,
) {
    for mut text in &mut query {
        let mut line = format!(
            "Bags {}/{}  (next upgrade {}g)",
            inventory.slots_used(),
            inventory.capacity,
            inventory_upgrade_cost(inventory.capacity)
        );
        if !recent.entries.is_empty() {
            let mut names: Vec<&str> = recent.entries.keys().map(String::as_str).collect();
            names.sort_unstable();
            line.push_str(&format!("  New: {}", names.join(", ")));
        }
        text.0 = line;
    }
}

/// The hint line doubles as the tooltip surface; hide it when tooltips
/// are off.
pub fn update_hint_visibility(
    settings: Res<GameSettings>,
    mut query: Query<&mut Visibility, With<HudHintText>>,
) {
    for mut visibility in &mut query {
        *visibility = if settings.show_tooltips {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

// ═══════════════════════════════════════════════════════════════════════
// LOOT HIGHLIGHTING
// ═══════════════════════════════════════════════════════════════════════

pub fn track_recent_loot(
    mut gained_events: EventReader<LootGainedEvent>,
    mut recent: ResMut<RecentLoot>,
) {
    for ev in gained_events.read() {
        recent.entries.insert(
            ev.item_id.clone(),
            Timer::from_seconds(LOOT_HIGHLIGHT_SECS, TimerMode::Once),
        );
    }
}

pub fn expire_recent_loot(time: Res<Time>, mut recent: ResMut<RecentLoot>) {
    for timer in recent.entries.values_mut() {
        timer.tick(time.delta());
    }
    recent.entries.retain(|_, timer| !timer.finished());
}
