use bevy::prelude::*;

use crate::settings::GameSettings;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// Marker for the notification container node (top-center of screen).
#[derive(Component)]
pub struct ToastContainer;

/// Marker for individual notification nodes.
#[derive(Component)]
pub struct ToastItem {
    pub timer: Timer,
    pub fade_timer: Option<Timer>,
    pub base_color: Color,
}

fn background_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Gain => Color::srgba(0.13, 0.33, 0.16, 0.85),
        NotificationKind::Sell => Color::srgba(0.42, 0.34, 0.10, 0.85),
        NotificationKind::Warning => Color::srgba(0.45, 0.13, 0.13, 0.88),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN CONTAINER — always present, like the fade overlay
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_toast_container(mut commands: Commands) {
    commands.spawn((
        ToastContainer,
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(24.0),
            left: Val::Percent(50.0),
            width: Val::Px(340.0),
            // Shift left by half of the width to truly center it.
            margin: UiRect {
                left: Val::Px(-170.0),
                ..default()
            },
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            align_items: AlignItems::Center,
            ..default()
        },
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// HANDLE NOTIFICATION EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Spawn one toast per notification. Warnings always show; gain/sell are
/// dropped entirely when notifications are disabled in settings. At most
/// MAX_NOTIFICATIONS are visible; the oldest is despawned to make room.
pub fn handle_notifications(
    mut commands: Commands,
    mut events: EventReader<NotificationEvent>,
    settings: Res<GameSettings>,
    container_query: Query<Entity, With<ToastContainer>>,
    existing_toasts: Query<Entity, With<ToastItem>>,
) {
    let Ok(container) = container_query.get_single() else {
        return;
    };

    for event in events.read() {
        if !settings.show_notifications && event.kind != NotificationKind::Warning {
            continue;
        }

        let toast_entities: Vec<Entity> = existing_toasts.iter().collect();
        if toast_entities.len() >= MAX_NOTIFICATIONS {
            if let Some(&oldest) = toast_entities.first() {
                commands.entity(oldest).despawn_recursive();
            }
        }

        let base_color = background_color(event.kind);
        let toast_entity = commands
            .spawn((
                ToastItem {
                    timer: Timer::from_seconds(event.kind.lifetime_secs(), TimerMode::Once),
                    fade_timer: None,
                    base_color,
                },
                Node {
                    padding: UiRect {
                        left: Val::Px(12.0),
                        right: Val::Px(12.0),
                        top: Val::Px(5.0),
                        bottom: Val::Px(5.0),
                    },
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
                BackgroundColor(base_color),
                BorderColor(Color::srgba(0.5, 0.5, 0.5, 0.5)),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text::new(event.message.clone()),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            })
            .id();

        commands.entity(container).add_child(toast_entity);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE TOASTS — tick timers, fade out, despawn
// ═══════════════════════════════════════════════════════════════════════

pub fn update_toasts(
    mut commands: Commands,
    time: Res<Time>,
    mut toast_query: Query<(Entity, &mut ToastItem, &mut BackgroundColor, &Children)>,
    mut text_color_query: Query<&mut TextColor>,
) {
    for (entity, mut toast, mut bg_color, children) in &mut toast_query {
        if toast.fade_timer.is_none() {
            toast.timer.tick(time.delta());
            if toast.timer.just_finished() {
                toast.fade_timer = Some(Timer::from_seconds(0.5, TimerMode::Once));
            }
            continue;
        }

        let (finished, progress) = {
            let Some(fade) = toast.fade_timer.as_mut() else {
                continue;
            };
            fade.tick(time.delta());
            (
                fade.finished(),
                (fade.elapsed_secs() / fade.duration().as_secs_f32()).clamp(0.0, 1.0),
            )
        };

        if finished {
            commands.entity(entity).despawn_recursive();
            continue;
        }

        let alpha = 1.0 - progress;
        let base = toast.base_color.to_srgba();
        bg_color.0 = Color::srgba(base.red, base.green, base.blue, base.alpha * alpha);
        for &child in children.iter() {
            if let Ok(mut text_color) = text_color_query.get_mut(child) {
                text_color.0 = Color::srgba(1.0, 1.0, 1.0, alpha);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENT-TO-TOAST WIRING
// ═══════════════════════════════════════════════════════════════════════

pub fn wire_loot_toasts(
    mut gained_events: EventReader<LootGainedEvent>,
    mut notify_writer: EventWriter<NotificationEvent>,
) {
    for ev in gained_events.read() {
        notify_writer.send(NotificationEvent::gain(format!(
            "+{} {}",
            ev.quantity, ev.name
        )));
    }
}

pub fn wire_rejected_toasts(
    mut rejected_events: EventReader<LootRejectedEvent>,
    mut notify_writer: EventWriter<NotificationEvent>,
) {
    for ev in rejected_events.read() {
        notify_writer.send(NotificationEvent::warning(format!(
            "Inventory full! Lost {} {}.",
            ev.quantity, ev.name
        )));
    }
}
