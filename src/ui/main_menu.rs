use bevy::app::AppExit;
use bevy::prelude::*;

use crate::save::document::{last_save_label, now_millis};
use crate::save::SaveDirectory;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS & RESOURCES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct MainMenuRoot;

#[derive(Component)]
pub struct MenuItemRow {
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuView {
    Root,
    LoadSlots,
}

/// Menu cursor and which view is on screen. Lives only while the menu is
/// open.
#[derive(Resource)]
pub struct MainMenuState {
    pub cursor: usize,
    pub view: MenuView,
    built_view: Option<MenuView>,
    /// Slot keys behind the rows of the LoadSlots view, newest first.
    pub slot_keys: Vec<String>,
}

const ROOT_OPTIONS: &[&str] = &["Continue", "New Game", "Save Game", "Load Game", "Quit"];

const OPTION_CONTINUE: usize = 0;
const OPTION_NEW_GAME: usize = 1;
const OPTION_SAVE: usize = 2;
const OPTION_LOAD: usize = 3;
const OPTION_QUIT: usize = 4;

// ═══════════════════════════════════════════════════════════════════════
// OPEN / CLOSE
// ═══════════════════════════════════════════════════════════════════════

pub fn open_main_menu(mut commands: Commands) {
    commands.insert_resource(MainMenuState {
        cursor: 0,
        view: MenuView::Root,
        built_view: None,
        slot_keys: Vec::new(),
    });
}

pub fn close_main_menu(mut commands: Commands, roots: Query<Entity, With<MainMenuRoot>>) {
    for entity in &roots {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<MainMenuState>();
}

// ═══════════════════════════════════════════════════════════════════════
// BUILD — respawn the tree whenever the view changes
// ═══════════════════════════════════════════════════════════════════════

pub fn rebuild_main_menu(
    mut commands: Commands,
    state: Option<ResMut<MainMenuState>>,
    directory: Res<SaveDirectory>,
    roots: Query<Entity, With<MainMenuRoot>>,
) {
    let Some(mut state) = state else { return };
    if state.built_view == Some(state.view) {
        return;
    }
    for entity in &roots {
        commands.entity(entity).despawn_recursive();
    }

    let mut rows: Vec<String> = Vec::new();
    let mut footer: Option<String> = None;

    match state.view {
        MenuView::Root => {
            rows.extend(ROOT_OPTIONS.iter().map(|s| s.to_string()));
            let saved_at = directory.doc.current.as_ref().and_then(|c| c.saved_at);
            if let Some(label) = last_save_label(saved_at, now_millis()) {
                footer = Some(format!("Last save: {label}"));
            }
            state.slot_keys.clear();
        }
        MenuView::LoadSlots => {
            // Newest save first.
            let mut entries: Vec<_> = directory.doc.slots.iter().collect();
            entries.sort_by(|a, b| b.1.saved_at.cmp(&a.1.saved_at));
            state.slot_keys = entries.iter().map(|(key, _)| (*key).clone()).collect();
            for (key, snapshot) in entries {
                let name = snapshot.save_name.clone().unwrap_or_else(|| key.clone());
                match last_save_label(snapshot.saved_at, now_millis()) {
                    Some(age) => rows.push(format!("{name}  ({age})")),
                    None => rows.push(name),
                }
            }
            footer = Some("Enter: load   Esc: back".to_string());
        }
    }

    let title = match state.view {
        MenuView::Root => "GILDENHALL",
        MenuView::LoadSlots => "LOAD GAME",
    };

    commands
        .spawn((
            MainMenuRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(24.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.10, 0.12, 0.18)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font_size: 52.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.9, 0.5)),
            ));

            if state.view == MenuView::Root {
                parent.spawn((
                    Text::new("An Idle Guild Adventure"),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.6, 0.7, 0.8)),
                ));
            }

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|menu| {
                    if rows.is_empty() {
                        menu.spawn((
                            Text::new("No saved games yet"),
                            TextFont {
                                font_size: 18.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.5, 0.5, 0.55)),
                        ));
                    }
                    for (index, label) in rows.iter().enumerate() {
                        menu.spawn((
                            MenuItemRow { index },
                            Text::new(label.clone()),
                            TextFont {
                                font_size: 20.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.7, 0.7, 0.7)),
                        ));
                    }
                });

            if let Some(footer) = footer {
                parent.spawn((
                    Text::new(footer),
                    TextFont {
                        font_size: 12.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.45, 0.5, 0.45)),
                ));
            }

            parent.spawn((
                Text::new("v0.1.0"),
                TextFont {
                    font_size: 11.0,
                    ..default()
                },
                TextColor(Color::srgb(0.35, 0.4, 0.45)),
            ));
        });

    state.built_view = Some(state.view);
    state.cursor = 0;
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE / INTERACTION
// ═══════════════════════════════════════════════════════════════════════

pub fn update_menu_visuals(
    state: Option<Res<MainMenuState>>,
    mut query: Query<(&MenuItemRow, &mut TextColor)>,
) {
    let Some(state) = state else { return };
    for (row, mut color) in &mut query {
        color.0 = if row.index == state.cursor {
            Color::WHITE
        } else {
            Color::srgb(0.7, 0.7, 0.7)
        };
    }
}

pub fn main_menu_navigation(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Option<ResMut<MainMenuState>>,
    session: Res<SessionStatus>,
    directory: Res<SaveDirectory>,
    mut new_game_writer: EventWriter<NewGameEvent>,
    mut continue_writer: EventWriter<ContinueEvent>,
    mut load_writer: EventWriter<LoadSlotEvent>,
    mut save_writer: EventWriter<SaveRequestEvent>,
    mut notify_writer: EventWriter<NotificationEvent>,
    mut app_exit: EventWriter<AppExit>,
) {
    let Some(mut state) = state else { return };

    let row_count = match state.view {
        MenuView::Root => ROOT_OPTIONS.len(),
        MenuView::LoadSlots => state.slot_keys.len(),
    };

    if keyboard.just_pressed(KeyCode::ArrowDown) && state.cursor + 1 < row_count {
        state.cursor += 1;
    }
    if keyboard.just_pressed(KeyCode::ArrowUp) && state.cursor > 0 {
        state.cursor -= 1;
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        match state.view {
            MenuView::LoadSlots => state.view = MenuView::Root,
            MenuView::Root => {
                if session.active {
                    continue_writer.send(ContinueEvent);
                }
            }
        }
        return;
    }

    if !keyboard.just_pressed(KeyCode::Enter) {
        return;
    }

    match state.view {
        MenuView::Root => match state.cursor {
            OPTION_CONTINUE => {
                continue_writer.send(ContinueEvent);
            }
            OPTION_NEW_GAME => {
                new_game_writer.send(NewGameEvent);
            }
            OPTION_SAVE => {
                save_writer.send(SaveRequestEvent {
                    name: Some("Quick Save".to_string()),
                });
            }
            OPTION_LOAD => {
                if directory.doc.slots.is_empty() {
                    notify_writer
                        .send(NotificationEvent::warning("No saved games available yet."));
                } else {
                    state.view = MenuView::LoadSlots;
                }
            }
            OPTION_QUIT => {
                app_exit.send(AppExit::Success);
            }
            _ => {}
        },
        MenuView::LoadSlots => {
            if let Some(key) = state.slot_keys.get(state.cursor).cloned() {
                load_writer.send(LoadSlotEvent { slot_key: key });
            }
        }
    }
}
