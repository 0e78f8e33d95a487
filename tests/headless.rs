//! Headless integration tests for Gildenhall.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic systems (skipping all rendering/UI), and verify that the
//! idle loop, the command handlers, and the session state machine work
//! correctly. Simulation tests drive the quantum accumulator directly
//! instead of registering the wall-clock system, so they are exact.
//!
//! Run with: `cargo test --test headless`

use std::collections::BTreeMap;
use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use gildenhall::auth::AuthSession;
use gildenhall::currency::Coin;
use gildenhall::data::professions::populate_professions;
use gildenhall::data::{initial_professions, DataPlugin};
use gildenhall::economy::{handle_sell_item, handle_upgrade_inventory};
use gildenhall::professions::{handle_set_task, run_simulation, SimClock};
use gildenhall::save::document::{parse_document, SavedGameState, AUTOSAVE_SLOT};
use gildenhall::save::{
    fetch_saved_document, handle_continue, handle_load_slot, handle_new_game,
    handle_save_request, store, SaveDirectory,
};
use gildenhall::settings::GameSettings;
use gildenhall::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with all shared resources and events registered
/// but NO rendering, windowing, or storage access. Systems must be added
/// per-test depending on what's being exercised.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs; AuthSession stays signed out
    //    so no test touches the filesystem) ───────────────────────────────
    app.init_resource::<SessionStatus>()
        .init_resource::<ResourceLedger>()
        .init_resource::<Professions>()
        .init_resource::<PlayerInventory>()
        .init_resource::<ItemRegistry>()
        .init_resource::<ProfessionCatalog>()
        .init_resource::<SimClock>()
        .init_resource::<SaveDirectory>()
        .insert_resource(GameSettings::default())
        .init_resource::<AuthSession>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<SetTaskEvent>()
        .add_event::<SellItemEvent>()
        .add_event::<MoveItemEvent>()
        .add_event::<EquipItemEvent>()
        .add_event::<UpgradeInventoryEvent>()
        .add_event::<NewGameEvent>()
        .add_event::<ContinueEvent>()
        .add_event::<LoadSlotEvent>()
        .add_event::<SaveRequestEvent>()
        .add_event::<LootGainedEvent>()
        .add_event::<LootRejectedEvent>()
        .add_event::<NotificationEvent>();

    app
}

/// Registers the session-command handlers the way main.rs gates them.
fn add_session_handlers(app: &mut App) {
    app.add_systems(
        Update,
        (
            handle_new_game,
            handle_continue,
            handle_load_slot,
            handle_save_request,
        )
            .run_if(in_state(GameState::MainMenu)),
    );
}

/// Populates both registries and stamps a fresh roster, without going
/// through the Loading state.
fn seed_session(app: &mut App) {
    let mut registry = ItemRegistry::default();
    gildenhall::data::items::populate_items(&mut registry);
    app.insert_resource(registry);

    let mut catalog = ProfessionCatalog::default();
    populate_professions(&mut catalog);
    let roster = initial_professions(&catalog);
    app.insert_resource(catalog);
    app.world_mut().resource_mut::<Professions>().list = roster;
    app.world_mut().resource_mut::<SessionStatus>().active = true;
}

/// Transitions the test app to the given state and ticks once to apply it.
fn enter_state(app: &mut App, state: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(state);
    app.update();
}

/// Queues `millis` worth of owed simulation quanta.
fn owe_time(app: &mut App, millis: u64) {
    app.world_mut().resource_mut::<SimClock>().accumulator += Duration::from_millis(millis);
}

fn drain_notifications(app: &mut App) -> Vec<NotificationEvent> {
    app.world_mut()
        .resource_mut::<Events<NotificationEvent>>()
        .drain()
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_headless_boot_reaches_main_menu_with_populated_registries() {
    let mut app = build_test_app();
    app.add_plugins(DataPlugin);
    // Signed out, so the directory fetch is a no-op that opens the menu.
    app.add_systems(OnEnter(GameState::Loading), fetch_saved_document);

    // First update enters Loading and populates registries; second applies
    // the queued transition.
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(state.get(), &GameState::MainMenu);

    assert!(!app.world().resource::<ItemRegistry>().items.is_empty());
    assert!(!app
        .world()
        .resource::<ProfessionCatalog>()
        .templates
        .is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Simulation loop
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_tick_completes_task_and_credits_loot() {
    let mut app = build_test_app();
    seed_session(&mut app);
    app.add_systems(Update, run_simulation);

    // Mining, task 0: copper, 3000 ms per completion, 10 XP.
    app.world_mut().resource_mut::<Professions>().list[0].active_task_index = Some(0);

    owe_time(&mut app, 3000);
    app.update();

    let professions = app.world().resource::<Professions>();
    let mining = &professions.list[0];
    assert_eq!(mining.current_xp, 10);
    assert_eq!(mining.level, 1);
    assert_eq!(mining.task_progress, 0);

    let inventory = app.world().resource::<PlayerInventory>();
    let stack = inventory.slots[0].as_ref().expect("loot should be placed");
    assert_eq!(stack.id, "Copper Ore");
    assert_eq!(stack.quantity, 1);
    assert_eq!(stack.value, 4);

    let ledger = app.world().resource::<ResourceLedger>();
    assert_eq!(ledger.amount("Copper Ore"), Coin::from(1));
    assert_eq!(ledger.gold(), Coin::from(STARTING_GOLD));

    assert_eq!(
        app.world().resource::<SimClock>().accumulator,
        Duration::ZERO
    );
}

#[test]
fn test_stalled_frames_catch_up_exactly() {
    let mut app = build_test_app();
    seed_session(&mut app);
    app.add_systems(Update, run_simulation);

    // Woodcutting, task 0: logs, 4000 ms, 25 XP.
    app.world_mut().resource_mut::<Professions>().list[1].active_task_index = Some(0);

    // Ten seconds arrive in a single frame: 2 completions + 2000 ms over.
    owe_time(&mut app, 10_000);
    app.update();

    let professions = app.world().resource::<Professions>();
    let woodcutting = &professions.list[1];
    assert_eq!(woodcutting.current_xp, 50);
    assert_eq!(woodcutting.task_progress, 2000);

    let ledger = app.world().resource::<ResourceLedger>();
    assert_eq!(ledger.amount("Logs"), Coin::from(2));
}

#[test]
fn test_two_professions_earn_in_the_same_quantum() {
    let mut app = build_test_app();
    seed_session(&mut app);
    app.add_systems(Update, run_simulation);

    {
        let mut professions = app.world_mut().resource_mut::<Professions>();
        professions.list[0].active_task_index = Some(0); // copper, 3000 ms
        professions.list[1].active_task_index = Some(0); // logs, 4000 ms
    }

    owe_time(&mut app, 12_000);
    app.update();

    let ledger = app.world().resource::<ResourceLedger>();
    assert_eq!(ledger.amount("Copper Ore"), Coin::from(4));
    assert_eq!(ledger.amount("Logs"), Coin::from(3));

    let inventory = app.world().resource::<PlayerInventory>();
    assert_eq!(inventory.slots_used(), 2);
}

#[test]
fn test_full_inventory_rejects_loot_without_crediting_ledger() {
    let mut app = build_test_app();
    seed_session(&mut app);
    app.add_systems(Update, run_simulation);

    // Fill every slot with distinct junk the miner cannot stack onto.
    {
        let mut inventory = app.world_mut().resource_mut::<PlayerInventory>();
        let capacity = inventory.capacity;
        for index in 0..capacity {
            inventory.slots[index] = Some(InventoryItem {
                id: format!("junk-{index}"),
                name: format!("junk-{index}"),
                quantity: 1,
                value: 1,
                description: None,
                category: ItemCategory::Misc,
                icon: None,
                lore: None,
                uses: None,
            });
        }
    }
    app.world_mut().resource_mut::<Professions>().list[0].active_task_index = Some(0);

    owe_time(&mut app, 3000);
    app.update();

    let ledger = app.world().resource::<ResourceLedger>();
    assert!(ledger.amount("Copper Ore").is_zero());

    // XP still accrues; only the loot bounced.
    let professions = app.world().resource::<Professions>();
    assert_eq!(professions.list[0].current_xp, 10);

    let rejected: Vec<LootRejectedEvent> = app
        .world_mut()
        .resource_mut::<Events<LootRejectedEvent>>()
        .drain()
        .collect();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].quantity, 1);
}

#[test]
fn test_paused_task_earns_nothing() {
    let mut app = build_test_app();
    seed_session(&mut app);
    app.add_systems(Update, run_simulation);

    {
        let mut professions = app.world_mut().resource_mut::<Professions>();
        professions.list[0].active_task_index = Some(0);
        professions.list[0].is_paused = true;
    }

    owe_time(&mut app, 30_000);
    app.update();

    let professions = app.world().resource::<Professions>();
    assert_eq!(professions.list[0].current_xp, 0);
    assert_eq!(professions.list[0].task_progress, 0);
    assert!(app.world().resource::<ResourceLedger>().amount("Copper Ore").is_zero());
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_set_task_assigns_then_toggles_pause() {
    let mut app = build_test_app();
    seed_session(&mut app);
    app.add_systems(Update, handle_set_task);

    app.world_mut().send_event(SetTaskEvent {
        profession_id: "mining".into(),
        task_index: 1,
    });
    app.update();
    {
        let professions = app.world().resource::<Professions>();
        assert_eq!(professions.list[0].active_task_index, Some(1));
        assert!(!professions.list[0].is_paused);
    }

    app.world_mut().send_event(SetTaskEvent {
        profession_id: "mining".into(),
        task_index: 1,
    });
    app.update();
    {
        let professions = app.world().resource::<Professions>();
        assert_eq!(professions.list[0].active_task_index, Some(1));
        assert!(professions.list[0].is_paused);
    }

    // A different index un-pauses and restarts progress.
    app.world_mut().send_event(SetTaskEvent {
        profession_id: "mining".into(),
        task_index: 0,
    });
    app.update();
    let professions = app.world().resource::<Professions>();
    assert_eq!(professions.list[0].active_task_index, Some(0));
    assert!(!professions.list[0].is_paused);
    assert_eq!(professions.list[0].task_progress, 0);
}

#[test]
fn test_sell_clamps_to_held_quantity_and_credits_gold() {
    let mut app = build_test_app();
    seed_session(&mut app);
    app.add_systems(Update, handle_sell_item);

    {
        let mut inventory = app.world_mut().resource_mut::<PlayerInventory>();
        inventory.slots[3] = Some(InventoryItem {
            id: "Logs".into(),
            name: "Logs".into(),
            quantity: 5,
            value: 3,
            description: None,
            category: ItemCategory::Resource,
            icon: None,
            lore: None,
            uses: None,
        });
    }
    app.world_mut()
        .resource_mut::<ResourceLedger>()
        .credit("Logs", 5);

    app.world_mut().send_event(SellItemEvent {
        slot_index: 3,
        quantity: 99,
    });
    app.update();

    let inventory = app.world().resource::<PlayerInventory>();
    assert!(inventory.slots[3].is_none(), "sold-out stack is removed");

    let ledger = app.world().resource::<ResourceLedger>();
    assert_eq!(ledger.gold(), Coin::from(STARTING_GOLD + 15));
    assert!(ledger.amount("Logs").is_zero());
}

#[test]
fn test_sell_from_empty_or_out_of_range_slot_is_a_no_op() {
    let mut app = build_test_app();
    seed_session(&mut app);
    app.add_systems(Update, handle_sell_item);

    app.world_mut().send_event(SellItemEvent {
        slot_index: 2,
        quantity: 1,
    });
    app.world_mut().send_event(SellItemEvent {
        slot_index: 9999,
        quantity: 1,
    });
    app.update();

    let ledger = app.world().resource::<ResourceLedger>();
    assert_eq!(ledger.gold(), Coin::from(STARTING_GOLD));
}

#[test]
fn test_inventory_upgrade_deducts_gold_and_grows_capacity() {
    let mut app = build_test_app();
    seed_session(&mut app);
    app.add_systems(Update, handle_upgrade_inventory);

    app.world_mut()
        .resource_mut::<ResourceLedger>()
        .amounts
        .insert(GOLD.to_string(), Coin::from(260));

    app.world_mut().send_event(UpgradeInventoryEvent);
    app.update();

    let inventory = app.world().resource::<PlayerInventory>();
    assert_eq!(inventory.capacity, BASE_INVENTORY_CAPACITY + INVENTORY_UPGRADE_STEP);
    assert_eq!(inventory.slots.len(), inventory.capacity);
    assert_eq!(app.world().resource::<ResourceLedger>().gold(), Coin::from(10));

    // Second upgrade now costs 400; 10g is not enough.
    drain_notifications(&mut app);
    app.world_mut().send_event(UpgradeInventoryEvent);
    app.update();

    let inventory = app.world().resource::<PlayerInventory>();
    assert_eq!(inventory.capacity, BASE_INVENTORY_CAPACITY + INVENTORY_UPGRADE_STEP);
    let warnings = drain_notifications(&mut app);
    assert!(warnings
        .iter()
        .any(|n| n.kind == NotificationKind::Warning));
}

// ─────────────────────────────────────────────────────────────────────────────
// Session state machine
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_new_game_enters_session_with_fresh_state() {
    let mut app = build_test_app();
    seed_session(&mut app);
    // Undo seed_session's "already active" marker; this test starts cold.
    app.world_mut().resource_mut::<SessionStatus>().active = false;
    add_session_handlers(&mut app);
    enter_state(&mut app, GameState::MainMenu);

    // Dirty the state so the reset is observable.
    app.world_mut()
        .resource_mut::<ResourceLedger>()
        .credit(GOLD, 5000);

    app.world_mut().send_event(NewGameEvent);
    app.update();
    app.update();

    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Playing
    );
    assert!(app.world().resource::<SessionStatus>().active);
    assert_eq!(
        app.world().resource::<ResourceLedger>().gold(),
        Coin::from(STARTING_GOLD)
    );
    let professions = app.world().resource::<Professions>();
    assert_eq!(professions.list.len(), 4);
    assert!(professions.list.iter().all(|p| p.level == 1));
    let inventory = app.world().resource::<PlayerInventory>();
    assert_eq!(inventory.capacity, BASE_INVENTORY_CAPACITY);
    assert_eq!(inventory.slots_used(), 0);
}

#[test]
fn test_continue_with_no_saves_warns_and_stays_in_menu() {
    let mut app = build_test_app();
    add_session_handlers(&mut app);
    enter_state(&mut app, GameState::MainMenu);
    drain_notifications(&mut app);

    app.world_mut().send_event(ContinueEvent);
    app.update();
    app.update();

    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::MainMenu
    );
    assert!(!app.world().resource::<SessionStatus>().active);
    let warnings = drain_notifications(&mut app);
    assert!(warnings
        .iter()
        .any(|n| n.kind == NotificationKind::Warning));
}

#[test]
fn test_continue_hydrates_the_last_touched_slot() {
    let mut app = build_test_app();
    add_session_handlers(&mut app);
    enter_state(&mut app, GameState::MainMenu);

    {
        let mut directory = app.world_mut().resource_mut::<SaveDirectory>();
        directory.doc.slots.insert("older".into(), snapshot_with_gold("77"));
        directory.doc.slots.insert("camp".into(), snapshot_with_gold("1234"));
        directory.doc.last_slot = Some("camp".into());
    }

    app.world_mut().send_event(ContinueEvent);
    app.update();
    app.update();

    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Playing
    );
    assert!(app.world().resource::<SessionStatus>().active);
    assert_eq!(
        app.world().resource::<ResourceLedger>().gold(),
        Coin::from(1234)
    );
    // The loaded slot becomes current.
    let directory = app.world().resource::<SaveDirectory>();
    assert_eq!(directory.doc.last_slot.as_deref(), Some("camp"));
    assert!(directory.doc.current.is_some());
}

#[test]
fn test_continue_falls_back_when_last_slot_is_dangling() {
    let mut app = build_test_app();
    add_session_handlers(&mut app);
    enter_state(&mut app, GameState::MainMenu);

    {
        let mut directory = app.world_mut().resource_mut::<SaveDirectory>();
        directory.doc.slots.insert("only".into(), snapshot_with_gold("42"));
        directory.doc.last_slot = Some("pruned-away".into());
    }

    app.world_mut().send_event(ContinueEvent);
    app.update();
    app.update();

    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Playing
    );
    assert_eq!(
        app.world().resource::<ResourceLedger>().gold(),
        Coin::from(42)
    );
    assert_eq!(
        app.world().resource::<SaveDirectory>().doc.last_slot.as_deref(),
        Some("only")
    );
}

#[test]
fn test_continue_with_live_session_just_dismisses_the_menu() {
    let mut app = build_test_app();
    seed_session(&mut app);
    add_session_handlers(&mut app);
    enter_state(&mut app, GameState::MainMenu);

    app.world_mut()
        .resource_mut::<ResourceLedger>()
        .credit(GOLD, 90);

    app.world_mut().send_event(ContinueEvent);
    app.update();
    app.update();

    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Playing
    );
    // The live ledger was not replaced by any hydration.
    assert_eq!(
        app.world().resource::<ResourceLedger>().gold(),
        Coin::from(STARTING_GOLD + 90)
    );
}

#[test]
fn test_load_slot_rebuilds_inventory_positionally() {
    let mut app = build_test_app();
    add_session_handlers(&mut app);
    enter_state(&mut app, GameState::MainMenu);

    let mut snapshot = snapshot_with_gold("50");
    snapshot.inventory = Some(vec![
        None,
        Some(InventoryItem {
            id: "Logs".into(),
            name: "Logs".into(),
            quantity: 8,
            value: 3,
            description: None,
            category: ItemCategory::Resource,
            icon: None,
            lore: None,
            uses: None,
        }),
    ]);
    snapshot.inventory_capacity = Some(30);
    app.world_mut()
        .resource_mut::<SaveDirectory>()
        .doc
        .slots
        .insert("run".into(), snapshot);

    app.world_mut().send_event(LoadSlotEvent {
        slot_key: "run".into(),
    });
    app.update();
    app.update();

    let inventory = app.world().resource::<PlayerInventory>();
    assert_eq!(inventory.capacity, 30);
    assert_eq!(inventory.slots.len(), 30);
    assert!(inventory.slots[0].is_none());
    assert_eq!(inventory.slots[1].as_ref().unwrap().quantity, 8);
}

#[test]
fn test_load_missing_slot_warns() {
    let mut app = build_test_app();
    add_session_handlers(&mut app);
    enter_state(&mut app, GameState::MainMenu);
    drain_notifications(&mut app);

    app.world_mut().send_event(LoadSlotEvent {
        slot_key: "nope".into(),
    });
    app.update();

    let warnings = drain_notifications(&mut app);
    assert!(warnings
        .iter()
        .any(|n| n.message.contains("not found")));
}

#[test]
fn test_save_without_session_warns() {
    let mut app = build_test_app();
    add_session_handlers(&mut app);
    enter_state(&mut app, GameState::MainMenu);
    drain_notifications(&mut app);

    app.world_mut().send_event(SaveRequestEvent {
        name: Some("My Run".into()),
    });
    app.update();

    let warnings = drain_notifications(&mut app);
    assert!(warnings
        .iter()
        .any(|n| n.message.contains("Start a game")));
}

#[test]
fn test_save_with_blank_name_warns() {
    let mut app = build_test_app();
    seed_session(&mut app);
    add_session_handlers(&mut app);
    enter_state(&mut app, GameState::MainMenu);
    drain_notifications(&mut app);

    app.world_mut().send_event(SaveRequestEvent {
        name: Some("   ".into()),
    });
    app.update();

    let warnings = drain_notifications(&mut app);
    assert!(warnings
        .iter()
        .any(|n| n.message.contains("cannot be empty")));
}

// ─────────────────────────────────────────────────────────────────────────────
// Persistence store
//
// These tests write real documents under the test binary's saves/
// directory. Each test uses a user id unique to the run, so stale files
// from earlier runs and parallel tests never collide.
// ─────────────────────────────────────────────────────────────────────────────

fn unique_user(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("test-{prefix}-{}-{nanos}", std::process::id())
}

fn sign_in(app: &mut App, user_id: &str) {
    app.world_mut().resource_mut::<AuthSession>().user_id = Some(user_id.to_string());
}

#[test]
fn test_manual_save_round_trips_through_the_store() {
    let user_id = unique_user("round-trip");

    let mut app = build_test_app();
    seed_session(&mut app);
    add_session_handlers(&mut app);
    sign_in(&mut app, &user_id);
    enter_state(&mut app, GameState::MainMenu);

    app.world_mut()
        .resource_mut::<ResourceLedger>()
        .credit(GOLD, 490);
    app.world_mut().send_event(SaveRequestEvent {
        name: Some("Test Expedition".into()),
    });
    app.update();

    // A second app signing in as the same user sees the save.
    let mut fresh = build_test_app();
    sign_in(&mut fresh, &user_id);
    fresh.add_systems(OnEnter(GameState::Loading), fetch_saved_document);
    fresh.update();
    fresh.update();

    assert_eq!(
        fresh.world().resource::<State<GameState>>().get(),
        &GameState::MainMenu
    );
    let directory = fresh.world().resource::<SaveDirectory>();
    let slot = directory
        .doc
        .slots
        .get("test-expedition")
        .expect("name should be slugged into the slot key");
    assert_eq!(slot.save_name.as_deref(), Some("Test Expedition"));
    assert_eq!(
        slot.resources.as_ref().unwrap().get(GOLD).unwrap(),
        "500"
    );
    assert_eq!(directory.doc.last_slot.as_deref(), Some("test-expedition"));
}

#[test]
fn test_unnamed_save_targets_the_autosave_slot() {
    // The periodic autosave persists with no name override; this is the
    // slot it lands in.
    let user_id = unique_user("autosave-target");

    let mut app = build_test_app();
    seed_session(&mut app);
    add_session_handlers(&mut app);
    sign_in(&mut app, &user_id);
    enter_state(&mut app, GameState::MainMenu);

    app.world_mut().send_event(SaveRequestEvent { name: None });
    app.update();

    let directory = app.world().resource::<SaveDirectory>();
    assert_eq!(directory.doc.last_slot.as_deref(), Some(AUTOSAVE_SLOT));
    let slot = directory.doc.slots.get(AUTOSAVE_SLOT).expect("autosave slot");
    assert_eq!(slot.slot_name.as_deref(), Some(AUTOSAVE_SLOT));
    assert_eq!(slot.save_name.as_deref(), Some("Autosave"));
    let current = directory.doc.current.as_ref().expect("current mirror");
    assert_eq!(current.slot_name.as_deref(), Some(AUTOSAVE_SLOT));
}

#[test]
fn test_slot_writes_preserve_sibling_slots() {
    let user_id = unique_user("siblings");

    let mut first = snapshot_with_gold("111");
    first.slot_name = Some("first".into());
    let mut second = snapshot_with_gold("222");
    second.slot_name = Some("second".into());

    store::write_slot(&user_id, "first", &first).expect("first write");
    store::write_slot(&user_id, "second", &second).expect("second write");

    let raw = store::read_document(&user_id).expect("read back");
    let doc = parse_document(raw.as_ref());
    assert_eq!(doc.slots.len(), 2, "first slot must survive the second write");
    assert_eq!(
        doc.slots
            .get("first")
            .unwrap()
            .resources
            .as_ref()
            .unwrap()
            .get(GOLD)
            .unwrap(),
        "111"
    );
    assert_eq!(doc.last_slot.as_deref(), Some("second"));
    assert_eq!(
        doc.current
            .as_ref()
            .unwrap()
            .resources
            .as_ref()
            .unwrap()
            .get(GOLD)
            .unwrap(),
        "222"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn snapshot_with_gold(gold: &str) -> SavedGameState {
    let mut resources = BTreeMap::new();
    resources.insert(GOLD.to_string(), gold.to_string());
    SavedGameState {
        resources: Some(resources),
        slot_name: Some(AUTOSAVE_SLOT.to_string()),
        ..Default::default()
    }
}
