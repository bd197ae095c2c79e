//! Tests for the slot workspace: switching, autosave, refresh and failure handling.
mod common;
use botblocks::prelude::*;
use botblocks::workspace::default_slots;
use common::*;

fn loaded(store: MemorySlotStore) -> WorkspaceController<MemorySlotStore> {
    WorkspaceController::load(store).expect("Failed to load workspace")
}

#[test]
fn test_load_opens_first_slot() {
    let demo = create_demo_program();
    let workspace = loaded(store_with(0, &demo));
    assert_eq!(workspace.active_index(), 0);
    assert_eq!(workspace.active_slot().name, "Slot 1");
    assert_eq!(workspace.program(), &demo);
    assert_eq!(workspace.store().writes(), 0);
}

#[test]
fn test_load_pads_short_slot_lists() {
    let store = MemorySlotStore::with_slots(vec![Slot::empty("Dance")]);
    let workspace = loaded(store);
    let names: Vec<&str> = workspace.slots().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Dance", "Slot 2", "Slot 3", "Slot 4", "Slot 5"]);
    assert!(workspace.program().is_empty());
}

#[test]
fn test_switch_replaces_canvas_without_touching_slots() {
    let demo = create_demo_program();
    let mut workspace = loaded(store_with(2, &demo));
    assert!(workspace.program().is_empty());

    let before = workspace.slots().to_vec();
    workspace.switch_active(2).expect("Failed to switch slot");
    assert_eq!(workspace.program(), &demo);
    workspace.switch_active(1).expect("Failed to switch slot");
    assert!(workspace.program().is_empty());

    assert_eq!(workspace.slots(), before.as_slice());
    assert_eq!(workspace.store().writes(), 0);
}

#[test]
fn test_switch_out_of_range_opens_first_slot() {
    let mut workspace = loaded(MemorySlotStore::with_slots(default_slots()));
    workspace.switch_active(3).expect("Failed to switch slot");
    workspace.switch_active(42).expect("Failed to switch slot");
    assert_eq!(workspace.active_index(), 0);
}

#[test]
fn test_edit_saves_only_when_tree_changes() {
    let mut workspace = loaded(MemorySlotStore::with_slots(default_slots()));

    workspace
        .edit(|program| program.roots.push(say("hi")))
        .expect("Failed to edit");
    assert_eq!(workspace.store().writes(), 1);
    assert_eq!(
        workspace.store().slots()[0].data,
        r#"{"roots":[{"type":"say","fields":{"dialogue":"hi"}}]}"#
    );

    // Saving an unchanged tree is a no-op.
    assert!(!workspace.save().expect("Failed to save"));
    workspace.edit(|_| ()).expect("Failed to edit");
    assert_eq!(workspace.store().writes(), 1);
}

#[test]
fn test_view_only_events_do_not_save() {
    let mut workspace = loaded(store_with(0, &create_demo_program()));
    for event in [ChangeEvent::Ui, ChangeEvent::FinishedLoading] {
        assert!(!workspace.handle_event(event).expect("Failed to handle event"));
    }
    // Structural events with no actual change do not write either.
    assert!(!workspace
        .handle_event(ChangeEvent::BlockMove)
        .expect("Failed to handle event"));
    assert_eq!(workspace.store().writes(), 0);
}

#[test]
fn test_batch_writes_once() {
    let mut workspace = loaded(MemorySlotStore::with_slots(default_slots()));
    let count = workspace
        .batch(|ws| {
            for n in 1..=3 {
                ws.edit(|program| program.roots.push(wait(n)))
                    .expect("Failed to edit");
                ws.handle_event(ChangeEvent::BlockCreate)
                    .expect("Failed to handle event");
            }
            ws.program().roots.len()
        })
        .expect("Failed to run batch");

    assert_eq!(count, 3);
    assert_eq!(workspace.store().writes(), 1);
}

#[test]
fn test_saved_tree_reloads_in_new_session() {
    let mut workspace = loaded(MemorySlotStore::with_slots(default_slots()));
    workspace.switch_active(4).expect("Failed to switch slot");
    let demo = create_demo_program();
    workspace
        .edit(|program| *program = demo.clone())
        .expect("Failed to edit");

    let store = MemorySlotStore::with_slots(workspace.store().slots().to_vec());
    let mut reopened = loaded(store);
    reopened.switch_active(4).expect("Failed to switch slot");
    assert_eq!(reopened.program(), &demo);
    assert!(reopened.slots()[..4].iter().all(|s| s.data.is_empty()));
}

#[test]
fn test_clear_active_saves_empty_slot() {
    let mut workspace = loaded(store_with(0, &create_demo_program()));
    assert!(workspace.clear_active().expect("Failed to clear"));
    assert_eq!(workspace.store().slots()[0].data, "");
    assert!(!workspace.clear_active().expect("Failed to clear"));
    assert_eq!(workspace.store().writes(), 1);
}

#[test]
fn test_failed_write_is_retried() {
    let mut workspace = loaded(MemorySlotStore::with_slots(default_slots()));
    workspace.store_mut().set_fail_writes(true);

    let err = workspace
        .edit(|program| program.roots.push(say("lost?")))
        .unwrap_err();
    assert!(matches!(err, WorkspaceError::Remote(RemoteError::Transport { .. })));
    assert!(workspace.store().slots()[0].data.is_empty());

    workspace.store_mut().set_fail_writes(false);
    assert!(workspace.save().expect("Failed to save"));
    assert_eq!(workspace.store().writes(), 1);
    assert!(workspace.store().slots()[0].data.contains("lost?"));
}

#[test]
fn test_failed_rename_is_retried() {
    let mut workspace = loaded(MemorySlotStore::with_slots(default_slots()));
    workspace.store_mut().set_fail_writes(true);

    let err = workspace.rename_active("Patrol").unwrap_err();
    assert!(matches!(err, WorkspaceError::Remote(_)));
    assert_eq!(workspace.active_slot().name, "Patrol");
    assert_eq!(workspace.store().slots()[0].name, "Slot 1");

    workspace.store_mut().set_fail_writes(false);
    assert!(workspace.save().expect("Failed to save"));
    assert_eq!(workspace.store().slots()[0].name, "Patrol");
    assert!(!workspace.save().expect("Failed to save"));
}

#[test]
fn test_batch_restores_autosave_after_panic() {
    let mut workspace = loaded(MemorySlotStore::with_slots(default_slots()));
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        workspace.batch(|_| -> () { panic!("edit handler failed") })
    }));
    assert!(outcome.is_err());

    workspace
        .edit(|program| program.roots.push(say("still saving")))
        .expect("Failed to edit");
    assert_eq!(workspace.store().writes(), 1);
}

#[test]
fn test_long_chain_survives_save_and_reload() {
    let mut workspace = loaded(MemorySlotStore::with_slots(default_slots()));
    let chain = long_chain(250);
    workspace
        .edit(|program| program.roots.push(chain.clone()))
        .expect("Failed to edit");

    workspace.switch_active(1).expect("Failed to switch slot");
    workspace.switch_active(0).expect("Failed to reopen slot");
    assert_eq!(workspace.program(), &single(chain));
}

#[test]
fn test_deeply_nested_syncs_survive_save_and_reload() {
    let mut workspace = loaded(MemorySlotStore::with_slots(default_slots()));
    let tree = nested_syncs(50);
    workspace
        .edit(|program| program.roots.push(tree.clone()))
        .expect("Failed to edit");

    workspace.refresh().expect("Failed to refresh");
    assert_eq!(workspace.program(), &single(tree));
    let script = workspace
        .generate(&Lowerer::new(), &Generator::new())
        .expect("Failed to generate");
    assert!(script.ends_with(&format!("{}robot.wait(1)\n", "    ".repeat(50))));
}

#[test]
fn test_refresh_after_remote_rename_opens_first_slot() {
    let mut workspace = loaded(MemorySlotStore::with_slots(default_slots()));
    workspace.switch_active(2).expect("Failed to switch slot");

    let mut remote = default_slots();
    remote[2].name = "Renamed".to_string();
    workspace.store_mut().replace_slots(remote);

    workspace.refresh().expect("Failed to refresh");
    assert_eq!(workspace.active_index(), 0);
    assert_eq!(workspace.slots()[2].name, "Renamed");
}

#[test]
fn test_refresh_keeps_slot_and_picks_up_remote_data() {
    let mut workspace = loaded(MemorySlotStore::with_slots(default_slots()));
    workspace.switch_active(1).expect("Failed to switch slot");

    let demo = create_demo_program();
    let remote = store_with(1, &demo).slots().to_vec();
    workspace.store_mut().replace_slots(remote);

    workspace.refresh().expect("Failed to refresh");
    assert_eq!(workspace.active_index(), 1);
    assert_eq!(workspace.program(), &demo);
}

#[test]
fn test_rename_active_writes_slot_list() {
    let mut workspace = loaded(MemorySlotStore::with_slots(default_slots()));
    workspace.switch_active(3).expect("Failed to switch slot");
    workspace.rename_active("Patrol").expect("Failed to rename");
    assert_eq!(workspace.store().slots()[3].name, "Patrol");
    assert_eq!(workspace.store().writes(), 1);
}

#[test]
fn test_corrupt_slot_reports_error_and_leaves_empty_canvas() {
    let mut slots = default_slots();
    slots[1].data = "{not json".to_string();
    let mut workspace = loaded(MemorySlotStore::with_slots(slots));

    let err = workspace.switch_active(1).unwrap_err();
    assert!(matches!(
        err,
        WorkspaceError::CorruptSlot { index: 1, ref name, .. } if name == "Slot 2"
    ));
    assert!(err.to_string().starts_with("Slot 1 ('Slot 2') holds unreadable program data"));
    assert!(workspace.program().is_empty());
}

#[test]
fn test_corrupt_first_slot_fails_load() {
    let mut slots = default_slots();
    slots[0].data = "42".to_string();
    let result = WorkspaceController::load(MemorySlotStore::with_slots(slots));
    assert!(matches!(result, Err(WorkspaceError::CorruptSlot { index: 0, .. })));
}

#[test]
fn test_generate_active_slot() {
    let workspace = loaded(store_with(0, &create_demo_program()));
    let script = workspace
        .generate(&Lowerer::new(), &Generator::new())
        .expect("Failed to generate");
    assert_eq!(script, DEMO_SCRIPT);
}

#[test]
fn test_generate_reports_lowering_errors() {
    let workspace = loaded(store_with(0, &single(BlockDefinition::new("teleport"))));
    let err = workspace
        .generate(&Lowerer::new(), &Generator::new())
        .unwrap_err();
    assert!(matches!(err, WorkspaceError::Lower(LowerError::UnknownBlockKind { .. })));
}
