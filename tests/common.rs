//! Common test utilities for building block trees and slot stores.
use botblocks::prelude::*;

/// Wraps a single block in a program definition.
#[allow(dead_code)]
pub fn single(block: BlockDefinition) -> ProgramDefinition {
    ProgramDefinition::new(vec![block])
}

/// Lowers and generates a definition with the default settings.
#[allow(dead_code)]
pub fn generate(definition: &ProgramDefinition) -> String {
    let program = Lowerer::new()
        .lower(definition)
        .expect("Failed to lower program");
    Generator::new().generate(&program)
}

#[allow(dead_code)]
pub fn say(text: &str) -> BlockDefinition {
    BlockDefinition::new("say").with_field("dialogue", text)
}

#[allow(dead_code)]
pub fn wait(seconds: i64) -> BlockDefinition {
    BlockDefinition::new("wait").with_field("seconds", seconds)
}

#[allow(dead_code)]
pub fn move_arm(arm: &str, angle: BlockDefinition) -> BlockDefinition {
    BlockDefinition::new("move_arm")
        .with_field("arm", arm)
        .with_input("angle", angle)
}

/// Creates a start handler containing the given statements, chained in order.
///
/// Logic: when started -> say "Let's get started." -> both lights on -> arms up
#[allow(dead_code)]
pub fn create_demo_program() -> ProgramDefinition {
    let body = BlockDefinition::chain(vec![
        say("Let's get started."),
        BlockDefinition::new("light_set")
            .with_field("which_side", "both")
            .with_field("which_part", "antenna")
            .with_field("state", "on"),
        wait(1),
        move_arm(
            "both",
            BlockDefinition::new("fixed_angle_input").with_field("angle", "90"),
        ),
        BlockDefinition::new("sync").with_statements(
            "commands",
            BlockDefinition::chain(vec![
                say("This is my left side."),
                BlockDefinition::new("light_set")
                    .with_field("which_side", "left")
                    .with_field("which_part", "eye")
                    .with_field("state", "off"),
                move_arm(
                    "left",
                    BlockDefinition::new("angle_input").with_field("angle", -90),
                ),
            ])
            .into_iter()
            .collect(),
        ),
        say("All done!"),
    ]);
    single(
        BlockDefinition::new("event_started")
            .with_id("start")
            .with_statements("commands", body.into_iter().collect()),
    )
}

/// The script expected for `create_demo_program`.
#[allow(dead_code)]
pub const DEMO_SCRIPT: &str = "\
@robot.when_started
def started():
    robot.say(\"Let's get started.\")
    robot.set_antenna_state('both', 'on')
    robot.wait(1)
    robot.move_arm('both', 90)
    with robot.in_sync():
        robot.say(\"This is my left side.\")
        robot.set_eye_state('left', 'off')
        robot.move_arm('left', -90)
    robot.say(\"All done!\")
";

/// Creates a slot store holding the default five slots, with `data` in slot `index`.
#[allow(dead_code)]
pub fn store_with(index: usize, definition: &ProgramDefinition) -> MemorySlotStore {
    let mut slots = botblocks::workspace::default_slots();
    slots[index].data = serde_json::to_string(definition).expect("Failed to encode program");
    MemorySlotStore::with_slots(slots)
}

/// A `next` chain of `length` wait blocks.
#[allow(dead_code)]
pub fn long_chain(length: usize) -> BlockDefinition {
    BlockDefinition::chain((0..length).map(|_| wait(1)).collect()).expect("chain is not empty")
}

/// `depth` sync blocks nested inside each other around a single wait.
#[allow(dead_code)]
pub fn nested_syncs(depth: usize) -> BlockDefinition {
    (0..depth).fold(wait(1), |inner, _| {
        BlockDefinition::new("sync").with_statements("commands", vec![inner])
    })
}
