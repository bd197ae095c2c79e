use botblocks::block::{
    BUTTON_RANGE, Choice, FixedAngle, LightPart, LightState, MAX_MOVE_SECONDS, MAX_WAIT_SECONDS,
    RollDirection, Side, TurnDirection,
};
use botblocks::program::{BlockDefinition, ProgramDefinition};
use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use std::fs;

/// A CLI tool to generate random block programs for exercising the generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_program.json")]
    output: String,

    /// The number of event handler roots to generate
    #[arg(long, default_value_t = 2)]
    handlers: usize,

    /// The maximum number of statements in each sequence
    #[arg(long, default_value_t = 6)]
    max_statements: usize,

    /// The maximum nesting depth of sync blocks
    #[arg(long, default_value_t = 2)]
    max_depth: usize,
}

const PHRASES: &[&str] = &["Hello!", "Let's go", "Beep boop", "Watch this", "All done"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.max_statements == 0 {
        eprintln!("Error: --max-statements must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating {} handler(s) with up to {} statement(s) per sequence...",
        cli.handlers, cli.max_statements
    );

    let roots = (0..cli.handlers)
        .map(|i| generate_handler(&mut rng, i, &cli))
        .collect();
    let program = ProgramDefinition::new(roots);

    let json_output = serde_json::to_string_pretty(&program)?;
    fs::write(&cli.output, json_output)?;

    println!("Successfully generated and saved program to '{}'", cli.output);
    Ok(())
}

/// The first handler runs on start, the rest are bound to buttons.
fn generate_handler(rng: &mut ThreadRng, index: usize, cli: &Cli) -> BlockDefinition {
    let body = generate_sequence(rng, cli, 0);
    let handler = if index == 0 {
        BlockDefinition::new("event_started")
    } else {
        let button = rng.random_range(BUTTON_RANGE);
        println!("-> Handler {} bound to button {}.", index, button);
        BlockDefinition::new("event_button").with_field("button_number", button)
    };
    handler.with_statements("commands", body.into_iter().collect())
}

fn generate_sequence(rng: &mut ThreadRng, cli: &Cli, depth: usize) -> Option<BlockDefinition> {
    let count = rng.random_range(0..=cli.max_statements);
    let blocks = (0..count)
        .map(|_| generate_statement(rng, cli, depth))
        .collect();
    BlockDefinition::chain(blocks)
}

fn generate_statement(rng: &mut ThreadRng, cli: &Cli, depth: usize) -> BlockDefinition {
    let kinds: &[&str] = if depth < cli.max_depth {
        &["say", "sync", "light_set", "roll", "turn", "move_arm", "wait"]
    } else {
        &["say", "light_set", "roll", "turn", "move_arm", "wait"]
    };

    match *kinds.choose(rng).unwrap_or(&"wait") {
        "say" => BlockDefinition::new("say")
            .with_field("dialogue", *PHRASES.choose(rng).unwrap_or(&"Hi")),
        "sync" => {
            let body = generate_sequence(rng, cli, depth + 1);
            BlockDefinition::new("sync").with_statements("commands", body.into_iter().collect())
        }
        "light_set" => BlockDefinition::new("light_set")
            .with_field("which_side", pick::<Side>(rng))
            .with_field("which_part", pick::<LightPart>(rng))
            .with_field("state", pick::<LightState>(rng)),
        "roll" => BlockDefinition::new("roll")
            .with_field("which_direction", pick::<RollDirection>(rng))
            .with_field("seconds", rng.random_range(0..=MAX_MOVE_SECONDS)),
        "turn" => BlockDefinition::new("turn")
            .with_field("which_direction", pick::<TurnDirection>(rng))
            .with_field("seconds", rng.random_range(0..=MAX_MOVE_SECONDS)),
        "move_arm" => {
            let angle = if rng.random_bool(0.5) {
                BlockDefinition::new("fixed_angle_input").with_field("angle", pick::<FixedAngle>(rng))
            } else {
                BlockDefinition::new("angle_input").with_field("angle", rng.random_range(-180..=180))
            };
            BlockDefinition::new("move_arm")
                .with_field("arm", pick::<Side>(rng))
                .with_input("angle", angle)
        }
        _ => BlockDefinition::new("wait").with_field("seconds", rng.random_range(0..=MAX_WAIT_SECONDS)),
    }
}

fn pick<T: Choice>(rng: &mut ThreadRng) -> &'static str {
    T::OPTIONS
        .choose(rng)
        .copied()
        .unwrap_or_else(T::default_choice)
        .as_str()
}
