use botblocks::prelude::*;
use botblocks::remote::{HttpExecutor, HttpSlotStore};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Generate robot scripts from block programs and manage editor slots
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the editor server URL from the settings
    #[arg(short, long, global = true)]
    server: Option<String>,

    /// Override the indentation width of generated scripts
    #[arg(long, global = true)]
    indent: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the script for a block program JSON file
    Generate {
        /// Path to the block program JSON file
        program_path: PathBuf,
        /// Print the lowered block tree before the script
        #[arg(long)]
        tree: bool,
        /// Write the script to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate a block program and submit it to the executor
    Run { program_path: PathBuf },
    /// Ask the executor to stop the running program
    Stop,
    /// Inspect the slots stored on the server
    Slots {
        #[command(subcommand)]
        command: SlotsCommand,
    },
    /// Lower and generate a program, then save both as a binary artifact
    Artifact {
        program_path: PathBuf,
        output_path: PathBuf,
    },
    /// Print the script held by a binary artifact
    ShowArtifact { artifact_path: PathBuf },
}

#[derive(Subcommand, Debug)]
enum SlotsCommand {
    /// List slot names and whether they hold a program
    List,
    /// Print the stored block tree of a slot
    Show { index: usize },
    /// Generate the script of a slot
    Generate { index: usize },
}

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialise logging: {}", e);
    }
    let cli = Cli::parse();

    let mut settings = Settings::load_or_default(cli.config.as_deref())
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load settings: {}", e)));
    if let Some(server) = cli.server {
        settings.server_url = server;
    }
    if let Some(indent) = cli.indent {
        settings.indent_width = indent;
    }

    if let Err(e) = run(cli.command, &settings) {
        exit_with_error(&e.to_string());
    }
}

fn init_logging() -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
}

fn run(command: Command, settings: &Settings) -> Result<()> {
    let lowerer = Lowerer::new();
    let generator = settings.generator();

    match command {
        Command::Generate {
            program_path,
            tree,
            output,
        } => {
            let start = Instant::now();
            let program = load_program(&lowerer, &program_path)?;
            if tree {
                println!("{}", DisplayProgram { program: &program });
            }
            let script = generator.generate(&program);
            tracing::info!(elapsed = ?start.elapsed(), "generation finished");
            match output {
                Some(path) => {
                    fs::write(&path, &script)?;
                    println!("  -> Wrote script to '{}'", path.display());
                }
                None => print!("{}", script),
            }
            print_summary(&program);
        }
        Command::Run { program_path } => {
            let program = load_program(&lowerer, &program_path)?;
            let script = generator.generate(&program);
            HttpExecutor::new(settings)?.start(&script)?;
            println!("Submitted program ({} bytes)", script.len());
        }
        Command::Stop => {
            HttpExecutor::new(settings)?.stop()?;
            println!("Stop requested");
        }
        Command::Slots { command } => {
            let workspace = WorkspaceController::load(HttpSlotStore::new(settings)?)?;
            run_slots(command, workspace, &lowerer, &generator)?;
        }
        Command::Artifact {
            program_path,
            output_path,
        } => {
            let program = load_program(&lowerer, &program_path)?;
            let name = program_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let artifact = ProgramArtifact::from_program(&name, program, &generator);
            artifact.save(&output_path)?;
            println!("  -> Wrote artifact '{}' to '{}'", name, output_path.display());
        }
        Command::ShowArtifact { artifact_path } => {
            let artifact = ProgramArtifact::from_file(&artifact_path)?;
            println!("# {}", artifact.name);
            print!("{}", artifact.script);
        }
    }
    Ok(())
}

fn run_slots(
    command: SlotsCommand,
    mut workspace: WorkspaceController<HttpSlotStore>,
    lowerer: &Lowerer,
    generator: &Generator,
) -> Result<()> {
    match command {
        SlotsCommand::List => {
            for (index, slot) in workspace.slots().iter().enumerate() {
                let state = if slot.data.is_empty() { "empty" } else { "saved" };
                println!("  [{}] {} ({})", index, slot.name, state);
            }
        }
        SlotsCommand::Show { index } => {
            select_slot(&mut workspace, index)?;
            println!("{}", serde_json::to_string_pretty(workspace.program())?);
        }
        SlotsCommand::Generate { index } => {
            select_slot(&mut workspace, index)?;
            print!("{}", workspace.generate(lowerer, generator)?);
        }
    }
    Ok(())
}

fn select_slot(workspace: &mut WorkspaceController<HttpSlotStore>, index: usize) -> Result<()> {
    if index >= SLOT_COUNT {
        return Err(format!("Slot index {} is out of range (0-{})", index, SLOT_COUNT - 1).into());
    }
    workspace.switch_active(index)?;
    Ok(())
}

fn load_program(lowerer: &Lowerer, path: &Path) -> Result<Program> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read program file '{}': {}", path.display(), e))?;
    lowerer.lower_from(json.as_str())
}

fn print_summary(program: &Program) {
    let buttons = program.bound_buttons();
    eprintln!("\n--- Program Summary ---");
    eprintln!("Roots:       {}", program.roots.len());
    eprintln!("Statements:  {}", program.statement_count());
    if !buttons.is_empty() {
        eprintln!("Buttons:     {:?}", buttons);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
