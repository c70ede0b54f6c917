//! # propdoc
//!
//! Keeps the "Available Templates" section of an agent prompt document in
//! sync with the `Props` interfaces of UI template components.
//!
//! ## Usage
//!
//! ```bash
//! # Regenerate the section using propdoc.toml (or defaults)
//! propdoc generate
//!
//! # Point at explicit directories
//! propdoc generate --input src/templates --target docs/PROMPT.md
//!
//! # Watch mode for development
//! propdoc generate --watch
//!
//! # Print the updated document instead of writing it
//! propdoc generate --dry-run
//!
//! # Initialize configuration
//! propdoc init
//!
//! # Fail (exit 2) when the document is out of date
//! propdoc check
//! ```

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use propdoc_cli::{
    config::{CliArgs, Config, ConfigManager, CONFIG_FILENAME},
    error::CliError,
    logging, plan_update,
    watcher::FileWatcher,
    writer::{FileWriter, WriteResult},
    UpdatePlan,
};

#[derive(Parser)]
#[command(name = "propdoc")]
#[command(author, version, about = "Document UI template props as example schemas", long_about = None)]
struct Cli {
    /// Increase diagnostic output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the template section of the target document
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Watch for file changes and regenerate
        #[arg(short, long)]
        watch: bool,

        /// Print the updated document without writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Initialize a new propdoc configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = CONFIG_FILENAME)]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Check that the target document is up-to-date
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Options shared by `generate` and `check`.
#[derive(Args)]
struct SourceArgs {
    /// Directory containing template components
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Document to update
    #[arg(short, long)]
    target: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Filter component files by relative path (glob)
    #[arg(long)]
    filter: Option<String>,

    /// How deep to follow references between interfaces
    #[arg(long)]
    max_depth: Option<usize>,

    /// Scan subdirectories of the input directory
    #[arg(short, long)]
    recursive: bool,
}

impl SourceArgs {
    fn load_config(&self) -> Result<Config, CliError> {
        let config = ConfigManager::load(self.config.as_deref())?;
        let config = ConfigManager::merge_cli_args(
            config,
            &CliArgs {
                input: self.input.clone(),
                target: self.target.clone(),
                max_depth: self.max_depth,
                recursive: self.recursive.then_some(true),
            },
        );
        debug!(?config, "resolved configuration");
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _ = logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Generate {
            source,
            watch,
            dry_run,
        } => {
            let config = source.load_config()?;
            if watch {
                run_watch_mode(&config, source.filter.as_deref(), dry_run)
            } else {
                run_generate(&config, source.filter.as_deref(), dry_run)
            }
        }

        Commands::Init { output, force } => cmd_init(output, force),

        Commands::Check { source } => {
            let config = source.load_config()?;
            cmd_check(&config, source.filter.as_deref())
        }
    }
}

/// Run section generation once.
fn run_generate(config: &Config, filter: Option<&str>, dry_run: bool) -> Result<(), CliError> {
    println!(
        "{} {}",
        "Scanning".cyan(),
        config.source.dir.display().to_string().cyan()
    );

    let UpdatePlan { output, outcome } = plan_update(config, filter)?;
    report(&output);

    if outcome.point.is_legacy() {
        println!(
            "  Replacing legacy '{}' section with marked region",
            config.target.legacy_heading
        );
    }

    let writer = FileWriter::new(dry_run);
    match writer.write(&config.target.file, &outcome.content)? {
        WriteResult::Written { path, bytes } => {
            println!(
                "{} Updated {} ({} bytes)",
                "✓".green(),
                path.display(),
                bytes
            );
        }
        WriteResult::Unchanged { path } => {
            println!("{} {} is already up-to-date", "✓".green(), path.display());
        }
        WriteResult::DryRun { content, path } => {
            println!(
                "{} Would write to {}:",
                "[dry-run]".yellow(),
                path.display()
            );
            println!("{}", "─".repeat(60).dimmed());
            println!("{}", content);
            println!("{}", "─".repeat(60).dimmed());
        }
    }

    Ok(())
}

/// Print per-file results and the final count.
fn report(output: &propdoc_cli::generator::GeneratedOutput) {
    for template in &output.templates {
        println!(
            "  {} {} ({} properties)",
            "✓".green(),
            template.name,
            template.property_count
        );
    }

    for skipped in &output.skipped {
        println!(
            "  {} {}: {}",
            "Skipped".yellow(),
            skipped.path.display(),
            skipped.reason
        );
    }

    println!(
        "  Generated {} template(s)",
        output.templates.len().to_string().green()
    );
}

/// Run in watch mode.
fn run_watch_mode(config: &Config, filter: Option<&str>, dry_run: bool) -> Result<(), CliError> {
    println!("{}", "Starting watch mode...".cyan());
    println!("  Watching: {}", config.source.dir.display());
    println!("  Press Ctrl+C to stop\n");

    run_generate(config, filter, dry_run)?;

    let watcher = FileWatcher::new(&config.source.dir)
        .with_extensions(&config.source.extensions)
        .with_recursive(config.source.recursive);
    let (_debouncer, rx) = watcher.watch()?;

    println!("\n{}", "Watching for changes...".cyan());

    while let Ok(event) = rx.recv() {
        if let Some(message) = event.error_message() {
            println!("{} {}", "Watch error:".red(), message);
            continue;
        }

        if let Some(path) = event.path() {
            println!("\n{} {}", "File changed:".cyan(), path.display());
        }

        if let Err(e) = run_generate(config, filter, dry_run) {
            println!("{} {}", "Generation error:".red(), e);
        }

        println!("\n{}", "Watching for changes...".cyan());
    }

    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    if output.exists() && !force {
        println!("  Use --force to overwrite");
        return Err(CliError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("configuration file already exists: {}", output.display()),
        )));
    }

    std::fs::write(&output, ConfigManager::default_config_content())?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Check command implementation.
fn cmd_check(config: &Config, filter: Option<&str>) -> Result<(), CliError> {
    println!("{}", "Checking template section...".cyan());

    let UpdatePlan { output, outcome } = plan_update(config, filter)?;
    report(&output);

    if outcome.changed {
        println!(
            "{} {} is out of date",
            "✗".red(),
            config.target.file.display()
        );
        println!("  Run 'propdoc generate' to update");
        Err(CliError::Validation("Template section is out of date".to_string()))
    } else {
        println!("{} Template section is up-to-date", "✓".green());
        Ok(())
    }
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
