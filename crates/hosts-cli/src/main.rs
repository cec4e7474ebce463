//! hostsctl
//!
//! Command-line interface for managing named, numbered blocks of aliases in
//! a hosts file while leaving untouched lines exactly as they were.

mod cli;
mod commands;
mod context;
mod error;
mod output;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{AliasAction, BlockAction, Cli, Commands, DatabaseAction};
use commands::alias::{AddOptions, ListOptions};
use commands::block::BlockSpec;
use context::Context;
use error::Result;

/// Environment variable holding a tracing filter, e.g. `hosts_fs=debug`.
const LOG_ENV: &str = "HOSTSCTL_LOG";

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    } else if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "hostsctl", &mut std::io::stdout());
            Ok(())
        }
        Some(cmd) => {
            let mut ctx = Context::new(cli.config.as_deref(), cli.hosts_file.as_deref())?;
            execute_command(&mut ctx, cmd)
        }
        None => {
            println!(
                "{} Annotated hosts file manager",
                "hostsctl".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "hostsctl --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(ctx: &mut Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Block { action } => cmd_block(ctx, action),
        Commands::Alias { action } => cmd_alias(ctx, action),
        Commands::Database { action } => cmd_database(ctx, action),
        Commands::Completions { .. } => Ok(()),
    }
}

fn cmd_block(ctx: &mut Context, action: BlockAction) -> Result<()> {
    match action {
        BlockAction::List { output, no_headers } => {
            commands::run_block_list(ctx, output, no_headers)
        }
        BlockAction::Add {
            block,
            id,
            name,
            note,
            force,
        } => {
            let spec = BlockSpec {
                key: block.as_deref(),
                id,
                name: name.as_deref(),
                note: note.as_deref(),
            };
            commands::run_block_add(ctx, &spec, force)
        }
        BlockAction::Delete { block, force } => commands::run_block_delete(ctx, &block, force),
        BlockAction::Clear { block, force } => commands::run_block_clear(ctx, &block, force),
    }
}

fn cmd_alias(ctx: &mut Context, action: AliasAction) -> Result<()> {
    match action {
        AliasAction::List {
            output,
            group,
            no_headers,
            block,
            all,
        } => commands::run_alias_list(
            ctx,
            ListOptions {
                format: output,
                grouping: group,
                headers: !no_headers,
                block: block.as_deref(),
                include_disabled: all,
            },
        ),
        AliasAction::Add {
            entries,
            block,
            note,
            force,
        } => commands::run_alias_add(
            ctx,
            &entries,
            AddOptions {
                block: block.as_deref(),
                note: note.as_deref(),
                force,
            },
        ),
        AliasAction::Delete {
            target,
            block,
            force,
        } => commands::run_alias_delete(ctx, &target, block.as_deref(), force),
    }
}

fn cmd_database(ctx: &mut Context, action: DatabaseAction) -> Result<()> {
    match action {
        DatabaseAction::Location => commands::run_location(ctx),
        DatabaseAction::Print => commands::run_print(ctx),
        DatabaseAction::Format { dry_run, diff } => commands::run_format(ctx, dry_run, diff),
        DatabaseAction::Backup { output, force } => {
            commands::run_backup(ctx, output.as_deref(), force)
        }
        DatabaseAction::Restore { source } => commands::run_restore(ctx, source.as_deref()),
    }
}
