//! Command dispatch

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::services::{GameService, SessionReport, TreeStore};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::Node;
use crate::infrastructure::traits::{LineConsole, RealFileSystem};
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = load_settings(cli)?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        None | Some(Commands::Play) => cmd_play(&settings),
        Some(Commands::Tree) => cmd_tree(&settings),
        Some(Commands::Stats) => cmd_stats(&settings),
        Some(Commands::Config { command }) => cmd_config(command, &settings),
        Some(Commands::Completion { .. }) => Ok(()),
    }
}

/// Settings with the command line's `--data-file` applied last.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load()?;
    if let Some(path) = &cli.data_file {
        settings.data_file = path.clone();
    }
    Ok(settings)
}

fn store_for(settings: &Settings) -> TreeStore {
    TreeStore::new(
        Arc::new(RealFileSystem),
        settings.data_file.clone(),
        settings.default_animal.as_str(),
    )
}

#[instrument(skip(settings))]
fn cmd_play(settings: &Settings) -> CliResult<()> {
    let store = store_for(settings);
    let mut game = GameService::new(LineConsole::stdio(), settings.max_input_len);

    let report = game.run(&store);

    finish_session(
        report,
        store.path(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}

/// Tell the user whether the game was saved.
///
/// A failed save is only a warning; a failed session is the command's error.
fn finish_session<O: Write, E: Write>(
    report: SessionReport,
    path: &Path,
    out: &mut O,
    err: &mut E,
) -> CliResult<()> {
    let written = match &report.saved {
        Ok(()) => output::success_to(out, "Game data saved. Thanks for playing!"),
        Err(e) => {
            debug!("save failed: {:?}", e);
            output::warning_to(
                err,
                &format!("Could not save game data to {}", path.display()),
            )
        }
    };
    written.map_err(|e| InfraError::io("report session", e))?;

    let summary = report.played?;
    debug!(
        "session: {} rounds, {} wins, {} learned",
        summary.rounds, summary.wins, summary.learned
    );
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_tree(settings: &Settings) -> CliResult<()> {
    let store = store_for(settings);
    let tree = stored_or_default(&store)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", display_tree(&tree, None))
        .map_err(|e| InfraError::io("write tree", e))?;
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_stats(settings: &Settings) -> CliResult<()> {
    let store = store_for(settings);
    let tree = stored_or_default(&store)?;
    output::action("Data file", &store.path().display());
    output::action("Questions", &(tree.node_count() - tree.leaf_count()));
    output::action("Animals", &tree.leaf_count());
    output::action("Depth", &tree.depth());
    output::info(&tree.animals().join(", "));
    Ok(())
}

fn cmd_config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no home directory, global config disabled"),
        },
    }
    Ok(())
}

/// Read-only views report malformed data instead of silently replacing it.
fn stored_or_default(store: &TreeStore) -> CliResult<Node> {
    if store.path().is_dir() {
        return Err(CliError::Usage(format!(
            "data file is a directory: {}",
            store.path().display()
        )));
    }
    match store.try_load()? {
        Some(tree) => Ok(tree),
        None => {
            output::header(&format!(
                "No game data at {}, showing the starting tree",
                store.path().display()
            ));
            Ok(store.default_tree())
        }
    }
}

/// Render `node` with its yes branch above its no branch.
fn display_tree(node: &Node, label: Option<&str>) -> Tree<String> {
    let text = match label {
        Some(label) => format!("{label}: {}", node.text()),
        None => node.text().to_string(),
    };
    let root = Tree::new(text);
    match (node.yes_child(), node.no_child()) {
        (Some(yes), Some(no)) => root.with_leaves([
            display_tree(yes, Some("yes")),
            display_tree(no, Some("no")),
        ]),
        _ => root,
    }
}
