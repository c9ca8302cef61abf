//! AppDeck - command-line shell over the launcher catalog
//!
//! Every invocation boots a session (snapshot or backend), runs one command
//! and exits.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use appdeck::application::services::Resolution;
use appdeck::domain::entities::AppId;
use appdeck::domain::value_objects::SortCriterion;
use appdeck::infrastructure::{AppSession, CompositionRoot};
use appdeck::shared::{logging, Config};
use appdeck::LauncherError;

#[derive(Parser, Debug)]
#[command(name = "appdeck", version, about = "Application catalog for a launcher")]
struct Cli {
    /// Config file (default: standard locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the catalog
    List {
        /// Case-insensitive name filter
        #[arg(short, long, default_value = "")]
        filter: String,
        /// name-asc, name-desc, latest-used or no-longer-used
        #[arg(short, long)]
        sort: Option<SortCriterion>,
    },
    /// Launch an app by name
    Launch { name: String },
    /// Register and add an app
    Add { name: String, path: String },
    /// Add a dropped file, after confirmation
    Drop {
        name: String,
        path: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete an app by id, after confirmation
    Remove {
        id: AppId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show, set or clear the wallpaper
    Wallpaper {
        #[command(subcommand)]
        action: WallpaperCommand,
    },
}

#[derive(Subcommand, Debug)]
enum WallpaperCommand {
    Show,
    Set { path: String },
    Clear,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("appdeck: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config) {
        eprintln!("appdeck: logging disabled: {}", e);
    }

    let command = cli.command.unwrap_or(Command::List {
        filter: String::new(),
        sort: None,
    });
    match run(command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("appdeck: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, appdeck::shared::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    Ok(config)
}

async fn run(command: Command, config: &Config) -> Result<(), LauncherError> {
    let mut root = CompositionRoot::new(config);
    let report = root.session.boot().await?;
    info!("Booted {} apps from {:?}", report.app_count, report.source);

    let session = &mut root.session;
    match command {
        Command::List { filter, sort } => {
            let view = session.view(&filter, sort.unwrap_or(root.default_sort));
            root.presenter.present(view);
            print!("{}", root.presenter.render());
            if root.presenter.is_empty() {
                println!();
            }
        }
        Command::Launch { name } => {
            let outcome = session.launch(&name).await?;
            println!("{}", outcome.message);
        }
        Command::Add { name, path } => {
            let outcome = session.add_app(&name, &path).await?;
            println!("{} (id {})", outcome.message, outcome.app.id);
        }
        Command::Drop { name, path, yes } => {
            session.request_drop(&name, &path);
            resolve(session, yes).await?;
        }
        Command::Remove { id, yes } => {
            session.request_delete(id)?;
            resolve(session, yes).await?;
        }
        Command::Wallpaper { action } => match action {
            WallpaperCommand::Show => match session.wallpaper() {
                Some(path) => println!("{}", path),
                None => println!("No wallpaper"),
            },
            WallpaperCommand::Set { path } => {
                session.set_wallpaper(&path).await?;
                println!("Wallpaper set to {}", path);
            }
            WallpaperCommand::Clear => {
                let outcome = session.clear_wallpaper().await?;
                if let Some(e) = outcome.backend_error {
                    eprintln!("appdeck: backend did not clear the wallpaper: {}", e);
                }
                println!("Wallpaper cleared");
            }
        },
    }
    Ok(())
}

/// Confirm or cancel whatever the session has pending
async fn resolve(session: &mut AppSession, yes: bool) -> Result<(), LauncherError> {
    let Some(prompt) = session.pending().prompt() else {
        return Err(LauncherError::NothingPending);
    };
    if !yes && !ask(&prompt) {
        session.cancel();
        println!("Cancelled");
        return Ok(());
    }

    match session.confirm().await? {
        Resolution::Deleted { app, removed: true } => println!("Deleted '{}'", app.name),
        Resolution::Deleted { app, removed: false } => println!("'{}' was already gone", app.name),
        Resolution::Added(outcome) => println!("{} (id {})", outcome.message, outcome.app.id),
    }
    Ok(())
}

/// Ask a yes/no question on the terminal; anything but yes is no
fn ask(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
