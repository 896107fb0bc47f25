//! Proposal Studio host: loads, renders, audits and edits stored proposals
//! through the editor core.
//!
//! Rendered node trees and reports go to stdout as JSON; logs go to stderr
//! and are filtered with `RUST_LOG` (default `info`).

mod services;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use editor::collab::{CollabError, DirectMedia, MediaResolver, Persistence, VariableSource};
use editor::doc::{Document, Proposal, Section};
use editor::engine::{Action, EngineCore, NotifyLevel};
use editor::input::Session;
use editor::render::{EditState, RenderContext, render_display, render_editable};
use editor::theme::Theme;
use serde_json::json;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use services::media::BaseUrlMedia;
use services::persistence::JsonFileStore;
use services::replay;
use services::variables::FileVariables;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Collab(#[from] CollabError),
    #[error("signatory {0} not found")]
    UnknownSignatory(Uuid),
    #[error("{0} element(s) violate geometry rules")]
    Violations(usize),
    #[error("{0}")]
    SaveFailed(String),
}

#[derive(Parser, Debug)]
#[command(name = "proposal-studio", about = "Proposal document builder host")]
struct Cli {
    /// Directory holding `<id>.json` proposal files.
    #[arg(long, env = "PROPOSAL_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// Base URL that relative image references resolve against.
    #[arg(long, env = "PROPOSAL_MEDIA_BASE_URL")]
    media_base_url: Option<String>,

    /// Theme JSON file; the built-in theme when omitted.
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Variables JSON file (list of records or a name-to-value object).
    #[arg(long)]
    variables: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty proposal and print its id.
    New {
        #[arg(long, default_value = "Untitled Proposal")]
        title: String,
        /// Titles of the initial sections.
        #[arg(long = "section")]
        sections: Vec<String>,
    },
    /// List stored proposals.
    List,
    /// Render a proposal to a JSON node tree.
    Render {
        id: Uuid,
        /// Editable rendering (raw tokens, selection targets) instead of display.
        #[arg(long, default_value_t = false)]
        editable: bool,
    },
    /// Report elements whose geometry breaks position or minimum-size rules.
    Validate { id: Uuid },
    /// Replay a recorded gesture script against a proposal and save it.
    Replay {
        id: Uuid,
        script: PathBuf,
        /// Print actions without saving.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Remove a signatory and every signature field assigned to it.
    RemoveSignatory { id: Uuid, signatory: Uuid },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let store = JsonFileStore::new(&cli.data_dir);

    match &cli.command {
        Command::New { title, sections } => {
            let mut doc = Document::new(title.as_str());
            doc.sections = sections.iter().map(|t| Section::new(t.as_str())).collect();
            let proposal = store.save(&Proposal::new(doc))?;
            info!(proposal = %proposal.id, dir = %store.dir().display(), "proposal created");
            println!("{}", proposal.id);
        }
        Command::List => {
            let mut rows = Vec::new();
            for id in store.ids()? {
                match store.load(id) {
                    Ok(p) => rows.push(json!({ "id": p.id, "title": p.document.title })),
                    Err(e) => warn!(proposal = %id, error = %e, "skipping unreadable proposal"),
                }
            }
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Command::Render { id, editable } => {
            let proposal = store.load(*id)?;
            let theme = load_theme(&cli)?;
            let variables = load_variables(&cli)?;
            let media = media_resolver(&cli);
            let ctx = RenderContext::new(&proposal.signatories).with_variables(&variables).with_media(media.as_ref());
            let tree = if *editable {
                render_editable(&proposal.document, &theme, &ctx, &EditState::default(), &Session::default())
            } else {
                render_display(&proposal.document, &theme, &ctx)
            };
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
        Command::Validate { id } => {
            let proposal = store.load(*id)?;
            let violations = proposal.document.violations();
            let report: Vec<_> = violations
                .iter()
                .map(|v| {
                    json!({
                        "section": v.element.section,
                        "kind": v.element.kind,
                        "id": v.element.id,
                        "geometry": v.geometry,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !violations.is_empty() {
                return Err(CliError::Violations(violations.len()));
            }
        }
        Command::Replay { id, script, dry_run } => {
            let events = replay::parse_script(&fs::read_to_string(script)?)?;
            let mut core = EngineCore::new(store.load(*id)?);
            let mut actions = replay::replay(&mut core, &events);
            if !dry_run {
                actions.extend(save(&mut core, &store)?);
            }
            println!("{}", serde_json::to_string_pretty(&actions)?);
        }
        Command::RemoveSignatory { id, signatory } => {
            let mut core = EngineCore::new(store.load(*id)?);
            if core.proposal.signatory(*signatory).is_none() {
                return Err(CliError::UnknownSignatory(*signatory));
            }
            let mut actions = core.remove_signatory(*signatory);
            actions.extend(save(&mut core, &store)?);
            println!("{}", serde_json::to_string_pretty(&actions)?);
        }
    }
    Ok(())
}

/// Save through the engine, turning an error notification into a failure.
fn save(core: &mut EngineCore, store: &dyn Persistence) -> Result<Vec<Action>, CliError> {
    let actions = core.save(store);
    let failure = actions.iter().find_map(|a| match a {
        Action::Notify { level: NotifyLevel::Error, message } => Some(message.clone()),
        _ => None,
    });
    match failure {
        Some(message) => Err(CliError::SaveFailed(message)),
        None => Ok(actions),
    }
}

fn load_theme(cli: &Cli) -> Result<Theme, CliError> {
    match &cli.theme {
        Some(path) => Ok(Theme::from_json(&fs::read_to_string(path)?)?),
        None => Ok(Theme::default()),
    }
}

fn load_variables(cli: &Cli) -> Result<Vec<editor::doc::Variable>, CliError> {
    match &cli.variables {
        Some(path) => Ok(FileVariables::load(path)?.variables()),
        None => Ok(Vec::new()),
    }
}

fn media_resolver(cli: &Cli) -> Box<dyn MediaResolver> {
    match &cli.media_base_url {
        Some(base) => Box::new(BaseUrlMedia::new(base.as_str())),
        None => Box::new(DirectMedia),
    }
}
