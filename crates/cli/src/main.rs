//! agent-kit CLI.
//!
//! Lists agents, LLM providers and user groups from the configured server,
//! edits the pinned agent list, and launches the TUI.

use std::path::PathBuf;
use std::sync::Arc;

use ak_core::agents::AgentsContext;
use ak_core::backend::{Backend, HttpBackend};
use ak_core::catalog::Catalog;
use ak_core::config::{load_config, AppConfig};
use ak_protocol::{EntityId, MinimalPersonaSnapshot};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "agent-kit", author, version, about = "Browse and pin agents from the terminal")]
struct Cli {
    /// Directory containing `.agent-kit/config.toml` (defaults to the current directory)
    #[arg(long, global = true, env = "AGENT_KIT_ROOT")]
    root: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log debug output to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List and pin agents
    #[command(subcommand)]
    Agents(AgentsCommand),
    /// List LLM providers
    #[command(subcommand)]
    Providers(ProvidersCommand),
    /// List user groups
    #[command(subcommand)]
    Groups(GroupsCommand),
    /// Launch the interactive TUI
    Tui,
}

#[derive(Subcommand, Debug)]
enum AgentsCommand {
    /// List every agent, marking pinned ones
    List,
    /// List pinned agents in pin order
    Pinned,
    /// Pin an agent (appended after existing pins)
    Pin { id: EntityId },
    /// Unpin an agent
    Unpin { id: EntityId },
}

#[derive(Subcommand, Debug)]
enum ProvidersCommand {
    /// List LLM providers, optionally only those available to one agent
    List {
        #[arg(long)]
        persona: Option<EntityId>,
    },
}

#[derive(Subcommand, Debug)]
enum GroupsCommand {
    /// List user groups
    List,
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().wrap_err("Could not determine current directory")?,
    };

    // The TUI owns the terminal and logs to a file instead
    if let Commands::Tui = cli.command {
        return ak_tui::run_app(&root).await.map_err(|e| eyre!(e));
    }
    init_tracing(cli.debug);

    let config = load_config(&root).await?;
    let origin = config.origin();
    debug!(source = %origin.display(), "loaded configuration");
    let session = Session::connect(&config)?;

    match cli.command {
        Commands::Agents(command) => run_agents(session, command, cli.json).await,
        Commands::Providers(ProvidersCommand::List { persona }) => {
            let handle = session.catalog.llm_providers(persona);
            handle.refresh().await?;
            let providers = handle.state().await;
            print_list(providers.items(), cli.json, |provider| {
                let access = if provider.is_public {
                    "public".green()
                } else {
                    "restricted".yellow()
                };
                format!(
                    "{:>5}  {}  {} ({})  {}",
                    provider.id,
                    provider.name.bold(),
                    provider.provider,
                    provider.default_model_name,
                    access
                )
            })
        }
        Commands::Groups(GroupsCommand::List) => {
            let handle = session.catalog.user_groups();
            handle.refresh().await?;
            let groups = handle.state().await;
            print_list(groups.items(), cli.json, |group| {
                format!("{:>5}  {}", group.id, group.name.bold())
            })
        }
        // Handled before logging was set up
        Commands::Tui => Ok(()),
    }
}

/// Backend plus the catalog built on it.
struct Session {
    backend: Arc<dyn Backend>,
    catalog: Catalog,
    config: AppConfig,
}

impl Session {
    fn connect(config: &AppConfig) -> Result<Self> {
        let backend: Arc<dyn Backend> = Arc::new(HttpBackend::from_config(&config.client.server)?);
        let catalog = Catalog::new(Arc::clone(&backend), config.client.endpoints.clone());
        Ok(Self {
            backend,
            catalog,
            config: config.clone(),
        })
    }

    async fn agents(&self) -> Result<AgentsContext> {
        let mut context = AgentsContext::new(
            Arc::clone(&self.backend),
            &self.catalog,
            self.config.client.clone(),
        );
        context
            .bootstrap()
            .await
            .wrap_err("Failed to load agents")?;
        Ok(context)
    }
}

async fn run_agents(session: Session, command: AgentsCommand, json: bool) -> Result<()> {
    let mut context = session.agents().await?;

    match command {
        AgentsCommand::List => {
            let agents = context.agents().await;
            let pinned = context.pinned_agent_ids().to_vec();
            print_list(&agents, json, |agent| agent_line(agent, pinned.contains(&agent.id)))
        }
        AgentsCommand::Pinned => {
            let pinned = context.pinned_agents().await;
            print_list(&pinned, json, |agent| agent_line(agent, true))
        }
        AgentsCommand::Pin { id } => update_pin(&mut context, id, true).await,
        AgentsCommand::Unpin { id } => update_pin(&mut context, id, false).await,
    }
}

async fn update_pin(context: &mut AgentsContext, id: EntityId, should_pin: bool) -> Result<()> {
    let verb = if should_pin { "pinned" } else { "unpinned" };

    match context.toggle_pinned_agent_id(id, should_pin).await? {
        Some(task) => {
            task.wait().await?;
            println!("{} Agent {id} {verb}", "✓".green());
        }
        None => println!("Agent {id} already {verb}"),
    }

    let names: Vec<String> = context
        .pinned_agents()
        .await
        .into_iter()
        .map(|agent| agent.name)
        .collect();
    println!("Pinned: {}", names.join(", "));
    Ok(())
}

fn agent_line(agent: &MinimalPersonaSnapshot, pinned: bool) -> String {
    let marker = if pinned { "●".yellow() } else { " ".normal() };
    let name = if agent.is_default_persona {
        agent.name.cyan().bold()
    } else {
        agent.name.bold()
    };
    format!("{marker} {:>5}  {name}  {}", agent.id, agent.description.dimmed())
}

fn print_list<T, F>(items: &[T], json: bool, line: F) -> Result<()>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }
    if items.is_empty() {
        println!("{}", "Nothing to show".dimmed());
    }
    for item in items {
        println!("{}", line(item));
    }
    Ok(())
}
