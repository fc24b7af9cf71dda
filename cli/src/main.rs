//! ACTORSTATE CLI - inspect transactional payloads and state responses

use actorstate_cli::{encode_changes, read_changes, replay_changes, target_actor, SerializerFormat};
use actorstate_core::ProviderConfig;
use actorstate_state::normalize_state_response;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "actorstate")]
#[command(about = "ACTORSTATE - actor state payload tools")]
#[command(version)]
struct Cli {
    /// Provider configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the transaction payload for a list of state changes
    Encode {
        /// JSON file holding the state changes
        #[arg(short, long)]
        input: PathBuf,

        /// Serializer used for state values
        #[arg(short, long, value_enum, default_value = "json")]
        format: SerializerFormat,

        /// Actor type
        #[arg(long, default_value = "Actor")]
        actor_type: String,

        /// Actor id (random when omitted)
        #[arg(long)]
        actor_id: Option<String>,
    },

    /// Apply state changes to an empty in-memory store and print the result
    Replay {
        /// JSON file holding the state changes
        #[arg(short, long)]
        input: PathBuf,

        /// Actor type
        #[arg(long, default_value = "Actor")]
        actor_type: String,

        /// Actor id (random when omitted)
        #[arg(long)]
        actor_id: Option<String>,
    },

    /// Print the normalized form of a raw state response
    Normalize {
        /// File holding the raw response bytes
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => {
            let config = ProviderConfig::load(path)?;
            info!("Loaded provider config from {}", path.display());
            config
        }
        None => ProviderConfig::default(),
    };

    match cli.command {
        Commands::Encode {
            input,
            format,
            actor_type,
            actor_id,
        } => {
            let changes = read_changes(&input)?;
            let actor = target_actor(actor_type, actor_id);

            match encode_changes(format, config, &actor, &changes).await? {
                Some(payload) => {
                    std::io::stdout().write_all(&payload)?;
                    println!();
                }
                None => {
                    eprintln!("No transaction would be submitted");
                }
            }
        }

        Commands::Replay {
            input,
            actor_type,
            actor_id,
        } => {
            let changes = read_changes(&input)?;
            let actor = target_actor(actor_type, actor_id);

            let state = replay_changes(config, &actor, &changes).await?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }

        Commands::Normalize { input } => {
            let raw = std::fs::read(&input)?;
            let normalized = normalize_state_response(&raw);
            std::io::stdout().write_all(&normalized)?;
        }
    }

    Ok(())
}
