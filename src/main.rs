//! Consensource client CLI.
//!
//! ```text
//! consensource-client [--config FILE] [--url URL] <command>
//!     keygen        generate a signing key
//!     wait          block until the REST API answers
//!     create-agent  register the signing key as an agent
//!     agent         show one agent
//!     agents        list all agents
//!     status        show batch statuses
//! ```

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use consensource_client::config::validation::validate_config;
use consensource_client::config::{apply_env_overrides, load_config, ClientConfig, ConfigError};
use consensource_client::observability::init_logging;
use consensource_client::registry::{Agent, ConsensourceClient};
use consensource_client::resilience::wait_for_rest_api;
use consensource_client::sawtooth::Signer;

#[derive(Parser)]
#[command(name = "consensource-client")]
#[command(about = "Submit and inspect Consensource ledger transactions", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// REST API URL (overrides config and CONSENSOURCE_REST_URL)
    #[arg(short, long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new signing key
    Keygen {
        /// Write the private key here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Wait for the REST API to become available
    Wait {
        #[arg(short, long)]
        tries: Option<u32>,
    },
    /// Register the signing key as an agent
    CreateAgent {
        #[arg(short, long)]
        name: String,
        /// Defaults to the current time
        #[arg(short, long)]
        timestamp: Option<u64>,
        /// Private key file (falls back to CONSENSOURCE_PRIVATE_KEY)
        #[arg(short, long)]
        key_file: Option<PathBuf>,
    },
    /// Show the agent with the given public key
    Agent { public_key: String },
    /// List all agents
    Agents,
    /// Show batch statuses
    Status {
        #[arg(required = true)]
        batch_ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    let mut config = apply_env_overrides(config)?;
    if let Some(url) = cli.url {
        config.rest_api.url = url;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    init_logging(&config.observability);

    match cli.command {
        Commands::Keygen { output } => {
            let signer = Signer::generate();
            match output {
                Some(path) => {
                    std::fs::write(&path, format!("{}\n", signer.private_key_hex()))?;
                    tracing::info!(path = %path.display(), "Private key written");
                    print_json(&json!({ "public_key": signer.public_key_hex() }))?;
                }
                None => print_json(&json!({
                    "public_key": signer.public_key_hex(),
                    "private_key": signer.private_key_hex(),
                }))?,
            }
        }
        Commands::Wait { tries } => {
            let client = ConsensourceClient::new(&config)?;
            wait_for_rest_api(
                client.rest().http(),
                &config.rest_api.url,
                tries.unwrap_or(config.polling.availability_tries),
                Duration::from_millis(config.polling.backoff_step_ms),
            )
            .await?;
            print_json(&json!({ "available": true }))?;
        }
        Commands::CreateAgent {
            name,
            timestamp,
            key_file,
        } => {
            let signer = match key_file {
                Some(path) => Signer::from_file(&path)?,
                None => Signer::from_env()?,
            };
            let timestamp = timestamp.unwrap_or_else(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_secs()
            });

            let client = ConsensourceClient::new(&config)?;
            let statuses = client.create_agent(&signer, Some(&name), timestamp).await?;
            print_json(&serde_json::to_value(&statuses)?)?;
        }
        Commands::Agent { public_key } => {
            let client = ConsensourceClient::new(&config)?;
            let agent = require_agent(client.fetch_agent(&public_key).await?, &public_key)?;
            print_json(&agent_json(&agent))?;
        }
        Commands::Agents => {
            let client = ConsensourceClient::new(&config)?;
            let agents: Vec<Value> = client.list_agents().await?.iter().map(agent_json).collect();
            print_json(&Value::Array(agents))?;
        }
        Commands::Status { batch_ids } => {
            let client = ConsensourceClient::new(&config)?;
            let statuses = client
                .rest()
                .get_statuses(&batch_ids, Some(config.polling.status_wait_secs))
                .await?;
            print_json(&serde_json::to_value(&statuses)?)?;
        }
    }

    Ok(())
}

fn require_agent(agent: Option<Agent>, public_key: &str) -> Result<Agent, String> {
    agent.ok_or_else(|| format!("No agent exists: {}", public_key))
}

fn agent_json(agent: &Agent) -> Value {
    json!({
        "public_key": agent.public_key,
        "name": agent.name,
        "organization_id": agent.organization_id,
        "timestamp": agent.timestamp,
    })
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_agent_is_an_error() {
        let err = require_agent(None, "02ab").unwrap_err();
        assert_eq!(err, "No agent exists: 02ab");

        let agent = Agent {
            public_key: "02ab".to_string(),
            name: "alice".to_string(),
            organization_id: String::new(),
            timestamp: 0,
        };
        assert_eq!(require_agent(Some(agent.clone()), "02ab"), Ok(agent));
    }
}
