//! Consensource client: builds family transactions, submits them, and reads
//! agents back from state.

use prost::Message;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::config::ClientConfig;
use crate::registry::addressing::{agent_address_prefix, make_agent_address};
use crate::registry::payload::Action;
use crate::registry::protos::{Agent, AgentContainer};
use crate::registry::types::{RegistryError, RegistryResult};
use crate::sawtooth::batch::{batch_list, BatchBuilder};
use crate::sawtooth::client::RestClient;
use crate::sawtooth::signer::Signer;
use crate::sawtooth::types::{BatchStatus, SawtoothError, StateEntry};

/// Client for the certificate registry family.
#[derive(Debug, Clone)]
pub struct ConsensourceClient {
    rest: RestClient,
    builder: BatchBuilder,
    status_wait_secs: u64,
}

impl ConsensourceClient {
    /// Create a client from configuration. No request is made.
    pub fn new(config: &ClientConfig) -> RegistryResult<Self> {
        let rest = RestClient::new(&config.rest_api)?;
        Ok(Self::with_rest_client(
            rest,
            BatchBuilder::new(&config.family.name, &config.family.version),
            config.polling.status_wait_secs,
        ))
    }

    pub fn with_rest_client(rest: RestClient, builder: BatchBuilder, status_wait_secs: u64) -> Self {
        Self {
            rest,
            builder,
            status_wait_secs,
        }
    }

    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// Create and submit a create-agent transaction for `signer`.
    ///
    /// # Arguments
    /// * `signer` - Transaction and batch signer; its public key identifies the agent
    /// * `name` - Agent name; `None` leaves the field unset
    /// * `timestamp` - Unix timestamp recorded on the agent
    ///
    /// # Returns
    /// The batch statuses after the node's status wait.
    pub async fn create_agent(
        &self,
        signer: &Signer,
        name: Option<&str>,
        timestamp: u64,
    ) -> RegistryResult<Vec<BatchStatus>> {
        let agent_address = make_agent_address(&signer.public_key_hex());
        let action = Action::CreateAgent {
            name: name.map(str::to_string),
            timestamp,
        };

        self.submit(signer, &action, vec![agent_address.clone()], vec![agent_address])
            .await
    }

    /// Sign and submit a single-action batch, then fetch its status.
    pub async fn submit(
        &self,
        signer: &Signer,
        action: &Action,
        inputs: Vec<String>,
        outputs: Vec<String>,
    ) -> RegistryResult<Vec<BatchStatus>> {
        let batch = self.builder.single(signer, action.encode(), inputs, outputs);
        let batch_id = batch.header_signature.clone();

        tracing::info!(
            batch_id = %batch_id,
            action = ?action.action_type(),
            signer = %signer.public_key_hex(),
            "Submitting action"
        );

        self.rest.send_batches(&batch_list(vec![batch])).await?;
        let statuses = self
            .rest
            .get_statuses(&[batch_id], Some(self.status_wait_secs))
            .await?;
        Ok(statuses)
    }

    /// Poll until the batch is COMMITTED or INVALID.
    pub async fn wait_for_commit(
        &self,
        batch_id: &str,
        timeout_secs: u64,
    ) -> RegistryResult<BatchStatus> {
        match timeout(
            Duration::from_secs(timeout_secs),
            self.poll_until_final(batch_id, timeout_secs),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(SawtoothError::Timeout {
                batch_id: batch_id.to_string(),
                secs: timeout_secs,
            }
            .into()),
        }
    }

    async fn poll_until_final(
        &self,
        batch_id: &str,
        timeout_secs: u64,
    ) -> RegistryResult<BatchStatus> {
        let ids = [batch_id.to_string()];
        let wait = self.status_wait_secs.min(timeout_secs);
        let mut ticker = interval(Duration::from_millis(500));

        loop {
            ticker.tick().await;

            let status = self
                .rest
                .get_statuses(&ids, Some(wait))
                .await?
                .into_iter()
                .find(|s| s.id == batch_id)
                .ok_or_else(|| RegistryError::MissingStatus(batch_id.to_string()))?;

            if status.status.is_final() {
                return Ok(status);
            }

            tracing::debug!(batch_id, status = status.status.as_str(), "Waiting for commit");
        }
    }

    /// Fetch an agent from state by public key.
    pub async fn fetch_agent(&self, public_key: &str) -> RegistryResult<Option<Agent>> {
        let address = make_agent_address(public_key);
        let entries = self.rest.list_state(Some(&address)).await?;

        for agent in decode_agents(&entries)? {
            if agent.public_key == public_key {
                return Ok(Some(agent));
            }
        }
        Ok(None)
    }

    /// Every agent stored under the agent address prefix.
    pub async fn list_agents(&self) -> RegistryResult<Vec<Agent>> {
        let entries = self.rest.list_state(Some(&agent_address_prefix())).await?;
        decode_agents(&entries)
    }
}

fn decode_agents(entries: &[StateEntry]) -> RegistryResult<Vec<Agent>> {
    let mut agents = Vec::new();
    for entry in entries {
        let container = AgentContainer::decode(entry.data.as_slice())?;
        agents.extend(container.entries);
    }
    Ok(agents)
}
