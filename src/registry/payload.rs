//! Family payload encoding.

use prost::Message;

use crate::registry::protos::certificate_registry_payload::Action as ActionType;
use crate::registry::protos::{CertificateRegistryPayload, CreateAgentAction};
use crate::registry::types::{RegistryError, RegistryResult};

/// An action the client can submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Register the signer as an agent. `None` sends no name at all.
    CreateAgent { name: Option<String>, timestamp: u64 },
}

impl Action {
    pub fn action_type(&self) -> ActionType {
        match self {
            Action::CreateAgent { .. } => ActionType::CreateAgent,
        }
    }

    /// Wire form of the action.
    pub fn to_payload(&self) -> CertificateRegistryPayload {
        match self {
            Action::CreateAgent { name, timestamp } => CertificateRegistryPayload {
                action: ActionType::CreateAgent as i32,
                create_agent: Some(CreateAgentAction {
                    name: name.clone().unwrap_or_default(),
                    timestamp: *timestamp,
                }),
            },
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        self.to_payload().encode_to_vec()
    }

    /// Parse payload bytes back into an action.
    pub fn decode(bytes: &[u8]) -> RegistryResult<Self> {
        let payload = CertificateRegistryPayload::decode(bytes)?;

        match ActionType::try_from(payload.action) {
            Ok(ActionType::CreateAgent) => {
                let create_agent = payload.create_agent.unwrap_or_default();
                let name = if create_agent.name.is_empty() {
                    None
                } else {
                    Some(create_agent.name)
                };
                Ok(Action::CreateAgent {
                    name,
                    timestamp: create_agent.timestamp,
                })
            }
            Ok(other) => Err(RegistryError::UnsupportedAction(format!("{:?}", other))),
            Err(_) => Err(RegistryError::UnsupportedAction(format!(
                "unknown action {}",
                payload.action
            ))),
        }
    }
}
