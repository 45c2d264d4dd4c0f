//! Protobuf messages of the certificate registry family.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Agent {
    #[prost(string, tag = "1")]
    pub public_key: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub organization_id: ::prost::alloc::string::String,
    #[prost(uint64, tag = "4")]
    pub timestamp: u64,
}

/// Agents sharing one state address.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AgentContainer {
    #[prost(message, repeated, tag = "1")]
    pub entries: ::prost::alloc::vec::Vec<Agent>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateAgentAction {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(uint64, tag = "2")]
    pub timestamp: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CertificateRegistryPayload {
    #[prost(enumeration = "certificate_registry_payload::Action", tag = "1")]
    pub action: i32,
    #[prost(message, optional, tag = "2")]
    pub create_agent: ::core::option::Option<CreateAgentAction>,
}

pub mod certificate_registry_payload {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Action {
        UnsetAction = 0,
        CreateAgent = 1,
        CreateOrganization = 2,
        UpdateOrganization = 3,
        AuthorizeAgent = 4,
        IssueCertificate = 5,
        CreateStandard = 6,
        UpdateStandard = 7,
        OpenRequestAction = 8,
        ChangeRequestStatusAction = 9,
        AccreditCertifyingBodyAction = 10,
    }
}
