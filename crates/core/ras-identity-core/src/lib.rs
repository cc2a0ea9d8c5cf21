//! Core identity provider traits and types.
//!
//! A hosting authentication pipeline registers [`IdentityProvider`]s, hands
//! each one the payload it collected for a login attempt, and turns the
//! returned [`VerifiedIdentity`] into its own signed principal.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Invalid authentication payload")]
    InvalidPayload,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity established by a provider, ready for the host to sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    pub provider_id: String,
    pub subject: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    /// Provider specific extras. Hosts copy this into their session claims,
    /// so providers must keep secrets such as access tokens out of it.
    pub metadata: Option<serde_json::Value>,
}

impl VerifiedIdentity {
    /// Look up a string entry in the metadata object.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.as_ref()?.get(key)?.as_str()
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn provider_id(&self) -> &str;

    async fn verify(&self, auth_payload: serde_json::Value) -> IdentityResult<VerifiedIdentity>;
}
