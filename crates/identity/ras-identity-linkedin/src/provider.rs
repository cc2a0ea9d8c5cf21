//! LinkedIn identity provider implementation.

use crate::config::LinkedInConfig;
use crate::error::{LinkedInError, LinkedInResult};
use crate::projector::{ProfileProjector, Projection};
use crate::types::{IdentityFields, LinkedInAuthPayload, LinkedInAuthentication, TokenInfo};
use async_trait::async_trait;
use ras_identity_core::{IdentityError, IdentityProvider, IdentityResult, VerifiedIdentity};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// LinkedIn provider that implements IdentityProvider.
///
/// The host runs the OAuth2 handshake and fetches the profile document from
/// [`LinkedInConfig::profile_url`], then hands both to [`IdentityProvider::verify`]
/// as a [`LinkedInAuthPayload`].
#[derive(Debug, Clone)]
pub struct LinkedInProvider {
    config: LinkedInConfig,
}

impl LinkedInProvider {
    pub fn new(config: LinkedInConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LinkedInConfig {
        &self.config
    }

    /// Project a callback payload into identity fields and the extended profile.
    pub fn authenticate(
        &self,
        payload: LinkedInAuthPayload,
    ) -> IdentityResult<LinkedInAuthentication> {
        let Value::Object(document) = payload.profile else {
            return Err(IdentityError::InvalidPayload);
        };

        let token = TokenInfo::new(
            payload.access_token,
            payload.expires_in.as_deref().unwrap_or_default(),
        );
        debug!(
            provider = %self.config.provider_id,
            has_expiry = token.expires_in.is_some(),
            "Projecting LinkedIn profile"
        );

        let Projection {
            identity,
            profile,
            extraction_error,
        } = ProfileProjector::project_detailed(&document, token);

        if let Some(err) = extraction_error {
            warn!(
                provider = %self.config.provider_id,
                error = %err,
                "LinkedIn profile could not be read, continuing with an empty extended profile"
            );
        }

        Ok(LinkedInAuthentication { identity, profile })
    }

    /// Map the projected identity fields to VerifiedIdentity
    fn map_identity_fields(&self, identity: IdentityFields) -> LinkedInResult<VerifiedIdentity> {
        let subject = match identity.id {
            Some(id) => id,
            None if self.config.require_subject => return Err(LinkedInError::MissingSubject),
            None => String::new(),
        };

        let mut metadata = Map::new();
        let extras = [
            ("given_name", identity.given_name),
            ("family_name", identity.family_name),
            ("headline", identity.headline),
            ("industry", identity.industry),
            ("public_profile_url", identity.public_profile_url),
            ("picture_url", identity.picture_url),
        ];
        for (key, value) in extras {
            if let Some(value) = value {
                metadata.insert(key.to_string(), Value::String(value));
            }
        }
        if let Some(expires_in) = identity.expires_in {
            metadata.insert("expires_in".to_string(), expires_in.as_secs().into());
        }
        metadata.insert(
            "extended_profile".to_string(),
            Value::String(identity.extended_profile),
        );

        Ok(VerifiedIdentity {
            provider_id: format!("oauth2:{}", self.config.provider_id),
            subject,
            email: identity.email,
            display_name: identity.name,
            metadata: Some(Value::Object(metadata)),
        })
    }
}

#[async_trait]
impl IdentityProvider for LinkedInProvider {
    fn provider_id(&self) -> &str {
        &self.config.provider_id
    }

    async fn verify(&self, auth_payload: Value) -> IdentityResult<VerifiedIdentity> {
        let payload: LinkedInAuthPayload =
            serde_json::from_value(auth_payload).map_err(|_| IdentityError::InvalidPayload)?;

        let authentication = self.authenticate(payload)?;
        let verified = self.map_identity_fields(authentication.identity)?;

        info!(
            provider = %self.config.provider_id,
            subject = %verified.subject,
            "Verified LinkedIn identity"
        );

        Ok(verified)
    }
}
