//! LinkedIn OAuth2 identity provider.
//!
//! The hosting pipeline performs the OAuth2 handshake and fetches the member's
//! profile document. This crate projects that document into the identity
//! fields needed for a session and an extended profile (positions,
//! educations, projects, skills, ...), and plugs into the pipeline through
//! the ras-identity-core [`IdentityProvider`] trait.

mod config;
mod error;
mod lookup;
mod profile;
mod projector;
mod provider;
mod types;

#[cfg(test)]
mod tests;

pub use config::LinkedInConfig;
pub use error::{LinkedInError, LinkedInResult};
pub use profile::{
    Education, ExtendedProfile, LINE_BREAK, Position, Project, normalize_line_breaks,
};
pub use projector::{ProfileDocument, ProfileProjector, Projection};
pub use provider::LinkedInProvider;
pub use types::{IdentityFields, LinkedInAuthPayload, LinkedInAuthentication, TokenInfo};

// Re-export common types for convenience
pub use ras_identity_core::{IdentityProvider, VerifiedIdentity};
