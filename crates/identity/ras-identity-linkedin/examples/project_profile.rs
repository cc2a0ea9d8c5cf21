//! Run a saved LinkedIn profile document through the provider.
//!
//! ```sh
//! RUST_LOG=debug cargo run -p ras-identity-linkedin --example project_profile -- profile.json
//! ```
//!
//! The document is what the people endpoint returns for
//! `LinkedInConfig::profile_url()`. Set `LINKEDIN_ACCESS_TOKEN` and
//! `LINKEDIN_EXPIRES_IN` to simulate the token response.

use ras_identity_linkedin::{
    IdentityProvider, LinkedInAuthPayload, LinkedInConfig, LinkedInProvider,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = LinkedInConfig::load()?;
    println!("Profile endpoint: {}", config.profile_url()?);

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: project_profile <profile.json>")?;
    let profile: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;

    let payload = LinkedInAuthPayload {
        access_token: std::env::var("LINKEDIN_ACCESS_TOKEN")
            .unwrap_or_else(|_| "demo-token".to_string()),
        expires_in: std::env::var("LINKEDIN_EXPIRES_IN").ok(),
        profile,
    };

    let provider = LinkedInProvider::new(config);

    // Typed view, as a host that keeps the access token would use it
    let authentication = provider.authenticate(payload.clone())?;
    println!(
        "Extended profile:\n{}",
        serde_json::to_string_pretty(&authentication.profile)?
    );

    // The identity the session layer would sign
    let identity = provider.verify(serde_json::to_value(&payload)?).await?;
    println!("Verified identity:\n{}", serde_json::to_string_pretty(&identity)?);

    Ok(())
}
