//! LinkedIn provider configuration.
//!
//! Values come from defaults, then an optional TOML file, then `LINKEDIN__*`
//! environment variables (e.g. `LINKEDIN__CLIENT_ID`).

use crate::error::{LinkedInError, LinkedInResult};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

const CONFIG_FILE_ENV: &str = "LINKEDIN_CONFIG_FILE";
const DEFAULT_CONFIG_FILE: &str = "linkedin.toml";

/// Options for the LinkedIn identity provider.
///
/// The endpoints and client credentials are consumed by the host when it runs
/// the OAuth2 handshake; the provider itself only reads the profile settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedInConfig {
    pub provider_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    /// People endpoint without the field selector.
    pub profile_endpoint: String,
    pub scopes: Vec<String>,
    /// Field selectors requested from the people endpoint.
    pub profile_fields: Vec<String>,
    /// Reject profile documents that carry no `id`.
    pub require_subject: bool,
}

impl Default for LinkedInConfig {
    fn default() -> Self {
        Self {
            provider_id: "linkedin".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            authorization_endpoint: "https://www.linkedin.com/uas/oauth2/authorization"
                .to_string(),
            token_endpoint: "https://www.linkedin.com/uas/oauth2/accessToken".to_string(),
            profile_endpoint: "https://api.linkedin.com/v1/people/~".to_string(),
            scopes: vec!["r_basicprofile".to_string(), "r_emailaddress".to_string()],
            profile_fields: default_profile_fields(),
            require_subject: true,
        }
    }
}

fn default_profile_fields() -> Vec<String> {
    [
        "id",
        "first-name",
        "last-name",
        "formatted-name",
        "email-address",
        "headline",
        "industry",
        "public-profile-url",
        "picture-url",
        "last-modified-timestamp",
        "summary",
        "interests",
        "positions",
        "educations",
        "projects",
        "certifications",
        "courses",
        "skills",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl LinkedInConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the optional config file and the environment, then validate.
    pub fn load() -> LinkedInResult<Self> {
        let path =
            std::env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Like [`LinkedInConfig::load`] with an explicit file path. A missing
    /// file is skipped.
    pub fn load_from(path: &str) -> LinkedInResult<Self> {
        let mut builder = Config::builder();

        if std::path::Path::new(path).exists() {
            debug!("Loading LinkedIn configuration from {}", path);
            builder = builder.add_source(File::with_name(path));
        } else {
            debug!("No LinkedIn config file at {}, using defaults", path);
        }

        builder = builder.add_source(
            Environment::with_prefix("LINKEDIN")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("scopes")
                .with_list_parse_key("profile_fields")
                .try_parsing(true),
        );

        let config: LinkedInConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = provider_id.into();
        self
    }

    pub fn with_client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = client_id.into();
        self.client_secret = client_secret.into();
        self
    }

    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    pub fn with_profile_fields(mut self, fields: Vec<String>) -> Self {
        self.profile_fields = fields;
        self
    }

    pub fn with_require_subject(mut self, require: bool) -> Self {
        self.require_subject = require;
        self
    }

    pub fn validate(&self) -> LinkedInResult<()> {
        if self.provider_id.trim().is_empty() {
            return Err(LinkedInError::InvalidConfig(
                "provider_id cannot be empty".to_string(),
            ));
        }

        for endpoint in [
            &self.authorization_endpoint,
            &self.token_endpoint,
            &self.profile_endpoint,
        ] {
            Url::parse(endpoint)?;
        }

        if self.scopes.is_empty() {
            return Err(LinkedInError::InvalidConfig(
                "at least one scope is required".to_string(),
            ));
        }

        if self.profile_fields.is_empty() {
            return Err(LinkedInError::InvalidConfig(
                "at least one profile field is required".to_string(),
            ));
        }

        Ok(())
    }

    /// Scopes joined for the authorization request.
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }

    /// People endpoint with the field selector applied, e.g.
    /// `https://api.linkedin.com/v1/people/~:(id,first-name)?format=json`.
    pub fn profile_url(&self) -> LinkedInResult<Url> {
        let selector = format!(
            "{}:({})",
            self.profile_endpoint.trim_end_matches('/'),
            self.profile_fields.join(",")
        );
        let mut url = Url::parse(&selector)?;
        url.query_pairs_mut().append_pair("format", "json");
        Ok(url)
    }
}
