//! Configuration types for the dyndns system
//!
//! Two kinds of configuration exist:
//! - [`InvocationParams`]: the `action key=value...` command line of one run
//! - [`ClientConfig`]: endpoints and timeouts of the HTTP clients

use serde::Deserialize;
use std::fmt;
use tracing::{debug, warn};

/// Default Netlify API base URL
pub const DEFAULT_API_BASE: &str = "https://api.netlify.com/api/v1";

/// Default IP lookup endpoint (JSON flavour of ipify)
pub const DEFAULT_IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";

/// Command-line action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Print `name:id` for every zone
    List,
    /// Print `id:type:hostname:value` for every record of a zone
    ListRecords,
    /// Print the current public IP
    Ip,
    /// Replace the "A" record of a hostname with the current public IP
    Update,
}

impl Action {
    /// Parse an action name, ignoring case
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "list" => Some(Action::List),
            "listrecords" => Some(Action::ListRecords),
            "ip" => Some(Action::Ip),
            "update" => Some(Action::Update),
            _ => None,
        }
    }

    /// Name as typed on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::ListRecords => "listRecords",
            Action::Ip => "ip",
            Action::Update => "update",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of one invocation, built once from the raw arguments
#[derive(Clone, PartialEq, Eq)]
pub struct InvocationParams {
    /// Action to run
    pub action: Action,
    /// Bearer token for the provider API
    /// ⚠️ NEVER log this value
    pub auth_token: String,
    /// Zone ID for record operations
    pub zone_id: String,
    /// Host name to reconcile
    pub hostname: Option<String>,
}

// Custom Debug implementation that hides the bearer token
impl fmt::Debug for InvocationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationParams")
            .field("action", &self.action)
            .field("auth_token", &"<REDACTED>")
            .field("zone_id", &self.zone_id)
            .field("hostname", &self.hostname)
            .finish()
    }
}

impl InvocationParams {
    /// Create parameters for an action with no keys set
    pub fn new(action: Action) -> Self {
        Self {
            action,
            auth_token: String::new(),
            zone_id: String::new(),
            hostname: None,
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = token.into();
        self
    }

    /// Set the zone ID
    pub fn with_zone(mut self, zone_id: impl Into<String>) -> Self {
        self.zone_id = zone_id.into();
        self
    }

    /// Set the host name
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Parse the process arguments (without the program name)
    ///
    /// The first argument is the action; the rest are `key=value` pairs.
    /// Keys are matched case-insensitively, the value is everything after the
    /// first `=`. Unknown keys and arguments without `=` are skipped.
    ///
    /// # Returns
    ///
    /// - `Ok(InvocationParams)`: A recognised action
    /// - `Err(Error::InvalidInput)`: The action is missing or unknown
    pub fn from_args<I, S>(args: I) -> Result<Self, crate::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();

        let action_arg = args
            .next()
            .ok_or_else(|| crate::Error::invalid_input("no action given"))?;
        let action_arg = action_arg.as_ref();
        let action = Action::parse(action_arg).ok_or_else(|| {
            crate::Error::invalid_input(format!("unknown action '{}'", action_arg.trim()))
        })?;

        let mut params = Self::new(action);

        for arg in args {
            let arg = arg.as_ref();
            let Some((key, value)) = arg.split_once('=') else {
                warn!("Ignoring argument without '=': {}", arg);
                continue;
            };

            let value = value.trim();
            match key.trim().to_lowercase().as_str() {
                "token" => params.auth_token = value.to_string(),
                "zone" => params.zone_id = value.to_string(),
                "hostname" => params.hostname = Some(value.to_string()),
                other => debug!("Ignoring unrecognized key: {}", other),
            }
        }

        Ok(params)
    }

    /// The host name if it is set and not blank
    pub fn hostname(&self) -> Option<&str> {
        self.hostname
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }

    /// Fail with a precondition error if the token is blank
    pub fn require_token(&self) -> Result<&str, crate::Error> {
        require(&self.auth_token, self.action, "token")
    }

    /// Fail with a precondition error if the zone is blank
    pub fn require_zone(&self) -> Result<&str, crate::Error> {
        require(&self.zone_id, self.action, "zone")
    }
}

fn require<'a>(value: &'a str, action: Action, what: &str) -> Result<&'a str, crate::Error> {
    let value = value.trim();
    if value.is_empty() {
        return Err(crate::Error::precondition(format!(
            "cannot {} without {}",
            action, what
        )));
    }
    Ok(value)
}

/// Endpoints and timeouts of the HTTP clients
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the DNS provider API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// URL of the IP lookup endpoint
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,

    /// Timeout for provider API requests (in seconds)
    #[serde(default = "default_api_timeout_secs")]
    pub api_timeout_secs: u64,

    /// Timeout for the IP lookup request (in seconds)
    #[serde(default = "default_ip_timeout_secs")]
    pub ip_timeout_secs: u64,
}

impl ClientConfig {
    /// Validate the client configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        validate_url("API base URL", &self.api_base)?;
        validate_url("IP lookup URL", &self.ip_lookup_url)?;
        validate_timeout("API timeout", self.api_timeout_secs)?;
        validate_timeout("IP lookup timeout", self.ip_timeout_secs)?;
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            ip_lookup_url: default_ip_lookup_url(),
            api_timeout_secs: default_api_timeout_secs(),
            ip_timeout_secs: default_ip_timeout_secs(),
        }
    }
}

fn validate_url(what: &str, url: &str) -> Result<(), crate::Error> {
    if url.is_empty() {
        return Err(crate::Error::config(format!("{} cannot be empty", what)));
    }
    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(crate::Error::config(format!(
            "{} must use HTTP or HTTPS scheme. Got: {}",
            what, url
        )));
    }
    Ok(())
}

fn validate_timeout(what: &str, secs: u64) -> Result<(), crate::Error> {
    if !(1..=300).contains(&secs) {
        return Err(crate::Error::config(format!(
            "{} must be between 1 and 300 seconds. Got: {}",
            what, secs
        )));
    }
    Ok(())
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_ip_lookup_url() -> String {
    DEFAULT_IP_LOOKUP_URL.to_string()
}

fn default_api_timeout_secs() -> u64 {
    30
}

fn default_ip_timeout_secs() -> u64 {
    10
}
