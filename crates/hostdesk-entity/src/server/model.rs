//! Server entity model.

use std::fmt;

use serde::{Deserialize, Serialize};

use hostdesk_core::types::id::ServerId;

/// Which address a backend should use to reach the control panel API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiAccessAddress {
    /// Use the configured hostname when there is one.
    #[default]
    Hostname,
    /// Always use the IP address.
    Ip,
}

/// A machine or control panel that services are provisioned on.
#[derive(Clone, Serialize, Deserialize)]
pub struct Server {
    /// Unique server identifier.
    pub id: ServerId,
    /// Display name.
    pub name: String,
    /// Hostname, may be empty.
    #[serde(default)]
    pub hostname: String,
    /// IP address.
    pub ip: String,
    /// API port; `None` lets the backend pick its default.
    pub port: Option<u16>,
    /// Address selection for API calls.
    #[serde(default)]
    pub api_access_address: ApiAccessAddress,
    /// API user.
    #[serde(default)]
    pub username: String,
    /// API secret.
    #[serde(default, skip_serializing)]
    pub access_key: String,
}

impl Server {
    /// Creates a server reachable at `ip`.
    pub fn new(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            id: ServerId::new(),
            name: name.into(),
            hostname: String::new(),
            ip: ip.into(),
            port: None,
            api_access_address: ApiAccessAddress::default(),
            username: String::new(),
            access_key: String::new(),
        }
    }

    /// Sets the hostname.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    /// Sets the API port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the API user and secret.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        access_key: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.access_key = access_key.into();
        self
    }

    /// Sets the API address selection.
    pub fn with_api_access(mut self, access: ApiAccessAddress) -> Self {
        self.api_access_address = access;
        self
    }
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("hostname", &self.hostname)
            .field("ip", &self.ip)
            .field("port", &self.port)
            .field("api_access_address", &self.api_access_address)
            .field("username", &self.username)
            .field("access_key", &"[REDACTED]")
            .finish()
    }
}
