//! The (product, service, server) triple a backend acts on.

use hostdesk_entity::{ApiAccessAddress, Product, Server, ServiceRecord};

/// Port used when neither the server nor the backend names one.
pub const DEFAULT_PORT: u16 = 2086;

/// Records a backend is bound to for one command invocation.
#[derive(Debug, Clone, Default)]
pub struct ServerBinding {
    /// Product the service was ordered from.
    pub product: Option<Product>,
    /// Service being acted on.
    pub service: Option<ServiceRecord>,
    /// Server hosting the service.
    pub server: Option<Server>,
}

impl ServerBinding {
    /// Creates a binding.
    pub fn new(
        product: Option<Product>,
        service: Option<ServiceRecord>,
        server: Option<Server>,
    ) -> Self {
        Self {
            product,
            service,
            server,
        }
    }

    /// Whether a service is bound; lifecycle commands need one.
    pub fn is_bound(&self) -> bool {
        self.service.is_some()
    }

    /// Address of the remote control panel.
    ///
    /// For API calls the IP is used when the server is configured for IP
    /// access; outside API calls, or otherwise, the hostname is used unless
    /// it is empty.
    pub fn host(&self, api: bool) -> Option<&str> {
        let server = self.server.as_ref()?;
        let use_ip = (api && server.api_access_address == ApiAccessAddress::Ip)
            || server.hostname.is_empty();
        Some(if use_ip {
            server.ip.as_str()
        } else {
            server.hostname.as_str()
        })
    }

    /// Port of the remote control panel, `default_port` when the server has
    /// none configured.
    pub fn port(&self, default_port: u16) -> u16 {
        self.server
            .as_ref()
            .and_then(|server| server.port)
            .filter(|&port| port != 0)
            .unwrap_or(default_port)
    }
}
