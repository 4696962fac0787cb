//! Manual backend: acknowledges every lifecycle action.

use serde_json::Value;
use tracing::info;

use hostdesk_plugin::prelude::*;

/// Backend whose actions always succeed and are left to an operator.
#[derive(Debug, Clone, Default)]
pub struct ManualBackend {
    /// Records the next command acts on.
    binding: ServerBinding,
}

impl ManualBackend {
    /// Creates an unbound backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn acknowledge(&self, action: &str) -> CommandResult {
        let username = self
            .binding
            .service
            .as_ref()
            .map(|service| service.username.as_str())
            .unwrap_or_default();
        info!(
            action,
            username,
            host = self.host().unwrap_or("-"),
            "Manual action required"
        );
        CommandResult::success_with(format!("{action} queued for manual handling"))
    }
}

#[async_trait]
impl ServerPlugin for ManualBackend {
    fn bind(&mut self, binding: ServerBinding) {
        self.binding = binding;
    }

    fn binding(&self) -> &ServerBinding {
        &self.binding
    }

    async fn activate(&self) -> CommandResult {
        self.acknowledge("activate")
    }

    async fn suspend(&self) -> CommandResult {
        self.acknowledge("suspend")
    }

    async fn unsuspend(&self) -> CommandResult {
        self.acknowledge("unsuspend")
    }

    async fn terminate(&self) -> CommandResult {
        self.acknowledge("terminate")
    }

    async fn change_password(&self, _password: &str) -> CommandResult {
        self.acknowledge("change_password")
    }

    async fn change_plan(&self) -> CommandResult {
        self.acknowledge("change_plan")
    }

    async fn service_info(&self) -> Vec<(String, String)> {
        let Some(service) = &self.binding.service else {
            return Vec::new();
        };
        let mut rows = vec![("Username".to_string(), service.username.clone())];
        if let Some(domain) = &service.domain {
            rows.push(("Domain".to_string(), domain.clone()));
        }
        if let Some(host) = self.host() {
            rows.push(("Server".to_string(), format!("{host}:{}", self.port())));
        }
        rows
    }

    fn config_schema(&self, section: ConfigSection) -> ConfigSchema {
        match section {
            ConfigSection::Product => vec![
                ConfigField::new("instructions", "Provisioning instructions"),
                ConfigField::new("notify", "Mail operators on new actions")
                    .kind(FieldKind::Toggle)
                    .default_value(true),
            ],
            _ => ConfigSchema::new(),
        }
    }

    fn commands(&self) -> CommandTable {
        CommandTable::new().callable("ping").restricted("purge")
    }

    async fn run_command(&self, name: &str, _data: Option<&Value>) -> CommandResult {
        match name {
            "ping" => match self.host() {
                Some(host) => CommandResult::success_with(format!("{host}:{}", self.port())),
                None => CommandResult::failure(1, "No server bound"),
            },
            _ => CommandResult::failure(1, format!("Unsupported command '{name}'")),
        }
    }
}
