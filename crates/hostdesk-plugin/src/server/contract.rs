//! The capability set every provisioning backend implements.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::binding::{DEFAULT_PORT, ServerBinding};
use super::command::{CommandResult, CommandTable};

/// Text returned by login operations a backend does not support.
pub const NO_LOGIN: &str = "None";

/// Input type of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text.
    #[default]
    Text,
    /// Secret text.
    Password,
    /// Numeric input.
    Number,
    /// Checkbox.
    Toggle,
    /// One of `options`.
    Select,
}

/// One field of a backend configuration form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigField {
    /// Key under which the value is stored.
    pub key: String,
    /// Label shown to the operator.
    pub label: String,
    /// Input type.
    pub kind: FieldKind,
    /// Choices for `Select` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Pre-filled value.
    pub default: Option<Value>,
}

impl ConfigField {
    /// Creates a text field.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: FieldKind::Text,
            options: Vec::new(),
            default: None,
        }
    }

    /// Sets the input type.
    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    /// Turns the field into a select over `options`.
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.kind = FieldKind::Select;
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the pre-filled value.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// An ordered list of configuration fields. Empty means "no form".
pub type ConfigSchema = Vec<ConfigField>;

/// Forms a backend may contribute to the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSection {
    /// Backend-wide settings.
    Other,
    /// Per-product settings.
    Product,
    /// Customer-facing order form.
    User,
    /// Per-product plan change settings.
    ChangePlan,
    /// Customer-facing plan change form.
    UserChangePlan,
    /// Domain settings.
    Domain,
}

/// A provisioning backend ("server plugin").
///
/// Implementations only talk to the remote control panel and report a
/// [`CommandResult`]. They never change the service's status themselves;
/// that belongs to [`super::LifecycleController`].
#[async_trait::async_trait]
pub trait ServerPlugin: Send + Sync + std::fmt::Debug {
    /// Binds the backend to the records the next command acts on.
    fn bind(&mut self, binding: ServerBinding);

    /// Current binding.
    fn binding(&self) -> &ServerBinding;

    /// Provisions the service.
    async fn activate(&self) -> CommandResult;

    /// Suspends the service.
    async fn suspend(&self) -> CommandResult;

    /// Lifts a suspension.
    async fn unsuspend(&self) -> CommandResult;

    /// Destroys the service.
    async fn terminate(&self) -> CommandResult;

    /// Pushes `password` as the service's login secret.
    async fn change_password(&self, password: &str) -> CommandResult;

    /// Applies the product's current plan to the service.
    async fn change_plan(&self) -> CommandResult;

    /// Single sign-on target for the customer area.
    async fn user_login(&self) -> String {
        NO_LOGIN.to_string()
    }

    /// Single sign-on target for the admin area.
    async fn admin_login(&self) -> String {
        NO_LOGIN.to_string()
    }

    /// Label/value pairs shown on the service detail page.
    async fn service_info(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Fields editable on the service, pre-filled from its `extra`.
    ///
    /// `suspend_reason` is owned by the lifecycle controller and must not
    /// be declared here.
    fn service_config(&self) -> ConfigSchema {
        ConfigSchema::new()
    }

    /// Static form for `section`.
    fn config_schema(&self, _section: ConfigSection) -> ConfigSchema {
        ConfigSchema::new()
    }

    /// Port used when the server has none configured.
    fn default_port(&self) -> u16 {
        DEFAULT_PORT
    }

    /// Extension commands reachable by name.
    fn commands(&self) -> CommandTable {
        CommandTable::new()
    }

    /// Runs a command declared `Callable` in [`Self::commands`].
    async fn run_command(&self, name: &str, _data: Option<&Value>) -> CommandResult {
        CommandResult::not_found(name)
    }

    /// Remote host, as used for API calls.
    fn host(&self) -> Option<&str> {
        self.binding().host(true)
    }

    /// Remote port.
    fn port(&self) -> u16 {
        self.binding().port(self.default_port())
    }
}
