//! Lifecycle commands, their payloads, and the result every backend
//! operation returns.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use hostdesk_entity::ServiceStatus;

/// Outcome of a backend operation. `code == 0` is the only success signal;
/// `message` is for operators and is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    /// Zero on success.
    pub code: i32,
    /// Diagnostic text.
    pub message: String,
}

impl CommandResult {
    /// The named command is not declared by the backend.
    pub const NOT_FOUND: i32 = -1;
    /// The named command exists but may not be dispatched by name.
    pub const NOT_CALLABLE: i32 = -2;
    /// The service is terminated and cannot change status any more.
    pub const TERMINATED: i32 = -3;

    /// A successful result.
    pub fn success() -> Self {
        Self {
            code: 0,
            message: String::new(),
        }
    }

    /// A successful result carrying a message.
    pub fn success_with(message: impl Into<String>) -> Self {
        Self {
            code: 0,
            message: message.into(),
        }
    }

    /// A failed result.
    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub(crate) fn not_found(command: &str) -> Self {
        Self::failure(
            Self::NOT_FOUND,
            format!("Command '{command}' does not exist"),
        )
    }

    pub(crate) fn not_callable(command: &str) -> Self {
        Self::failure(
            Self::NOT_CALLABLE,
            format!("Command '{command}' is not callable"),
        )
    }

    pub(crate) fn terminated() -> Self {
        Self::failure(Self::TERMINATED, "Service is terminated")
    }

    /// Whether `code == 0`.
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// A command issued against a service's backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LifecycleCommand {
    /// Provision the service.
    Create,
    /// Suspend the service.
    Suspend,
    /// Lift a suspension.
    Unsuspend,
    /// Destroy the service.
    Terminate,
    /// Push a new login secret.
    ChangePassword,
    /// Move the service to another plan.
    ChangePlan,
    /// Backend-declared extension command.
    Named(String),
}

impl LifecycleCommand {
    /// Wire name of the command.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "create",
            Self::Suspend => "suspend",
            Self::Unsuspend => "unsuspend",
            Self::Terminate => "terminate",
            Self::ChangePassword => "change_password",
            Self::ChangePlan => "change_plan",
            Self::Named(name) => name,
        }
    }

    /// Status the service moves to when the backend call succeeds.
    pub fn target_status(&self) -> Option<ServiceStatus> {
        match self {
            Self::Create | Self::Unsuspend => Some(ServiceStatus::Active),
            Self::Suspend => Some(ServiceStatus::Suspended),
            Self::Terminate => Some(ServiceStatus::Terminated),
            Self::ChangePassword | Self::ChangePlan | Self::Named(_) => None,
        }
    }
}

impl fmt::Display for LifecycleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleCommand {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "create" => Self::Create,
            "suspend" => Self::Suspend,
            "unsuspend" => Self::Unsuspend,
            "terminate" => Self::Terminate,
            "change_password" => Self::ChangePassword,
            "change_plan" => Self::ChangePlan,
            other => Self::Named(other.to_string()),
        })
    }
}

impl From<&str> for LifecycleCommand {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(command) => command,
            Err(never) => match never {},
        }
    }
}

/// Optional input accompanying a command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandPayload {
    /// Reason recorded on suspension. Blank counts as absent.
    pub suspend_reason: Option<String>,
    /// Whether the customer is mailed about a (un)suspension.
    #[serde(default)]
    pub mail: bool,
    /// New login secret for `change_password`.
    pub password: Option<String>,
    /// Free-form input forwarded to named commands.
    pub data: Option<Value>,
}

impl CommandPayload {
    /// An empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the suspension reason.
    pub fn suspend_reason(mut self, reason: impl Into<String>) -> Self {
        self.suspend_reason = Some(reason.into());
        self
    }

    /// Requests a customer mail.
    pub fn with_mail(mut self) -> Self {
        self.mail = true;
        self
    }

    /// Sets the new password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the data forwarded to named commands.
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub(crate) fn reason(&self) -> Option<&str> {
        self.suspend_reason
            .as_deref()
            .filter(|reason| !reason.trim().is_empty())
    }
}

/// Whether a declared command may be dispatched by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandAccess {
    /// Reachable through the controller.
    Callable,
    /// Declared, but only for the backend's own use.
    Restricted,
}

/// Named commands a backend declares, resolved once per dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandTable {
    /// Command name → access.
    commands: HashMap<String, CommandAccess>,
}

impl CommandTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a command reachable by name.
    pub fn callable(mut self, name: impl Into<String>) -> Self {
        self.commands.insert(name.into(), CommandAccess::Callable);
        self
    }

    /// Declares a command that exists but may not be dispatched by name.
    pub fn restricted(mut self, name: impl Into<String>) -> Self {
        self.commands.insert(name.into(), CommandAccess::Restricted);
        self
    }

    /// Access of `name`, `None` if undeclared.
    pub fn access(&self, name: &str) -> Option<CommandAccess> {
        self.commands.get(name).copied()
    }

    /// Number of declared commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
