//! Hook table mapping each hook name to its callables in registration order.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::definitions::{HookFn, HookSpec};

/// Type-erased callable. Always holds a [`HookFn`] for the hook it was
/// registered under.
pub(crate) type ErasedHook = Box<dyn Any + Send + Sync>;

/// Entry in the hook table.
pub(crate) struct HookEntry {
    /// Plugin that registered this callable.
    pub(crate) owner: String,
    /// The callable.
    pub(crate) callable: ErasedHook,
}

impl std::fmt::Debug for HookEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookEntry")
            .field("owner", &self.owner)
            .field("callable", &"<hook fn>")
            .finish()
    }
}

/// Registry of hook callables organized by hook name.
///
/// Entries keep registration order. A plugin holds at most one entry per
/// hook: registering again replaces the callable in place.
#[derive(Debug, Default)]
pub struct HookTable {
    /// Hook name → entries in registration order.
    hooks: HashMap<&'static str, Vec<HookEntry>>,
}

impl HookTable {
    /// Creates an empty hook table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callable` for hook `H` on behalf of `owner`.
    pub fn register<H, F>(&mut self, owner: &str, callable: F)
    where
        H: HookSpec,
        F: Fn(&H::Args) -> H::Output + Send + Sync + 'static,
    {
        let callable: HookFn<H> = Arc::new(callable);
        self.insert(H::NAME, owner, Box::new(callable));
    }

    pub(crate) fn insert(&mut self, hook: &'static str, owner: &str, callable: ErasedHook) {
        let entries = self.hooks.entry(hook).or_default();

        match entries.iter_mut().find(|e| e.owner == owner) {
            Some(existing) => {
                existing.callable = callable;
                debug!(hook, plugin_id = %owner, "Hook callable replaced");
            }
            None => {
                entries.push(HookEntry {
                    owner: owner.to_string(),
                    callable,
                });
                debug!(hook, plugin_id = %owner, "Hook callable registered");
            }
        }
    }

    pub(crate) fn entries(&self, hook: &str) -> &[HookEntry] {
        self.hooks.get(hook).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns whether any callable is registered for a hook.
    pub fn has_handlers(&self, hook: &str) -> bool {
        !self.entries(hook).is_empty()
    }

    /// Returns the number of callables registered for a hook.
    pub fn handler_count(&self, hook: &str) -> usize {
        self.entries(hook).len()
    }

    /// Plugin ids registered for a hook, in registration order.
    pub fn owners(&self, hook: &str) -> Vec<&str> {
        self.entries(hook).iter().map(|e| e.owner.as_str()).collect()
    }

    /// Returns all hook names with at least one callable.
    pub fn registered_hooks(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .hooks
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(name, _)| *name)
            .collect();
        names.sort_unstable();
        names
    }
}

/// Hooks a plugin declares while it registers.
///
/// Handed to [`crate::Plugin::hooks`]; the registry moves the declarations
/// into its [`HookTable`] only when the plugin is live.
#[derive(Default)]
pub struct HookDeclarations {
    /// Declarations in order.
    entries: Vec<(&'static str, ErasedHook)>,
}

impl std::fmt::Debug for HookDeclarations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(name, _)| name))
            .finish()
    }
}

impl HookDeclarations {
    /// Creates an empty declaration list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a callable for hook `H`.
    pub fn on<H, F>(&mut self, callable: F) -> &mut Self
    where
        H: HookSpec,
        F: Fn(&H::Args) -> H::Output + Send + Sync + 'static,
    {
        let callable: HookFn<H> = Arc::new(callable);
        let erased: ErasedHook = Box::new(callable);
        self.entries.push((H::NAME, erased));
        self
    }

    /// Declared hook names, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<(&'static str, ErasedHook)> {
        self.entries
    }
}
