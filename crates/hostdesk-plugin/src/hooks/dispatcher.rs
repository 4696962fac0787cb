//! Hook dispatcher: invokes the callables registered for a hook.
//!
//! Strategies:
//! - `invoke_all`: every callable in registration order, results keyed by plugin id.
//! - `invoke_first` / `invoke_last`: only the earliest / most recent registrant.
//! - `invoke_fold` / `invoke_folded`: every callable, results combined into one value.
//!
//! A hook nobody registered for is not an error: `invoke_all` returns an empty
//! result set, `invoke_first`/`invoke_last` return `None`, and fold falls back
//! to its default. An entry whose callable does not match the hook's signature
//! is skipped.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::registry::PluginRegistry;

use super::definitions::{FoldedHook, HookFn, HookSpec};
use super::registry::HookEntry;

/// Results of `invoke_all`, keyed by plugin id in registration order.
#[derive(Debug, Clone, PartialEq)]
pub struct HookResults<T> {
    /// `(plugin id, result)` pairs.
    entries: Vec<(String, T)>,
}

impl<T> HookResults<T> {
    /// Result produced by a plugin.
    pub fn get(&self, plugin_id: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(id, _)| id == plugin_id)
            .map(|(_, result)| result)
    }

    /// Plugin ids that answered, in order.
    pub fn plugin_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// Iterates `(plugin id, result)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(id, result)| (id.as_str(), result))
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no plugin answered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for HookResults<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> IntoIterator for HookResults<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Dispatches hooks to the callables indexed by the plugin registry.
#[derive(Debug, Clone)]
pub struct HookDispatcher {
    /// Frozen plugin registry.
    registry: Arc<PluginRegistry>,
}

impl HookDispatcher {
    /// Creates a dispatcher over a fully built registry.
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    /// Calls every callable for `H`, collecting results by plugin id.
    pub fn invoke_all<H: HookSpec>(&self, args: &H::Args) -> HookResults<H::Output> {
        let entries = self.registry.hooks().entries(H::NAME);
        if entries.is_empty() {
            return HookResults::default();
        }

        debug!(hook = H::NAME, handler_count = entries.len(), "Dispatching hook");

        let results = entries
            .iter()
            .filter_map(|entry| callable::<H>(entry).map(|f| (entry.owner.clone(), f(args))))
            .collect();

        HookResults { entries: results }
    }

    /// Calls only the earliest registered callable for `H`.
    pub fn invoke_first<H: HookSpec>(&self, args: &H::Args) -> Option<H::Output> {
        let entries = self.registry.hooks().entries(H::NAME);
        let (owner, f) = entries
            .iter()
            .find_map(|entry| callable::<H>(entry).map(|f| (&entry.owner, f)))?;

        debug!(hook = H::NAME, plugin_id = %owner, "Dispatching hook to first registrant");
        Some(f(args))
    }

    /// Calls only the most recently registered callable for `H`.
    pub fn invoke_last<H: HookSpec>(&self, args: &H::Args) -> Option<H::Output> {
        let entries = self.registry.hooks().entries(H::NAME);
        let (owner, f) = entries
            .iter()
            .rev()
            .find_map(|entry| callable::<H>(entry).map(|f| (&entry.owner, f)))?;

        debug!(hook = H::NAME, plugin_id = %owner, "Dispatching hook to last registrant");
        Some(f(args))
    }

    /// Calls every callable for `H` and folds the results with `combine`.
    ///
    /// The first result seeds the accumulator. When nothing answers,
    /// `default(args)` is returned instead.
    pub fn invoke_fold<H, D, C>(&self, args: &H::Args, default: D, mut combine: C) -> H::Output
    where
        H: HookSpec,
        D: FnOnce(&H::Args) -> H::Output,
        C: FnMut(H::Output, H::Output) -> H::Output,
    {
        let mut acc: Option<H::Output> = None;

        for (_, result) in self.invoke_all::<H>(args) {
            acc = Some(match acc {
                Some(prev) => combine(prev, result),
                None => result,
            });
        }

        acc.unwrap_or_else(|| default(args))
    }

    /// Folds `H` with the strategy the hook itself declares.
    pub fn invoke_folded<H: FoldedHook>(&self, args: &H::Args) -> H::Output {
        self.invoke_fold::<H, _, _>(args, H::fallback, H::combine)
    }

    /// Returns whether any plugin is wired to a hook.
    pub fn is_plugged(&self, hook: &str) -> bool {
        self.registry.hooks().has_handlers(hook)
    }

    /// Returns a reference to the plugin registry.
    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }
}

fn callable<H: HookSpec>(entry: &HookEntry) -> Option<&HookFn<H>> {
    let f = entry.callable.downcast_ref::<HookFn<H>>();
    if f.is_none() {
        warn!(
            hook = H::NAME,
            plugin_id = %entry.owner,
            "Hook callable has a foreign signature, skipping"
        );
    }
    f
}
