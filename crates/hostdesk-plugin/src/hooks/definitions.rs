//! Hook point definitions with typed arguments and results.
//!
//! Every hook is a zero-sized marker type implementing [`HookSpec`]. The
//! marker fixes the hook's name and the exact signature of the callables
//! plugins may register for it, so a plugin cannot answer a hook with the
//! wrong argument or result shape.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use hostdesk_entity::ServiceRecord;

/// A named extension point with a fixed callable signature.
pub trait HookSpec: 'static {
    /// Hook name, unique across the application.
    const NAME: &'static str;
    /// Argument passed by reference to every callable.
    type Args: ?Sized + 'static;
    /// Value each callable returns.
    type Output: 'static;
}

/// A hook whose results are combined the same way at every call site.
pub trait FoldedHook: HookSpec {
    /// Result used when no plugin answers the hook.
    fn fallback(args: &Self::Args) -> Self::Output;

    /// Folds the next plugin's result into the accumulator.
    fn combine(acc: Self::Output, next: Self::Output) -> Self::Output;
}

/// Callable registered for hook `H`.
pub type HookFn<H> =
    Arc<dyn Fn(&<H as HookSpec>::Args) -> <H as HookSpec>::Output + Send + Sync>;

/// An entry contributed to a navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Link text.
    pub title: String,
    /// Target URL or route name.
    pub url: String,
    /// Optional icon name.
    pub icon: Option<String>,
}

impl MenuItem {
    /// Creates a menu entry without icon.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            icon: None,
        }
    }

    /// Sets the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Entries for the admin area navigation.
#[derive(Debug)]
pub struct AdminMenu;

impl HookSpec for AdminMenu {
    const NAME: &'static str = "admin_menu";
    type Args = ();
    type Output = Vec<MenuItem>;
}

impl FoldedHook for AdminMenu {
    fn fallback(_args: &()) -> Vec<MenuItem> {
        Vec::new()
    }

    fn combine(mut acc: Vec<MenuItem>, next: Vec<MenuItem>) -> Vec<MenuItem> {
        acc.extend(next);
        acc
    }
}

/// Entries for the customer area navigation.
#[derive(Debug)]
pub struct UserMenu;

impl HookSpec for UserMenu {
    const NAME: &'static str = "user_menu";
    type Args = ();
    type Output = Vec<MenuItem>;
}

impl FoldedHook for UserMenu {
    fn fallback(_args: &()) -> Vec<MenuItem> {
        Vec::new()
    }

    fn combine(mut acc: Vec<MenuItem>, next: Vec<MenuItem>) -> Vec<MenuItem> {
        acc.extend(next);
        acc
    }
}

/// Markup fragments appended to the service detail page.
#[derive(Debug)]
pub struct ServiceDetail;

impl HookSpec for ServiceDetail {
    const NAME: &'static str = "service_detail";
    type Args = ServiceRecord;
    type Output = String;
}

impl FoldedHook for ServiceDetail {
    fn fallback(_service: &ServiceRecord) -> String {
        String::new()
    }

    fn combine(mut acc: String, next: String) -> String {
        acc.push_str(&next);
        acc
    }
}
