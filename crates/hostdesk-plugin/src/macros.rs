//! Convenience macros for plugin development.

/// Macro for building a [`PluginInfo`](crate::descriptor::PluginInfo).
///
/// # Example
/// ```rust,ignore
/// let info = plugin_info!(
///     slug: "ticket-notes",
///     name: "Ticket Notes",
///     description: "Private notes on tickets",
///     version: "1.0.0"
/// );
///
/// let info = plugin_info!(
///     slug: "cpanel",
///     name: "cPanel",
///     description: "cPanel/WHM provisioning",
///     package: "hostdesk/plugin-cpanel"
/// );
/// ```
#[macro_export]
macro_rules! plugin_info {
    (
        slug: $slug:expr,
        name: $name:expr,
        description: $desc:expr,
        version: $version:expr
    ) => {
        $crate::prelude::PluginInfo::new($name)
            .slug($slug)
            .description($desc)
            .version($version)
    };
    (
        slug: $slug:expr,
        name: $name:expr,
        description: $desc:expr,
        package: $package:expr
    ) => {
        $crate::prelude::PluginInfo::new($name)
            .slug($slug)
            .description($desc)
            .package($package)
    };
    (
        name: $name:expr,
        description: $desc:expr,
        version: $version:expr
    ) => {
        $crate::prelude::PluginInfo::new($name)
            .description($desc)
            .version($version)
    };
}

#[cfg(test)]
mod tests {
    use crate::descriptor::VersionSource;

    #[test]
    fn test_plugin_info_forms() {
        let info = plugin_info!(
            slug: "cpanel",
            name: "cPanel",
            description: "cPanel/WHM provisioning",
            package: "hostdesk/plugin-cpanel"
        );
        assert_eq!(info.slug.as_deref(), Some("cpanel"));
        assert_eq!(
            info.version,
            VersionSource::Package("hostdesk/plugin-cpanel".to_string())
        );

        let info = plugin_info!(name: "Notes", description: "", version: "0.3.0");
        assert_eq!(info.slug, None);
        assert_eq!(info.version, VersionSource::Literal("0.3.0".to_string()));
    }
}
