// File: src/mount.rs
// Purpose: Attach loaded route modules to a host router

use autoroutes_router::join_paths;

use crate::host::HostRouter;
use crate::loader::LoadedRoute;
use crate::module::ModuleShape;

/// Mounts every loaded route, in order, under `prefix`
///
/// Each route gets a scope at `prefix + pattern`. A composed module
/// configures that scope itself; a per-verb module has each binding
/// registered at the scope root. With `generate_tags`, routes registered by
/// the group that carry no documentation detail are tagged with the
/// pattern. Routes registered earlier, by other groups or by the caller, are
/// left alone.
///
/// Stops at the first error the host reports. Routes registered before it
/// stay registered.
pub fn mount<R: HostRouter>(
    host: &mut R,
    loaded: Vec<LoadedRoute<R>>,
    prefix: &str,
    generate_tags: bool,
) -> Result<(), R::Error> {
    for route in loaded {
        let group_path = join_paths(prefix, route.pattern.path());
        let before = host.routes().len();

        match route.module.resolve() {
            ModuleShape::Composed(compose) => {
                compose(host.group(&group_path))?;
            }
            ModuleShape::PerVerb(table) if table.is_empty() => {
                tracing::warn!(
                    "Route module {:?} exports no handlers, nothing mounted at {}",
                    route.file,
                    group_path
                );
            }
            ModuleShape::PerVerb(table) => {
                table
                    .into_iter()
                    .try_fold(host.group(&group_path), |scope, (verb, binding)| {
                        let (handler, meta) = binding.into_parts();
                        scope.route_with(verb, "/", handler, meta)
                    })?;
            }
        }

        let after = host.routes().len();
        for mounted in &host.routes()[before..after] {
            tracing::debug!("Mounted {} {} ({})", mounted.verb, mounted.path, route.pattern.key());
        }

        if generate_tags {
            let tag = route.pattern.tag();
            for mounted in &mut host.routes_mut()[before..after] {
                if mounted.meta.tag_if_undocumented(&tag) {
                    tracing::debug!("Tagged {} {} with {}", mounted.verb, mounted.path, tag);
                }
            }
        }
    }

    Ok(())
}
