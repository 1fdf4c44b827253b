//! # Hot Reload Module
//!
//! Live reloading of the route source without restarting the process.
//!
//! The parent directory is watched, so a route source that does not exist
//! yet is picked up once it is created. When the file is created or
//! modified, it is loaded again and the
//! new [`RouteTable`] replaces the old one inside the [`SharedRouteTable`].
//! Resolvers already holding the shared table see the new routes on their
//! next resolution; requests in flight finish on the table they started with.
//!
//! ## Error Handling
//!
//! If the new source fails to load:
//! - The error is logged
//! - The previous table stays active
//!
//! ## Usage
//!
//! ```rust,no_run
//! use brrtdispatch::hot_reload::watch_routes;
//! use brrtdispatch::routes::RouteTable;
//!
//! let shared = RouteTable::load("config/routes.yaml")?.into_shared();
//! let _watcher = watch_routes("config/routes.yaml", shared.clone())?;
//! // keep `_watcher` alive for as long as reloads should happen
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Context;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::routes::{RouteTable, SharedRouteTable};
use crate::runtime_config::RuntimeConfig;

/// Load `path` and swap the result into `shared`.
///
/// # Errors
///
/// Fails when the source cannot be loaded; `shared` is left untouched.
pub fn reload_routes(path: &Path, shared: &SharedRouteTable) -> anyhow::Result<usize> {
    let table = RouteTable::load(path)
        .with_context(|| format!("hot-reload: keeping previous routes for {}", path.display()))?;
    let count = table.len();
    shared.store(Arc::new(table));
    info!(path = %path.display(), routes_count = count, "hot-reload: route table swapped");
    Ok(count)
}

/// Watch a route source and reload it into `shared` on change.
///
/// The watcher stops when the returned handle is dropped. The file itself
/// may be missing; its directory must exist.
///
/// # Errors
///
/// Fails when the watcher cannot be created or the directory cannot be watched.
pub fn watch_routes<P>(path: P, shared: SharedRouteTable) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
{
    let path: PathBuf = path.as_ref().to_path_buf();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path.file_name().map(ToOwned::to_owned);
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                let ours = event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == file_name.as_deref());
                if ours && matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    if let Err(e) = reload_routes(&watch_path, &shared) {
                        let reason = format!("{e:#}");
                        error!(path = %watch_path.display(), error = %reason, "hot-reload failed");
                    }
                }
            }
            Err(e) => warn!(error = %e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    info!(path = %path.display(), exists = path.exists(), "hot-reload: watching route source");
    Ok(watcher)
}

/// Load the configured route source, watching it when hot reload is enabled.
///
/// # Errors
///
/// Fails when the initial load fails or the watcher cannot be started.
pub fn load_configured(
    config: &RuntimeConfig,
) -> anyhow::Result<(SharedRouteTable, Option<RecommendedWatcher>)> {
    let shared = RouteTable::load(&config.routes_file)?.into_shared();
    if !config.hot_reload {
        return Ok((shared, None));
    }
    let watcher = watch_routes(&config.routes_file, Arc::clone(&shared))
        .with_context(|| format!("failed to watch {}", config.routes_file.display()))?;
    Ok((shared, Some(watcher)))
}
