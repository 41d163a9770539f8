//! Atomic publication of reloaded configurations.
//!
//! Readers take a snapshot with [`ConfigHandle::current`] and use it for the
//! whole of one decision. A reload builds the complete new [`Config`] before
//! taking the write lock, so readers only ever observe the old graph or the
//! new one.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;

#[derive(Debug)]
struct State {
    config: Arc<Config>,
    generation: u64,
}

/// A shared, swappable reference to the active configuration.
///
/// Cloning the handle shares the same slot.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    state: Arc<RwLock<State>>,
}

impl ConfigHandle {
    /// Creates a handle publishing `config` as generation 0.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            state: Arc::new(RwLock::new(State {
                config: Arc::new(config),
                generation: 0,
            })),
        }
    }

    /// Returns a snapshot of the active configuration.
    #[must_use]
    pub fn current(&self) -> Arc<Config> {
        Arc::clone(&self.state.read().config)
    }

    /// Returns how many times a new configuration has been published.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.state.read().generation
    }

    /// Publishes `config` and returns the configuration it replaced.
    pub fn replace(&self, config: Config) -> Arc<Config> {
        let next = Arc::new(config);
        let mut state = self.state.write();
        state.generation += 1;
        info!(generation = state.generation, "published configuration");
        std::mem::replace(&mut state.config, next)
    }

    /// Loads `input` and publishes it if valid.
    ///
    /// # Errors
    ///
    /// Returns the load error; the active configuration stays in place.
    pub fn reload(&self, input: &str) -> Result<Arc<Config>> {
        match Config::load(input) {
            Ok(config) => {
                self.replace(config);
                Ok(self.current())
            }
            Err(e) => {
                warn!(error = %e, "configuration reload failed, keeping previous");
                Err(e)
            }
        }
    }

    /// Loads the file at `path` and publishes it if valid.
    ///
    /// # Errors
    ///
    /// Returns the load error; the active configuration stays in place.
    pub fn reload_file(&self, path: impl AsRef<Path>) -> Result<Arc<Config>> {
        let path = path.as_ref();
        match Config::load_file(path) {
            Ok(config) => {
                self.replace(config);
                Ok(self.current())
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "configuration reload failed, keeping previous"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    const V1: &str = "route:\n  receiver: a\nreceivers:\n  - name: a\n";
    const V2: &str = "route:\n  receiver: b\nreceivers:\n  - name: b\n";

    fn handle() -> ConfigHandle {
        ConfigHandle::new(Config::load(V1).unwrap())
    }

    #[test]
    fn reload_publishes_new_config() {
        let h = handle();
        let before = h.current();
        let after = h.reload(V2).unwrap();
        assert_eq!(after.route().opts().receiver, "b");
        assert_eq!(h.current().route().opts().receiver, "b");
        assert_eq!(h.generation(), 1);
        // Snapshots taken earlier stay on the old graph.
        assert_eq!(before.route().opts().receiver, "a");
    }

    #[test]
    fn failed_reload_keeps_previous() {
        let h = handle();
        let err = h.reload("route:\n  receiver: nobody\n").unwrap_err();
        assert!(matches!(err, ConfigError::UndefinedReceiver { .. }));
        assert_eq!(h.current().route().opts().receiver, "a");
        assert_eq!(h.generation(), 0);
    }

    #[test]
    fn clones_share_the_slot() {
        let h = handle();
        let other = h.clone();
        other.reload(V2).unwrap();
        assert_eq!(h.current().original(), V2);
    }

    #[test]
    fn replace_returns_previous() {
        let h = handle();
        let old = h.replace(Config::load(V2).unwrap());
        assert_eq!(old.original(), V1);
    }

    #[test]
    fn reload_missing_file_keeps_previous() {
        let h = handle();
        let err = h.reload_file("/nonexistent/alertmanager.yml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert_eq!(h.current().original(), V1);
    }

    #[test]
    fn reload_file_publishes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("am.yml");
        std::fs::write(&path, V2).unwrap();
        let h = handle();
        h.reload_file(&path).unwrap();
        assert_eq!(h.current().route().opts().receiver, "b");
    }

    #[test]
    fn concurrent_readers_see_whole_configs() {
        let h = handle();
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let h = h.clone();
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let snapshot = h.current();
                        let receiver = snapshot.route().opts().receiver.clone();
                        assert!(snapshot.receiver(&receiver).is_some());
                    }
                })
            })
            .collect();
        for i in 0..50 {
            h.reload(if i % 2 == 0 { V2 } else { V1 }).unwrap();
        }
        for r in readers {
            r.join().unwrap();
        }
    }
}
