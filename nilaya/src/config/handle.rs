//! Shared, atomically swapped configuration snapshot.

use std::sync::Arc;

use parking_lot::RwLock;

use super::nilaya::NilayaConfig;

/// Live configuration shared between the detection loop and whatever applies
/// runtime updates.
///
/// Readers take an `Arc` snapshot and never hold the lock while working;
/// writers replace the whole snapshot, so a reader never observes a partially
/// applied update.
#[derive(Debug, Clone, Default)]
pub struct ConfigHandle {
    inner: Arc<RwLock<Arc<NilayaConfig>>>,
}

impl ConfigHandle {
    /// Wrap an initial configuration.
    pub fn new(config: NilayaConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// Current configuration snapshot.
    pub fn snapshot(&self) -> Arc<NilayaConfig> {
        Arc::clone(&self.inner.read())
    }

    /// Replace the configuration wholesale.
    pub fn replace(&self, config: NilayaConfig) {
        *self.inner.write() = Arc::new(config);
    }

    /// Apply an edit to a copy of the current configuration and publish it.
    ///
    /// The write lock is held for the duration of `edit`, so concurrent
    /// updates are serialized and none is lost.
    pub fn update<F: FnOnce(&mut NilayaConfig)>(&self, edit: F) {
        let mut guard = self.inner.write();
        let mut next = NilayaConfig::clone(&guard);
        edit(&mut next);
        *guard = Arc::new(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_snapshot_is_unaffected_by_later_update() {
        let handle = ConfigHandle::new(NilayaConfig::default());
        let before = handle.snapshot();

        handle.update(|c| c.perception.icp_min_score = 0.5);

        assert_eq!(before.perception.icp_min_score, 0.01);
        assert_eq!(handle.snapshot().perception.icp_min_score, 0.5);
    }

    #[test]
    fn test_replace() {
        let handle = ConfigHandle::default();
        let mut config = NilayaConfig::default();
        config.segmentation.min_points = 3;
        handle.replace(config);
        assert_eq!(handle.snapshot().segmentation.min_points, 3);
    }

    #[test]
    fn test_concurrent_updates_are_serialized() {
        let handle = ConfigHandle::new(NilayaConfig::default());
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let h = handle.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        h.update(|c| c.perception.icp_max_iter += 1);
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }
        assert_eq!(handle.snapshot().perception.icp_max_iter, 300 + 800);
    }
}
