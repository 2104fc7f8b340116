use std::path::{Path, PathBuf};
use std::thread;

use futures::channel::oneshot;

use crate::error::ViewerError;
use crate::loaders::{load_model, LoadProgress, ModelAsset};

/// Outcome of the single load attempt
#[derive(Debug)]
pub enum Resolution {
    Loaded(ModelAsset),
    Failed(ViewerError),
}

/// One asynchronous asset load, delivered at most once
///
/// The load runs on a worker thread; `poll` never blocks, so the event loop
/// keeps rendering while the file is fetched and parsed.
pub struct AssetResolver {
    path: PathBuf,
    receiver: Option<oneshot::Receiver<Resolution>>,
    attempts: u32,
}

impl AssetResolver {
    /// Load a glTF/GLB file in the background
    ///
    /// `on_progress` runs on the worker thread.
    pub fn spawn<P>(path: impl AsRef<Path>, mut on_progress: P) -> Self
    where
        P: FnMut(LoadProgress) + Send + 'static,
    {
        let path = path.as_ref().to_path_buf();
        let load_path = path.clone();
        Self::spawn_with(path, move || load_model(&load_path, &mut on_progress))
    }

    /// Progress callback that only logs
    pub fn log_progress(progress: LoadProgress) {
        log::debug!("Model load {:.0}%: {:?}", progress.fraction() * 100.0, progress);
    }

    /// Run any loader in the background
    pub fn spawn_with<F>(path: impl Into<PathBuf>, loader: F) -> Self
    where
        F: FnOnce() -> anyhow::Result<ModelAsset> + Send + 'static,
    {
        let path = path.into();
        let (sender, receiver) = oneshot::channel();
        let error_path = path.clone();

        log::info!("Loading model {:?}", path);
        let spawned = thread::Builder::new()
            .name("asset-loader".into())
            .spawn(move || {
                let resolution = match loader() {
                    Ok(asset) => Resolution::Loaded(asset),
                    Err(e) => Resolution::Failed(ViewerError::asset_load(error_path, e)),
                };
                // Receiver gone means the viewer shut down first
                let _ = sender.send(resolution);
            });

        let receiver = match spawned {
            Ok(_) => Some(receiver),
            Err(e) => {
                log::warn!("Could not start asset loader thread: {}", e);
                let (sender, receiver) = oneshot::channel();
                let _ = sender.send(Resolution::Failed(ViewerError::asset_load(path.clone(), e)));
                Some(receiver)
            }
        };

        Self {
            path,
            receiver,
            attempts: 1,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Whether the outcome has already been handed out
    pub fn is_settled(&self) -> bool {
        self.receiver.is_none()
    }

    /// Non-blocking check; yields the outcome exactly once
    pub fn poll(&mut self) -> Option<Resolution> {
        let receiver = self.receiver.as_mut()?;
        match receiver.try_recv() {
            Ok(Some(resolution)) => {
                self.receiver = None;
                Some(resolution)
            }
            Ok(None) => None,
            Err(oneshot::Canceled) => {
                self.receiver = None;
                Some(self.worker_lost())
            }
        }
    }

    /// Block until the outcome is available
    pub fn wait(&mut self) -> Option<Resolution> {
        let receiver = self.receiver.take()?;
        Some(futures::executor::block_on(receiver).unwrap_or_else(|_| self.worker_lost()))
    }

    fn worker_lost(&self) -> Resolution {
        Resolution::Failed(ViewerError::asset_load(
            self.path.clone(),
            anyhow::anyhow!("asset loader thread exited without a result"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_is_delivered_once() {
        let mut resolver = AssetResolver::spawn_with("model.glb", || anyhow::bail!("network error"));
        let resolution = resolver.wait().unwrap();
        assert!(matches!(resolution, Resolution::Failed(ViewerError::AssetLoad { .. })));
        assert!(resolver.is_settled());
        assert!(resolver.poll().is_none());
        assert!(resolver.wait().is_none());
        assert_eq!(resolver.attempts(), 1);
    }

    #[test]
    fn panicking_loader_counts_as_failure() {
        let mut resolver = AssetResolver::spawn_with("model.glb", || panic!("parser bug"));
        assert!(matches!(resolver.wait(), Some(Resolution::Failed(_))));
    }

    #[test]
    fn missing_file_fails() {
        let mut resolver = AssetResolver::spawn("does/not/exist.glb", AssetResolver::log_progress);
        assert!(matches!(resolver.wait(), Some(Resolution::Failed(_))));
        assert_eq!(resolver.path(), Path::new("does/not/exist.glb"));
    }
}
