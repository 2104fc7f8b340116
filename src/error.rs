use std::path::PathBuf;

/// Errors raised by the viewer
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// No display surface to render into; the viewer cannot start
    #[error("display surface is missing")]
    SurfaceMissing,

    /// GPU or window setup failed during bootstrap
    #[error("bootstrap failed: {0}")]
    Bootstrap(String),

    /// The 3D asset could not be fetched or parsed
    #[error("failed to load asset {path:?}: {source}")]
    AssetLoad {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// The scene object was already resolved once
    #[error("scene object already resolved")]
    AlreadyResolved,

    #[error("invalid config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("render failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;

impl ViewerError {
    pub fn asset_load(path: impl Into<PathBuf>, source: impl Into<anyhow::Error>) -> Self {
        Self::AssetLoad {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Whether the viewer can keep running after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::SurfaceMissing | Self::Bootstrap(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_errors_are_fatal() {
        assert!(!ViewerError::SurfaceMissing.is_recoverable());
        assert!(!ViewerError::Bootstrap("no adapter".into()).is_recoverable());
    }

    #[test]
    fn asset_errors_are_recoverable() {
        let err = ViewerError::asset_load("model.glb", anyhow::anyhow!("connection refused"));
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("model.glb"));
        assert!(err.to_string().contains("connection refused"));
    }
}
