//! Error types for render infrastructure.

use thiserror::Error;

/// Result type for render infrastructure.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors from setting up rendering.
///
/// Rendering itself never fails: aborts are reported through the
/// callback, and degenerate requests produce transparent images.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The worker pool could not be created.
    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
