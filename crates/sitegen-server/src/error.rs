//! Error types for the preview server.

/// Preview server error.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The requested host and port could not be bound.
    #[error("Cannot bind {address}: {source}")]
    Bind {
        /// Requested `host:port`.
        address: String,
        /// Underlying socket error.
        source: std::io::Error,
    },

    /// The server stopped with an error after binding.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}
