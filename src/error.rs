use std::str::Utf8Error;

/// The error type used by the routetree library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A route pattern that can not be registered, e.g. a wildcard segment followed by more segments.
    #[error("invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The request path is not valid UTF-8 after percent decoding.
    #[error("couldn't percent decode request path: {0}")]
    DecodePath(#[from] Utf8Error),

    /// The request body could not be collected before dispatch.
    #[error("couldn't read request body: {0}")]
    Body(#[source] RouteError),
}

/// A boxed error, returned from the router services and the builder.
pub type RouteError = Box<dyn std::error::Error + Send + Sync + 'static>;
