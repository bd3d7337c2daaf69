//! Error types for Plume.
use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;
use thiserror::Error;

macro_rules! impl_debug_for_error {
    ($($t:ty),*) => {
        $(
            impl Debug for $t {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    // Rust's uses the Debug trait to show errors when they're returned from main
                    // But, thiserror uses the Display trait to show errors. This redirects Debug to Display, essentially.
                    write!(f, "{}", self)
                }
            }
        )*
    };
}

/// Errors raised while discovering content and deriving routes for it.
///
/// `MissingField`, `InvalidSlug` and `Frontmatter` are local to a single
/// document: discovery reports them and moves on to the next file. The
/// other variants abort the build.
#[derive(Error)]
pub enum ContentError {
    #[error("Content root {path} does not exist or is not a directory")]
    RootUnreachable { path: PathBuf },

    #[error("Invalid content glob pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to read content file: {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is missing the required front-matter field `{field}`")]
    MissingField { path: PathBuf, field: String },

    #[error("{path} has front-matter that could not be parsed")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{path} has the title {title:?}, which slugifies to an empty string")]
    InvalidSlug { path: PathBuf, title: String },

    #[error("Route `{route}` is derived by both {first} and {second}")]
    RouteCollision {
        route: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl ContentError {
    /// Whether this error only affects a single document. Local errors are
    /// reported and skipped during discovery; anything else fails the build.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ContentError::MissingField { .. }
                | ContentError::InvalidSlug { .. }
                | ContentError::Frontmatter { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum PlumeError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl_debug_for_error!(ContentError);
