use std::fmt::{Debug, Display, Formatter};

/// Errors a caller of the resolver can observe.
#[derive(Debug)]
pub enum ResolveError {
    /// The upstream resolver could not be set up.
    Configuration(anyhow::Error),
    InvalidInput {
        name: String,
        reason: &'static str,
    },
    /// No fresh answer and nothing cached.
    UnresolvableHost { name: String },
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "Error configuring resolver: {e:#}"),
            Self::InvalidInput { name, reason } => {
                write!(f, "Invalid host name {name:?}: {reason}")
            }
            Self::UnresolvableHost { name } => write!(f, "Unable to resolve host: {name}"),
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl ResolveError {
    pub fn unresolvable(name: impl Into<String>) -> Self {
        Self::UnresolvableHost { name: name.into() }
    }

    pub fn invalid(name: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidInput {
            name: name.into(),
            reason,
        }
    }
}

/// Outcome of a failed upstream query. Never leaves the crate's resolver.
#[derive(Debug)]
pub enum QueryError {
    /// The name can't be turned into a DNS question.
    InvalidName(&'static str),
    /// Lookup failed for any other reason: NXDOMAIN, network, timeout.
    Transient(anyhow::Error),
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <QueryError as Debug>::fmt(self, f)
    }
}

impl std::error::Error for QueryError {}
