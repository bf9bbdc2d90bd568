//! Error types for migration planning.

/// A store query failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreProbeError {
    /// The store could not be reached.
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    /// A query against a collection or view failed.
    #[error("Store query \"{operation}\" on \"{target}\" failed: {message}")]
    Query {
        operation: String,
        target: String,
        message: String,
    },
}

impl StoreProbeError {
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn query(
        operation: impl Into<String>,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Query {
            operation: operation.into(),
            target: target.into(),
            message: message.into(),
        }
    }
}

/// Planning failed; no partial plan is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error(transparent)]
    Probe(#[from] StoreProbeError),

    #[error("Migration planning was cancelled")]
    Cancelled,

    #[error("Invalid search configuration: {0}")]
    InvalidConfiguration(String),
}

impl MigrationError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    #[must_use]
    pub fn is_probe_error(&self) -> bool {
        matches!(self, Self::Probe(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreProbeError::query("count", "deliveries", "timeout");
        assert_eq!(
            err.to_string(),
            "Store query \"count\" on \"deliveries\" failed: timeout"
        );

        let err = MigrationError::from(err);
        assert!(err.is_probe_error());
        assert!(!err.is_cancelled());
        assert!(err.to_string().contains("timeout"));
    }
}
