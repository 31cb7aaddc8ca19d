use thiserror::Error;

use crate::id::NodeId;

#[derive(Error, Debug)]
pub enum ArborError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("{context}: {source}")]
    Domain {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Node '{node_id}' failed: {message}")]
    Node { node_id: NodeId, message: String },

    #[error("Tracing initialization failed: {message}")]
    Tracing { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type ArborResult<T> = std::result::Result<T, ArborError>;

impl ArborError {
    /// Wrap an error produced by an external collaborator (a failed write,
    /// a malformed input) with a short description of what was attempted.
    pub fn domain<E>(context: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        ArborError::Domain {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        ArborError::Configuration {
            message: message.into(),
        }
    }

    pub fn node(node_id: &NodeId, message: impl Into<String>) -> Self {
        ArborError::Node {
            node_id: node_id.clone(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_domain_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = ArborError::domain("saving configuration", io);

        assert_eq!(err.to_string(), "saving configuration: read-only");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_node_error_names_node() {
        let id = NodeId::from("dashboard-1");
        let err = ArborError::node(&id, "form is missing");
        assert!(err.to_string().contains("dashboard-1"));
        assert!(err.to_string().contains("form is missing"));
    }
}
