//! Error types for the sink

pub type Result<T> = std::result::Result<T, SinkError>;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Transport setup failed; no sink is returned
    #[error("sender construction failed for '{endpoint}': {source}")]
    Construction {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// A field value could not be represented in the wire format
    #[error("encoding log document: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The sender rejected or failed to accept the payload
    #[error("sending log payload: {0}")]
    Delivery(#[source] std::io::Error),

    /// The sender failed to flush outstanding deliveries
    #[error("syncing sender: {0}")]
    Sync(#[source] std::io::Error),
}

impl SinkError {
    /// Create a construction error for a transport endpoint
    pub fn construction(endpoint: impl Into<String>, source: std::io::Error) -> Self {
        SinkError::Construction {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Wrap a sender failure reported from `send`
    pub fn delivery(source: std::io::Error) -> Self {
        SinkError::Delivery(source)
    }

    /// Wrap a sender failure reported from `sync`
    pub fn sync(source: std::io::Error) -> Self {
        SinkError::Sync(source)
    }
}
