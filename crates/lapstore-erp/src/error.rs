use thiserror::Error;

#[derive(Debug, Error)]
pub enum ErpError {
    /// Network or TLS failure from the underlying HTTP client, after retries.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The ERP answered 2xx but the body is not an item-list envelope.
    #[error("malformed payload from {url}: {reason}")]
    MalformedPayload { url: String, reason: String },

    /// A numeric field on a raw item could not be parsed. The item is
    /// dropped from listings; the rest of the catalog is unaffected.
    #[error("data quality error on item {item_id}: {field} is not a number ({value})")]
    DataQuality {
        item_id: String,
        field: &'static str,
        value: String,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
