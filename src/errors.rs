/// Error types for Merchant API operations.
///
/// Every message is prefixed with `merchant:` so failures originating here are
/// easy to tell apart from the rest of an application's errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("merchant: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway replied with a body that is not the expected JSON.
    #[error("merchant: failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A notification field does not match its declared type.
    #[error("merchant: failed to parse {field}: {reason}")]
    FieldParse { field: &'static str, reason: String },

    /// The notification was issued for another terminal.
    #[error("merchant: invalid terminal key")]
    BadKey,

    /// The notification token does not match the recomputed one.
    #[error("merchant: invalid token")]
    BadToken,

    /// The base URL cannot have operation paths appended to it.
    #[error("merchant: base URL {0} cannot be a base")]
    InvalidBaseUrl(url::Url),

    #[error("merchant: invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A convenience function was called before [`crate::set_client`].
    #[error("merchant: default client is not configured")]
    NotConfigured,

    #[error("merchant: default client is already configured")]
    AlreadyConfigured,
}

impl Error {
    pub(crate) fn field_parse(field: &'static str, reason: impl std::fmt::Display) -> Self {
        Error::FieldParse {
            field,
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for the bad key / bad token conditions.
    ///
    /// These mean the notification was well formed but not authentic, as
    /// opposed to a payload that could not be parsed at all.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::BadKey | Error::BadToken)
    }
}

/// A specialized `Result` type for Merchant API operations.
pub type Result<T> = std::result::Result<T, Error>;
