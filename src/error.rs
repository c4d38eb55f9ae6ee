//! Error type shared by the binding, codecs, and location backends.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Error returned when reading, writing, or applying a query parameter.
#[derive(Debug, thiserror::Error)]
pub enum QueryStateError {
    /// The URL carried a value for the parameter that is not valid JSON for `T`.
    #[error("failed to decode query parameter `{param}`: {source}")]
    Decode {
        param: String,
        #[source]
        source: serde_json::Error,
    },
    /// The bound value could not be serialized to JSON.
    #[error("failed to encode query parameter `{param}`: {source}")]
    Encode {
        param: String,
        #[source]
        source: serde_json::Error,
    },
    /// A plain-text parameter value was rejected by `FromStr`.
    #[error("invalid value {value:?} for query parameter `{param}`: {message}")]
    Parse {
        param: String,
        value: String,
        message: String,
    },
    /// A browser API call threw.
    #[error("browser api error: {0}")]
    Browser(String),
}

impl QueryStateError {
    /// Name of the query parameter involved, if the error is tied to one.
    #[must_use]
    pub fn param(&self) -> Option<&str> {
        match self {
            Self::Decode { param, .. } | Self::Encode { param, .. } | Self::Parse { param, .. } => {
                Some(param)
            }
            Self::Browser(_) => None,
        }
    }
}
