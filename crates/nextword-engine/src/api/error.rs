//! Error types for the engine.

/// Problems with the app configuration. Fatal at init.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The sentence to reveal has no words.
    #[error("sentence must contain at least one word")]
    EmptySentence,

    /// A colour string could not be parsed.
    #[error("invalid colour: {0:?}")]
    InvalidColor(String),

    /// The JSON config did not deserialize.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures talking to the predictor service.
/// All of these are logged and swallowed; the sequencer stalls until retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictorError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("predictor returned HTTP {code}: {text}")]
    Status { code: u16, text: String },

    /// The response body was not the expected shape.
    #[error("malformed predictor response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for PredictorError {
    fn from(err: serde_json::Error) -> Self {
        PredictorError::Decode(err.to_string())
    }
}
