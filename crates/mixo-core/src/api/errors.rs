use crate::api::envelope::ApiOperation;
use crate::errors::MixoError;

/// Internal failure of a gateway call, before it is folded into an envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Connection failed: {message}")]
    Transport { message: String },

    #[error("Server rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid response body: {message}")]
    Decode { message: String },

    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    #[error("Failed to build HTTP client: {message}")]
    ClientBuild { message: String },
}

impl ApiError {
    /// Message safe to show to a user for a failed `operation`.
    ///
    /// Transport failures get a generic connection message; everything else
    /// gets the operation-specific message. Server detail is never included.
    pub fn user_message(&self, operation: ApiOperation) -> String {
        match self {
            ApiError::Transport { .. } => {
                "Connection error: unable to reach the server".to_string()
            }
            _ => operation.failure_message().to_string(),
        }
    }

    pub(crate) fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode {
                message: error.to_string(),
            }
        } else {
            ApiError::Transport {
                message: error.to_string(),
            }
        }
    }
}

impl MixoError for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Transport { .. } => "API_TRANSPORT_ERROR",
            ApiError::Rejected { .. } => "API_REJECTED",
            ApiError::Decode { .. } => "API_DECODE_ERROR",
            ApiError::InvalidHeader { .. } => "API_INVALID_HEADER",
            ApiError::ClientBuild { .. } => "API_CLIENT_BUILD_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, ApiError::InvalidHeader { .. })
    }
}
