use poem::error::ResponseError;
use poem::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum GoneError {
    /// There is no active 410 page under the root.
    #[error("{0}")]
    PageNotFound(String),

    /// The 410 page forwards to a page which does not exist or is not published.
    #[error("{0}")]
    ForwardPageNotFound(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ResponseError for GoneError {
    fn status(&self) -> StatusCode {
        match self {
            Self::PageNotFound(_) | Self::ForwardPageNotFound(_) => StatusCode::NOT_FOUND,
            Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
