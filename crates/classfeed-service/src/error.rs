use thiserror::Error;

/// Service layer errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("unable to decode calendar document: {0}")]
    Decode(#[from] classfeed_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] classfeed_core::error::CoreError),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
