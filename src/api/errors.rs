use derive_more::{Display, Error};

use crate::consts;

/// Failures answered to the client. The HTTP status of each variant is set
/// in the server layer.
#[derive(Debug, Display, Error, PartialEq)]
pub enum ApiError {
    /// Login input with a wrong shape
    #[display("{}", consts::MSG_VALIDATION_FAILS)]
    ValidationFails,
    /// Registration input with a wrong shape
    #[display("{}", consts::MSG_VALIDATION_FAILS)]
    InvalidUserData,
    #[display("{}", consts::MSG_USER_ALREADY_EXISTS)]
    UserAlreadyExists,
    #[display("{}", consts::MSG_USER_NOT_FOUND)]
    UserNotFound,
    #[display("{}", consts::MSG_PASSWORD_MISMATCH)]
    PasswordMismatch,
    #[display("{}", consts::MSG_TOKEN_NOT_PROVIDED)]
    MissingToken,
    #[display("{}", consts::MSG_TOKEN_INVALID)]
    InvalidToken,
    #[display("{}", consts::MSG_NOT_FOUND)]
    UrlNotFound,
    #[display("{}", consts::MSG_INTERNAL_ERROR)]
    Internal(#[error(not(source))] String),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(format!("{err:#}"))
    }
}
