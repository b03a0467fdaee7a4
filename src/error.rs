use alloc::string::String;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The corpus cannot produce a usable model.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("the model has not been trained")]
    ModelNotTrained,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
