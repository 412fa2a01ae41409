use cosmwasm_std::StdError;
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("Name does not exist: {name}")]
    NameNotFound { name: String },

    #[error("Insufficient funds: {reason}")]
    InsufficientFunds { reason: String },

    #[error("Unrecognized nameservice Msg type: {kind}")]
    UnrecognizedRequest { kind: String },

    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },
}

impl ContractError {
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        ContractError::Unauthorized {
            reason: reason.into(),
        }
    }

    pub fn insufficient_funds(reason: impl Into<String>) -> Self {
        ContractError::InsufficientFunds {
            reason: reason.into(),
        }
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        ContractError::InvalidRequest {
            reason: reason.into(),
        }
    }
}
