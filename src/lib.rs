pub mod bank;
pub mod coins;
pub mod contract;
mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
