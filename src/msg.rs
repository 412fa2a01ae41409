use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{from_slice, Addr, Coin};

use crate::coins;
use crate::state::{Auction, Config, Whois};
use crate::ContractError;

#[cw_serde]
pub struct InstantiateMsg {
    /// Price of names nobody has bought yet, defaults to 1nametoken
    pub min_price: Option<Vec<Coin>>,
    /// Blocks an auction stays open after the last bid, defaults to 100
    pub bid_window: Option<u64>,
}

/// The signer of each message (`info.sender`) is the owner, buyer or bidder.
#[cw_serde]
pub enum ExecuteMsg {
    /// Changes the value a name resolves to. Owner only.
    SetName { name: String, value: String },
    /// Buys a name for at least its current price. Attach `bid` as funds.
    BuyName { name: String, bid: Vec<Coin> },
    /// Removes a name and its auction entry. Owner only.
    DeleteName { name: String },
    /// Opens an auction with `price` as the starting price. Owner only.
    SetAuction { name: String, price: Vec<Coin> },
    /// Outbids the current price. Attach `bid` as funds; the previous bidder is refunded.
    BidName { name: String, bid: Vec<Coin> },
    /// Hands the name to the highest bidder once the bid window has passed.
    ClaimName { name: String },
}

pub const SET_NAME: &str = "nameservice/SetName";
pub const BUY_NAME: &str = "nameservice/BuyName";
pub const DELETE_NAME: &str = "nameservice/DeleteName";
pub const SET_AUCTION: &str = "nameservice/SetAuction";
pub const BID_NAME: &str = "nameservice/BidName";
pub const CLAIM_NAME: &str = "nameservice/ClaimName";

/// Message kinds this contract registers with a type-tagged router.
pub const MSG_KINDS: [&str; 6] = [
    SET_NAME,
    BUY_NAME,
    DELETE_NAME,
    SET_AUCTION,
    BID_NAME,
    CLAIM_NAME,
];

impl ExecuteMsg {
    pub fn kind(&self) -> &'static str {
        match self {
            ExecuteMsg::SetName { .. } => SET_NAME,
            ExecuteMsg::BuyName { .. } => BUY_NAME,
            ExecuteMsg::DeleteName { .. } => DELETE_NAME,
            ExecuteMsg::SetAuction { .. } => SET_AUCTION,
            ExecuteMsg::BidName { .. } => BID_NAME,
            ExecuteMsg::ClaimName { .. } => CLAIM_NAME,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ExecuteMsg::SetName { name, .. }
            | ExecuteMsg::BuyName { name, .. }
            | ExecuteMsg::DeleteName { name }
            | ExecuteMsg::SetAuction { name, .. }
            | ExecuteMsg::BidName { name, .. }
            | ExecuteMsg::ClaimName { name } => name.as_str(),
        }
    }

    /// Decodes a message routed by kind, e.g. `nameservice/BuyName` plus its JSON body.
    ///
    /// Only this tag-routed path yields `ContractError::UnrecognizedRequest`. The
    /// `execute` entry point takes an already decoded `ExecuteMsg`, so an unknown
    /// variant there fails earlier as a JSON parse error from the host.
    pub fn decode(kind: &str, payload: &[u8]) -> Result<Self, ContractError> {
        if !MSG_KINDS.iter().any(|k| *k == kind) {
            return Err(ContractError::UnrecognizedRequest {
                kind: kind.to_string(),
            });
        }
        let msg: ExecuteMsg = from_slice(payload)?;
        if msg.kind() != kind {
            return Err(ContractError::invalid_request(format!(
                "payload is a {}, routed as {}",
                msg.kind(),
                kind
            )));
        }
        Ok(msg)
    }

    /// Stateless checks, run before anything is read from storage.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.name().is_empty() {
            return Err(ContractError::invalid_request("name cannot be empty"));
        }
        match self {
            ExecuteMsg::SetName { value, .. } if value.is_empty() => {
                Err(ContractError::invalid_request("value cannot be empty"))
            }
            ExecuteMsg::BuyName { bid, .. } | ExecuteMsg::BidName { bid, .. } => {
                coins::validate(bid, "bid")
            }
            ExecuteMsg::SetAuction { price, .. } => coins::validate(price, "price"),
            _ => Ok(()),
        }
    }
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    // ResolveName returns the value a name resolves to
    #[returns(ResolveNameResponse)]
    ResolveName { name: String },
    #[returns(WhoisResponse)]
    Whois { name: String },
    #[returns(NamesResponse)]
    Names {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(AuctionsResponse)]
    Auctions {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(ConfigResponse)]
    Config {},
}

#[cw_serde]
pub struct ResolveNameResponse {
    pub value: String,
}

#[cw_serde]
pub struct WhoisResponse {
    pub name: String,
    pub value: String,
    pub owner: Option<Addr>,
    pub price: Vec<Coin>,
    pub is_auction: bool,
    pub bid_height: u64,
    pub bid_user: Option<Addr>,
}

impl WhoisResponse {
    pub fn new(name: String, record: Whois) -> Self {
        WhoisResponse {
            name,
            value: record.value,
            owner: record.owner,
            price: record.price,
            is_auction: record.is_auction,
            bid_height: record.bid_height,
            bid_user: record.bid_user,
        }
    }
}

#[cw_serde]
pub struct NamesResponse {
    pub names: Vec<String>,
}

#[cw_serde]
pub struct AuctionsResponse {
    pub auctions: Vec<Auction>,
}

#[cw_serde]
pub struct ConfigResponse {
    pub min_price: Vec<Coin>,
    pub bid_window: u64,
}

impl From<Config> for ConfigResponse {
    fn from(config: Config) -> Self {
        ConfigResponse {
            min_price: config.min_price,
            bid_window: config.bid_window,
        }
    }
}
