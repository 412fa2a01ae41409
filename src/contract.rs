#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, Binary, Coin, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use crate::bank::{AttachedFunds, Bank};
use crate::coins::{self, all_gt, all_gte, display};
use crate::error::ContractError;
use crate::msg::{
    AuctionsResponse, ConfigResponse, ExecuteMsg, InstantiateMsg, NamesResponse, QueryMsg,
    ResolveNameResponse, WhoisResponse,
};
use crate::state::{
    clear_escrow, delete_whois, escrow, has_whois, open_auction_entry, range_auctions,
    range_whois, save_escrow, set_value, update_whois, whois, Config, CONFIG,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:cw-name-auction";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    nonpayable(&info)?;

    let defaults = Config::default();
    let config = Config {
        min_price: msg.min_price.unwrap_or(defaults.min_price),
        bid_window: msg.bid_window.unwrap_or(defaults.bid_window),
    };
    coins::validate(&config.min_price, "min_price")?;
    if config.bid_window == 0 {
        return Err(ContractError::invalid_request("bid_window must be positive"));
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", info.sender)
        .add_attribute("min_price", display(&config.min_price))
        .add_attribute("bid_window", config.bid_window.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    msg.validate()?;
    match msg {
        ExecuteMsg::SetName { name, value } => execute_set_name(deps, info, name, value),
        ExecuteMsg::BuyName { name, bid } => execute_buy_name(deps, info, name, bid),
        ExecuteMsg::DeleteName { name } => execute_delete_name(deps, info, name),
        ExecuteMsg::SetAuction { name, price } => execute_set_auction(deps, info, name, price),
        ExecuteMsg::BidName { name, bid } => execute_bid_name(deps, env, info, name, bid),
        ExecuteMsg::ClaimName { name } => execute_claim_name(deps, env, info, name),
    }
}

pub fn execute_set_name(
    deps: DepsMut,
    info: MessageInfo,
    name: String,
    value: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    if !whois(deps.storage, &name)?.is_owned_by(&info.sender) {
        return Err(ContractError::unauthorized("Incorrect Owner"));
    }
    set_value(deps.storage, &name, value.clone())?;

    Ok(Response::new()
        .add_attribute("action", "set_name")
        .add_attribute("name", name)
        .add_attribute("sender", info.sender)
        .add_attribute("value", value))
}

pub fn execute_buy_name(
    deps: DepsMut,
    info: MessageInfo,
    name: String,
    bid: Vec<Coin>,
) -> Result<Response, ContractError> {
    let record = whois(deps.storage, &name)?;
    // ties are accepted
    if all_gt(&record.price, &bid) {
        return Err(ContractError::insufficient_funds("Bid not high enough"));
    }

    let mut bank = AttachedFunds::new(&info);
    match &record.owner {
        Some(owner) => bank.transfer(&info.sender, owner, &bid)?,
        // nobody to pay, the bid stays with the contract
        None => bank.debit(&info.sender, &bid)?,
    }

    let buyer = info.sender.clone();
    update_whois(deps.storage, &name, |w| {
        w.owner = Some(buyer);
        w.price = bid.clone();
    })?;

    let mut res = Response::new()
        .add_messages(bank.into_messages())
        .add_attribute("action", "buy_name")
        .add_attribute("name", name)
        .add_attribute("sender", info.sender)
        .add_attribute("bid", display(&bid));
    if let Some(previous) = record.owner {
        res = res.add_attribute("previous_owner", previous);
    }
    Ok(res)
}

pub fn execute_delete_name(
    deps: DepsMut,
    info: MessageInfo,
    name: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    if !has_whois(deps.storage, &name) {
        return Err(ContractError::NameNotFound { name });
    }
    if !whois(deps.storage, &name)?.is_owned_by(&info.sender) {
        return Err(ContractError::unauthorized("Incorrect Owner"));
    }
    delete_whois(deps.storage, &name)?;

    Ok(Response::new()
        .add_attribute("action", "delete_name")
        .add_attribute("name", name)
        .add_attribute("sender", info.sender))
}

pub fn execute_set_auction(
    deps: DepsMut,
    info: MessageInfo,
    name: String,
    price: Vec<Coin>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    if !has_whois(deps.storage, &name) {
        return Err(ContractError::NameNotFound { name });
    }
    let record = whois(deps.storage, &name)?;
    if !record.is_owned_by(&info.sender) {
        return Err(ContractError::unauthorized("Incorrect Owner"));
    }
    if record.is_auction {
        return Err(ContractError::unauthorized("Auction already started"));
    }

    update_whois(deps.storage, &name, |w| {
        w.is_auction = true;
        w.price = price.clone();
    })?;
    open_auction_entry(deps.storage, &name)?;

    Ok(Response::new()
        .add_attribute("action", "set_auction")
        .add_attribute("name", name)
        .add_attribute("sender", info.sender)
        .add_attribute("price", display(&price)))
}

pub fn execute_bid_name(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    name: String,
    bid: Vec<Coin>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let record = whois(deps.storage, &name)?;
    if !record.is_auction {
        return Err(ContractError::unauthorized("Cannot bid, no auction is open"));
    }
    if record.is_owned_by(&info.sender) {
        return Err(ContractError::unauthorized("Owner cannot bid"));
    }
    if all_gte(&record.price, &bid) {
        return Err(ContractError::insufficient_funds("Bid not high enough"));
    }

    let height = env.block.height;
    let mut bank = AttachedFunds::new(&info);
    let mut refund = None;
    if record.bid_height > 0 {
        if height.saturating_sub(record.bid_height) >= config.bid_window {
            return Err(ContractError::unauthorized("Auction is over"));
        }
        // the previous bidder gets back exactly what they left with the contract
        if let Some(previous) = &record.bid_user {
            let held = escrow(deps.storage, &name)?;
            bank.credit(previous, &held)?;
            refund = Some((previous.clone(), held));
        }
    }
    bank.debit(&info.sender, &bid)?;
    save_escrow(deps.storage, &name, &bid)?;

    let bidder = info.sender.clone();
    update_whois(deps.storage, &name, |w| {
        w.price = bid.clone();
        w.bid_user = Some(bidder);
        w.bid_height = height;
    })?;

    let mut res = Response::new()
        .add_messages(bank.into_messages())
        .add_attribute("action", "bid_name")
        .add_attribute("name", name)
        .add_attribute("sender", info.sender)
        .add_attribute("bid", display(&bid))
        .add_attribute("bid_height", height.to_string());
    if let Some((previous, held)) = refund {
        res = res
            .add_attribute("refund_to", previous)
            .add_attribute("refund", display(&held));
    }
    Ok(res)
}

pub fn execute_claim_name(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    name: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    if !has_whois(deps.storage, &name) {
        return Err(ContractError::NameNotFound { name });
    }
    let config = CONFIG.load(deps.storage)?;
    let record = whois(deps.storage, &name)?;
    // bid_height is 0 when nobody bid, so such auctions end once the chain passes the window
    if env.block.height.saturating_sub(record.bid_height) < config.bid_window {
        return Err(ContractError::unauthorized("Auction is not over"));
    }
    let is_bidder = record.bid_user.as_ref() == Some(&info.sender);
    if !is_bidder && !record.is_owned_by(&info.sender) {
        return Err(ContractError::unauthorized("Incorrect Owner"));
    }

    let claimed = update_whois(deps.storage, &name, |w| {
        w.bid_height = 0;
        // without a bidder the name stays with its owner
        if let Some(bidder) = w.bid_user.clone() {
            w.owner = Some(bidder);
        }
        w.is_auction = false;
    })?;
    // the winning bid stays with the contract
    clear_escrow(deps.storage, &name);

    let mut res = Response::new()
        .add_attribute("action", "claim_name")
        .add_attribute("name", name)
        .add_attribute("sender", info.sender);
    if let Some(owner) = claimed.owner {
        res = res.add_attribute("new_owner", owner);
    }
    Ok(res)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::ResolveName { name } => to_binary(&query_resolve(deps, name)?),
        QueryMsg::Whois { name } => to_binary(&query_whois(deps, name)?),
        QueryMsg::Names { start_after, limit } => {
            to_binary(&query_names(deps, start_after, limit)?)
        }
        QueryMsg::Auctions { start_after, limit } => {
            to_binary(&query_auctions(deps, start_after, limit)?)
        }
        QueryMsg::Config {} => to_binary(&query_config(deps)?),
    }
}

fn query_resolve(deps: Deps, name: String) -> StdResult<ResolveNameResponse> {
    let value = whois(deps.storage, &name)?.value;
    Ok(ResolveNameResponse { value })
}

fn query_whois(deps: Deps, name: String) -> StdResult<WhoisResponse> {
    let record = whois(deps.storage, &name)?;
    Ok(WhoisResponse::new(name, record))
}

fn query_names(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<NamesResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let names = range_whois(deps.storage, start_after.as_deref())
        .take(limit)
        .map(|item| item.map(|(name, _)| name))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(NamesResponse { names })
}

fn query_auctions(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<AuctionsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let auctions = range_auctions(deps.storage, start_after.as_deref())
        .take(limit)
        .map(|item| item.map(|(_, auction)| auction))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(AuctionsResponse { auctions })
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    Ok(CONFIG.load(deps.storage)?.into())
}
