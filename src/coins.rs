//! Comparison and arithmetic over coin collections.
//!
//! Amounts are compared denom by denom, so the order is only partial:
//! `[5 a, 1 b]` and `[1 a, 5 b]` are neither greater nor smaller than each other.

use cosmwasm_std::{Coin, Uint128};

use crate::ContractError;

/// Total amount of `denom` held in `coins`, zero when the denom is absent.
pub fn amount_of(coins: &[Coin], denom: &str) -> Uint128 {
    coins
        .iter()
        .filter(|c| c.denom == denom)
        .fold(Uint128::zero(), |acc, c| acc + c.amount)
}

/// True when every denom of `b` is held by `a` in a strictly larger amount.
/// An empty `b` is dominated by any non-empty `a`; an empty `a` dominates nothing.
pub fn all_gt(a: &[Coin], b: &[Coin]) -> bool {
    if a.is_empty() {
        return false;
    }
    if b.is_empty() {
        return true;
    }
    b.iter().all(|coin| amount_of(a, &coin.denom) > coin.amount)
}

/// True when every coin of `b` is covered by `a`.
pub fn all_gte(a: &[Coin], b: &[Coin]) -> bool {
    b.iter().all(|coin| amount_of(a, &coin.denom) >= coin.amount)
}

/// Sorts by denom, merges duplicates and drops zero amounts.
pub fn normalize(coins: &[Coin]) -> Vec<Coin> {
    let mut out: Vec<Coin> = vec![];
    for coin in coins {
        match out.iter_mut().find(|c| c.denom == coin.denom) {
            Some(existing) => existing.amount += coin.amount,
            None => out.push(coin.clone()),
        }
    }
    out.retain(|c| !c.amount.is_zero());
    out.sort_by(|x, y| x.denom.cmp(&y.denom));
    out
}

/// `a - b`, failing when any denom of `b` is not covered by `a`.
pub fn checked_sub(a: &[Coin], b: &[Coin]) -> Result<Vec<Coin>, ContractError> {
    let mut out = normalize(a);
    for coin in b {
        if coin.amount.is_zero() {
            continue;
        }
        let held = out
            .iter_mut()
            .find(|c| c.denom == coin.denom)
            .ok_or_else(|| ContractError::insufficient_funds(format!("no {} sent", coin.denom)))?;
        let have = held.amount;
        held.amount = have.checked_sub(coin.amount).map_err(|_| {
            ContractError::insufficient_funds(format!(
                "sent {}{}, need {}",
                have, coin.denom, coin
            ))
        })?;
    }
    out.retain(|c| !c.amount.is_zero());
    Ok(out)
}

/// A usable price or bid: non-empty, positive, one entry per denom.
pub fn validate(coins: &[Coin], field: &str) -> Result<(), ContractError> {
    if coins.is_empty() {
        return Err(ContractError::invalid_request(format!("{} is empty", field)));
    }
    for (i, coin) in coins.iter().enumerate() {
        if coin.denom.is_empty() {
            return Err(ContractError::invalid_request(format!(
                "{} has an empty denom",
                field
            )));
        }
        if coin.amount.is_zero() {
            return Err(ContractError::invalid_request(format!(
                "{} must be positive",
                field
            )));
        }
        if coins[..i].iter().any(|c| c.denom == coin.denom) {
            return Err(ContractError::invalid_request(format!(
                "{} repeats denom {}",
                field, coin.denom
            )));
        }
    }
    Ok(())
}

/// Human readable form used in response attributes, e.g. `10nametoken,3uatom`.
pub fn display(coins: &[Coin]) -> String {
    coins
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
