use cosmwasm_schema::cw_serde;
use cosmwasm_std::{coins, Addr, Coin, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Item, Map};

pub const DEFAULT_PRICE_DENOM: &str = "nametoken";
pub const DEFAULT_BID_WINDOW: u64 = 100;

#[cw_serde]
pub struct Config {
    /// Price of a name that was never owned.
    pub min_price: Vec<Coin>,
    /// Blocks after the last accepted bid during which the auction stays open.
    pub bid_window: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_price: coins(1, DEFAULT_PRICE_DENOM),
            bid_window: DEFAULT_BID_WINDOW,
        }
    }
}

/// All metadata of a name.
#[cw_serde]
pub struct Whois {
    pub value: String,
    /// `None` until the name is bought for the first time.
    pub owner: Option<Addr>,
    /// Last purchase price, start price or highest bid.
    pub price: Vec<Coin>,
    pub is_auction: bool,
    /// Height of the last accepted bid, 0 when no bid was placed.
    pub bid_height: u64,
    pub bid_user: Option<Addr>,
}

impl Whois {
    /// The record every unclaimed name reads as.
    pub fn new(min_price: Vec<Coin>) -> Self {
        Whois {
            value: String::new(),
            owner: None,
            price: min_price,
            is_auction: false,
            bid_height: 0,
            bid_user: None,
        }
    }

    pub fn is_owned_by(&self, addr: &Addr) -> bool {
        self.owner.as_ref() == Some(addr)
    }
}

/// Index entry for an open auction.
///
/// This is a snapshot of the record taken when the auction opened. Later bids
/// and claims do not touch it; read the `Whois` for live bid state.
#[cw_serde]
pub struct Auction {
    pub name: String,
    pub bid_height: u64,
    pub bid_user: Option<Addr>,
}

impl Auction {
    pub fn snapshot(name: &str, record: &Whois) -> Self {
        Auction {
            name: name.to_string(),
            bid_height: record.bid_height,
            bid_user: record.bid_user.clone(),
        }
    }
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const WHOIS: Map<&str, Whois> = Map::new("whois");
pub const AUCTIONS: Map<&str, Auction> = Map::new("auctions");
/// Funds the current highest bidder of a name left with the contract.
pub const ESCROWS: Map<&str, Vec<Coin>> = Map::new("escrows");

/// Stored record for `name`, or the unclaimed default when there is none.
pub fn whois(storage: &dyn Storage, name: &str) -> StdResult<Whois> {
    match WHOIS.may_load(storage, name)? {
        Some(record) => Ok(record),
        None => Ok(Whois::new(CONFIG.load(storage)?.min_price)),
    }
}

/// Persists `record`. Records without an owner are never written.
pub fn save_whois(storage: &mut dyn Storage, name: &str, record: &Whois) -> StdResult<()> {
    if record.owner.is_none() {
        return Ok(());
    }
    WHOIS.save(storage, name, record)
}

/// Loads the record (default if absent), applies `action` and saves the result.
/// Every write of a `Whois` goes through here.
pub fn update_whois<F>(storage: &mut dyn Storage, name: &str, action: F) -> StdResult<Whois>
where
    F: FnOnce(&mut Whois),
{
    let mut record = whois(storage, name)?;
    action(&mut record);
    save_whois(storage, name, &record)?;
    Ok(record)
}

pub fn set_value(storage: &mut dyn Storage, name: &str, value: String) -> StdResult<()> {
    update_whois(storage, name, |w| w.value = value).map(|_| ())
}

pub fn set_owner(storage: &mut dyn Storage, name: &str, owner: Addr) -> StdResult<()> {
    update_whois(storage, name, |w| w.owner = Some(owner)).map(|_| ())
}

pub fn set_price(storage: &mut dyn Storage, name: &str, price: Vec<Coin>) -> StdResult<()> {
    update_whois(storage, name, |w| w.price = price).map(|_| ())
}

pub fn set_auction_flag(storage: &mut dyn Storage, name: &str, open: bool) -> StdResult<()> {
    update_whois(storage, name, |w| w.is_auction = open).map(|_| ())
}

pub fn set_bid_height(storage: &mut dyn Storage, name: &str, height: u64) -> StdResult<()> {
    update_whois(storage, name, |w| w.bid_height = height).map(|_| ())
}

pub fn set_bid_user(storage: &mut dyn Storage, name: &str, bidder: Addr) -> StdResult<()> {
    update_whois(storage, name, |w| w.bid_user = Some(bidder)).map(|_| ())
}

pub fn has_whois(storage: &dyn Storage, name: &str) -> bool {
    WHOIS.has(storage, name)
}

pub fn has_owner(storage: &dyn Storage, name: &str) -> StdResult<bool> {
    Ok(whois(storage, name)?.owner.is_some())
}

/// Removes the record and its escrow, and its auction entry while the auction flag is set.
pub fn delete_whois(storage: &mut dyn Storage, name: &str) -> StdResult<()> {
    if whois(storage, name)?.is_auction {
        AUCTIONS.remove(storage, name);
    }
    ESCROWS.remove(storage, name);
    WHOIS.remove(storage, name);
    Ok(())
}

/// Amount held for the current bidder of `name`, empty when nothing is held.
pub fn escrow(storage: &dyn Storage, name: &str) -> StdResult<Vec<Coin>> {
    Ok(ESCROWS.may_load(storage, name)?.unwrap_or_default())
}

pub fn save_escrow(storage: &mut dyn Storage, name: &str, amount: &[Coin]) -> StdResult<()> {
    ESCROWS.save(storage, name, &amount.to_vec())
}

pub fn clear_escrow(storage: &mut dyn Storage, name: &str) {
    ESCROWS.remove(storage, name);
}

/// Writes the auction index entry for an owned name.
pub fn open_auction_entry(storage: &mut dyn Storage, name: &str) -> StdResult<()> {
    let record = whois(storage, name)?;
    if record.owner.is_none() {
        return Ok(());
    }
    AUCTIONS.save(storage, name, &Auction::snapshot(name, &record))
}

/// Stored records in ascending name order, starting after `start_after`.
pub fn range_whois<'a>(
    storage: &'a dyn Storage,
    start_after: Option<&'a str>,
) -> Box<dyn Iterator<Item = StdResult<(String, Whois)>> + 'a> {
    WHOIS.range(
        storage,
        start_after.map(Bound::exclusive),
        None,
        Order::Ascending,
    )
}

pub fn range_auctions<'a>(
    storage: &'a dyn Storage,
    start_after: Option<&'a str>,
) -> Box<dyn Iterator<Item = StdResult<(String, Auction)>> + 'a> {
    AUCTIONS.range(
        storage,
        start_after.map(Bound::exclusive),
        None,
        Order::Ascending,
    )
}
