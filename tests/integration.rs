//! Runs the contract inside cw-multi-test, so attached funds, refunds and payouts
//! move through a real bank module and failed messages are rolled back.

use cosmwasm_std::{coins, Addr, Coin, Empty};
use cw_multi_test::{App, Contract, ContractWrapper, Executor};

use cw_name_auction::contract::{execute, instantiate, query};
use cw_name_auction::msg::{
    AuctionsResponse, ExecuteMsg, InstantiateMsg, QueryMsg, WhoisResponse,
};
use cw_name_auction::ContractError;

const DENOM: &str = "nametoken";
const NAME: &str = "cosmos";

fn name_auction() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query))
}

struct Suite {
    app: App,
    contract: Addr,
}

impl Suite {
    fn new() -> Self {
        let mut app = App::new(|router, _, storage| {
            for who in ["alice", "bob", "carol"] {
                router
                    .bank
                    .init_balance(storage, &Addr::unchecked(who), coins(100, DENOM))
                    .unwrap();
            }
        });
        let code_id = app.store_code(name_auction());
        let contract = app
            .instantiate_contract(
                code_id,
                Addr::unchecked("creator"),
                &InstantiateMsg {
                    min_price: None,
                    bid_window: None,
                },
                &[],
                "name-auction",
                None,
            )
            .unwrap();
        Suite { app, contract }
    }

    fn at(&mut self, height: u64) -> &mut Self {
        self.app.update_block(|block| block.height = height);
        self
    }

    fn exec(
        &mut self,
        sender: &str,
        msg: ExecuteMsg,
        funds: &[Coin],
    ) -> Result<(), ContractError> {
        self.app
            .execute_contract(Addr::unchecked(sender), self.contract.clone(), &msg, funds)
            .map(|_| ())
            .map_err(|err| err.downcast().unwrap())
    }

    fn buy(&mut self, sender: &str, amount: u128) -> Result<(), ContractError> {
        let msg = ExecuteMsg::BuyName {
            name: NAME.to_string(),
            bid: coins(amount, DENOM),
        };
        self.exec(sender, msg, &coins(amount, DENOM))
    }

    fn open_auction(&mut self, sender: &str, price: u128) -> Result<(), ContractError> {
        let msg = ExecuteMsg::SetAuction {
            name: NAME.to_string(),
            price: coins(price, DENOM),
        };
        self.exec(sender, msg, &[])
    }

    fn bid(&mut self, sender: &str, amount: u128, attached: u128) -> Result<(), ContractError> {
        let msg = ExecuteMsg::BidName {
            name: NAME.to_string(),
            bid: coins(amount, DENOM),
        };
        self.exec(sender, msg, &coins(attached, DENOM))
    }

    fn claim(&mut self, sender: &str) -> Result<(), ContractError> {
        let msg = ExecuteMsg::ClaimName {
            name: NAME.to_string(),
        };
        self.exec(sender, msg, &[])
    }

    fn balance(&self, who: &str) -> u128 {
        self.app
            .wrap()
            .query_balance(who, DENOM)
            .unwrap()
            .amount
            .u128()
    }

    fn contract_balance(&self) -> u128 {
        self.balance(self.contract.as_str())
    }

    fn whois(&self) -> WhoisResponse {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.contract,
                &QueryMsg::Whois {
                    name: NAME.to_string(),
                },
            )
            .unwrap()
    }

    fn auctions(&self) -> AuctionsResponse {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.contract,
                &QueryMsg::Auctions {
                    start_after: None,
                    limit: None,
                },
            )
            .unwrap()
    }
}

#[test]
fn first_purchase_is_held_by_contract() {
    let mut suite = Suite::new();
    suite.buy("alice", 10).unwrap();

    assert_eq!(suite.balance("alice"), 90);
    assert_eq!(suite.contract_balance(), 10);
    let whois = suite.whois();
    assert_eq!(whois.owner, Some(Addr::unchecked("alice")));
    assert_eq!(whois.price, coins(10, DENOM));
}

#[test]
fn purchase_pays_current_owner() {
    let mut suite = Suite::new();
    suite.buy("alice", 10).unwrap();
    suite.buy("bob", 20).unwrap();

    assert_eq!(suite.balance("alice"), 110);
    assert_eq!(suite.balance("bob"), 80);
    assert_eq!(suite.contract_balance(), 10);
    assert_eq!(suite.whois().owner, Some(Addr::unchecked("bob")));
}

#[test]
fn rejected_purchase_moves_nothing() {
    let mut suite = Suite::new();
    suite.buy("alice", 10).unwrap();

    let err = suite.buy("bob", 5).unwrap_err();
    assert!(matches!(err, ContractError::InsufficientFunds { .. }));
    assert_eq!(suite.balance("bob"), 100);
    assert_eq!(suite.balance("alice"), 90);
    assert_eq!(suite.whois().owner, Some(Addr::unchecked("alice")));
}

#[test]
fn auction_refunds_outbid_bidder_and_hands_over_name() {
    let mut suite = Suite::new();
    suite.at(1).buy("alice", 1).unwrap();
    suite.open_auction("alice", 5).unwrap();

    suite.at(5).bid("bob", 10, 10).unwrap();
    assert_eq!(suite.balance("bob"), 90);

    suite.at(20).bid("carol", 15, 15).unwrap();
    assert_eq!(suite.balance("bob"), 100);
    assert_eq!(suite.balance("carol"), 85);
    assert_eq!(suite.contract_balance(), 1 + 15);

    let whois = suite.whois();
    assert_eq!(whois.price, coins(15, DENOM));
    assert_eq!(whois.bid_user, Some(Addr::unchecked("carol")));
    assert_eq!(whois.bid_height, 20);

    let err = suite.at(119).claim("carol").unwrap_err();
    assert!(matches!(err, ContractError::Unauthorized { .. }));

    suite.at(120).claim("carol").unwrap();
    let whois = suite.whois();
    assert_eq!(whois.owner, Some(Addr::unchecked("carol")));
    assert!(!whois.is_auction);
    assert_eq!(whois.bid_height, 0);
    assert_eq!(suite.balance("carol"), 85);
}

#[test]
fn late_bid_is_rejected_and_refunds_nothing() {
    let mut suite = Suite::new();
    suite.at(1).buy("alice", 1).unwrap();
    suite.open_auction("alice", 5).unwrap();
    suite.at(10).bid("bob", 10, 10).unwrap();

    let err = suite.at(110).bid("carol", 50, 50).unwrap_err();
    assert!(matches!(err, ContractError::Unauthorized { .. }));
    assert_eq!(suite.balance("bob"), 90);
    assert_eq!(suite.balance("carol"), 100);
}

#[test]
fn excess_attached_funds_are_returned() {
    let mut suite = Suite::new();
    suite.at(1).buy("alice", 1).unwrap();
    suite.open_auction("alice", 5).unwrap();

    suite.at(2).bid("bob", 10, 13).unwrap();
    assert_eq!(suite.balance("bob"), 90);

    let err = suite.at(3).bid("carol", 20, 19).unwrap_err();
    assert!(matches!(err, ContractError::InsufficientFunds { .. }));
    assert_eq!(suite.balance("carol"), 100);
    assert_eq!(suite.balance("bob"), 90);
}

#[test]
fn delete_by_stranger_keeps_auction_entry() {
    let mut suite = Suite::new();
    suite.buy("alice", 1).unwrap();
    suite.open_auction("alice", 5).unwrap();

    let delete = ExecuteMsg::DeleteName {
        name: NAME.to_string(),
    };
    let err = suite.exec("bob", delete.clone(), &[]).unwrap_err();
    assert!(matches!(err, ContractError::Unauthorized { .. }));
    assert_eq!(suite.auctions().auctions.len(), 1);
    assert!(suite.whois().is_auction);

    suite.exec("alice", delete, &[]).unwrap();
    assert!(suite.auctions().auctions.is_empty());
    assert_eq!(suite.whois().owner, None);
}

#[test]
fn purchase_during_auction_does_not_inflate_refund() {
    let mut suite = Suite::new();
    suite.at(1).buy("alice", 1).unwrap();
    suite.open_auction("alice", 5).unwrap();
    suite.at(2).bid("bob", 10, 10).unwrap();

    suite.at(3).buy("carol", 40).unwrap();
    assert_eq!(suite.balance("carol"), 60);
    assert_eq!(suite.balance("alice"), 139);

    suite.at(4).bid("alice", 41, 41).unwrap();
    assert_eq!(suite.balance("bob"), 100);
    assert_eq!(suite.balance("alice"), 98);
    assert_eq!(suite.contract_balance(), 1 + 41);
}

#[test]
fn underfunded_purchase_of_owned_name_moves_nothing() {
    let mut suite = Suite::new();
    suite.buy("alice", 10).unwrap();

    let msg = ExecuteMsg::BuyName {
        name: NAME.to_string(),
        bid: coins(10, DENOM),
    };
    let err = suite.exec("bob", msg, &coins(8, DENOM)).unwrap_err();
    assert!(matches!(err, ContractError::InsufficientFunds { .. }));
    assert_eq!(suite.balance("alice"), 90);
    assert_eq!(suite.balance("bob"), 100);
    assert_eq!(suite.contract_balance(), 10);
    assert_eq!(suite.whois().owner, Some(Addr::unchecked("alice")));
}
