use cosmwasm_std::{Addr, BankMsg, Coin, MessageInfo};

use crate::coins::{checked_sub, display, normalize};
use crate::ContractError;

/// Fund movements a handler may request. Every method fails with
/// `ContractError::InsufficientFunds` when the debited side cannot cover `amount`.
pub trait Bank {
    fn transfer(&mut self, from: &Addr, to: &Addr, amount: &[Coin]) -> Result<(), ContractError>;
    fn debit(&mut self, account: &Addr, amount: &[Coin]) -> Result<(), ContractError>;
    fn credit(&mut self, account: &Addr, amount: &[Coin]) -> Result<(), ContractError>;
}

/// Bank over the funds the signer attached to the message.
///
/// Debits draw from `info.funds`, which the chain has already moved into the
/// contract; credits become `BankMsg::Send` from the contract. Whatever is left of
/// the attached funds goes back to the signer in `into_messages`.
pub struct AttachedFunds {
    sender: Addr,
    available: Vec<Coin>,
    messages: Vec<BankMsg>,
}

impl AttachedFunds {
    pub fn new(info: &MessageInfo) -> Self {
        AttachedFunds {
            sender: info.sender.clone(),
            available: normalize(&info.funds),
            messages: vec![],
        }
    }

    /// Pending sends, followed by the change returned to the signer.
    pub fn into_messages(mut self) -> Vec<BankMsg> {
        if !self.available.is_empty() {
            self.messages.push(BankMsg::Send {
                to_address: self.sender.to_string(),
                amount: self.available,
            });
        }
        self.messages
    }
}

impl Bank for AttachedFunds {
    fn transfer(&mut self, from: &Addr, to: &Addr, amount: &[Coin]) -> Result<(), ContractError> {
        self.debit(from, amount)?;
        self.credit(to, amount)
    }

    fn debit(&mut self, account: &Addr, amount: &[Coin]) -> Result<(), ContractError> {
        if *account != self.sender {
            return Err(ContractError::unauthorized(format!(
                "cannot debit {}, only the signer's funds are attached",
                account
            )));
        }
        match checked_sub(&self.available, amount) {
            Ok(left) => {
                self.available = left;
                Ok(())
            }
            Err(_) => Err(ContractError::insufficient_funds(format!(
                "attached [{}], need [{}]",
                display(&self.available),
                display(amount)
            ))),
        }
    }

    fn credit(&mut self, account: &Addr, amount: &[Coin]) -> Result<(), ContractError> {
        let amount = normalize(amount);
        if amount.is_empty() {
            return Ok(());
        }
        self.messages.push(BankMsg::Send {
            to_address: account.to_string(),
            amount,
        });
        Ok(())
    }
}
