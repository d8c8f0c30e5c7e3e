//! Currency balance spent on pulls.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::{DEBUG_TOP_UP, PULL_COST, STARTING_CURRENCY};
use crate::error::GachaError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub balance: u64,
    pub pull_cost: u64,
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new(STARTING_CURRENCY, PULL_COST)
    }
}

impl Wallet {
    pub fn new(balance: u64, pull_cost: u64) -> Self {
        Self { balance, pull_cost }
    }

    pub fn can_pull(&self) -> bool {
        self.balance >= self.pull_cost
    }

    /// Number of pulls the balance covers
    pub fn pulls_available(&self) -> u64 {
        if self.pull_cost == 0 {
            return u64::MAX;
        }
        self.balance / self.pull_cost
    }

    /// Deduct one pull. The balance is untouched on failure.
    pub fn charge_pull(&mut self) -> Result<u64, GachaError> {
        if !self.can_pull() {
            return Err(GachaError::InsufficientFunds {
                have: self.balance,
                need: self.pull_cost,
            });
        }
        self.balance -= self.pull_cost;
        debug!(balance = self.balance, cost = self.pull_cost, "pull charged");
        Ok(self.balance)
    }

    pub fn credit(&mut self, amount: u64) -> u64 {
        self.balance = self.balance.saturating_add(amount);
        info!(amount, balance = self.balance, "currency credited");
        self.balance
    }

    /// Development top-up of 500
    pub fn top_up(&mut self) -> u64 {
        self.credit(DEBUG_TOP_UP)
    }
}
