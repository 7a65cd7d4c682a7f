use alloy::primitives::{B256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of an escrow wallet, derived from its balance and expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscrowStatus {
    /// Expiry is in the past. Settled escrows end up here as well.
    Expired,
    /// Nothing was deposited yet.
    Pending,
    /// A deposit was made but it is short of the expected amount.
    Underpaid,
    /// The deposit covers the expected amount.
    Ready,
}

impl EscrowStatus {
    /// Derives the status of an escrow.
    pub fn evaluate(
        balance: U256,
        expected: U256,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        if expires_at.is_some_and(|expires_at| expires_at <= now) {
            Self::Expired
        } else if balance.is_zero() {
            Self::Pending
        } else if balance < expected {
            Self::Underpaid
        } else {
            Self::Ready
        }
    }
}

/// Split of an escrow balance between the beneficiary and the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    /// Share paid to the beneficiary.
    pub beneficiary: U256,
    /// Share retained by the platform.
    pub platform: U256,
}

impl FeeSplit {
    /// Splits `balance`, retaining `fee_percent` for the platform.
    ///
    /// The beneficiary share is `floor(balance * (100 - fee_percent) / 100)` and the platform
    /// absorbs the remainder, so both shares always add up to `balance`.
    pub fn new(balance: U256, fee_percent: u8) -> Self {
        let hundred = U256::from(100);
        let kept = hundred - U256::from(fee_percent.min(100));

        // Split the multiplication to stay clear of overflow on large balances.
        let beneficiary = (balance / hundred) * kept + (balance % hundred) * kept / hundred;

        Self { beneficiary, platform: balance - beneficiary }
    }
}

/// Outcome of a settlement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettlementStatus {
    /// Nothing was deposited, the escrow is unchanged.
    NoFunds,
    /// The deposit was short, the escrow was expired.
    Underpaid,
    /// Both shares were submitted and the escrow was closed.
    Settled,
}

/// Result of settling an escrow wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    /// Outcome.
    pub status: SettlementStatus,
    /// Operation hashes of the beneficiary and platform payouts, in that order.
    pub operation_hashes: Vec<B256>,
}

impl Settlement {
    /// A settlement that did not emit any operation.
    pub fn without_operations(status: SettlementStatus) -> Self {
        Self { status, operation_hashes: vec![] }
    }
}
