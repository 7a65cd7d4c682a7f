//! # Quorum wallets
//!
//! Custodial quorum smart accounts over ERC-4337 (v0.6) bundlers.
//!
//! Accounts are counterfactual: their address is derived from the platform signer and a salt
//! before they exist, and the first operation deploys them. Every operation is authorized by the
//! account quorum, the platform signer followed by the co-signers registered by the owner.
#![recursion_limit = "256"]

pub mod chains;
pub mod cli;
pub mod config;
pub mod constants;
pub mod deriver;
pub mod error;
pub mod escrow;
pub mod estimation;
pub mod metrics;
pub mod nonce;
pub mod provider;
pub mod rpc;
pub mod service;
pub mod signers;
pub mod spawn;
pub mod storage;
pub mod types;

#[cfg(test)]
mod test_utils;
