//! Helpers building the calls executed by quorum accounts.
//!
//! [`Call`] itself is declared next to the account bindings, which take it in `executeBatch`.

use super::{Call, IERC20};
use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolCall,
};

impl Call {
    /// Builds an ERC-20 `transfer(to, amount)` call on `token`.
    pub fn transfer(token: Address, to: Address, amount: U256) -> Self {
        Self {
            target: token,
            value: U256::ZERO,
            data: Bytes::from(IERC20::transferCall { to, amount }.abi_encode()),
        }
    }
}
