use crate::error::WalletError;
use alloy::{
    primitives::{
        U256,
        utils::{ParseUnits, parse_units},
    },
    sol,
};

sol! {
    #[sol(rpc)]
    #[derive(Debug)]
    interface IERC20 {
        function decimals() external view returns (uint8);
        function balanceOf(address owner) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

/// Converts a decimal `amount` of a token with `decimals` to base units.
///
/// Negative, zero and malformed amounts are rejected.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, WalletError> {
    match parse_units(amount.trim(), decimals) {
        Ok(ParseUnits::U256(value)) if !value.is_zero() => Ok(value),
        _ => Err(WalletError::InvalidAmount(amount.to_string())),
    }
}
