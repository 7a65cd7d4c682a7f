//! Shared primitive types.
mod account;
pub use account::*;

mod call;
pub use call::*;

mod entrypoint;
pub use entrypoint::*;

mod erc20;
pub use erc20::*;

mod escrow;
pub use escrow::*;

pub mod rpc;

mod salt;
pub use salt::*;

mod user_op;
pub use user_op::*;

mod wallet;
pub use wallet::*;
