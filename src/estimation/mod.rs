//! Operation construction and gas estimation.
//!
//! An operation is built with a placeholder signature sized to the account quorum, then gas and
//! fee fields are filled by [`GasEstimator`]. The placeholder is replaced by the aggregated
//! signature only once every field the operation hash commits to is final.

mod builder;
pub use builder::{AccountState, OperationBuilder};

mod fees;
pub use fees::GasEstimator;
