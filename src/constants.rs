//! Service constants.

use alloy::hex;
use std::time::Duration;

/// Length of a single ECDSA signature (`r || s || v`).
pub const SIGNATURE_LENGTH: usize = 65;

/// Placeholder ECDSA signature used while estimating gas.
///
/// It recovers to some address without reverting, so the account's validation path is priced
/// the same way a real signature would be.
pub const DUMMY_SIGNATURE: [u8; SIGNATURE_LENGTH] = hex!(
    "fffffffffffffffffffffffffffffff0000000000000000000000000000000007aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1c"
);

/// Entrypoint nonce key used for every operation.
pub const NONCE_KEY: u64 = 0;

/// Default share of an escrow balance retained by the platform, in percent.
pub const DEFAULT_ESCROW_FEE_PERCENT: u8 = 5;

/// Length of the random disambiguator mixed into escrow salts.
pub const ESCROW_RAND_LENGTH: usize = 20;

/// Default RPC server port.
pub const DEFAULT_PORT: u16 = 9119;

/// Default metrics server port.
pub const DEFAULT_METRICS_PORT: u16 = 9000;

/// Default maximum number of concurrent RPC connections.
pub const DEFAULT_RPC_DEFAULT_MAX_CONNECTIONS: u32 = 1_000;

/// Upkeep interval of the Prometheus recorder.
pub const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(5);
