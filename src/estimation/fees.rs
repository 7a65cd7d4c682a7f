use crate::{
    chains::ChainProfile, error::WalletError, error::OperationError, provider::BundlerExt,
    types::UserOperation,
};
use alloy::{primitives::U256, providers::Provider};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Fills the gas and fee fields of operations.
///
/// Limits come from the bundler. The fee cap comes from the chain's fee history and the tip from
/// the bundler, with the cap raised to at least the tip. Any failure aborts the estimation.
#[derive(Debug, Clone)]
pub struct GasEstimator {
    chain: Arc<ChainProfile>,
}

impl GasEstimator {
    /// Create a new instance of [`GasEstimator`].
    pub fn new(chain: Arc<ChainProfile>) -> Self {
        Self { chain }
    }

    /// Estimates `op`, returning it with every gas and fee field set.
    ///
    /// The signature of `op` must already be a placeholder of the final length.
    #[instrument(skip_all, fields(chain = %self.chain.kind, sender = %op.sender))]
    pub async fn estimate(&self, mut op: UserOperation) -> Result<UserOperation, WalletError> {
        let gas = self
            .chain
            .bundler
            .estimate_user_operation_gas(&op, self.chain.entrypoint)
            .await
            .map_err(OperationError::from)?;

        let fees = self.chain.provider.estimate_eip1559_fees().await?;
        let max_priority_fee_per_gas =
            self.chain.bundler.bundler_max_priority_fee_per_gas().await?;

        op.callGasLimit = gas.call_gas_limit;
        op.verificationGasLimit = gas.verification_gas_limit;
        op.preVerificationGas = gas.pre_verification_gas;
        op.maxPriorityFeePerGas = max_priority_fee_per_gas;
        op.maxFeePerGas = U256::from(fees.max_fee_per_gas).max(max_priority_fee_per_gas);

        debug!(
            call_gas_limit = %op.callGasLimit,
            verification_gas_limit = %op.verificationGasLimit,
            pre_verification_gas = %op.preVerificationGas,
            max_fee_per_gas = %op.maxFeePerGas,
            max_priority_fee_per_gas = %op.maxPriorityFeePerGas,
            "Estimated operation"
        );

        Ok(op)
    }
}
