//! Alloy provider extensions for ERC-4337 bundlers.

use crate::types::{UserOperation, UserOperationByHash, UserOperationGasEstimate};
use alloy::{
    primitives::{Address, B256, U256},
    providers::Provider,
    transports::TransportResult,
};

/// Extension trait for [`Provider`] adding the bundler JSON-RPC methods.
pub trait BundlerExt: Provider {
    /// Calls `eth_estimateUserOperationGas`.
    fn estimate_user_operation_gas(
        &self,
        op: &UserOperation,
        entrypoint: Address,
    ) -> impl Future<Output = TransportResult<UserOperationGasEstimate>> + Send
    where
        Self: Sized,
    {
        let params = (op.clone(), entrypoint);
        async move { self.raw_request("eth_estimateUserOperationGas".into(), params).await }
    }

    /// Calls `rundler_maxPriorityFeePerGas`, the priority fee the bundler expects.
    fn bundler_max_priority_fee_per_gas(
        &self,
    ) -> impl Future<Output = TransportResult<U256>> + Send
    where
        Self: Sized,
    {
        async move { self.raw_request("rundler_maxPriorityFeePerGas".into(), ()).await }
    }

    /// Calls `eth_sendUserOperation`, returning the operation hash.
    fn send_user_operation(
        &self,
        op: &UserOperation,
        entrypoint: Address,
    ) -> impl Future<Output = TransportResult<B256>> + Send
    where
        Self: Sized,
    {
        let params = (op.clone(), entrypoint);
        async move { self.raw_request("eth_sendUserOperation".into(), params).await }
    }

    /// Calls `eth_getUserOperationByHash`.
    fn get_user_operation_by_hash(
        &self,
        hash: B256,
    ) -> impl Future<Output = TransportResult<Option<UserOperationByHash>>> + Send
    where
        Self: Sized,
    {
        async move { self.raw_request("eth_getUserOperationByHash".into(), (hash,)).await }
    }
}

impl<T> BundlerExt for T where T: Provider {}
