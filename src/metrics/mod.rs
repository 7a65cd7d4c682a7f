//! Service metrics.

use crate::{chains::ChainKind, constants::METRICS_UPKEEP_INTERVAL, types::SettlementStatus};
use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::{net::SocketAddr, sync::Mutex};

/// Kind of a submitted operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// A single transfer.
    Transfer,
    /// A batch of transfers.
    TransferBatch,
    /// A quorum addition.
    AddCosigner,
    /// A quorum removal.
    DeleteCosigner,
    /// The beneficiary share of an escrow.
    EscrowPayout,
    /// The platform share of an escrow.
    EscrowFee,
}

impl OperationKind {
    /// Returns the metric label of the kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::TransferBatch => "transfer_batch",
            Self::AddCosigner => "add_cosigner",
            Self::DeleteCosigner => "delete_cosigner",
            Self::EscrowPayout => "escrow_payout",
            Self::EscrowFee => "escrow_fee",
        }
    }
}

/// Records an operation accepted by the bundler.
pub fn record_operation(chain: ChainKind, kind: OperationKind) {
    counter!(
        "wallets.operations.submitted",
        "chain" => chain.as_str(),
        "kind" => kind.as_str()
    )
    .increment(1);
}

/// Records an operation rejected by the bundler.
pub fn record_rejection(chain: ChainKind, kind: OperationKind) {
    counter!(
        "wallets.operations.rejected",
        "chain" => chain.as_str(),
        "kind" => kind.as_str()
    )
    .increment(1);
}

/// Records the outcome of an escrow settlement attempt.
pub fn record_settlement(chain: ChainKind, status: SettlementStatus) {
    let status = match status {
        SettlementStatus::NoFunds => "no_funds",
        SettlementStatus::Underpaid => "underpaid",
        SettlementStatus::Settled => "settled",
    };
    counter!("wallets.escrow.settlements", "chain" => chain.as_str(), "status" => status)
        .increment(1);
}

/// Records a partially settled escrow.
pub fn record_partial_settlement(chain: ChainKind) {
    counter!("wallets.escrow.partial_settlements", "chain" => chain.as_str()).increment(1);
}

/// Records a created wallet.
pub fn record_wallet_created(chain: ChainKind, escrow: bool) {
    counter!(
        "wallets.created",
        "chain" => chain.as_str(),
        "escrow" => if escrow { "true" } else { "false" }
    )
    .increment(1);
}

/// Builds a Prometheus exporter serving on `metrics_addr`, returning a handle.
///
/// The recorder performs upkeep every [`METRICS_UPKEEP_INTERVAL`]. The exporter is installed once
/// per process, later calls return the same handle.
pub fn setup_exporter(metrics_addr: impl Into<SocketAddr>) -> eyre::Result<PrometheusHandle> {
    static HANDLE: Mutex<Option<PrometheusHandle>> = Mutex::new(None);

    let mut lock = HANDLE.lock().map_err(|_| eyre::eyre!("metrics handle lock poisoned"))?;
    if let Some(handle) = &*lock {
        return Ok(handle.clone());
    }

    let addr: SocketAddr = metrics_addr.into();
    let (recorder, exporter) = PrometheusBuilder::new()
        .with_http_listener(addr)
        .upkeep_timeout(METRICS_UPKEEP_INTERVAL)
        .build()?;

    let handle = recorder.handle();
    metrics::set_global_recorder(recorder)
        .map_err(|_| eyre::eyre!("could not set metrics recorder"))?;
    tokio::spawn(exporter);

    tracing::info!(target: "wallets::spawn", %addr, "Started metrics server");

    *lock = Some(handle.clone());

    Ok(handle)
}
