//! The platform signer.
//!
//! Either a raw secp256k1 key or a key held in AWS KMS. Both sign messages the same way.
use alloy::{
    network::{FullSigner, TxSigner},
    primitives::{Address, Signature},
    signers::{aws::AwsSigner, local::PrivateKeySigner},
};
use aws_config::BehaviorVersion;
use std::{fmt, ops::Deref, str::FromStr, sync::Arc};
use tracing::debug;

/// Platform signer, erased over its backend.
#[derive(Clone)]
pub struct DynSigner(pub Arc<dyn FullSigner<Signature> + Send + Sync>);

impl fmt::Debug for DynSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlatformSigner").field(&self.address()).finish()
    }
}

impl DynSigner {
    /// Load a private key, falling back to treating `key` as an AWS KMS key id.
    pub async fn load(key: &str, chain_id: Option<u64>) -> eyre::Result<Self> {
        if let Ok(signer) = Self::from_signing_key(key).await {
            return Ok(signer);
        }

        debug!("Platform key is not a private key, loading it from AWS KMS");
        Self::from_kms(key, chain_id).await
    }

    /// Platform signer from a hex encoded private key.
    pub async fn from_signing_key(key: &str) -> eyre::Result<Self> {
        Ok(Self(Arc::new(PrivateKeySigner::from_str(key)?)))
    }

    /// Platform signer backed by the AWS KMS key `key_id`.
    pub async fn from_kms(key_id: &str, chain_id: Option<u64>) -> eyre::Result<Self> {
        let client = aws_sdk_kms::Client::new(
            &aws_config::load_defaults(BehaviorVersion::latest()).await,
        );
        let signer = AwsSigner::new(client, key_id.to_string(), chain_id).await?;
        Ok(Self(Arc::new(signer)))
    }

    /// Address of the platform signer. Member of every custodial quorum.
    pub fn address(&self) -> Address {
        TxSigner::address(&self.0)
    }
}

impl Deref for DynSigner {
    type Target = dyn FullSigner<Signature> + Send + Sync;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
