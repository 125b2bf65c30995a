//! Submission and finalized-confirmation of built transactions.

use crate::error::{Result, SwapError};
use crate::rpc::LedgerRpc;
use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use solana_client::nonblocking::pubsub_client::PubsubClient;
use solana_client::rpc_config::RpcSignatureSubscribeConfig;
use solana_client::rpc_response::{Response, RpcSignatureResult};
use solana_commitment_config::CommitmentConfig;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Waits until a submitted signature reaches finalized commitment.
///
/// Implementations own the lifetime of their push channel: it must be closed
/// before `confirm_finalized` returns, and dropping the returned future must
/// close it as well.
#[async_trait]
pub trait SignatureConfirmer: Send + Sync {
    /// # Errors
    /// - `Confirmation` if the channel fails or times out.
    /// - `TransactionFailed` if the transaction finalized with an error.
    async fn confirm_finalized(&self, signature: &Signature) -> Result<()>;
}

/// Confirms signatures over a dedicated websocket connection per call.
#[derive(Debug, Clone)]
pub struct PubsubConfirmer {
    ws_url: String,
    timeout: Duration,
}

impl PubsubConfirmer {
    pub fn new(ws_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            ws_url: ws_url.into(),
            timeout,
        }
    }

    async fn wait_for_notification(client: &PubsubClient, signature: &Signature) -> Result<()> {
        let (mut notifications, unsubscribe) = client
            .signature_subscribe(
                signature,
                Some(RpcSignatureSubscribeConfig {
                    commitment: Some(CommitmentConfig::finalized()),
                    enable_received_notification: Some(false),
                }),
            )
            .await
            .map_err(|e| SwapError::Confirmation {
                signature: *signature,
                reason: format!("subscribe failed: {e}"),
            })?;

        let outcome = await_finalized(&mut notifications, signature).await;
        drop(notifications);
        unsubscribe().await;
        outcome
    }
}

/// Maps signature notifications to an outcome. Received notifications are
/// skipped; the first processed one decides. A stream that ends first is a
/// `Confirmation` error.
async fn await_finalized<S>(mut notifications: S, signature: &Signature) -> Result<()>
where
    S: Stream<Item = Response<RpcSignatureResult>> + Unpin,
{
    while let Some(response) = notifications.next().await {
        if let RpcSignatureResult::ProcessedSignature(processed) = response.value {
            return match processed.err {
                None => Ok(()),
                Some(err) => Err(SwapError::TransactionFailed {
                    signature: *signature,
                    reason: err.to_string(),
                }),
            };
        }
    }
    Err(SwapError::Confirmation {
        signature: *signature,
        reason: "subscription closed before finalization".to_string(),
    })
}

#[async_trait]
impl SignatureConfirmer for PubsubConfirmer {
    async fn confirm_finalized(&self, signature: &Signature) -> Result<()> {
        let client = PubsubClient::new(&self.ws_url)
            .await
            .map_err(|e| SwapError::Confirmation {
                signature: *signature,
                reason: format!("websocket connect failed: {e}"),
            })?;
        debug!("Waiting for {signature} to finalize");

        let outcome = tokio::time::timeout(
            self.timeout,
            Self::wait_for_notification(&client, signature),
        )
        .await
        .unwrap_or_else(|_| {
            Err(SwapError::Confirmation {
                signature: *signature,
                reason: format!("not finalized within {:?}", self.timeout),
            })
        });

        if let Err(e) = client.shutdown().await {
            warn!("Error closing websocket for {signature}: {e:?}");
        }
        outcome
    }
}

/// Sends built transactions. Never retries: a retry must rebuild first.
#[derive(Debug, Default, Clone, Copy)]
pub struct Executor {
    skip_preflight: bool,
}

impl Executor {
    pub fn new(skip_preflight: bool) -> Self {
        Self { skip_preflight }
    }

    /// # Errors
    /// - `Network` if the node could not be reached.
    /// - `Rejected` if the node refused the transaction.
    ///
    /// With `skip_preflight` set the node accepts a stale blockhash without
    /// checking it. The failure then only shows up in `submit_and_confirm`, as a
    /// `Confirmation` error once the timeout runs out, and never as `Rejected`.
    pub async fn submit<R: LedgerRpc + ?Sized>(
        &self,
        rpc: &R,
        transaction: &Transaction,
    ) -> Result<Signature> {
        let signature = rpc.send_transaction(transaction, self.skip_preflight).await?;
        info!("Submitted with Signature {signature}");
        Ok(signature)
    }

    /// Submits, then blocks until the signature is finalized.
    ///
    /// A submit failure returns before any subscription is opened. Once submitted,
    /// every error carries the signature (see [`SwapError::signature`]).
    pub async fn submit_and_confirm<R, C>(
        &self,
        rpc: &R,
        confirmer: &C,
        transaction: &Transaction,
    ) -> Result<Signature>
    where
        R: LedgerRpc + ?Sized,
        C: SignatureConfirmer + ?Sized,
    {
        let signature = self.submit(rpc, transaction).await?;
        match confirmer.confirm_finalized(&signature).await {
            Ok(()) => {
                info!("Finalized {signature}");
                Ok(signature)
            }
            Err(e @ SwapError::Confirmation { .. }) => {
                warn!("{e}");
                Err(e)
            }
            Err(e @ SwapError::TransactionFailed { .. }) => Err(e),
            Err(other) => Err(SwapError::Confirmation {
                signature,
                reason: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::Mutex;

    pub enum Script {
        Finalize,
        DropChannel,
        FailOnChain,
    }

    pub struct MockConfirmer {
        pub script: Script,
        pub calls: Mutex<Vec<Signature>>,
    }

    impl MockConfirmer {
        pub fn new(script: Script) -> Self {
            Self {
                script,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SignatureConfirmer for MockConfirmer {
        async fn confirm_finalized(&self, signature: &Signature) -> Result<()> {
            self.calls.lock().unwrap().push(*signature);
            match self.script {
                Script::Finalize => Ok(()),
                Script::DropChannel => Err(SwapError::Confirmation {
                    signature: *signature,
                    reason: "connection reset".to_string(),
                }),
                Script::FailOnChain => Err(SwapError::TransactionFailed {
                    signature: *signature,
                    reason: "InstructionError(0, Custom(30))".to_string(),
                }),
            }
        }
    }
}
