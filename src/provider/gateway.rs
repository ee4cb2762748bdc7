use super::{ProviderAssignment, ProviderSource};
use crate::complications::SlotId;
use crate::error::ConfigError;
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

/// Callback receiving one result per requested slot. Invoked on a worker
/// thread, never on the caller's context.
pub type LookupCallback = Arc<dyn Fn(ProviderAssignment) + Send + Sync>;

enum GatewayState {
    Idle,
    Open(Runtime),
    Closed,
}

#[derive(Debug)]
struct PendingLookup {
    slot_id: SlotId,
    handle: JoinHandle<()>,
}

/// Asynchronous boundary to the provider resolution service.
///
/// `open` starts a dedicated worker pool, `lookup_all` issues one request per
/// slot on it, and `close` aborts in-flight requests and stops the pool.
/// Results arriving after `close` are dropped without reaching the callback.
/// Dropping an open gateway closes it.
pub struct ProviderInfoGateway {
    source: Arc<dyn ProviderSource>,
    worker_threads: usize,
    state: GatewayState,
    closed: Arc<AtomicBool>,
    pending: Vec<PendingLookup>,
}

impl ProviderInfoGateway {
    pub fn new(source: Arc<dyn ProviderSource>, worker_threads: usize) -> Self {
        Self {
            source,
            worker_threads: worker_threads.max(1),
            state: GatewayState::Idle,
            closed: Arc::new(AtomicBool::new(false)),
            pending: Vec::new(),
        }
    }

    /// Acquire the worker pool. Opening an already open gateway is a no-op.
    pub fn open(&mut self) -> Result<(), ConfigError> {
        match self.state {
            GatewayState::Open(_) => {
                debug!("Provider gateway already open");
                Ok(())
            }
            GatewayState::Closed => Err(ConfigError::GatewayClosed),
            GatewayState::Idle => {
                let runtime = tokio::runtime::Builder::new_multi_thread()
                    .worker_threads(self.worker_threads)
                    .thread_name("provider-lookup")
                    .enable_all()
                    .build()
                    .map_err(|e| ConfigError::Runtime(e.to_string()))?;

                info!(
                    "Provider gateway opened ({} source, {} workers)",
                    self.source.source_type(),
                    self.worker_threads
                );
                self.state = GatewayState::Open(runtime);
                Ok(())
            }
        }
    }

    /// Issue one asynchronous lookup per slot id.
    ///
    /// `on_result` is called exactly once per id unless the gateway is closed
    /// first. A failed lookup is reported as an empty assignment.
    pub fn lookup_all<F>(&mut self, slot_ids: &BTreeSet<SlotId>, on_result: F) -> Result<usize, ConfigError>
    where
        F: Fn(ProviderAssignment) + Send + Sync + 'static,
    {
        let runtime = match &self.state {
            GatewayState::Open(runtime) => runtime,
            GatewayState::Idle => return Err(ConfigError::GatewayNotOpen),
            GatewayState::Closed => return Err(ConfigError::GatewayClosed),
        };

        self.pending.retain(|lookup| !lookup.handle.is_finished());

        let callback: LookupCallback = Arc::new(on_result);
        for &slot_id in slot_ids {
            let source = Arc::clone(&self.source);
            let closed = Arc::clone(&self.closed);
            let callback = Arc::clone(&callback);
            let worker = runtime.handle().clone();

            let handle = runtime.spawn(async move {
                // Resolve on a child task so a panicking source still yields a result.
                let assignment = match worker.spawn(async move { source.resolve(slot_id).await }).await {
                    Ok(Ok(provider)) => ProviderAssignment::new(slot_id, provider),
                    Ok(Err(e)) => {
                        warn!("Provider lookup for slot {} failed: {}", slot_id, e);
                        ProviderAssignment::empty(slot_id)
                    }
                    Err(e) => {
                        warn!("Provider lookup for slot {} aborted: {}", slot_id, e);
                        ProviderAssignment::empty(slot_id)
                    }
                };

                if closed.load(Ordering::Acquire) {
                    debug!("Dropping provider result for slot {} after close", slot_id);
                    return;
                }
                callback(assignment);
            });

            self.pending.push(PendingLookup { slot_id, handle });
        }

        debug!("Issued provider lookups for slots {:?}", slot_ids);
        Ok(slot_ids.len())
    }

    /// Release the worker pool. Safe to call more than once.
    pub fn close(&mut self) {
        self.closed.store(true, Ordering::Release);

        for lookup in self.pending.drain(..) {
            if !lookup.handle.is_finished() {
                debug!("Aborting provider lookup for slot {}", lookup.slot_id);
            }
            lookup.handle.abort();
        }

        match std::mem::replace(&mut self.state, GatewayState::Closed) {
            GatewayState::Open(runtime) => {
                runtime.shutdown_background();
                info!("Provider gateway closed");
            }
            GatewayState::Idle | GatewayState::Closed => {}
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, GatewayState::Open(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, GatewayState::Closed)
    }

    /// Number of lookups still in flight
    pub fn pending_lookups(&self) -> usize {
        self.pending.iter().filter(|lookup| !lookup.handle.is_finished()).count()
    }
}

impl Drop for ProviderInfoGateway {
    fn drop(&mut self) {
        self.close();
    }
}
