//! Deferred, best-effort deletion of sent chat messages.
//!
//! Batches go into a due-time queue that a single drain loop ([`EphemeralScheduler::run`]) works
//! through. Scheduling never waits on the loop. When a batch comes due each message is deleted on
//! its own; a failed delete is logged at debug level and the rest of the batch still runs. Nothing
//! is persisted, so batches still pending at shutdown are either flushed immediately or dropped,
//! depending on the [`ShutdownMode`] passed to [`EphemeralScheduler::shutdown`].
use async_trait::async_trait;
use std::cmp::Ordering as CmpOrdering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, Notify, watch};
use tokio::time::Instant;

/// Whatever can delete a message from a chat. Serenity's HTTP client in production.
#[async_trait]
pub trait MessageDeleter: Send + Sync {
    async fn delete(&self, chat_id: u64, message_id: u64) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    pub batch_id: u64,
    pub chat_id: u64,
    pub message_ids: Vec<u64>,
    pub due: Instant,
}

// Min-heap on (due, batch_id).
impl Ord for PendingDeletion {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.batch_id.cmp(&self.batch_id))
    }
}

impl PartialOrd for PendingDeletion {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownMode {
    /// Delete everything still queued before the loop exits.
    Flush,
    /// Exit immediately, abandoning queued batches.
    Drop,
}

pub struct EphemeralScheduler {
    queue: Mutex<BinaryHeap<PendingDeletion>>,
    wake: Notify,
    next_batch: AtomicU64,
    shutdown_tx: watch::Sender<Option<ShutdownMode>>,
}

impl Default for EphemeralScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl EphemeralScheduler {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(None);
        Self {
            queue: Mutex::new(BinaryHeap::new()),
            wake: Notify::new(),
            next_batch: AtomicU64::new(1),
            shutdown_tx,
        }
    }

    /// Queue `message_ids` in `chat_id` for deletion after `delay`. Returns the batch id, usable
    /// with [`cancel`](Self::cancel). An empty batch is accepted and never fires.
    pub async fn schedule(&self, chat_id: u64, message_ids: Vec<u64>, delay: Duration) -> u64 {
        let batch_id = self.next_batch.fetch_add(1, Ordering::Relaxed);
        if message_ids.is_empty() {
            return batch_id;
        }
        let count = message_ids.len();
        self.queue.lock().await.push(PendingDeletion {
            batch_id,
            chat_id,
            message_ids,
            due: Instant::now() + delay,
        });
        self.wake.notify_one();
        tracing::debug!(target = "ephemeral", chat_id, batch_id, count, delay_secs = delay.as_secs(), "deletion scheduled");
        batch_id
    }

    /// Drop a queued batch. Returns false if it already fired or never existed.
    pub async fn cancel(&self, batch_id: u64) -> bool {
        let mut queue = self.queue.lock().await;
        let before = queue.len();
        queue.retain(|p| p.batch_id != batch_id);
        before != queue.len()
    }

    /// Drop every queued batch for a chat. Returns how many batches were removed.
    pub async fn cancel_chat(&self, chat_id: u64) -> usize {
        let mut queue = self.queue.lock().await;
        let before = queue.len();
        queue.retain(|p| p.chat_id != chat_id);
        before - queue.len()
    }

    pub async fn pending(&self) -> usize {
        self.queue.lock().await.len()
    }

    /// Ask the drain loop to stop. Safe to call before or after the loop starts.
    pub fn shutdown(&self, mode: ShutdownMode) {
        self.shutdown_tx.send_replace(Some(mode));
    }

    async fn take_due(&self, now: Instant) -> Vec<PendingDeletion> {
        let mut queue = self.queue.lock().await;
        let mut due = Vec::new();
        while queue.peek().is_some_and(|p| p.due <= now) {
            if let Some(p) = queue.pop() {
                due.push(p);
            }
        }
        due
    }

    async fn take_all(&self) -> Vec<PendingDeletion> {
        self.queue.lock().await.drain().collect()
    }

    async fn next_due(&self) -> Option<Instant> {
        self.queue.lock().await.peek().map(|p| p.due)
    }

    /// Drain loop. Spawn once; returns after [`shutdown`](Self::shutdown).
    pub async fn run<D: MessageDeleter>(&self, deleter: D) {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        tracing::info!(target = "ephemeral", "deletion loop started");
        loop {
            let requested = *shutdown_rx.borrow_and_update();
            if let Some(mode) = requested {
                let abandoned = match mode {
                    ShutdownMode::Flush => {
                        for batch in self.take_all().await {
                            delete_batch(&deleter, &batch).await;
                        }
                        0
                    }
                    ShutdownMode::Drop => self.take_all().await.len(),
                };
                tracing::info!(target = "ephemeral", ?mode, abandoned, "deletion loop stopped");
                return;
            }

            for batch in self.take_due(Instant::now()).await {
                delete_batch(&deleter, &batch).await;
            }

            let sleep_until = self.next_due().await;
            tokio::select! {
                _ = async {
                    match sleep_until {
                        Some(at) => tokio::time::sleep_until(at).await,
                        None => std::future::pending::<()>().await,
                    }
                } => {}
                _ = self.wake.notified() => {}
                _ = shutdown_rx.changed() => {}
            }
        }
    }
}

async fn delete_batch<D: MessageDeleter>(deleter: &D, batch: &PendingDeletion) {
    let mut failed = 0usize;
    for &message_id in &batch.message_ids {
        if let Err(e) = deleter.delete(batch.chat_id, message_id).await {
            failed += 1;
            tracing::debug!(target = "ephemeral", chat_id = batch.chat_id, message_id, error = ?e, "delete failed; skipping");
        }
    }
    tracing::debug!(
        target = "ephemeral",
        chat_id = batch.chat_id,
        batch_id = batch.batch_id,
        deleted = batch.message_ids.len() - failed,
        failed,
        "batch fired"
    );
}
