use std::{collections::HashMap, sync::Arc, time::Duration};

use mealcal_db::Storage;
use mealcal_shared::{Change, Slice};
use tokio::{
    sync::{mpsc::UnboundedReceiver, oneshot},
    task::JoinHandle,
    time::{Instant, sleep_until},
};

/// Debounced write-through of planner changes.
///
/// Each slice has its own quiet-period timer: a change (re)starts the timer
/// and only the latest snapshot is written once it expires. Slices are
/// written independently of each other.
pub struct Persistence {
    stop: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl Persistence {
    pub fn start<S: Storage>(
        storage: Arc<S>,
        changes: UnboundedReceiver<Change>,
        debounce: Duration,
    ) -> Self {
        let (stop, stopped) = oneshot::channel();
        let handle = tokio::spawn(run(storage, changes, stopped, debounce));

        tracing::debug!(debounce_ms = debounce.as_millis() as u64, "persistence started");

        Self {
            stop: Some(stop),
            handle,
        }
    }

    /// Writes every pending snapshot right away and waits for the task to end.
    pub async fn stop(mut self) -> anyhow::Result<()> {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }

        self.handle.await?;

        Ok(())
    }
}

struct Pending {
    snapshot: String,
    deadline: Instant,
}

async fn run<S: Storage>(
    storage: Arc<S>,
    mut changes: UnboundedReceiver<Change>,
    mut stopped: oneshot::Receiver<()>,
    debounce: Duration,
) {
    let mut pending: HashMap<Slice, Pending> = HashMap::new();

    loop {
        let next_deadline = pending.values().map(|p| p.deadline).min();

        tokio::select! {
            change = changes.recv() => {
                let Some(change) = change else {
                    break;
                };

                schedule(&mut pending, change, debounce);
            }
            _ = &mut stopped => break,
            _ = sleep_until(next_deadline.unwrap_or_else(Instant::now)), if next_deadline.is_some() => {
                let now = Instant::now();
                let due = pending
                    .iter()
                    .filter(|(_, p)| p.deadline <= now)
                    .map(|(slice, _)| *slice)
                    .collect::<Vec<_>>();

                for slice in due {
                    if let Some(p) = pending.remove(&slice) {
                        flush(storage.as_ref(), slice, &p.snapshot).await;
                    }
                }
            }
        }
    }

    while let Ok(change) = changes.try_recv() {
        schedule(&mut pending, change, debounce);
    }

    for (slice, p) in pending {
        flush(storage.as_ref(), slice, &p.snapshot).await;
    }

    tracing::debug!("persistence stopped");
}

fn schedule(pending: &mut HashMap<Slice, Pending>, change: Change, debounce: Duration) {
    let restarted = pending.contains_key(&change.slice);

    tracing::debug!(slice = %change.slice, restarted, "save scheduled");

    pending.insert(
        change.slice,
        Pending {
            snapshot: change.snapshot,
            deadline: Instant::now() + debounce,
        },
    );
}

async fn flush<S: Storage>(storage: &S, slice: Slice, snapshot: &str) {
    match storage.set(slice.storage_key(), snapshot).await {
        Ok(()) => tracing::info!(%slice, "state saved"),
        Err(err) => tracing::warn!(%err, %slice, "failed to save state"),
    }
}
