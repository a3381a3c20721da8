use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::models::Task;
use crate::storage::write_slot;

/// Attempts per snapshot before the write is dropped. Task data is not
/// safety-critical, so the final failure is silent.
const WRITE_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(50);

enum Job {
    Save(Vec<Task>),
    Flush(Sender<()>),
}

/// Single-writer durability queue.
///
/// Mutations hand the writer a full snapshot of the task sequence; the
/// writer keeps at most one write in flight and coalesces snapshots that
/// queue up behind it, so only the newest state reaches the disk and
/// last-write-wins is deterministic.
pub struct Persister {
    tx: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl Persister {
    /// Spawns the writer thread targeting the given slot path.
    pub fn spawn(path: PathBuf) -> Persister {
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || writer_loop(rx, path));
        Persister {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    /// Queues a snapshot for writing. Fire-and-forget from the caller's
    /// point of view.
    pub fn save(&self, snapshot: Vec<Task>) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Job::Save(snapshot));
        }
    }

    /// Blocks until every snapshot queued before this call is durable
    /// (or has exhausted its retries).
    pub fn flush(&self) {
        if let Some(tx) = &self.tx {
            let (ack_tx, ack_rx) = mpsc::channel();
            if tx.send(Job::Flush(ack_tx)).is_ok() {
                let _ = ack_rx.recv();
            }
        }
    }
}

impl Drop for Persister {
    fn drop(&mut self) {
        // Closing the channel lets the writer drain and exit.
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn writer_loop(rx: Receiver<Job>, path: PathBuf) {
    while let Ok(job) = rx.recv() {
        let mut pending = None;
        let mut acks = Vec::new();
        collect(job, &mut pending, &mut acks);
        // Coalesce everything that queued up while the previous write
        // was in flight; only the newest snapshot matters.
        while let Ok(job) = rx.try_recv() {
            collect(job, &mut pending, &mut acks);
        }
        if let Some(snapshot) = pending {
            write_with_retry(&path, &snapshot);
        }
        for ack in acks {
            let _ = ack.send(());
        }
    }
}

fn collect(job: Job, pending: &mut Option<Vec<Task>>, acks: &mut Vec<Sender<()>>) {
    match job {
        Job::Save(snapshot) => *pending = Some(snapshot),
        Job::Flush(ack) => acks.push(ack),
    }
}

fn write_with_retry(path: &Path, snapshot: &[Task]) {
    for attempt in 1..=WRITE_ATTEMPTS {
        if write_slot(path, snapshot).is_ok() {
            return;
        }
        if attempt < WRITE_ATTEMPTS {
            thread::sleep(RETRY_DELAY);
        }
    }
}
