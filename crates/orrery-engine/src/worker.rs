//! Persistent worker threads and listing handoff.
//!
//! Each pool slot is one thread blocked on its job channel. Dispatching
//! a round moves the slot's [`Listing`] into the channel (go-signal,
//! listing install, and memory-visibility boundary in one operation);
//! the worker runs every calculation in listing order and sends the
//! listing back on its completion channel (done-signal and the matching
//! visibility boundary). Workers exit when the job sender is dropped.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::partition::Listing;
use crate::sandbox::SandboxError;

/// One pool slot: the channel pair and the thread handle.
struct WorkerSlot {
    job_tx: Sender<Listing>,
    done_rx: Receiver<Listing>,
    handle: JoinHandle<()>,
}

/// A fixed pool of persistent worker threads, one per slot.
///
/// The pool is spun up at driver start and torn down at driver stop;
/// no threads are created per tick.
pub(crate) struct WorkerPool {
    slots: Vec<WorkerSlot>,
}

impl WorkerPool {
    /// Spawn `count` workers. Threads are named `orrery-worker-{slot}`.
    pub fn spawn(count: usize) -> Result<Self, SandboxError> {
        let mut slots = Vec::with_capacity(count);
        for slot in 0..count {
            let (job_tx, job_rx) = bounded::<Listing>(1);
            let (done_tx, done_rx) = bounded::<Listing>(1);
            let handle = thread::Builder::new()
                .name(format!("orrery-worker-{slot}"))
                .spawn(move || worker_loop(job_rx, done_tx))
                .map_err(|e| SandboxError::ThreadSpawnFailed {
                    reason: e.to_string(),
                })?;
            slots.push(WorkerSlot {
                job_tx,
                done_rx,
                handle,
            });
        }
        Ok(Self { slots })
    }

    /// Number of slots in the pool.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Hand `listing` to slot `slot`.
    ///
    /// # Panics
    ///
    /// Panics if the worker thread has died — which only happens when a
    /// calculation panicked, a programming defect with no mid-round
    /// recovery.
    pub fn dispatch(&self, slot: usize, listing: Listing) {
        self.slots[slot]
            .job_tx
            .send(listing)
            .expect("worker thread died mid-run (a calculation panicked)");
    }

    /// Block until slot `slot` finishes its listing and hand it back.
    ///
    /// Returning from this call proves every calculation in the listing
    /// has completed and its effects are visible to the caller.
    ///
    /// # Panics
    ///
    /// Panics if the worker thread has died; see [`dispatch`](Self::dispatch).
    pub fn collect(&self, slot: usize) -> Listing {
        self.slots[slot]
            .done_rx
            .recv()
            .expect("worker thread died mid-run (a calculation panicked)")
    }

    /// Disconnect every job channel and join the threads.
    pub fn shutdown(self) {
        let mut handles = Vec::with_capacity(self.slots.len());
        for slot in self.slots {
            // Dropping the sender is the termination signal.
            drop(slot.job_tx);
            drop(slot.done_rx);
            handles.push(slot.handle);
        }
        for handle in handles {
            // A panicked worker already surfaced through dispatch/collect;
            // at teardown we only care that the thread is gone.
            let _ = handle.join();
        }
    }
}

/// Worker main loop: receive a listing, run it in order, send it back.
fn worker_loop(job_rx: Receiver<Listing>, done_tx: Sender<Listing>) {
    while let Ok(mut listing) = job_rx.recv() {
        for calc in listing.calcs.iter_mut() {
            calc.run();
        }
        if done_tx.send(listing).is_err() {
            // Driver went away mid-round (teardown); nothing left to do.
            return;
        }
    }
    // Job channel disconnected — clean exit.
}
