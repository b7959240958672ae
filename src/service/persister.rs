use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use tracing::{debug, warn};

use crate::models::{MonthKey, MonthRecord};
use crate::store::{BudgetStore, StoreError};

pub(crate) type SharedStore = Arc<Mutex<Box<dyn BudgetStore>>>;

/// Lock the store. A panic in another holder leaves nothing half-applied
/// (each call is one fetch or one full write), so poisoning is ignored.
pub(crate) fn lock(store: &SharedStore) -> MutexGuard<'_, Box<dyn BudgetStore>> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// How a background save ended.
#[derive(Debug)]
pub(crate) struct PersistOutcome {
    pub(crate) month: MonthKey,
    pub(crate) result: Result<(), StoreError>,
}

impl PersistOutcome {
    #[cfg(test)]
    pub(crate) fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

enum Job {
    Persist { month: MonthKey, record: MonthRecord },
    Flush(Sender<()>),
}

/// Runs saves on a worker thread, one at a time, in the order queued.
pub(crate) struct Persister {
    jobs: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl Persister {
    pub(crate) fn spawn(
        store: SharedStore,
        outcomes: Sender<PersistOutcome>,
    ) -> std::io::Result<Self> {
        let (jobs, queue) = mpsc::channel();
        let worker = std::thread::Builder::new()
            .name("budget-persist".into())
            .spawn(move || run(store, queue, outcomes))?;
        Ok(Self {
            jobs: Some(jobs),
            worker: Some(worker),
        })
    }

    /// Queue a full-record save. Returns false if the worker is gone.
    pub(crate) fn schedule(&self, month: MonthKey, record: MonthRecord) -> bool {
        let Some(jobs) = &self.jobs else {
            return false;
        };
        let queued = jobs.send(Job::Persist { month, record }).is_ok();
        if !queued {
            warn!(month = %month, "Persist worker stopped, save dropped");
        }
        queued
    }

    /// Block until every save queued so far has finished.
    pub(crate) fn flush(&self) {
        let Some(jobs) = &self.jobs else {
            return;
        };
        let (done_tx, done_rx) = mpsc::channel();
        if jobs.send(Job::Flush(done_tx)).is_ok() {
            let _ = done_rx.recv();
        }
    }
}

impl Drop for Persister {
    fn drop(&mut self) {
        // Closing the queue lets the worker drain what is left and exit.
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Persist worker panicked");
            }
        }
    }
}

fn run(store: SharedStore, queue: Receiver<Job>, outcomes: Sender<PersistOutcome>) {
    for job in queue {
        match job {
            Job::Persist { month, record } => {
                let result = lock(&store).persist(&month, &record);
                match &result {
                    Ok(()) => debug!(month = %month, "Saved"),
                    Err(e) => warn!(month = %month, error = %e, "Save failed"),
                }
                // Nobody listening is fine; the outcome was logged.
                let _ = outcomes.send(PersistOutcome { month, result });
            }
            Job::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
