//! The per-instance worker pool.
//!
//! Every [`crate::Encoder`] and [`crate::Decoder`] owns one [`TaskPool`]. The
//! pool is a fixed-size Rayon thread pool; it is never shared between
//! instances and its workers are released when the pool is shut down or
//! dropped.
//!
//! Three ways to put work on the pool:
//!
//! - [`TaskPool::submit`] queues an owned `'static` task and returns a
//!   [`TaskHandle`] whose [`TaskHandle::join`] blocks until the result arrives.
//! - [`TaskPool::join`] runs two borrowing tasks side by side and waits for
//!   both (structured fan-out/join).
//! - [`TaskPool::map_ordered`] maps a slice in parallel; results are collected
//!   by index, so output order always equals input order.
//!
//! There is no timeout and no cancellation. A task that never finishes blocks
//! its joiner forever.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::api::ParjsonOptions;
use crate::error::{ParjsonError, Result};

/// A fixed-size pool of worker threads.
#[derive(Debug)]
pub struct TaskPool {
    inner: rayon::ThreadPool,
    workers: usize,
}

/// Blocking handle to a task queued with [`TaskPool::submit`].
#[derive(Debug)]
#[must_use = "a task's failure is only observed through join()"]
pub struct TaskHandle<T> {
    rx: mpsc::Receiver<Result<T>>,
}

impl TaskPool {
    /// Builds a pool with exactly `workers` threads.
    pub fn new(workers: usize) -> Result<Self> {
        Self::with_options(&ParjsonOptions::new().workers(workers))
    }

    /// Builds a pool sized and named according to `options`.
    pub fn with_options(options: &ParjsonOptions) -> Result<Self> {
        let workers = options.worker_count()?;
        let prefix = options.thread_name_prefix().to_owned();

        let inner = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(move |index| format!("{prefix}-{index}"))
            .build()?;

        debug!(workers, "task pool started");
        Ok(Self { inner, workers })
    }

    /// Number of worker threads, fixed at construction.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Queues `task` and returns immediately.
    ///
    /// The task owns its inputs. Its result, error or panic is delivered to
    /// [`TaskHandle::join`]; errors are wrapped as [`ParjsonError::Task`].
    pub fn submit<T, F>(&self, task: F) -> TaskHandle<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        self.inner.spawn(move || {
            let outcome = run_task(task);
            // The handle may have been dropped without joining.
            let _ = tx.send(outcome);
        });
        trace!("task submitted");
        TaskHandle { rx }
    }

    /// Runs `left` and `right` on the pool and waits for both.
    ///
    /// If both fail, the error from `left` is returned.
    pub fn join<A, B, RA, RB>(&self, left: A, right: B) -> Result<(RA, RB)>
    where
        A: FnOnce() -> Result<RA> + Send,
        B: FnOnce() -> Result<RB> + Send,
        RA: Send,
        RB: Send,
    {
        let (left, right) = self
            .inner
            .install(|| rayon::join(|| run_task(left), || run_task(right)));
        Ok((left?, right?))
    }

    /// Applies `f` to every element of `items` in parallel.
    ///
    /// Element `i` of the output is `f(&items[i])`, whatever order the workers
    /// finish in. The first failing element (by index) decides the error.
    pub fn map_ordered<T, U, F>(&self, items: &[T], f: F) -> Result<Vec<U>>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> Result<U> + Send + Sync,
    {
        self.inner.install(|| {
            catch_panic(|| {
                let results: Vec<Result<U>> = items.par_iter().map(&f).collect();
                results.into_iter().collect()
            })
        })
    }

    /// Releases the worker threads.
    ///
    /// Rayon lets queued and running tasks finish before the workers exit;
    /// handles that are still pending receive their results normally.
    pub fn shutdown(self) {
        debug!(workers = self.workers, "task pool shut down");
        drop(self.inner);
    }
}

impl<T> TaskHandle<T> {
    /// Blocks until the task finishes. There is no timeout.
    pub fn join(self) -> Result<T> {
        self.rx.recv().map_err(|_| {
            ParjsonError::Pool("task was dropped before it reported a result".into())
        })?
    }
}

/// Runs one unit of work, converting a panic into an error and wrapping any
/// failure as a task error.
fn run_task<T>(task: impl FnOnce() -> Result<T>) -> Result<T> {
    catch_panic(task).map_err(ParjsonError::into_task_error)
}

fn catch_panic<T>(task: impl FnOnce() -> Result<T>) -> Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(task)) {
        Ok(result) => result,
        Err(payload) => Err(ParjsonError::TaskPanicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked with a non-string payload".to_owned()
    }
}
