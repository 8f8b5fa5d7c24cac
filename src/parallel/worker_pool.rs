use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;

use crate::{Error, Result};

/// Fixed-size pool of force workers with a fork-join `scatter`.
///
/// Workers keep no state between calls; each job returns its own output and
/// the caller reduces them after the join.
#[derive(Debug)]
pub struct WorkerPool {
    workers: usize,
    pool: Option<rayon::ThreadPool>,
}
impl WorkerPool {
    /// A pool with one worker runs jobs on the calling thread
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::config("worker count should be at least 1"));
        }
        let pool = if workers == 1 {
            None
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("jmd-force-{}", i))
                .build()
                .map_err(|e| Error::ThreadPool(e.to_string()))?;
            Some(pool)
        };
        Ok(Self { workers, pool })
    }
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `job(p)` for every partition `p` in `0..partitions` and return the
    /// outputs in partition order once all have finished.
    ///
    /// A worker that panics fails the whole call with `Error::ThreadPool`.
    pub fn scatter<T, F>(&self, partitions: usize, job: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(usize) -> Result<T> + Sync,
    {
        let pool = match &self.pool {
            Some(pool) => pool,
            None => return (0..partitions).map(job).collect(),
        };
        let joined = panic::catch_unwind(AssertUnwindSafe(|| {
            pool.install(|| {
                (0..partitions)
                    .into_par_iter()
                    .map(&job)
                    .collect::<Vec<Result<T>>>()
            })
        }));
        match joined {
            Ok(outputs) => outputs.into_iter().collect(),
            Err(payload) => Err(Error::ThreadPool(panic_message(payload.as_ref()))),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("worker panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("worker panicked: {}", s)
    } else {
        String::from("worker panicked")
    }
}
