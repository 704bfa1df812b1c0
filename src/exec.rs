// src/exec.rs
//
// Execution contexts for the grid kernels.
//
// A kernel is a pure function of the cell index (i, j). `Executor::fill`
// evaluates it once per cell of a row-major output slice and returns only
// after every cell has been written, so consecutive submissions never
// overlap. The context is always passed explicitly; nothing here touches
// rayon's global pool.

use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Result;

pub trait Executor: Sync {
    /// Human-readable name of the compute target.
    fn name(&self) -> String;

    /// Number of lanes work is spread over.
    fn lanes(&self) -> usize;

    /// Write `kernel(i, j)` into every cell of `out` (row length `nx`) and
    /// block until done.
    fn fill<F>(&self, out: &mut [f64], nx: usize, kernel: F)
    where
        F: Fn(usize, usize) -> f64 + Sync;
}

/// Runs every kernel on the calling thread, row by row.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serial;

impl Executor for Serial {
    fn name(&self) -> String {
        "CPU (serial)".to_string()
    }

    fn lanes(&self) -> usize {
        1
    }

    fn fill<F>(&self, out: &mut [f64], nx: usize, kernel: F)
    where
        F: Fn(usize, usize) -> f64 + Sync,
    {
        for (j, row) in out.chunks_mut(nx).enumerate() {
            for (i, cell) in row.iter_mut().enumerate() {
                *cell = kernel(i, j);
            }
        }
    }
}

/// Dedicated rayon pool; rows are distributed across its workers.
pub struct ThreadPoolExecutor {
    pool: ThreadPool,
}

impl ThreadPoolExecutor {
    /// Build a pool with `threads` workers (0 picks rayon's default).
    pub fn new(threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|k| format!("heat-worker-{k}"))
            .build()?;
        debug!("built thread pool with {} workers", pool.current_num_threads());
        Ok(Self { pool })
    }
}

impl Executor for ThreadPoolExecutor {
    fn name(&self) -> String {
        format!("CPU thread pool ({} threads)", self.pool.current_num_threads())
    }

    fn lanes(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn fill<F>(&self, out: &mut [f64], nx: usize, kernel: F)
    where
        F: Fn(usize, usize) -> f64 + Sync,
    {
        let kernel = &kernel;
        self.pool.install(|| {
            out.par_chunks_mut(nx).enumerate().for_each(|(j, row)| {
                for (i, cell) in row.iter_mut().enumerate() {
                    *cell = kernel(i, j);
                }
            });
        });
    }
}

/// One line per execution context available on this host.
pub fn list_devices() -> Result<Vec<(String, usize)>> {
    let pool = ThreadPoolExecutor::new(0)?;
    Ok(vec![
        (Serial.name(), Serial.lanes()),
        (pool.name(), pool.lanes()),
    ])
}
