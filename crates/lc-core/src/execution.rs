//! Execution engines for controlling computation strategy
//!
//! An engine pairs a set of primitives with a strategy for mapping work over
//! independent items (sequential or rayon-parallel). Per-bin statistics are
//! independent of each other, so they go through `execute_batch`, which always
//! returns results in item order.

use crate::primitives::{ComputePrimitives, ScalarBackend};
#[cfg(feature = "parallel")]
use crate::Result;

/// Execution strategy for batch operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Process items sequentially
    Sequential,
    /// Process items in parallel
    Parallel,
}

/// Trait for execution engines that control how computations are performed
pub trait ExecutionEngine: Clone + Send + Sync {
    /// The type of primitives used by this engine
    type Primitives: ComputePrimitives;

    /// Get the primitives for low-level operations
    fn primitives(&self) -> &Self::Primitives;

    /// Evaluate `f` for every index in `0..count`, results in index order
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send;

    /// Get the execution strategy
    fn strategy(&self) -> ExecutionStrategy;

    /// Check if parallel execution is available
    fn is_parallel(&self) -> bool {
        self.strategy() == ExecutionStrategy::Parallel
    }

    /// Get the number of threads available
    fn num_threads(&self) -> usize;
}

/// Sequential execution engine
///
/// Executes all operations sequentially in the current thread.
#[derive(Clone, Debug, Default)]
pub struct SequentialEngine<P: ComputePrimitives> {
    primitives: P,
}

impl<P: ComputePrimitives> SequentialEngine<P> {
    /// Create a new sequential engine with the given primitives
    pub fn new(primitives: P) -> Self {
        Self { primitives }
    }
}

impl<P: ComputePrimitives> ExecutionEngine for SequentialEngine<P> {
    type Primitives = P;

    fn primitives(&self) -> &Self::Primitives {
        &self.primitives
    }

    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        (0..count).map(f).collect()
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Sequential
    }

    fn num_threads(&self) -> usize {
        1
    }
}

/// Parallel execution engine using Rayon
///
/// Runs on the global rayon pool unless built with a dedicated pool size.
#[cfg(feature = "parallel")]
#[derive(Clone, Debug)]
pub struct ParallelEngine<P: ComputePrimitives> {
    primitives: P,
    pool: Option<std::sync::Arc<rayon::ThreadPool>>,
}

#[cfg(feature = "parallel")]
impl<P: ComputePrimitives> ParallelEngine<P> {
    /// Create a parallel engine on the global thread pool
    pub fn new(primitives: P) -> Self {
        Self {
            primitives,
            pool: None,
        }
    }

    /// Create a parallel engine owning a pool of `num_threads` workers
    pub fn with_num_threads(primitives: P, num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| crate::Error::Execution(format!("bin worker pool: {e}")))?;

        Ok(Self {
            primitives,
            pool: Some(std::sync::Arc::new(pool)),
        })
    }

    fn run<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

#[cfg(feature = "parallel")]
impl<P: ComputePrimitives> ExecutionEngine for ParallelEngine<P> {
    type Primitives = P;

    fn primitives(&self) -> &Self::Primitives {
        &self.primitives
    }

    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        use rayon::prelude::*;

        // Indexed collect keeps bin order
        self.run(|| (0..count).into_par_iter().map(f).collect())
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Parallel
    }

    fn num_threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, |pool| pool.current_num_threads())
    }
}

/// Create a sequential scalar engine
pub fn scalar_sequential() -> SequentialEngine<ScalarBackend> {
    SequentialEngine::new(ScalarBackend)
}

/// Create a parallel scalar engine
#[cfg(feature = "parallel")]
pub fn scalar_parallel() -> ParallelEngine<ScalarBackend> {
    ParallelEngine::new(ScalarBackend)
}
