/// Concurrency management for batch runs.
/// Each unit is traversed on a single thread; units run side by side.

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use tracing::info;

/// Worker count: the configured value, or half the cores (minimum 1).
pub fn worker_count(requested: Option<usize>) -> usize {
    match requested {
        Some(n) if n > 0 => n,
        _ => std::cmp::max(1, num_cpus::get() / 2),
    }
}

/// Build the pool that batch runs execute on.
pub fn build_pool(requested: Option<usize>) -> Result<ThreadPool, ThreadPoolBuildError> {
    let workers = worker_count(requested);

    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("delineate-{}", i))
        .build()?;

    info!(workers, cores = num_cpus::get(), "initialized thread pool");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_count() {
        assert_eq!(worker_count(Some(3)), 3);
        assert!(worker_count(Some(0)) >= 1);
        assert!(worker_count(None) >= 1);
    }

    #[test]
    fn test_build_pool_uses_requested_size() {
        let pool = build_pool(Some(2)).unwrap();
        assert_eq!(pool.current_num_threads(), 2);
    }
}
