//! Conditional parallel iteration.
//!
//! Uses rayon when the `parallel` feature is enabled and the
//! [`ComputeConfig`] threshold is met; otherwise iterates sequentially.
//! Output order always matches input order.

use riskshare_core::ComputeConfig;

/// Maps a function over items, conditionally using parallel iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The collection size reaches `config.parallel_threshold`
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &ComputeConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maybe_parallel_map_sequential() {
        let config = ComputeConfig::sequential();
        let items = vec![1, 2, 3, 4, 5];
        let results: Vec<i32> = maybe_parallel_map(&items, &config, |x| x * 2);
        assert_eq!(results, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_maybe_parallel_map_preserves_order() {
        let config = ComputeConfig::new().with_threshold(1);
        let items: Vec<usize> = (0..1_000).collect();
        let results = maybe_parallel_map(&items, &config, |x| x * x);
        assert!(results.iter().enumerate().all(|(i, v)| *v == i * i));
    }
}
