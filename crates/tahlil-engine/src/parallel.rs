//! Conditional parallel dispatch for unit evaluation.
//!
//! Uses rayon when the `parallel` feature is enabled, the config allows it
//! and the batch is large enough. Output order always matches input order,
//! so callers see identical results either way.

use crate::config::EngineConfig;

/// Maps a function over items, conditionally using parallel iteration.
#[allow(unused_variables)]
pub(crate) fn maybe_parallel_map<T, U, F>(items: &[T], config: &EngineConfig, f: F) -> Vec<U>
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
    fn test_sequential_map() {
        let config = EngineConfig::sequential();
        let items = vec![1, 2, 3];
        assert_eq!(maybe_parallel_map(&items, &config, |x| x * 2), vec![2, 4, 6]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_preserves_order() {
        let config = EngineConfig::new().with_threshold(1);
        let items: Vec<i32> = (0..200).collect();
        let doubled = maybe_parallel_map(&items, &config, |x| x * 2);
        assert_eq!(doubled, items.iter().map(|x| x * 2).collect::<Vec<_>>());
    }
}
