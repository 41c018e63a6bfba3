//! Tests for `ColorPool` population, nearest lookup and bucket eviction

#[cfg(test)]
mod tests {
    use allrgb::SynthesisError;
    use allrgb::algorithm::pool::ColorPool;
    use allrgb::math::{Color, TOTAL_COLORS};

    fn gray(value: u8) -> Color {
        Color::new(value, value, value)
    }

    // Tests full pool holds every color in consistent buckets
    // Verified by skipping the last color during population
    #[test]
    fn test_full_pool_population() {
        let pool = ColorPool::full();
        assert_eq!(pool.size(), TOTAL_COLORS);
        assert_eq!(pool.active_keys().count(), 256);
        assert_eq!(pool.bucket_len(0), 7);
        assert_eq!(pool.bucket_len(255), 7);
        let total: usize = (0..=255).map(|key| pool.bucket_len(key)).sum();
        assert_eq!(total, TOTAL_COLORS);
    }

    // Tests a fresh full pool releases colors in lexicographic order per bucket
    // Verified by inserting colors in reverse order
    #[test]
    fn test_full_pool_fifo_order() {
        let mut pool = ColorPool::full();
        assert_eq!(pool.nearest_and_remove(0).ok(), Some(Color::new(0, 0, 0)));
        assert_eq!(pool.nearest_and_remove(0).ok(), Some(Color::new(0, 0, 1)));
        assert_eq!(pool.size(), TOTAL_COLORS - 2);
    }

    // Tests duplicate colors are rejected
    // Verified by disabling the seen-color check
    #[test]
    fn test_from_colors_rejects_duplicates() {
        let result = ColorPool::from_colors([gray(1), gray(2), gray(1)]);
        assert!(matches!(
            result,
            Err(SynthesisError::InvalidSourceData { .. })
        ));
    }

    // Tests removal returns the nearest key and ties go to the darker key
    // Verified by preferring the brighter key on ties
    #[test]
    fn test_nearest_and_remove_tie_break() {
        let mut pool = ColorPool::from_colors([gray(10), gray(20)]).expect("valid pool");
        assert_eq!(pool.nearest_key(15), Some(10));
        assert_eq!(pool.nearest_and_remove(15).ok(), Some(gray(10)));
        assert_eq!(pool.nearest_and_remove(15).ok(), Some(gray(20)));
        assert!(pool.is_empty());
    }

    // Tests a drained bucket is never selected again
    // Verified by leaving the key active after its bucket empties
    #[test]
    fn test_bucket_eviction() {
        let red = Color::new(255, 0, 0);
        let mut pool =
            ColorPool::from_colors([red, gray(77), gray(90), gray(60)]).expect("valid pool");
        assert_eq!(pool.bucket_len(77), 2);

        assert_eq!(pool.nearest_and_remove(77).ok(), Some(red));
        assert_eq!(pool.nearest_and_remove(77).ok(), Some(gray(77)));
        assert_eq!(pool.bucket_len(77), 0);
        assert!(!pool.active_keys().any(|key| key == 77));

        // 60 is 17 away, 90 is 13 away
        assert_eq!(pool.nearest_and_remove(77).ok(), Some(gray(90)));
        assert_eq!(pool.nearest_and_remove(77).ok(), Some(gray(60)));
        assert!(pool.is_consistent());
    }

    // Tests empty pool reports exhaustion instead of panicking
    // Verified by returning a default color on an empty pool
    #[test]
    fn test_exhausted_pool() {
        let mut pool = ColorPool::from_colors([gray(3)]).expect("valid pool");
        assert!(pool.nearest_and_remove(200).is_ok());

        let err = pool.nearest_and_remove(200).unwrap_err();
        assert!(matches!(
            err,
            SynthesisError::PoolExhausted { target: 200, .. }
        ));
        assert_eq!(pool.size(), 0);
    }

    // Tests bucket views follow removal order and stay consistent
    // Verified by exposing consumed colors in the bucket view
    #[test]
    fn test_bucket_views() {
        let mut pool =
            ColorPool::from_colors([gray(5), Color::new(0, 0, 45), gray(6)]).expect("valid pool");
        assert!(pool.is_consistent());
        assert_eq!(pool.bucket_len(5), 2);

        pool.nearest_and_remove(5).expect("color available");
        let bucket: Vec<Color> = pool
            .buckets()
            .find(|(key, _)| *key == 5)
            .map(|(_, colors)| colors.to_vec())
            .unwrap_or_default();
        assert_eq!(bucket, vec![Color::new(0, 0, 45)]);
        assert!(pool.is_consistent());
    }
}
