//! Tests for `LuminanceBitset` membership and nearest-key queries

#[cfg(test)]
mod tests {
    use allrgb::algorithm::bitset::LuminanceBitset;

    fn bitset_of(keys: &[u8]) -> LuminanceBitset {
        let mut bitset = LuminanceBitset::new();
        for &key in keys {
            bitset.insert(key);
        }
        bitset
    }

    // Verifies new LuminanceBitset is empty with count 0
    // Verified by initializing bitset with all bits set to 1
    #[test]
    fn test_new_bitset() {
        let bitset = LuminanceBitset::new();
        assert_eq!(bitset.count(), 0);
        assert!(bitset.is_empty());
        assert_eq!(bitset.nearest(128), None);
    }

    // Tests insertion, removal and membership
    // Verified by removing the bit-clearing logic from remove
    #[test]
    fn test_insert_remove_contains() {
        let mut bitset = bitset_of(&[0, 5, 255]);
        assert!(bitset.contains(5));
        assert!(bitset.contains(255));
        assert!(!bitset.contains(4));
        assert_eq!(bitset.count(), 3);

        bitset.remove(5);
        assert!(!bitset.contains(5));
        assert_eq!(bitset.iter().collect::<Vec<_>>(), vec![0, 255]);
    }

    #[test]
    fn test_every_key_fits() {
        let mut bitset = LuminanceBitset::new();
        (0..=255).for_each(|key| bitset.insert(key));
        assert_eq!(bitset.count(), 256);
        assert_eq!(bitset.nearest(128), Some(128));
    }

    // Tests exact match wins over neighbours
    // Verified by searching strictly below and above the target
    #[test]
    fn test_nearest_exact() {
        let bitset = bitset_of(&[99, 100, 101]);
        assert_eq!(bitset.nearest(100), Some(100));
    }

    // Tests equally distant keys resolve to the darker one
    // Verified by changing <= to < in the tie comparison
    #[test]
    fn test_nearest_tie_prefers_lower() {
        let bitset = bitset_of(&[10, 20]);
        assert_eq!(bitset.nearest(15), Some(10));
        assert_eq!(bitset.nearest(16), Some(20));
        assert_eq!(bitset.nearest(14), Some(10));
    }

    // Tests one-sided lookups at both ends of the range
    // Verified by dropping the offset added to the upper search result
    #[test]
    fn test_nearest_one_sided() {
        let bitset = bitset_of(&[200]);
        assert_eq!(bitset.nearest(0), Some(200));
        assert_eq!(bitset.nearest(255), Some(200));

        let edges = bitset_of(&[0, 255]);
        assert_eq!(edges.nearest(127), Some(0));
        assert_eq!(edges.nearest(128), Some(255));
    }

    #[test]
    fn test_display() {
        let bitset = bitset_of(&[1, 2]);
        assert_eq!(bitset.to_string(), "LuminanceBitset(2 keys: [1, 2])");
    }
}
