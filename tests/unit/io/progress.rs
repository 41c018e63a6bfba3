//! Tests for progress display bookkeeping

#[cfg(test)]
mod tests {
    use allrgb::io::progress::ProgressManager;

    // Tests a full run of updates including a pass index past the last pass
    // Verified by indexing the pass label without clamping
    #[test]
    fn test_progress_lifecycle() {
        let manager = ProgressManager::new(1000, 4);
        manager.set_label("out.png");
        manager.update(250, 0);
        manager.update(1000, 4);
        manager.finish();
    }

    #[test]
    fn test_progress_single_pass() {
        let manager = ProgressManager::new(1, 1);
        manager.update(1, 1);
        manager.finish();
    }
}
