//! Tests for canvas shape table and aspect ratio selection

#[cfg(test)]
mod tests {
    use allrgb::math::TOTAL_COLORS;
    use allrgb::spatial::{Aspect, FULL_COLOR_ASPECTS, select_aspect};

    #[test]
    fn test_full_color_aspects_hold_every_color() {
        let ratios: Vec<f64> = FULL_COLOR_ASPECTS.iter().map(Aspect::ratio).collect();
        assert_eq!(ratios, vec![0.0625, 0.25, 1.0, 4.0, 16.0]);
        assert!(
            FULL_COLOR_ASPECTS
                .iter()
                .all(|aspect| aspect.area() == TOTAL_COLORS)
        );
    }

    // Tests the documented selections
    // Verified by comparing against height/width instead of width/height
    #[test]
    fn test_select_aspect_examples() {
        let select = |w, h| select_aspect(w, h, &FULL_COLOR_ASPECTS).ok();

        assert_eq!(select(4096, 4096), Some(Aspect::new(4096, 4096)));
        assert_eq!(select(16000, 1000), Some(Aspect::new(16384, 1024)));
        assert_eq!(select(1000, 16000), Some(Aspect::new(1024, 16384)));
        assert_eq!(select(1920, 1080), Some(Aspect::new(4096, 4096)));
        assert_eq!(select(3000, 1000), Some(Aspect::new(8192, 2048)));
        assert_eq!(select(1, 5), Some(Aspect::new(2048, 8192)));
    }

    // Tests exact ties keep the earlier candidate
    // Verified by using <= in the distance comparison
    #[test]
    fn test_select_aspect_tie_keeps_first() {
        let candidates = [Aspect::new(1, 1), Aspect::new(4, 1)];
        assert_eq!(
            select_aspect(5, 2, &candidates).ok(),
            Some(Aspect::new(1, 1))
        );
    }

    // Tests degenerate inputs are reported instead of dividing by zero
    // Verified by removing the zero-size guard
    #[test]
    fn test_select_aspect_errors() {
        assert!(select_aspect(0, 10, &FULL_COLOR_ASPECTS).is_err());
        assert!(select_aspect(10, 0, &FULL_COLOR_ASPECTS).is_err());
        assert!(select_aspect(10, 10, &[]).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Aspect::new(2048, 8192).to_string(), "2048x8192");
        assert_eq!(Aspect::new(3, 4).dimensions(), (3, 4));
    }
}
