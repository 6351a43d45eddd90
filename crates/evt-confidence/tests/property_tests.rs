//! Property-based tests for the normal-approximation intervals

use evt_confidence::AsymptoticCI;
use proptest::prelude::*;

proptest! {
    /// A valid interval always brackets its point estimate.
    #[test]
    fn interval_brackets_point(
        point in -1e6f64..1e6,
        variance in 1e-6f64..1e6,
        level in 0.01f64..0.99,
    ) {
        let ci = AsymptoticCI::new(level).unwrap().interval(point, variance).unwrap();
        prop_assert!(ci.lower <= point);
        prop_assert!(point <= ci.upper);
        prop_assert!(ci.contains(point));
        prop_assert_eq!(ci.confidence_level, level);
    }

    /// Raising the confidence level strictly widens the interval.
    #[test]
    fn interval_widens_with_level(
        point in -1e6f64..1e6,
        variance in 1e-6f64..1e6,
        level in 0.1f64..0.8,
    ) {
        let narrow = AsymptoticCI::new(level).unwrap().interval(point, variance).unwrap();
        let wide = AsymptoticCI::new(level + 0.1).unwrap().interval(point, variance).unwrap();
        prop_assert!(wide.width() > narrow.width());
    }

    /// Levels outside (0, 1) always fail.
    #[test]
    fn invalid_levels_fail(level in prop_oneof![-10.0f64..=0.0, 1.0f64..10.0]) {
        prop_assert!(AsymptoticCI::new(level).is_err());
    }

    /// Non-positive variances always fail.
    #[test]
    fn non_positive_variance_fails(
        point in -1e6f64..1e6,
        variance in -1e6f64..=0.0,
    ) {
        prop_assert!(AsymptoticCI::new(0.95).unwrap().interval(point, variance).is_err());
    }
}
