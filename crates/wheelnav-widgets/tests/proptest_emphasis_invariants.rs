//! Property tests for the de-emphasis curve.
//!
//! 1. **Bounds**: scale and opacity stay inside `[floor, 1]`.
//! 2. **Monotonic**: neither value increases with distance.
//! 3. **Inset bound**: the inset never exceeds half the row width.

use proptest::prelude::*;
use wheelnav_core::config::EmphasisConfig;
use wheelnav_widgets::emphasis::emphasis;

fn config_strategy() -> impl Strategy<Value = EmphasisConfig> {
    (0.0f32..1.0, 0.0f32..1.0, 0.0f32..1.0, 0.0f32..1.0).prop_map(|(sf, of, ms, mo)| {
        EmphasisConfig {
            scale_falloff: sf,
            opacity_falloff: of,
            min_scale: ms,
            min_opacity: mo,
        }
    })
}

proptest! {
    #[test]
    fn values_within_bounds(cfg in config_strategy(), d in 0usize..1000) {
        let e = emphasis(d, &cfg);
        prop_assert!(e.scale >= cfg.min_scale && e.scale <= 1.0);
        prop_assert!(e.opacity >= cfg.min_opacity && e.opacity <= 1.0);
    }

    #[test]
    fn non_increasing_with_distance(cfg in config_strategy(), d in 0usize..1000) {
        let near = emphasis(d, &cfg);
        let far = emphasis(d + 1, &cfg);
        prop_assert!(far.scale <= near.scale);
        prop_assert!(far.opacity <= near.opacity);
        prop_assert!(far.tone() >= near.tone());
    }

    #[test]
    fn inset_at_most_half_width(cfg in config_strategy(), d in 0usize..50, width in 0u16..400) {
        prop_assert!(emphasis(d, &cfg).inset(width) <= width / 2);
    }
}
