use std::f32::consts::{FRAC_PI_3, PI, TAU};

pub const RING_COUNT: usize = 6;

// A frequency further than this from every canonical ring is excluded from
// the height/color field.
pub const SNAP_TOLERANCE: f32 = 0.1;

/// Canonical range for periodic frequencies is [0, 2π).
pub fn wrap_frequency(frequency: f32) -> f32 {
    frequency.rem_euclid(TAU)
}

/// The canonical frequency bound to a ring: rings sit every 60 degrees.
pub fn canonical_frequency(ring: usize) -> f32 {
    ring as f32 * FRAC_PI_3
}

/// Snaps a frequency to the nearest canonical ring, or `None` when it falls
/// outside the snap tolerance. Distance is circular, so values just under 2π
/// snap to ring 0.
pub fn classify_frequency(frequency: f32) -> Option<usize> {
    let wrapped = wrap_frequency(frequency);
    let nearest = (wrapped / FRAC_PI_3).round() as usize % RING_COUNT;

    let mut distance = (wrapped - canonical_frequency(nearest)).abs();
    if distance > PI {
        distance = TAU - distance;
    }

    (distance <= SNAP_TOLERANCE).then_some(nearest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_canonical_frequencies_classify_to_their_ring() {
        for ring in 0..RING_COUNT {
            assert_eq!(classify_frequency(canonical_frequency(ring)), Some(ring));
        }
    }

    #[test]
    fn frequencies_within_tolerance_snap() {
        assert_eq!(classify_frequency(FRAC_PI_3 + 0.09), Some(1));
        assert_eq!(classify_frequency(FRAC_PI_3 - 0.09), Some(1));
    }

    #[test]
    fn frequencies_outside_tolerance_are_unmatched() {
        assert_eq!(classify_frequency(FRAC_PI_3 + 0.2), None);
        assert_eq!(classify_frequency(0.5), None);
    }

    #[test]
    fn wraparound_snaps_to_ring_zero() {
        assert_eq!(classify_frequency(TAU - 0.05), Some(0));
        assert_eq!(classify_frequency(TAU + 0.05), Some(0));
        assert_eq!(classify_frequency(-0.05), Some(0));
    }

    #[test]
    fn wrap_frequency_is_canonical() {
        assert!((wrap_frequency(TAU + 1.0) - 1.0).abs() < 1e-6);
        assert!(wrap_frequency(-1.0) >= 0.0);
        assert!(wrap_frequency(-1.0) < TAU);
    }
}
