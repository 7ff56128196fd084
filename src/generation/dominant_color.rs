use bevy::prelude::*;

use crate::core::frequency::classify_frequency;
use crate::core::render_settings::{RenderSettings, FALLBACK_COLOR};
use crate::core::sample::WavePacketSample;

/// Coarse single-color estimate of a packet composition: the count-weighted
/// average of each sample's ring color. Unmatched frequencies still weigh in,
/// but only with a neutral fallback. Order-independent; neutral when the
/// composition is empty.
pub fn dominant_color(samples: &[WavePacketSample], settings: &RenderSettings) -> Color {
    let total: u64 = samples.iter().map(|s| s.count as u64).sum();
    if total == 0 {
        return FALLBACK_COLOR;
    }

    let mut accumulated = Vec3::ZERO;
    for sample in samples.iter().filter(|s| s.count > 0) {
        let color = match classify_frequency(sample.frequency) {
            Some(ring) => settings.ring_colors[ring],
            None => FALLBACK_COLOR,
        };
        let linear = color.to_linear();
        accumulated += Vec3::new(linear.red, linear.green, linear.blue) * sample.count as f32;
    }

    let averaged = accumulated / total as f32;
    Color::linear_rgba(averaged.x, averaged.y, averaged.z, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frequency::canonical_frequency;

    fn linear_distance(a: Color, b: Color) -> f32 {
        let (a, b) = (a.to_linear(), b.to_linear());
        Vec3::new(a.red - b.red, a.green - b.green, a.blue - b.blue).length()
    }

    #[test]
    fn empty_composition_is_neutral() {
        let settings = RenderSettings::default();
        assert_eq!(dominant_color(&[], &settings), FALLBACK_COLOR);

        let zeroed = vec![WavePacketSample::new(canonical_frequency(2), 0)];
        assert_eq!(dominant_color(&zeroed, &settings), FALLBACK_COLOR);
    }

    #[test]
    fn lone_sample_yields_its_ring_color() {
        let settings = RenderSettings::default();
        let samples = vec![
            WavePacketSample::new(canonical_frequency(3), 17),
            WavePacketSample::new(canonical_frequency(1), 0),
        ];
        let color = dominant_color(&samples, &settings);
        assert!(linear_distance(color, settings.ring_colors[3]) < 1e-5);
    }

    #[test]
    fn estimate_is_order_independent() {
        let settings = RenderSettings::default();
        let mut samples = vec![
            WavePacketSample::new(canonical_frequency(0), 30),
            WavePacketSample::new(canonical_frequency(2), 20),
            WavePacketSample::new(canonical_frequency(4), 10),
        ];
        let forward = dominant_color(&samples, &settings);
        samples.reverse();
        let reversed = dominant_color(&samples, &settings);
        assert!(linear_distance(forward, reversed) < 1e-6);
    }

    #[test]
    fn heaviest_sample_dominates_the_weighted_average() {
        let settings = RenderSettings::default();
        let samples = vec![
            WavePacketSample::new(canonical_frequency(0), 30),
            WavePacketSample::new(canonical_frequency(2), 20),
            WavePacketSample::new(canonical_frequency(4), 10),
        ];
        let color = dominant_color(&samples, &settings);
        let to_ring0 = linear_distance(color, settings.ring_colors[0]);
        assert!(to_ring0 < linear_distance(color, settings.ring_colors[2]));
        assert!(to_ring0 < linear_distance(color, settings.ring_colors[4]));
    }

    #[test]
    fn unmatched_frequencies_pull_toward_neutral() {
        let settings = RenderSettings::default();
        let matched = vec![WavePacketSample::new(canonical_frequency(0), 10)];
        let mixed = vec![
            WavePacketSample::new(canonical_frequency(0), 10),
            WavePacketSample::new(0.5, 10), // between rings, unmatched
        ];
        let pure = dominant_color(&matched, &settings);
        let diluted = dominant_color(&mixed, &settings);
        assert!(
            linear_distance(diluted, FALLBACK_COLOR) < linear_distance(pure, FALLBACK_COLOR)
        );
    }
}
