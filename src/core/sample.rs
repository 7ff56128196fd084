use serde::{Serialize, Deserialize};

/// One entry in a packet composition: a quantity of energy quanta sharing a
/// frequency. `amplitude` and `phase` are carried through from the mining
/// layer for a future interference model; generation does not read them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct WavePacketSample {
    pub frequency: f32,
    pub amplitude: f32,
    pub phase: f32,
    pub count: u32,
}

impl WavePacketSample {
    pub fn new(frequency: f32, count: u32) -> Self {
        WavePacketSample {
            frequency,
            amplitude: 1.0,
            phase: 0.0,
            count,
        }
    }
}

pub fn total_count(samples: &[WavePacketSample]) -> u64 {
    samples.iter().map(|s| s.count as u64).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_count_sums_all_entries() {
        let samples = vec![
            WavePacketSample::new(0.0, 30),
            WavePacketSample::new(1.0, 0),
            WavePacketSample::new(2.0, 12),
        ];
        assert_eq!(total_count(&samples), 42);
    }

    #[test]
    fn empty_set_has_zero_count() {
        assert_eq!(total_count(&[]), 0);
    }
}
