use serde::{Serialize, Deserialize};

/// Tier selection is a platform-capability decision made once at plugin
/// construction; everything downstream dispatches on the tag.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTier {
    HighFidelity,
    Constrained,
}

impl QualityTier {
    /// Grid resolution of the generated disc. Generation cost is O(resolution²)
    /// and runs synchronously inside the frame, so the constrained tier stays
    /// small enough for tight per-frame budgets.
    pub fn resolution(&self) -> usize {
        match self {
            QualityTier::HighFidelity => 128,
            QualityTier::Constrained => 32,
        }
    }

    pub fn casts_shadows(&self) -> bool {
        matches!(self, QualityTier::HighFidelity)
    }

    /// Whether the smooth-normal post-pass runs on generated meshes.
    pub fn optimizes_mesh(&self) -> bool {
        matches!(self, QualityTier::HighFidelity)
    }

    pub fn for_platform() -> Self {
        if cfg!(target_arch = "wasm32") {
            QualityTier::Constrained
        } else {
            QualityTier::HighFidelity
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrained_tier_disables_post_processing() {
        assert!(!QualityTier::Constrained.casts_shadows());
        assert!(!QualityTier::Constrained.optimizes_mesh());
        assert!(QualityTier::HighFidelity.casts_shadows());
        assert!(QualityTier::HighFidelity.optimizes_mesh());
    }

    #[test]
    fn tiers_differ_only_in_resolution_scale() {
        assert_eq!(QualityTier::HighFidelity.resolution(), 128);
        assert_eq!(QualityTier::Constrained.resolution(), 32);
    }
}
