use bevy::prelude::*;

// Animation state for one extraction disc. The mesh is generated once at
// start; everything here drives per-frame transform updates only.
#[derive(Component, Clone, Debug)]
pub struct ExtractionDisc {
    pub elapsed: f32,
    pub progress: f32,
    /// Set when a progress event overrides the internal clock.
    pub externally_driven: bool,
    /// Disc orientation on the sphere surface; spin is applied on top of this.
    pub base_rotation: Quat,
}

impl ExtractionDisc {
    pub fn new(base_rotation: Quat) -> Self {
        ExtractionDisc {
            elapsed: 0.0,
            progress: 0.0,
            externally_driven: false,
            base_rotation,
        }
    }
}

/// Minimal proxy for a packet in flight between two surface anchors.
#[derive(Component, Clone, Debug)]
pub struct FlyingPacket;
