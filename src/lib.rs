pub mod core;
pub mod generation;
pub mod spawning;
pub mod systems;
pub mod animation;

pub use crate::core::quality_tier::QualityTier;
pub use crate::core::render_settings::RenderSettings;
pub use crate::core::sample::WavePacketSample;
pub use crate::core::viz_plugin::WavePacketPlugin;
