use bevy::app::{App, Plugin, Update};

use crate::animation::extraction::{extraction_animation_system, ActiveExtraction, RendererTier};
use crate::animation::trajectory::trajectory_tick_system;
use crate::core::quality_tier::QualityTier;
use crate::core::render_settings::RenderSettings;
use crate::systems::events::{
    extraction_end_listener, extraction_progress_listener, extraction_start_listener,
    flying_packet_spawn_listener, ExtractionEndEvent, ExtractionProgressEvent,
    ExtractionStartEvent, FlyingPacketSpawnEvent, TrajectoryArrivedEvent,
};

pub struct WavePacketPlugin {
    pub settings: RenderSettings,
    pub tier: QualityTier,
}

impl Default for WavePacketPlugin {
    fn default() -> Self {
        WavePacketPlugin {
            settings: RenderSettings::default(),
            tier: QualityTier::for_platform(),
        }
    }
}

impl Plugin for WavePacketPlugin {
    fn build(&self, app: &mut App) {
        // Configuration errors are fatal: never run with geometry settings
        // that would silently produce wrong meshes.
        if let Err(error) = self.settings.validate() {
            panic!("invalid wave-packet render settings: {:?}", error);
        }

        app.insert_resource(self.settings.clone())
            .insert_resource(RendererTier(self.tier))
            .init_resource::<ActiveExtraction>()
            .add_event::<ExtractionStartEvent>()
            .add_event::<ExtractionProgressEvent>()
            .add_event::<ExtractionEndEvent>()
            .add_event::<FlyingPacketSpawnEvent>()
            .add_event::<TrajectoryArrivedEvent>()
            .add_systems(
                Update,
                (
                    extraction_start_listener,
                    extraction_progress_listener,
                    extraction_end_listener,
                    flying_packet_spawn_listener,
                ),
            )
            .add_systems(
                Update,
                (extraction_animation_system, trajectory_tick_system),
            );
    }
}
