use bevy::prelude::*;

use crate::core::components::ExtractionDisc;
use crate::core::quality_tier::QualityTier;
use crate::core::render_settings::RenderSettings;

/// The single extraction slot: starting a new extraction implicitly ends any
/// prior one (last-writer-wins, no queuing).
#[derive(Resource, Default)]
pub struct ActiveExtraction(pub Option<Entity>);

/// Tier choice made once at plugin construction.
#[derive(Resource, Clone, Copy)]
pub struct RendererTier(pub QualityTier);

/// Progress past which the disc fades out.
pub const FADE_START_PROGRESS: f32 = 0.9;

/// Scale the disc spawns at, before any progress has accrued.
pub const INITIAL_SCALE: f32 = 0.1;

pub fn scale_for_progress(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    INITIAL_SCALE + (1.0 - INITIAL_SCALE) * p
}

pub fn alpha_for_progress(progress: f32) -> f32 {
    if progress <= FADE_START_PROGRESS {
        1.0
    } else {
        ((1.0 - progress) / (1.0 - FADE_START_PROGRESS)).clamp(0.0, 1.0)
    }
}

/// Per-frame extraction animation. The mesh was generated once at start;
/// this only touches the transform and the material alpha, and despawns the
/// disc when progress completes.
pub fn extraction_animation_system(
    time: Res<Time>,
    settings: Res<RenderSettings>,
    mut active: ResMut<ActiveExtraction>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<(
        Entity,
        &mut Transform,
        &mut ExtractionDisc,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    mut commands: Commands,
) {
    for (entity, mut transform, mut disc, material) in query.iter_mut() {
        disc.elapsed += time.delta_secs();
        if !disc.externally_driven {
            disc.progress = (disc.elapsed / settings.extraction_duration).min(1.0);
        }

        let spin = Quat::from_rotation_y(disc.elapsed * settings.rotation_speed);
        transform.rotation = disc.base_rotation * spin;
        transform.scale = Vec3::splat(scale_for_progress(disc.progress));

        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color.set_alpha(alpha_for_progress(disc.progress));
        }

        if disc.progress >= 1.0 {
            debug!("extraction complete, releasing disc {:?}", entity);
            commands.entity(entity).despawn_recursive();
            if active.0 == Some(entity) {
                active.0 = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_extraction_starts_small_and_opaque() {
        assert!((scale_for_progress(0.0) - 0.1).abs() < 1e-6);
        assert!((alpha_for_progress(0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn completed_extraction_is_full_size_and_invisible() {
        assert!((scale_for_progress(1.0) - 1.0).abs() < 1e-6);
        assert!(alpha_for_progress(1.0).abs() < 1e-6);
    }

    #[test]
    fn alpha_only_fades_past_the_threshold() {
        assert!((alpha_for_progress(0.5) - 1.0).abs() < 1e-6);
        assert!((alpha_for_progress(0.9) - 1.0).abs() < 1e-6);
        assert!((alpha_for_progress(0.95) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn scale_grows_linearly_with_progress() {
        assert!((scale_for_progress(0.5) - 0.55).abs() < 1e-6);
        // Out-of-range progress clamps rather than overshooting.
        assert!((scale_for_progress(1.5) - 1.0).abs() < 1e-6);
        assert!((scale_for_progress(-0.5) - 0.1).abs() < 1e-6);
    }
}
