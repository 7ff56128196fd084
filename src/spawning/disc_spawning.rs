use bevy::prelude::*;
use bevy_pbr::NotShadowCaster;

use crate::animation::extraction::INITIAL_SCALE;
use crate::core::components::ExtractionDisc;
use crate::core::quality_tier::QualityTier;
use crate::core::render_settings::RenderSettings;
use crate::core::sample::WavePacketSample;
use crate::generation::packet_mesh::generate_packet_mesh;
use crate::generation::surface::{adjust_height, orientation_for_surface, surface_normal};

/// Generates the disc mesh once and spawns it anchored to the sphere surface
/// under `origin`. All later animation is transform/material-level only; the
/// geometry is never regenerated.
pub fn spawn_extraction_disc(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    samples: &[WavePacketSample],
    settings: &RenderSettings,
    tier: QualityTier,
    origin: Vec3,
) -> Entity {
    let mesh = generate_packet_mesh(samples, settings, tier, 1.0).into_mesh(tier);
    let mesh_handle = meshes.add(mesh);
    let material_handle = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 0.6,
        ..default()
    });

    let base_rotation = orientation_for_surface(surface_normal(origin));
    let translation = adjust_height(origin, settings.sphere_radius, settings.surface_offset);

    let mut disc = commands.spawn_empty();
    disc.insert(Mesh3d(mesh_handle))
        .insert(MeshMaterial3d(material_handle))
        .insert(Transform {
            translation,
            rotation: base_rotation,
            scale: Vec3::splat(INITIAL_SCALE),
        })
        .insert(Name::new("Extraction Disc"))
        .insert(ExtractionDisc::new(base_rotation))
        .insert(InheritedVisibility::default());

    if !tier.casts_shadows() {
        disc.insert(NotShadowCaster);
    }

    disc.id()
}
