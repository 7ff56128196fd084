use bevy::prelude::*;

use crate::animation::extraction::{ActiveExtraction, RendererTier};
use crate::animation::trajectory::{SurfaceAnchor, TrajectoryController};
use crate::core::components::ExtractionDisc;
use crate::core::render_settings::RenderSettings;
use crate::core::sample::WavePacketSample;
use crate::generation::dominant_color::dominant_color;
use crate::generation::surface::orientation_for_surface;
use crate::spawning::disc_spawning::spawn_extraction_disc;
use crate::spawning::packet_spawning::spawn_flying_packet;

/// Begins visualizing an extraction at a world-space origin. Any extraction
/// already running is implicitly ended first.
#[derive(Debug, Clone, Event)]
pub struct ExtractionStartEvent {
    pub samples: Vec<WavePacketSample>,
    pub origin: Vec3,
}

/// Overrides the extraction clock with externally decided progress.
#[derive(Debug, Clone, Event)]
pub struct ExtractionProgressEvent {
    pub progress: f32,
}

/// Cancels the active extraction immediately, releasing its resources.
#[derive(Debug, Clone, Event)]
pub struct ExtractionEndEvent;

/// Launches a minimal packet proxy from `start` toward a sphere-anchored
/// target, moved by a trajectory controller until arrival.
#[derive(Debug, Clone, Event)]
pub struct FlyingPacketSpawnEvent {
    pub samples: Vec<WavePacketSample>,
    pub start: Vec3,
    pub target_direction: Vec3,
    pub target_height: f32,
    pub target_rotation: Quat,
    pub speed: f32,
}

/// Fired once when a trajectory's final phase completes, after the object
/// snapped onto its end anchor.
#[derive(Debug, Clone, Event)]
pub struct TrajectoryArrivedEvent {
    pub entity: Entity,
    pub position: Vec3,
}

pub fn extraction_start_listener(
    mut start_reader: EventReader<ExtractionStartEvent>,
    settings: Res<RenderSettings>,
    tier: Res<RendererTier>,
    mut active: ResMut<ActiveExtraction>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    for event in start_reader.read() {
        // Last-writer-wins: no queuing of extractions.
        if let Some(previous) = active.0.take() {
            debug!("new extraction supersedes disc {:?}", previous);
            commands.entity(previous).despawn_recursive();
        }

        let entity = spawn_extraction_disc(
            &mut commands,
            &mut meshes,
            &mut materials,
            &event.samples,
            &settings,
            tier.0,
            event.origin,
        );
        info!(
            "started extraction of {} samples at {:?}",
            event.samples.len(),
            event.origin
        );
        active.0 = Some(entity);
    }
}

pub fn extraction_progress_listener(
    mut progress_reader: EventReader<ExtractionProgressEvent>,
    active: Res<ActiveExtraction>,
    mut discs: Query<&mut ExtractionDisc>,
) {
    for event in progress_reader.read() {
        let Some(entity) = active.0 else {
            warn!("extraction progress received with no active extraction");
            continue;
        };
        if let Ok(mut disc) = discs.get_mut(entity) {
            disc.progress = event.progress.clamp(0.0, 1.0);
            disc.externally_driven = true;
        }
    }
}

pub fn extraction_end_listener(
    mut end_reader: EventReader<ExtractionEndEvent>,
    mut active: ResMut<ActiveExtraction>,
    mut commands: Commands,
) {
    for _ in end_reader.read() {
        if let Some(entity) = active.0.take() {
            info!("extraction ended, releasing disc {:?}", entity);
            commands.entity(entity).despawn_recursive();
        }
    }
}

pub fn flying_packet_spawn_listener(
    mut packet_reader: EventReader<FlyingPacketSpawnEvent>,
    settings: Res<RenderSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    for event in packet_reader.read() {
        let start = SurfaceAnchor::from_world(event.start, settings.sphere_radius);
        let end = SurfaceAnchor::new(event.target_direction, event.target_height);
        let start_rotation = orientation_for_surface(start.direction);

        let controller = TrajectoryController::new(
            start,
            end,
            start_rotation,
            event.target_rotation,
            event.speed,
            settings.sphere_radius,
        );

        let color = dominant_color(&event.samples, &settings);
        let entity = spawn_flying_packet(
            &mut commands,
            &mut meshes,
            &mut materials,
            color,
            event.start,
            start_rotation,
        );
        commands.entity(entity).insert(controller);
        debug!("flying packet {:?} launched from {:?}", entity, event.start);
    }
}
