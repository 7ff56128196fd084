use bevy::prelude::*;

use crate::core::components::FlyingPacket;
use crate::generation::surface::adjust_height;
use crate::systems::events::TrajectoryArrivedEvent;

/// Heights closer than this are treated as equal when picking a motion
/// profile.
pub const HEIGHT_EPSILON: f32 = 1e-3;

/// Duration floor for degenerate legs, so zero-distance moves never divide by
/// zero.
pub const MIN_PHASE_DURATION: f32 = 0.05;

/// A point anchored to the sphere: unit direction from the center plus height
/// above the surface.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceAnchor {
    pub direction: Vec3,
    pub height: f32,
}

impl SurfaceAnchor {
    pub fn new(direction: Vec3, height: f32) -> Self {
        SurfaceAnchor {
            direction: direction.normalize_or_zero(),
            height,
        }
    }

    /// Anchor under an arbitrary world position on a sphere of the given
    /// radius.
    pub fn from_world(position: Vec3, sphere_radius: f32) -> Self {
        SurfaceAnchor {
            direction: position.normalize_or_zero(),
            height: position.length() - sphere_radius,
        }
    }

    pub fn world_position(&self, sphere_radius: f32) -> Vec3 {
        adjust_height(self.direction, sphere_radius, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionProfile {
    SinglePhase,
    RiseThenHorizontal,
    HorizontalThenDescend,
}

#[derive(Debug, Clone, Copy)]
enum PhaseKind {
    /// Height-only interpolation at a fixed angular position.
    Vertical { direction: Vec3, from: f32, to: f32 },
    /// Angular-only interpolation at a fixed height.
    Horizontal { from: Vec3, to: Vec3, height: f32 },
}

#[derive(Debug, Clone, Copy)]
struct TrajectoryPhase {
    kind: PhaseKind,
    duration: f32,
}

impl TrajectoryPhase {
    fn position_at(&self, t: f32, sphere_radius: f32) -> Vec3 {
        match self.kind {
            PhaseKind::Vertical { direction, from, to } => {
                adjust_height(direction, sphere_radius, from + (to - from) * t)
            }
            PhaseKind::Horizontal { from, to, height } => {
                let a = adjust_height(from, sphere_radius, height);
                let b = adjust_height(to, sphere_radius, height);
                // Chord lerp renormalized onto the sphere keeps the leg on a
                // great-circle arc at constant height.
                let blended = a.lerp(b, t);
                if blended.length_squared() > 1e-8 {
                    adjust_height(blended, sphere_radius, height)
                } else {
                    a
                }
            }
        }
    }
}

/// One step of an advanced trajectory.
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryStep {
    pub position: Vec3,
    pub rotation: Quat,
    pub arrived: bool,
}

/// Height-aware, phase-split interpolation between two sphere-anchored
/// points. One-shot: once it reports arrival it snaps to the end anchor and
/// the owning system removes it.
#[derive(Component, Debug, Clone)]
pub struct TrajectoryController {
    start_rotation: Quat,
    end_rotation: Quat,
    end: SurfaceAnchor,
    sphere_radius: f32,
    profile: MotionProfile,
    phases: Vec<TrajectoryPhase>,
    phase_index: usize,
    phase_elapsed: f32,
}

impl TrajectoryController {
    pub fn new(
        start: SurfaceAnchor,
        end: SurfaceAnchor,
        start_rotation: Quat,
        end_rotation: Quat,
        speed: f32,
        sphere_radius: f32,
    ) -> Self {
        let speed = speed.max(f32::EPSILON);
        let vertical_distance = (end.height - start.height).abs();
        // Degenerate anchors (zero direction) fall back to a vertical-only
        // move instead of propagating NaN through angle_between.
        let angle = if start.direction == Vec3::ZERO || end.direction == Vec3::ZERO {
            0.0
        } else {
            start.direction.angle_between(end.direction)
        };

        let vertical_duration =
            (vertical_distance / speed).max(MIN_PHASE_DURATION);
        let horizontal_duration_at = |height: f32| {
            (angle * (sphere_radius + height) / speed).max(MIN_PHASE_DURATION)
        };

        let (profile, phases) = if vertical_distance < HEIGHT_EPSILON {
            (
                MotionProfile::SinglePhase,
                vec![TrajectoryPhase {
                    kind: PhaseKind::Horizontal {
                        from: start.direction,
                        to: end.direction,
                        height: end.height,
                    },
                    duration: horizontal_duration_at(end.height),
                }],
            )
        } else if end.height > start.height {
            // Climb first at the departure point, then travel at altitude.
            (
                MotionProfile::RiseThenHorizontal,
                vec![
                    TrajectoryPhase {
                        kind: PhaseKind::Vertical {
                            direction: start.direction,
                            from: start.height,
                            to: end.height,
                        },
                        duration: vertical_duration,
                    },
                    TrajectoryPhase {
                        kind: PhaseKind::Horizontal {
                            from: start.direction,
                            to: end.direction,
                            height: end.height,
                        },
                        duration: horizontal_duration_at(end.height),
                    },
                ],
            )
        } else {
            // Travel at the departure height, then descend over the target.
            (
                MotionProfile::HorizontalThenDescend,
                vec![
                    TrajectoryPhase {
                        kind: PhaseKind::Horizontal {
                            from: start.direction,
                            to: end.direction,
                            height: start.height,
                        },
                        duration: horizontal_duration_at(start.height),
                    },
                    TrajectoryPhase {
                        kind: PhaseKind::Vertical {
                            direction: end.direction,
                            from: start.height,
                            to: end.height,
                        },
                        duration: vertical_duration,
                    },
                ],
            )
        };

        TrajectoryController {
            start_rotation,
            end_rotation,
            end,
            sphere_radius,
            profile,
            phases,
            phase_index: 0,
            phase_elapsed: 0.0,
        }
    }

    pub fn profile(&self) -> MotionProfile {
        self.profile
    }

    pub fn total_duration(&self) -> f32 {
        self.phases.iter().map(|p| p.duration).sum()
    }

    /// Advances by `dt` seconds. Each phase runs on its own clock; leftover
    /// time at a boundary carries into the next phase. After the final phase
    /// the step snaps exactly onto the end anchor with the end rotation.
    pub fn advance(&mut self, dt: f32) -> TrajectoryStep {
        let mut remaining = dt;
        while self.phase_index < self.phases.len() {
            let phase = self.phases[self.phase_index];
            let left_in_phase = phase.duration - self.phase_elapsed;
            if remaining < left_in_phase {
                self.phase_elapsed += remaining;
                break;
            }
            remaining -= left_in_phase;
            self.phase_index += 1;
            self.phase_elapsed = 0.0;
        }

        if self.phase_index >= self.phases.len() {
            return TrajectoryStep {
                position: self.end.world_position(self.sphere_radius),
                rotation: self.end_rotation,
                arrived: true,
            };
        }

        let phase = self.phases[self.phase_index];
        let t = (self.phase_elapsed / phase.duration).clamp(0.0, 1.0);

        let completed: f32 = self.phases[..self.phase_index]
            .iter()
            .map(|p| p.duration)
            .sum();
        let overall = ((completed + self.phase_elapsed) / self.total_duration())
            .clamp(0.0, 1.0);

        TrajectoryStep {
            position: phase.position_at(t, self.sphere_radius),
            rotation: self.start_rotation.slerp(self.end_rotation, overall),
            arrived: false,
        }
    }
}

/// Moves every in-flight trajectory each frame. On arrival the controller is
/// removed, the arrival event fires, and flying-packet proxies despawn.
pub fn trajectory_tick_system(
    time: Res<Time>,
    mut arrivals: EventWriter<TrajectoryArrivedEvent>,
    mut query: Query<(
        Entity,
        &mut Transform,
        &mut TrajectoryController,
        Option<&FlyingPacket>,
    )>,
    mut commands: Commands,
) {
    for (entity, mut transform, mut controller, packet) in query.iter_mut() {
        let step = controller.advance(time.delta_secs());
        transform.translation = step.position;
        transform.rotation = step.rotation;

        if step.arrived {
            debug!("trajectory arrived at {:?}", step.position);
            arrivals.send(TrajectoryArrivedEvent {
                entity,
                position: step.position,
            });
            commands.entity(entity).remove::<TrajectoryController>();
            if packet.is_some() {
                commands.entity(entity).despawn_recursive();
            }
        }
    }
}
