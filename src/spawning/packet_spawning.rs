use bevy::prelude::*;

use crate::core::components::FlyingPacket;

pub const FLYING_PACKET_RADIUS: f32 = 0.25;

/// Spawns the minimal in-flight proxy for a packet: a small solid-colored
/// sphere, no composition mesh. The caller attaches the trajectory.
pub fn spawn_flying_packet(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    color: Color,
    position: Vec3,
    rotation: Quat,
) -> Entity {
    let mesh_handle = meshes.add(Mesh::from(Sphere::new(FLYING_PACKET_RADIUS)));
    let material_handle = materials.add(StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    });

    commands
        .spawn_empty()
        .insert(Mesh3d(mesh_handle))
        .insert(MeshMaterial3d(material_handle))
        .insert(Transform::from_translation(position).with_rotation(rotation))
        .insert(Name::new("Flying Packet"))
        .insert(FlyingPacket)
        .insert(InheritedVisibility::default())
        .id()
}
