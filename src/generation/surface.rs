use bevy_math::{Quat, Vec3};

// Stateless sphere-surface geometry shared by disc placement and trajectory
// endpoints, so everything surface-bound is oriented and offset the same way.

pub fn surface_normal(position: Vec3) -> Vec3 {
    position.normalize_or_zero()
}

/// Rotation taking the canonical up axis onto the surface normal.
pub fn orientation_for_surface(normal: Vec3) -> Quat {
    Quat::from_rotation_arc(Vec3::Y, normal.normalize_or_zero())
}

pub fn adjust_height(position: Vec3, sphere_radius: f32, height: f32) -> Vec3 {
    surface_normal(position) * (sphere_radius + height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_height_round_trips_to_exact_radius() {
        let sphere_radius = 100.0;
        for (p, h) in [
            (Vec3::new(3.0, -4.0, 12.0), 0.0),
            (Vec3::new(0.0, 250.0, 0.0), 5.0),
            (Vec3::new(-7.0, 0.3, 0.01), 1.25),
        ] {
            let adjusted = adjust_height(surface_normal(p), sphere_radius, h);
            assert!(
                (adjusted.length() - (sphere_radius + h)).abs() < 1e-4,
                "|{:?}| != {}",
                adjusted,
                sphere_radius + h
            );
        }
    }

    #[test]
    fn orientation_maps_up_onto_the_normal() {
        let normal = Vec3::new(1.0, 2.0, -0.5).normalize();
        let rotation = orientation_for_surface(normal);
        assert!((rotation * Vec3::Y - normal).length() < 1e-5);
    }

    #[test]
    fn orientation_at_the_pole_is_identity() {
        let rotation = orientation_for_surface(Vec3::Y);
        assert!((rotation * Vec3::Y - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn surface_normal_is_unit_length() {
        let n = surface_normal(Vec3::new(10.0, -2.0, 4.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
    }
}
