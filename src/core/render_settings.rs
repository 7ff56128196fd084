use std::fs::File;
use bevy::prelude::{Color, Resource};
use lazy_static::lazy_static;
use ron::de::{from_reader, SpannedError};
use serde::{Serialize, Deserialize};

use crate::core::frequency::RING_COUNT;
use crate::core::settings_error::SettingsError;

lazy_static! {
    /// Canonical ring colors, outer ring first, hues 60 degrees apart to match
    /// the canonical frequency spacing.
    pub static ref DEFAULT_RING_COLORS: [Color; RING_COUNT] = [
        Color::srgba(1.0, 0.2, 0.2, 1.0),  // red
        Color::srgba(1.0, 1.0, 0.2, 1.0),  // yellow
        Color::srgba(0.2, 1.0, 0.2, 1.0),  // green
        Color::srgba(0.2, 1.0, 1.0, 1.0),  // cyan
        Color::srgba(0.25, 0.35, 1.0, 1.0), // blue
        Color::srgba(1.0, 0.2, 1.0, 1.0),  // magenta
    ];
}

/// Neutral color contributed by unmatched frequencies to the dominant-color
/// estimate, and by empty compositions.
pub const FALLBACK_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 1.0);

/// Immutable generation/animation configuration. Validated once at plugin
/// construction; systems assume a validated instance and never re-check.
#[derive(Serialize, Deserialize, Resource, Debug, Clone)]
pub struct RenderSettings {
    /// Radius of the world sphere that discs and trajectories anchor to.
    pub sphere_radius: f32,
    /// Base radius of a fully grown disc.
    pub disc_radius: f32,
    /// Height above the sphere surface at which discs are placed.
    pub surface_offset: f32,
    /// Wall-clock length of the extraction animation.
    pub extraction_duration: f32,
    /// Disc spin about its surface normal, radians per second.
    pub rotation_speed: f32,
    /// One radius per canonical ring, outer first, strictly decreasing.
    pub ring_radii: [f32; RING_COUNT],
    /// Gaussian spread of each ring's height contribution.
    pub ring_width: f32,
    /// Peak height added per packet of a frequency at its ring radius.
    pub height_per_count: f32,
    pub ring_colors: [Color; RING_COUNT],
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            sphere_radius: 100.0,
            disc_radius: 2.0,
            surface_offset: 0.5,
            extraction_duration: 5.0,
            rotation_speed: 0.6,
            ring_radii: [1.8, 1.5, 1.2, 0.9, 0.6, 0.3],
            ring_width: 0.15,
            height_per_count: 0.02,
            ring_colors: *DEFAULT_RING_COLORS,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("sphere_radius", self.sphere_radius),
            ("disc_radius", self.disc_radius),
            ("extraction_duration", self.extraction_duration),
            ("ring_width", self.ring_width),
            ("height_per_count", self.height_per_count),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(SettingsError::NonPositive(format!(
                    "{} must be strictly positive, got {}",
                    name, value
                )));
            }
        }
        if self.surface_offset < 0.0 {
            return Err(SettingsError::NonPositive(format!(
                "surface_offset must be non-negative, got {}",
                self.surface_offset
            )));
        }

        for (ring, radius) in self.ring_radii.iter().enumerate() {
            if !(*radius > 0.0 && *radius <= self.disc_radius) {
                return Err(SettingsError::RingRadiusOutOfRange(format!(
                    "ring {} radius {} must lie in (0, {}]",
                    ring, radius, self.disc_radius
                )));
            }
        }
        for window in self.ring_radii.windows(2) {
            if window[1] >= window[0] {
                return Err(SettingsError::RingRadiiNotDescending(format!(
                    "ring radii must strictly decrease outer to inner, got {:?}",
                    self.ring_radii
                )));
            }
        }

        Ok(())
    }

    pub fn from_ron_file(path: &str) -> Result<RenderSettings, SettingsError> {
        let file = File::open(path)
            .map_err(|e| SettingsError::ImportFailed(format!("Failed to open '{}': {}", path, e)))?;
        let deserialized: Result<RenderSettings, SpannedError> = from_reader(file);

        match deserialized {
            Ok(settings) => {
                settings.validate()?;
                Ok(settings)
            }
            Err(e) => Err(SettingsError::ImportFailed(format!(
                "Failed to parse '{}': {}",
                path, e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        assert!(RenderSettings::default().validate().is_ok());
    }

    #[test]
    fn non_positive_scalars_are_rejected() {
        let mut settings = RenderSettings::default();
        settings.ring_width = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NonPositive(_))
        ));

        let mut settings = RenderSettings::default();
        settings.disc_radius = -1.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn ring_radii_must_fit_inside_the_disc() {
        let mut settings = RenderSettings::default();
        settings.ring_radii[0] = settings.disc_radius + 1.0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::RingRadiusOutOfRange(_))
        ));
    }

    #[test]
    fn ring_radii_must_strictly_decrease() {
        let mut settings = RenderSettings::default();
        settings.ring_radii = [1.8, 1.5, 1.5, 0.9, 0.6, 0.3];
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::RingRadiiNotDescending(_))
        ));
    }
}
