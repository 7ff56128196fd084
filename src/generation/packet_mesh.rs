use bevy::prelude::*;
use bevy::render::mesh::Indices;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::PrimitiveTopology;
use itertools::iproduct;

use crate::core::frequency::classify_frequency;
use crate::core::quality_tier::QualityTier;
use crate::core::render_settings::RenderSettings;
use crate::core::sample::WavePacketSample;

/// Fraction of the current radius over which alpha fades to zero at the edge.
pub const EDGE_FADE_FRACTION: f32 = 0.15;

/// Brightness floor for ring colors, keeping the skirt of a gaussian from
/// rendering near-black.
pub const BRIGHTNESS_FLOOR: f32 = 0.5;

/// Raw buffers for a generated disc, ready to hand to the scene graph.
#[derive(Debug, Clone)]
pub struct DiscMeshData {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

/// A sample that snapped to a canonical ring. Unmatched samples are excluded
/// from the height/color field entirely.
#[derive(Debug, Clone, Copy)]
pub struct MatchedRing {
    pub ring: usize,
    pub count: u32,
}

/// Unit-peak bell curve: gaussian(0, w) = 1.
pub fn gaussian(distance: f32, width: f32) -> f32 {
    (-(distance * distance) / (2.0 * width * width)).exp()
}

pub fn matched_rings(samples: &[WavePacketSample]) -> Vec<MatchedRing> {
    samples
        .iter()
        .filter(|s| s.count > 0)
        .filter_map(|s| {
            classify_frequency(s.frequency).map(|ring| MatchedRing {
                ring,
                count: s.count,
            })
        })
        .collect()
}

/// Height of the composited field at planar radius `r`: every matched sample
/// adds a gaussian bump centered on its ring's radius, so more packets of a
/// frequency raise terrain specifically at that frequency's radius.
pub fn height_at(r: f32, matched: &[MatchedRing], settings: &RenderSettings) -> f32 {
    matched
        .iter()
        .map(|m| {
            m.count as f32
                * settings.height_per_count
                * gaussian(r - settings.ring_radii[m.ring], settings.ring_width)
        })
        .sum()
}

/// Vertex color at planar radius `r`. Nearest-ring-wins rather than blending,
/// to avoid muddy multi-hue gradients; brightness is the winning ring's
/// gaussian falloff, floored so the skirt never goes near-black.
pub fn vertex_color_at(
    r: f32,
    max_radius: f32,
    matched: &[MatchedRing],
    settings: &RenderSettings,
) -> [f32; 4] {
    if matched.is_empty() || r > max_radius || max_radius <= 0.0 {
        return [0.0, 0.0, 0.0, 0.0];
    }

    let nearest = matched
        .iter()
        .min_by(|a, b| {
            let da = (r - settings.ring_radii[a.ring]).abs();
            let db = (r - settings.ring_radii[b.ring]).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap();

    let brightness = gaussian(r - settings.ring_radii[nearest.ring], settings.ring_width)
        .max(BRIGHTNESS_FLOOR);
    let linear = settings.ring_colors[nearest.ring].to_linear();

    let fade_start = max_radius * (1.0 - EDGE_FADE_FRACTION);
    let alpha = if r <= fade_start {
        1.0
    } else {
        ((max_radius - r) / (max_radius - fade_start)).clamp(0.0, 1.0)
    };

    [
        linear.red * brightness,
        linear.green * brightness,
        linear.blue * brightness,
        alpha,
    ]
}

/// Builds the disc mesh for a packet composition. Pure and deterministic;
/// cost is O(resolution²) and it runs synchronously, so callers on a tight
/// frame budget should pass the constrained tier.
///
/// `progress` scales the current radius, supporting a growing-from-center
/// variant; the extraction renderer instead generates the full disc once and
/// animates scale at the transform level.
pub fn generate_packet_mesh(
    samples: &[WavePacketSample],
    settings: &RenderSettings,
    tier: QualityTier,
    progress: f32,
) -> DiscMeshData {
    let n = tier.resolution();
    let max_radius = settings.disc_radius * progress.clamp(0.0, 1.0);
    let matched = matched_rings(samples);

    let grid_vertices = (n + 1) * (n + 1);
    let mut positions = Vec::with_capacity(grid_vertices * 2);
    let mut colors = Vec::with_capacity(grid_vertices * 2);

    // Top surface.
    for (iy, ix) in iproduct!(0..=n, 0..=n) {
        let x = settings.disc_radius * (2.0 * ix as f32 / n as f32 - 1.0);
        let z = settings.disc_radius * (2.0 * iy as f32 / n as f32 - 1.0);
        let r = (x * x + z * z).sqrt();

        let clipped = r > max_radius || max_radius <= 0.0;
        let height = if clipped { 0.0 } else { height_at(r, &matched, settings) };

        positions.push([x, height, z]);
        colors.push(vertex_color_at(r, max_radius, &matched, settings));
    }

    // Bottom surface: mirrored height field, same colors.
    for i in 0..grid_vertices {
        let [x, height, z] = positions[i];
        positions.push([x, -height, z]);
        colors.push(colors[i]);
    }

    let mut indices = Vec::with_capacity(n * n * 12);
    let bottom = grid_vertices as u32;
    for (iy, ix) in iproduct!(0..n, 0..n) {
        let i00 = (iy * (n + 1) + ix) as u32;
        let i10 = i00 + 1;
        let i01 = i00 + (n + 1) as u32;
        let i11 = i01 + 1;

        // Top faces wind counter-clockwise seen from above.
        indices.extend_from_slice(&[i00, i01, i11, i00, i11, i10]);
        // Bottom faces wind the opposite way so both sides face outward.
        indices.extend_from_slice(&[
            bottom + i00,
            bottom + i11,
            bottom + i01,
            bottom + i00,
            bottom + i10,
            bottom + i11,
        ]);
    }

    DiscMeshData {
        positions,
        colors,
        indices,
    }
}

impl DiscMeshData {
    /// Converts the raw buffers into a bevy mesh. The high-fidelity tier runs
    /// the smooth-normal pass; the constrained tier keeps cheap face-up /
    /// face-down normals.
    pub fn into_mesh(self, tier: QualityTier) -> Mesh {
        let half = self.positions.len() / 2;
        let normals: Vec<[f32; 3]> = (0..self.positions.len())
            .map(|i| if i < half { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] })
            .collect();

        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, self.colors);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
        mesh.insert_indices(Indices::U32(self.indices));

        if tier.optimizes_mesh() {
            mesh.compute_smooth_normals();
        }

        mesh
    }
}
