use bevy::math::{Quat, Vec3};
use subsphere::{Face, Sphere, Vertex};

#[derive(Clone, Copy)]
pub struct SurfaceConfig {
    /// Sphere radius, plate size and the termination offset derive from it
    pub radius: f32,
    /// Tessellation density, determines how many surface points (and plates) exist
    pub subdivisions: u32,
    /// Per-tick rotation increment around the X axis in radians
    pub rotation_speed_x: f32,
    /// Per-tick rotation increment around the Z axis in radians
    pub rotation_speed_z: f32,
}

/// Fixed set of sample points on a sphere, rotated rigidly as one set. Each
/// point anchors the plate with the same index.
pub struct SphereSurface {
    pub config: SurfaceConfig,
    /// Mutated in place by [SphereSurface::rotate], never grown or shrunk
    pub points: Vec<Vec3>,
}

impl SphereSurface {
    pub fn from_config(config: SurfaceConfig) -> Self {
        let c = config.subdivisions % 3;
        let subsphere = subsphere::HexSphere::from_kis(subsphere::TriSphere::new(
            subsphere::BaseTriSphere::Icosa,
            subsphere::proj::Fuller,
            std::num::NonZero::new(config.subdivisions).unwrap(),
            c,
        ))
        .unwrap();
        let points = subsphere
            .faces()
            .map(|face| {
                let center: [f32; 3] = face.center().pos().map(|p| p as f32);
                Vec3::from(center) * config.radius
            })
            .collect();
        SphereSurface { config, points }
    }

    /// Applies one constant rotation increment to the whole point set, Z axis
    /// first then X. Either speed may be zero.
    pub fn rotate(&mut self) {
        let rot = Quat::from_rotation_x(self.config.rotation_speed_x)
            * Quat::from_rotation_z(self.config.rotation_speed_z);
        for point in &mut self.points {
            *point = rot * *point;
        }
    }
}
