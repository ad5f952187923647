use std::f32::consts::FRAC_1_SQRT_2;

use bevy::{ecs::resource::Resource, math::Ray3d};

use crate::{
    picking,
    plate::{OFFSET_FACTOR, Plate},
    surface::{SphereSurface, SurfaceConfig},
};

#[derive(Clone, Copy)]
pub struct PeelConfig {
    /// Per-tick velocity decrement along Z for flying plates
    pub gravity: f32,
}

/// The whole effect state: the rotating surface and one plate per point,
/// held in two parallel collections indexed the same way.
#[derive(Resource)]
pub struct PeelSphere {
    pub config: PeelConfig,
    pub surface: SphereSurface,
    pub plates: Vec<Plate>,
}

impl PeelSphere {
    pub fn from_config(config: PeelConfig, surface_config: SurfaceConfig) -> Self {
        let surface = SphereSurface::from_config(surface_config);
        let offset = surface_config.radius * OFFSET_FACTOR;
        let plates = surface
            .points
            .iter()
            .enumerate()
            .map(|(index, &point)| Plate::new(index, point, offset))
            .collect();
        PeelSphere {
            config,
            surface,
            plates,
        }
    }

    /// Bounding sphere of a plate slab (r/9 x r/9 x r/25): the smallest
    /// sphere covering its visible face.
    pub fn proxy_radius(&self) -> f32 {
        self.surface.config.radius / 9. * FRAC_1_SQRT_2
    }

    /// Advances the effect one tick.
    pub fn tick(&mut self, pointer: Option<Ray3d>) {
        // 1. Rotate the shared surface point set
        self.surface.rotate();
        // 2. Step every plate against its freshly rotated anchor
        for plate in &mut self.plates {
            plate.update(self.surface.points[plate.index], self.config.gravity);
        }
        // 3. Hit-test, re-run every tick whether or not the pointer moved
        if let Some(ray) = pointer {
            if let Some(index) = self.pick(ray) {
                self.plates[index].flying = true;
            }
        }
    }

    /// Nearest plate along the ray, `None` when every proxy misses. Flying
    /// and done plates are tested too, arming them again does nothing.
    pub fn pick(&self, ray: Ray3d) -> Option<usize> {
        let proxy_radius = self.proxy_radius();
        self.plates
            .iter()
            .filter_map(|plate| {
                picking::ray_proxy_distance(ray, plate.position, proxy_radius)
                    .map(|distance| (plate.index, distance))
            })
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plate::PlateState;
    use bevy::math::{Dir3, Quat, Vec3};

    const GRAVITY: f32 = 0.5;

    const SPINNING: SurfaceConfig = SurfaceConfig {
        radius: 30.,
        subdivisions: 3,
        rotation_speed_x: 0.,
        rotation_speed_z: 0.32,
    };

    const STILL: SurfaceConfig = SurfaceConfig {
        radius: 30.,
        subdivisions: 3,
        rotation_speed_x: 0.,
        rotation_speed_z: 0.,
    };

    fn spinning_sphere() -> PeelSphere {
        PeelSphere::from_config(PeelConfig { gravity: GRAVITY }, SPINNING)
    }

    /// A sphere with hand-placed, non-rotating anchor points.
    fn still_sphere(points: Vec<Vec3>) -> PeelSphere {
        let offset = STILL.radius * OFFSET_FACTOR;
        let plates = points
            .iter()
            .enumerate()
            .map(|(index, &point)| Plate::new(index, point, offset))
            .collect();
        PeelSphere {
            config: PeelConfig { gravity: GRAVITY },
            surface: SphereSurface {
                config: STILL,
                points,
            },
            plates,
        }
    }

    fn ray(origin: Vec3, direction: Vec3) -> Ray3d {
        Ray3d {
            origin,
            direction: Dir3::new(direction).unwrap(),
        }
    }

    #[test]
    fn resting_plates_track_the_rotating_surface() {
        let mut sphere = spinning_sphere();
        let initial = sphere.surface.points.clone();
        for _ in 0..5 {
            sphere.tick(None);
        }
        let rot = Quat::from_rotation_x(SPINNING.rotation_speed_x)
            * Quat::from_rotation_z(SPINNING.rotation_speed_z);
        for plate in &sphere.plates {
            // Accumulate the same per-tick increments the surface applies
            let mut expected = initial[plate.index];
            for _ in 0..5 {
                expected = rot * expected;
            }
            assert!((plate.position - expected).length() < 1e-4);
            assert_eq!(plate.position, sphere.surface.points[plate.index]);
        }
    }

    #[test]
    fn pick_returns_the_nearest_plate_along_the_ray() {
        let sphere = still_sphere(vec![Vec3::new(60., 0., 0.), Vec3::new(90., 0., 0.)]);
        // Both proxies straddle the X axis, the nearer one along the ray wins
        assert_eq!(sphere.pick(ray(Vec3::new(200., 0., 0.), -Vec3::X)), Some(1));
        assert_eq!(sphere.pick(ray(Vec3::ZERO, Vec3::X)), Some(0));
    }

    #[test]
    fn pick_misses_cleanly() {
        let sphere = still_sphere(vec![Vec3::new(60., 0., 0.)]);
        assert_eq!(sphere.pick(ray(Vec3::new(200., 0., 0.), Vec3::X)), None);
        assert_eq!(sphere.pick(ray(Vec3::new(200., 50., 0.), -Vec3::X)), None);
    }

    #[test]
    fn pointer_over_a_plate_arms_it_once_and_for_good() {
        let mut sphere = still_sphere(vec![Vec3::new(60., 0., 0.)]);
        let over = ray(Vec3::new(200., 0., 0.), -Vec3::X);
        sphere.tick(Some(over));
        assert!(sphere.plates[0].flying);
        // The rip itself happens on the plate's next update
        assert!(!sphere.plates[0].ripped());
        sphere.tick(Some(over));
        assert!(sphere.plates[0].ripped());
        assert_eq!(sphere.plates[0].velocity, Vec3::new(0., 0., -GRAVITY));
        // Still under the pointer: the flag is re-set every tick, harmlessly
        sphere.tick(Some(over));
        assert_eq!(sphere.plates[0].velocity, Vec3::new(0., 0., -2. * GRAVITY));
        assert_eq!(sphere.plates[0].position.z, -3. * GRAVITY);
    }

    #[test]
    fn a_peeled_plate_freezes_while_the_rest_keep_resting() {
        let mut sphere = spinning_sphere();
        sphere.plates[0].flying = true;
        for _ in 0..200 {
            sphere.tick(None);
        }
        assert_eq!(sphere.plates[0].state(), PlateState::Done);
        assert_eq!(
            sphere.plates[0].position.z,
            -SPINNING.radius * OFFSET_FACTOR
        );
        for plate in &sphere.plates[1..] {
            assert_eq!(plate.state(), PlateState::Resting);
            assert_eq!(plate.position, sphere.surface.points[plate.index]);
        }
    }
}
