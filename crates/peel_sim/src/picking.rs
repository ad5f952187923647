use bevy::math::{Ray3d, Vec3};

/// Distance along `ray` to the surface of a sphere proxy, `None` on a miss.
/// If the origin is inside the proxy the far surface distance is returned.
pub fn ray_proxy_distance(ray: Ray3d, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - ray.origin;
    let along = to_center.dot(*ray.direction);
    let closest_sq = to_center.length_squared() - along * along;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }
    let half_chord = (radius_sq - closest_sq).sqrt();
    let near = along - half_chord;
    let distance = if near >= 0. { near } else { along + half_chord };
    (distance >= 0.).then_some(distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Dir3;

    fn ray(origin: Vec3, direction: Vec3) -> Ray3d {
        Ray3d {
            origin,
            direction: Dir3::new(direction).unwrap(),
        }
    }

    #[test]
    fn hit_reports_the_near_surface_distance() {
        let distance =
            ray_proxy_distance(ray(Vec3::new(-10., 0., 0.), Vec3::X), Vec3::ZERO, 2.).unwrap();
        assert!((distance - 8.).abs() < 1e-5);
    }

    #[test]
    fn proxy_behind_the_origin_is_a_miss() {
        assert!(ray_proxy_distance(ray(Vec3::new(10., 0., 0.), Vec3::X), Vec3::ZERO, 2.).is_none());
    }

    #[test]
    fn offset_ray_misses_outside_the_radius() {
        assert!(
            ray_proxy_distance(ray(Vec3::new(-10., 3., 0.), Vec3::X), Vec3::ZERO, 2.).is_none()
        );
        assert!(
            ray_proxy_distance(ray(Vec3::new(-10., 1.5, 0.), Vec3::X), Vec3::ZERO, 2.).is_some()
        );
    }

    #[test]
    fn origin_inside_the_proxy_hits_the_far_surface() {
        let distance = ray_proxy_distance(ray(Vec3::ZERO, Vec3::X), Vec3::ZERO, 2.).unwrap();
        assert!((distance - 2.).abs() < 1e-5);
    }
}
