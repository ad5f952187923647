use bevy::{prelude::*, window::PrimaryWindow};

use crate::{MainCamera, peel::PeelRoot};

/// Latest pointer ray in the peel root's local frame. Written once per frame
/// from the cursor position, read by the tick; last value wins.
#[derive(Resource, Default)]
pub struct PointerRay(pub Option<Ray3d>);

pub fn track_pointer(
    window: Query<&Window, With<PrimaryWindow>>,
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    root: Query<&GlobalTransform, With<PeelRoot>>,
    mut pointer: ResMut<PointerRay>,
) {
    pointer.0 = None;
    let Ok(window) = window.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };
    let Ok(root_transform) = root.single() else {
        return;
    };
    // Hit testing runs in the sphere's local frame
    let to_local = root_transform.affine().inverse();
    let origin = to_local.transform_point3(ray.origin);
    let Ok(direction) = Dir3::new(to_local.transform_vector3(*ray.direction)) else {
        return;
    };
    pointer.0 = Some(Ray3d { origin, direction });
}
