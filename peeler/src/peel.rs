use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use peel_sim::{
    peel::{PeelConfig, PeelSphere},
    plate::PlateState,
    surface::SurfaceConfig,
};

use crate::pointer::{self, PointerRay};

#[derive(Resource, Clone, Copy)]
pub struct PeelPluginConfig {
    pub peel_config: PeelConfig,
    pub surface_config: SurfaceConfig,
}

pub struct PeelPlugin {
    pub config: PeelPluginConfig,
}
impl Plugin for PeelPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config)
            .init_resource::<PointerRay>()
            .add_systems(Startup, setup)
            .add_systems(
                Update,
                (pointer::track_pointer, advance, sync_plates).chain(),
            );
    }
}

/// Root entity for everything living in simulation coordinates.
#[derive(Component)]
pub struct PeelRoot;

#[derive(Component)]
struct PlateVisual {
    index: usize,
}

fn setup(
    config: Res<PeelPluginConfig>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let sphere = PeelSphere::from_config(config.peel_config, config.surface_config);
    let radius = config.surface_config.radius;

    let plate_mesh = meshes.add(Cuboid::new(radius / 9., radius / 9., radius / 25.));
    let plate_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xec, 0xeb, 0xec),
        perceptual_roughness: 0.4,
        ..default()
    });
    let core_mesh = meshes.add(Sphere::new(radius * 0.98));
    let core_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xfb, 0x35, 0x5f),
        unlit: true,
        ..default()
    });
    let floor_mesh = meshes.add(Plane3d::new(Vec3::Z, Vec2::splat(1000.)));
    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xff, 0x88, 0x88),
        ..default()
    });

    // The simulation drops plates along -Z. Tilt the root so that reads as
    // straight down on screen, with Y up in world space.
    commands
        .spawn((
            PeelRoot,
            Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(core_mesh),
                MeshMaterial3d(core_material),
                Transform::IDENTITY,
            ));
            // Plates come to rest just above the floor
            parent.spawn((
                Mesh3d(floor_mesh),
                MeshMaterial3d(floor_material),
                Transform::from_xyz(0., 0., -4. * radius - radius / 14.),
            ));
            for plate in &sphere.plates {
                parent.spawn((
                    PlateVisual { index: plate.index },
                    Mesh3d(plate_mesh.clone()),
                    MeshMaterial3d(plate_material.clone()),
                    Transform::from_translation(plate.position).looking_at(Vec3::ZERO, Vec3::Y),
                ));
            }
        });

    commands.insert_resource(sphere);
}

fn advance(mut sphere: ResMut<PeelSphere>, pointer: Res<PointerRay>) {
    sphere.tick(pointer.0);
}

fn sync_plates(sphere: Res<PeelSphere>, mut plates: Query<(&PlateVisual, &mut Transform)>) {
    for (visual, mut transform) in plates.iter_mut() {
        let plate = &sphere.plates[visual.index];
        transform.translation = plate.position;
        // Flying and done plates keep the orientation they detached with
        if plate.state() == PlateState::Resting {
            transform.look_at(Vec3::ZERO, Vec3::Y);
        }
    }
}
