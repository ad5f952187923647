use bevy::prelude::*;
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};
use peel_sim::{peel::PeelConfig, surface::SurfaceConfig};

use crate::peel::{PeelPlugin, PeelPluginConfig};

mod peel;
mod pointer;

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Peeler".to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            PanOrbitCameraPlugin,
            PeelPlugin {
                config: PeelPluginConfig {
                    peel_config: PeelConfig { gravity: 0.5 },
                    surface_config: SurfaceConfig {
                        radius: 30.,
                        subdivisions: 9,
                        rotation_speed_x: 0.,
                        rotation_speed_z: 0.32,
                    },
                },
            },
        ))
        .insert_resource(ClearColor(Color::srgb_u8(0x1e, 0x26, 0x30)))
        .add_systems(Startup, setup)
        .run();
}

#[derive(Component)]
pub struct MainCamera;

fn setup(mut commands: Commands) {
    commands.spawn((
        PointLight {
            intensity: 50_000_000.,
            range: 2000.,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0., 120., 40.),
    ));
    // camera
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Transform::from_xyz(120., 20., 40.).looking_at(Vec3::ZERO, Vec3::Y),
        PanOrbitCamera {
            focus: Vec3::ZERO,
            radius: Some(130.),
            allow_upside_down: false,
            pan_sensitivity: 0.,
            ..Default::default()
        },
    ));
}
