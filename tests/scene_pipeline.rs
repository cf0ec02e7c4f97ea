//! End-to-end checks through the public API: config to app, frames to
//! objects, clicks to hits.

use std::cell::RefCell;
use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use canvas3d::gfx::camera::OrbitCameraBounds;
use canvas3d::gfx::geometry::{ray_intersects_sphere, ray_intersects_triangle};
use canvas3d::math::normalize;
use canvas3d::prelude::*;
use cgmath::{Matrix4, Quaternion};

fn seeded_config() -> SceneConfig {
    SceneConfig {
        rng_seed: Some(1),
        ..SceneConfig::default()
    }
}

fn ball(name: &str, position: Vector3<f32>, radius: f32) -> SceneObject {
    SceneObject::new(name)
        .with_bounds(BoundingSphere::new(Vector3::zero(), radius))
        .with_position(position)
}

#[test]
fn normalize_of_zero_is_zero() {
    assert_eq!(normalize(Vector3::zero()), Vector3::zero());
    assert!((normalize(Vector3::new(3.0, -4.0, 12.0)).magnitude() - 1.0).abs() < 1e-6);
}

#[test]
fn sphere_behind_origin_is_missed() {
    let dir = Vector3::new(0.0, 0.0, 1.0);
    assert!(!ray_intersects_sphere(Vector3::new(0.0, 0.0, 10.0), dir, Vector3::zero(), 1.0));
    assert!(ray_intersects_sphere(Vector3::new(0.0, 0.0, -10.0), dir, Vector3::zero(), 1.0));
}

#[test]
fn triangle_centroid_hits_and_offset_misses() {
    let v0 = Vector3::new(0.0, 0.0, 0.0);
    let v1 = Vector3::new(1.0, 0.0, 0.0);
    let v2 = Vector3::new(0.0, 1.0, 0.0);
    let down = Vector3::new(0.0, 0.0, -1.0);

    let above_centroid = Vector3::new(1.0 / 3.0, 1.0 / 3.0, 1.0);
    assert!(ray_intersects_triangle(above_centroid, down, v0, v1, v2));

    let past_edge = Vector3::new(2.0, 2.0, 1.0);
    assert!(!ray_intersects_triangle(past_edge, down, v0, v1, v2));
}

#[test]
fn orbit_distance_clamps_to_farthest() {
    let mut camera = OrbitCamera::new(Vector3::zero(), 200.0, OrbitCameraBounds::new(60.0, 1000.0));
    camera.set_distance(camera.farthest_distance() + 100.0);
    assert_eq!(camera.distance(), 1000.0);
    camera.set_distance(10.0);
    assert_eq!(camera.distance(), 60.0);
}

#[test]
fn orbit_yaw_quarter_turn_moves_eye_to_positive_x() {
    let mut camera = OrbitCamera::new(Vector3::zero(), 200.0, OrbitCameraBounds::new(1.0, 1000.0));
    camera.yaw(FRAC_PI_2);
    let eye = camera.position();
    assert!((eye - Vector3::new(200.0, 0.0, 0.0)).magnitude() < 1e-3);
    assert!((camera.dir() - Vector3::new(-1.0, 0.0, 0.0)).magnitude() < 1e-5);
}

#[test]
fn expired_particles_leave_the_rest_in_order() {
    let mut app = SceneApp::new(seeded_config());
    let objects = &mut app.context_mut().objects;
    let ids: Vec<ObjectId> = [5000.0, 10.0, 5000.0, 10.0, 5000.0]
        .into_iter()
        .enumerate()
        .map(|(i, life)| {
            objects.add(
                SceneObject::new(format!("plane-{}", i))
                    .with_particle(ParticleKind::aging(life, Vector3::unit_x())),
            )
        })
        .collect();

    app.start().unwrap();
    let report = app.tick(16.0).unwrap();

    assert_eq!(report.expired, vec![ids[1], ids[3]]);
    assert_eq!(app.context().objects.size(), 3);
    assert_eq!(app.context().objects.ids(), vec![ids[0], ids[2], ids[4]]);
    assert!(!app.context().objects.contains(ids[1]));
}

#[test]
fn zero_delta_frame_changes_nothing() {
    let mut app = SceneApp::new(seeded_config());
    let scene = app.context_mut();
    let mover = scene.objects.add(
        SceneObject::new("mover")
            .with_position(Vector3::new(1.0, 2.0, 3.0))
            .with_linear_velocity(Vector3::new(0.5, 0.0, 0.0))
            .with_angular_velocity(Vector3::new(0.0, 0.01, 0.0)),
    );
    let orbiter = scene.objects.add(
        SceneObject::new("moon")
            .with_position(Vector3::new(0.0, 0.0, 300.0))
            .with_angular_velocity(Vector3::new(0.0, 1.0 / 40000.0, 0.0))
            .with_motion(Motion::Orbit {
                center: Vector3::zero(),
            }),
    );
    app.set_spawner(Box::new(SurfaceSpawner::default()));
    app.start().unwrap();

    let before: Vec<(Vector3<f32>, Quaternion<f32>)> = app
        .context()
        .objects
        .iter()
        .map(|(_, object)| (object.position, object.orientation))
        .collect();

    let report = app.tick(0.0).unwrap();
    assert!(report.spawned.is_empty());

    let after: Vec<(Vector3<f32>, Quaternion<f32>)> = app
        .context()
        .objects
        .iter()
        .map(|(_, object)| (object.position, object.orientation))
        .collect();
    assert_eq!(before, after);

    // A real frame moves both
    app.tick(100.0);
    let objects = &app.context().objects;
    assert_eq!(objects.get(mover).unwrap().position, Vector3::new(51.0, 2.0, 3.0));
    assert!(objects.get(orbiter).unwrap().position.x > 0.0);
}

#[test]
fn click_through_centre_hits_objects_nearest_first() {
    let mut app = SceneApp::new(seeded_config());
    let scene = app.context_mut();
    let far = scene.objects.add(ball("far", Vector3::new(0.0, 0.0, -50.0), 10.0));
    let near = scene.objects.add(ball("near", Vector3::zero(), 10.0));
    scene.objects.add(ball("aside", Vector3::new(150.0, 0.0, 0.0), 10.0));

    let picked = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&picked);
    app.set_picking_callback(move |_, hits| sink.borrow_mut().extend_from_slice(hits))
        .unwrap();
    app.start().unwrap();

    app.handle_input(InputEvent::MouseDown {
        x: 250.0,
        y: 250.0,
        buttons: ButtonMask::LEFT,
    });

    let hits = picked.borrow();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, near);
    assert_eq!(hits[1].id, far);
    assert!((hits[0].distance - 190.0).abs() < 1e-2);
    assert!((hits[1].distance - 240.0).abs() < 1e-2);
}

#[test]
fn singular_projection_gives_no_hits() {
    let mut app = SceneApp::new(seeded_config());
    let scene = app.context_mut();
    scene.objects.add(ball("target", Vector3::zero(), 10.0));
    scene.projection = Projection::Matrix(Matrix4::from_scale(0.0));

    let picked = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&picked);
    app.set_picking_callback(move |_, hits| *sink.borrow_mut() = Some(hits.len()))
        .unwrap();
    app.start().unwrap();

    app.handle_input(InputEvent::MouseDown {
        x: 250.0,
        y: 250.0,
        buttons: ButtonMask::LEFT,
    });
    assert_eq!(*picked.borrow(), Some(0));
    assert!(ObjectPicker::new().pick(app.context(), 250.0, 250.0).is_empty());
}

#[test]
fn toml_config_drives_camera_and_spawning() {
    let config = SceneConfig::from_toml_str(
        r#"
        rng_seed = 3

        [orbit]
        closest = 60.0
        farthest = 1000.0
        distance = 2000.0

        [spawn]
        mode = "per_frame"
        one_in = 1
        "#,
    )
    .unwrap();
    assert_eq!(config.spawn, SpawnPolicy::PerFrame { one_in: 1 });

    let mut app = SceneApp::new(config);
    let camera = app.context().camera.as_orbit().unwrap();
    assert_eq!(camera.distance(), 1000.0);
    assert_eq!(camera.closest_distance(), 60.0);

    app.set_spawner(Box::new(SurfaceSpawner::default()));
    app.start().unwrap();
    let report = app.tick(16.0).unwrap();
    assert_eq!(report.spawned.len(), 1);

    let spawned = app.context().objects.get(report.spawned[0]).unwrap();
    assert!(spawned.is_aging());
    assert!((spawned.position.magnitude() - 56.0).abs() < 1e-2);
}

#[test]
fn inverted_orbit_bounds_refuse_to_start() {
    let config = SceneConfig::from_toml_str(
        r#"
        [orbit]
        closest = 500.0
        farthest = 100.0
        "#,
    )
    .unwrap();
    let mut app = SceneApp::new(config);
    assert!(matches!(app.start(), Err(SceneError::InvalidOrbitBounds { .. })));
    assert!(!app.is_running());
    assert!(app.tick(16.0).is_none());
}

#[test]
fn keyboard_handler_can_retarget_the_orbit() {
    let mut app = SceneApp::new(seeded_config());
    let moon = app
        .context_mut()
        .objects
        .add(ball("moon", Vector3::new(0.0, 0.0, 300.0), 5.0));

    app.set_keyboard_callbacks(
        |_, _| {},
        move |scene, code| {
            if code == 77 {
                let target = scene.objects.get(moon).map(|object| object.position);
                if let (Some(target), Some(camera)) = (target, scene.camera.as_orbit_mut()) {
                    camera.set_orbit_point(target);
                }
            }
        },
    );

    // Ignored until started
    app.handle_input(InputEvent::KeyDown(77));
    assert_eq!(app.context().camera.as_orbit().unwrap().orbit_point(), Vector3::zero());

    app.start().unwrap();
    app.handle_input(InputEvent::KeyDown(77));
    assert_eq!(
        app.context().camera.as_orbit().unwrap().orbit_point(),
        Vector3::new(0.0, 0.0, 300.0)
    );
}

#[test]
fn negative_orbit_bounds_build_but_refuse_to_start() {
    let config = SceneConfig::from_toml_str(
        r#"
        [orbit]
        closest = -10.0
        farthest = -5.0
        "#,
    )
    .unwrap();
    let mut app = SceneApp::new(config);
    let camera = app.context().camera.as_orbit().unwrap();
    assert!(camera.closest_distance() <= camera.farthest_distance());
    assert!(matches!(app.start(), Err(SceneError::InvalidOrbitBounds { .. })));
}
