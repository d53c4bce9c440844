use lanerun_core::glam::Vec3;
use lanerun_core::{CameraMode, OrbitCameraController, OrbitConfig};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn rig() -> OrbitCameraController {
    OrbitCameraController::new(OrbitConfig::default()).expect("default config")
}

#[test]
fn mode_follows_input_recency() {
    let t = 10_000.0;

    let mut cam = rig();
    cam.handle_pointer_delta(4.0, 0.0, t);
    cam.update(0.016, Vec3::ZERO, t + 500.0);
    assert_eq!(cam.mode(), CameraMode::Active);

    let mut cam = rig();
    cam.handle_pointer_delta(4.0, 0.0, t);
    cam.update(0.016, Vec3::ZERO, t + 2500.0);
    assert_eq!(cam.mode(), CameraMode::Passive);
}

#[test]
fn passive_uses_shorter_radius() {
    let target = Vec3::new(2.0, 1.0, -30.0);

    let mut active = rig();
    active.handle_pointer_delta(1.0e-4, 0.0, 0.0);
    active.update(0.016, target, 100.0);

    let mut passive = rig();
    passive.update(0.016, target, 100.0);

    let horiz = |p: Vec3| Vec3::new(p.x - target.x, 0.0, p.z - target.z).length();
    assert!((horiz(active.target_position()) - 15.0).abs() < 1e-3);
    assert!((horiz(passive.target_position()) - 12.0).abs() < 1e-3);
}

#[test]
fn hysteresis_band_stays_passive_until_reset() {
    let mut cam = rig();
    cam.handle_pointer_delta(1.0, 1.0, 0.0);
    for now in [2_000.0, 3_000.0, 4_999.0] {
        cam.update(0.016, Vec3::ZERO, now);
        assert_eq!(cam.mode(), CameraMode::Passive);
        assert!(cam.has_recent_input());
    }
    cam.update(0.016, Vec3::ZERO, 5_000.5);
    assert!(!cam.has_recent_input());

    // fresh input flips straight back to active
    cam.handle_pointer_delta(0.0, 2.0, 6_000.0);
    cam.update(0.016, Vec3::ZERO, 6_016.0);
    assert_eq!(cam.mode(), CameraMode::Active);
}

#[test]
fn pitch_stays_clamped_for_random_deltas() {
    let cfg = OrbitConfig::default();
    let mut cam = rig();
    let mut rng = StdRng::seed_from_u64(42);
    let mut now = 0.0;
    for _ in 0..5_000 {
        now += 16.0;
        cam.handle_pointer_delta(rng.gen_range(-800.0..800.0), rng.gen_range(-800.0..800.0), now);
        assert!(cam.pitch() >= cfg.pitch_min && cam.pitch() <= cfg.pitch_max);
    }
}

#[test]
fn eye_converges_monotonically_on_a_still_target() {
    let target = Vec3::new(-3.0, 0.0, 40.0);
    for smoothing in [0.02_f32, 0.12, 0.5, 1.0] {
        let cfg = OrbitConfig {
            active_smoothing: smoothing,
            passive_smoothing: smoothing,
            ..Default::default()
        };
        let mut cam = OrbitCameraController::with_position(cfg, Vec3::new(50.0, -20.0, 0.0)).unwrap();
        cam.update(0.016, target, 0.0);
        let ideal = cam.target_position();

        let mut last = f32::MAX;
        let mut frames = 0;
        loop {
            let d = cam.position().distance(ideal);
            assert!(d <= last, "distance grew at smoothing {smoothing}");
            if d < 1e-3 {
                break;
            }
            last = d;
            cam.update(0.016, target, 0.0);
            frames += 1;
            assert!(frames < 5_000);
        }
    }
}

#[test]
fn never_overshoots_the_ideal_pose() {
    let mut cam = OrbitCameraController::with_position(OrbitConfig::default(), Vec3::ZERO).unwrap();
    for frame in 0..400 {
        cam.update(0.016, Vec3::ZERO, f64::from(frame) * 16.0);
        let p = cam.position();
        let ideal = cam.target_position();
        assert!(p.y <= ideal.y + 1e-4);
        assert!(p.z <= ideal.z + 1e-4);
    }
}

#[test]
fn eye_follows_a_moving_body() {
    let mut cam = rig();
    let mut body = Vec3::ZERO;
    for frame in 0..600 {
        body.z -= 0.2;
        cam.update(0.016, body, f64::from(frame) * 16.0);
    }
    // stays behind (+Z) the body and within a few radii of it
    assert!(cam.position().z > body.z);
    assert!(cam.position().distance(body) < 30.0);
}
