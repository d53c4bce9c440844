use lanerun_core::{LaneConfig, LanePhase, LocomotionController};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn scenario_controller() -> LocomotionController {
    LocomotionController::new(LaneConfig {
        min_lane: -1,
        max_lane: 1,
        start_lane: 0,
        lane_width: 3.0,
        lane_change_speed: 12.0,
        snap_epsilon: 0.01,
    })
    .expect("valid config")
}

#[test]
fn single_left_step_lands_on_exact_offset() {
    let mut c = scenario_controller();
    c.handle_input(true, false);

    let mut steps = 0;
    while c.current_lane() != -1.0 {
        c.update(0.016);
        steps += 1;
        assert!(steps <= 6, "took more than 6 frames to converge");
    }
    assert_eq!(c.world_offset().x, -3.0);
    assert_eq!(c.world_offset().y, 0.0);
    assert_eq!(c.world_offset().z, 0.0);
    assert_eq!(c.phase(), LanePhase::Idle);
}

#[test]
fn right_at_bound_is_a_no_op() {
    let mut c = scenario_controller();
    c.handle_input(false, true);
    assert_eq!(c.desired_lane(), 1);
    for _ in 0..5 {
        c.handle_input(false, true);
        assert_eq!(c.desired_lane(), 1);
        assert_eq!(c.target_lane(), 1);
    }
}

#[test]
fn bounds_hold_for_random_input() {
    let cfg = LaneConfig { min_lane: -2, max_lane: 3, ..Default::default() };
    let mut c = LocomotionController::new(cfg).unwrap();
    let mut rng = StdRng::seed_from_u64(0x1a4e);

    for _ in 0..5_000 {
        c.handle_input(rng.gen_bool(0.4), rng.gen_bool(0.4));
        c.update(rng.gen_range(0.0..0.05));
        let s = c.state();
        assert!((cfg.min_lane..=cfg.max_lane).contains(&s.desired_lane));
        assert!((cfg.min_lane..=cfg.max_lane).contains(&s.target_lane));
        assert_eq!(s.target_lane, s.desired_lane);
        assert!(s.current_lane >= cfg.min_lane as f32 && s.current_lane <= cfg.max_lane as f32);
    }
}

#[test]
fn converges_and_stays_put() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let cfg = LaneConfig {
            min_lane: -4,
            max_lane: 4,
            lane_change_speed: rng.gen_range(1.0..30.0),
            ..Default::default()
        };
        let mut c = LocomotionController::new(cfg).unwrap();
        for _ in 0..rng.gen_range(1..8) {
            c.handle_input(rng.gen_bool(0.5), rng.gen_bool(0.5));
        }
        let target = c.target_lane() as f32;

        let dt = rng.gen_range(0.001..0.05);
        let mut frames = 0;
        while c.current_lane() != target {
            let before = c.current_lane();
            c.update(dt);
            // never crosses the target by more than the snap band
            let after = c.current_lane();
            if before < target {
                assert!(after <= target + cfg.snap_epsilon);
            } else {
                assert!(after >= target - cfg.snap_epsilon);
            }
            frames += 1;
            assert!(frames < 100_000);
        }

        let settled = c.state();
        for _ in 0..10 {
            c.update(dt);
        }
        assert_eq!(c.state(), settled);
    }
}
