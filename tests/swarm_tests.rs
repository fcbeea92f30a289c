// Swarm physics: rest state, unified pull, containment and coherence.

use bci_core::{home_offsets, HomePattern, SwarmParams, SwarmSimulator};
use glam::Vec2;
use rand::prelude::*;

const DT: f32 = 1.0 / 64.0;

fn make_swarm() -> SwarmSimulator {
    SwarmSimulator::new(Vec2::new(400.0, 300.0), 100.0, SwarmParams::default())
}

#[test]
fn resting_swarm_has_zero_coherence() {
    let mut swarm = make_swarm();
    swarm.return_home();
    let c = swarm.tick(DT);
    assert_eq!(c, 0.0);
    assert!(swarm.particles().iter().all(|p| p.position == p.home));
}

#[test]
fn zero_dt_tick_is_defined() {
    let mut swarm = make_swarm();
    swarm.set_target(Vec2::new(700.0, 300.0), true);
    let c = swarm.tick(0.0);
    assert_eq!(c, 0.0);
    assert!(swarm.positions().all(|p| p.is_finite()));
}

#[test]
fn pull_moves_every_particle_the_same_way() {
    let mut swarm = make_swarm();
    swarm.set_target(Vec2::new(700.0, 300.0), true);
    for p in swarm.particles() {
        assert!(p.target.x > p.home.x - 1e-3, "target should not point away from the pull");
    }
    let c = swarm.tick(DT);
    assert!(c > 0.9, "unified pull should be coherent, got {c}");
    assert!(swarm.mean_velocity().x > 0.0);
    assert!(swarm.mean_velocity().y.abs() < swarm.mean_velocity().x);
}

#[test]
fn pull_targets_stay_inside_the_boundary() {
    let mut swarm = make_swarm();
    let limit = swarm.radius() * swarm.params().boundary_ratio;
    swarm.set_target(Vec2::new(400.0, 0.0), true);
    for p in swarm.particles() {
        assert!(p.target.distance(swarm.center()) <= limit + 1e-3);
    }
}

#[test]
fn pull_progress_scales_the_push() {
    let mut swarm = make_swarm();
    let home = swarm.particles()[9].home; // Cz, the center electrode
    swarm.pull_toward(Vec2::new(700.0, 300.0), 0.5);
    let half = swarm.particles()[9].target - home;
    swarm.pull_toward(Vec2::new(700.0, 300.0), 1.0);
    let full = swarm.particles()[9].target - home;
    assert!((half.x - 25.0).abs() < 1e-3, "half push is radius * 0.5 * 0.5");
    assert!((full.x - 50.0).abs() < 1e-3);
}

#[test]
fn target_too_close_to_center_returns_home() {
    let mut swarm = make_swarm();
    swarm.set_target(Vec2::new(700.0, 300.0), true);
    swarm.set_target(Vec2::new(405.0, 300.0), true);
    assert!(swarm.particles().iter().all(|p| p.target == p.home));
}

#[test]
fn swarm_settles_back_home() {
    let mut swarm = make_swarm();
    swarm.set_target(Vec2::new(700.0, 300.0), true);
    for _ in 0..120 {
        swarm.tick(DT);
    }
    swarm.return_home();
    for _ in 0..900 {
        swarm.tick(DT);
    }
    for p in swarm.particles() {
        assert!(p.position.distance(p.home) < 1.0, "particle did not settle: {p:?}");
    }
    assert!(swarm.coherence() <= 1.0);
}

#[test]
fn coherence_and_positions_stay_bounded_under_random_pulls() {
    let mut swarm = make_swarm();
    let mut rng = StdRng::seed_from_u64(11);
    let limit = swarm.radius() * swarm.params().boundary_ratio;
    for step in 0..2000 {
        if step % 25 == 0 {
            let target = Vec2::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
            swarm.pull_toward(target, rng.gen_range(0.0..=1.0));
        }
        let dt = rng.gen_range(0.0..0.05);
        let c = swarm.tick(dt);
        assert!((0.0..=1.0).contains(&c), "coherence {c} out of range at step {step}");
        for p in swarm.positions() {
            assert!(p.distance(swarm.center()) <= limit + 1e-3);
        }
    }
}

#[test]
fn speed_is_limited_per_tick() {
    let mut swarm = make_swarm();
    swarm.set_target(Vec2::new(10_000.0, 300.0), true);
    swarm.tick(DT);
    let max_step = swarm.params().max_speed * DT;
    for p in swarm.particles() {
        assert!(p.velocity.length() <= max_step + 1e-4);
    }
}

#[test]
fn recenter_scales_homes_and_snaps_idle_particles() {
    let mut swarm = make_swarm();
    let before: Vec<Vec2> = swarm.particles().iter().map(|p| p.home).collect();
    swarm.recenter(Vec2::new(800.0, 600.0), 200.0);
    for (p, old) in swarm.particles().iter().zip(before) {
        let expected = Vec2::new(800.0, 600.0) + (old - Vec2::new(400.0, 300.0)) * 2.0;
        assert!(p.home.distance(expected) < 1e-3);
        assert_eq!(p.position, p.home);
    }
    assert_eq!(swarm.radius(), 200.0);
}

#[test]
fn jittered_grid_is_seeded_and_inside_the_disc() {
    let params = SwarmParams {
        particle_count: 30,
        home_pattern: HomePattern::JitteredGrid,
        seed: 5,
        ..SwarmParams::default()
    };
    let a = home_offsets(&params);
    let b = home_offsets(&params);
    assert_eq!(a, b, "same seed, same homes");
    assert!(a.len() <= 30 && !a.is_empty());
    assert!(a.iter().all(|o| o.length() < params.home_ratio));
}

#[test]
fn electrode_pattern_has_nineteen_sites() {
    let swarm = make_swarm();
    assert_eq!(swarm.particles().len(), 19);
    let cz = swarm.particles()[9].home;
    assert_eq!(cz, swarm.center());
}

#[test]
fn out_of_range_params_are_clamped() {
    let params = SwarmParams {
        damping: 3.0,
        boundary_ratio: -1.0,
        spring_strength: f32::NAN,
        ..SwarmParams::default()
    }
    .sanitized();
    assert_eq!(params.damping, 1.0);
    assert!(params.boundary_ratio > 0.0);
    assert!(params.spring_strength.is_finite());
}
