//! Spring-damped dot swarm inside the center circle.
//!
//! Every particle has a fixed home. When the swarm is pulled toward a point,
//! all particles shift by the same offset along the center→point direction,
//! so the cluster moves as one body rather than chasing the point
//! individually. `tick` integrates one step and reports how aligned the
//! particle velocities are (coherence, 0..=1).

use crate::constants::*;
use glam::Vec2;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HomePattern {
    /// The 19 EEG 10-20 electrode sites.
    Electrodes,
    /// Jittered 7x7 grid clipped to the circle, shuffled.
    JitteredGrid,
}

#[derive(Clone, Debug)]
pub struct SwarmParams {
    pub particle_count: usize,
    pub spring_strength: f32,
    pub damping: f32,
    pub max_speed: f32,
    pub boundary_ratio: f32,
    pub boundary_damping: f32,
    pub push_factor: f32,
    pub min_direction_distance: f32,
    pub settle_distance: f32,
    pub home_ratio: f32,
    pub home_pattern: HomePattern,
    pub seed: u64,
}

impl Default for SwarmParams {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            spring_strength: SPRING_STRENGTH,
            damping: DAMPING,
            max_speed: MAX_SPEED,
            boundary_ratio: BOUNDARY_RATIO,
            boundary_damping: BOUNDARY_DAMPING,
            push_factor: PUSH_FACTOR,
            min_direction_distance: MIN_DIRECTION_DISTANCE,
            settle_distance: SETTLE_DISTANCE,
            home_ratio: HOME_RATIO,
            home_pattern: HomePattern::Electrodes,
            seed: DEFAULT_SEED,
        }
    }
}

impl SwarmParams {
    /// Clamp every parameter into a range the integrator cannot blow up on.
    pub fn sanitized(mut self) -> Self {
        self.spring_strength = finite_or(self.spring_strength, SPRING_STRENGTH).max(0.0);
        self.damping = finite_or(self.damping, DAMPING).clamp(0.0, 1.0);
        self.max_speed = finite_or(self.max_speed, MAX_SPEED).max(0.0);
        self.boundary_ratio = finite_or(self.boundary_ratio, BOUNDARY_RATIO).clamp(0.05, 1.0);
        self.boundary_damping = finite_or(self.boundary_damping, BOUNDARY_DAMPING).clamp(0.0, 1.0);
        self.push_factor = finite_or(self.push_factor, PUSH_FACTOR).max(0.0);
        self.min_direction_distance =
            finite_or(self.min_direction_distance, MIN_DIRECTION_DISTANCE).max(f32::EPSILON);
        self.settle_distance = finite_or(self.settle_distance, SETTLE_DISTANCE).max(0.0);
        self.home_ratio = finite_or(self.home_ratio, HOME_RATIO).clamp(0.0, 1.0);
        self
    }
}

#[inline]
fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub home: Vec2,
    pub position: Vec2,
    pub velocity: Vec2,
    pub target: Vec2,
}

impl Particle {
    fn at_home(home: Vec2) -> Self {
        Self {
            home,
            position: home,
            velocity: Vec2::ZERO,
            target: home,
        }
    }
}

pub struct SwarmSimulator {
    particles: Vec<Particle>,
    params: SwarmParams,
    center: Vec2,
    radius: f32,
    coherence: f32,
}

impl SwarmSimulator {
    pub fn new(center: Vec2, radius: f32, params: SwarmParams) -> Self {
        let params = params.sanitized();
        let radius = radius.max(0.0);
        let homes = home_offsets(&params)
            .into_iter()
            .map(|o| center + o * radius)
            .collect::<Vec<_>>();
        log::info!(
            "[swarm] {} particles ({:?}) r={:.1} at ({:.1},{:.1})",
            homes.len(),
            params.home_pattern,
            radius,
            center.x,
            center.y
        );
        Self {
            particles: homes.into_iter().map(Particle::at_home).collect(),
            params,
            center,
            radius,
            coherence: 0.0,
        }
    }

    /// Build a swarm from explicit home positions.
    pub fn with_homes(center: Vec2, radius: f32, homes: &[Vec2], params: SwarmParams) -> Self {
        Self {
            particles: homes.iter().copied().map(Particle::at_home).collect(),
            params: params.sanitized(),
            center,
            radius: radius.max(0.0),
            coherence: 0.0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.particles.iter().map(|p| p.position)
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn params(&self) -> &SwarmParams {
        &self.params
    }

    pub fn coherence(&self) -> f32 {
        self.coherence
    }

    /// Pull toward `point` at full strength when `active`, otherwise return home.
    pub fn set_target(&mut self, point: Vec2, active: bool) {
        if active {
            self.pull_toward(point, 1.0);
        } else {
            self.return_home();
        }
    }

    /// Shift every particle's target by `radius * push_factor * progress`
    /// along the center→`point` direction.
    pub fn pull_toward(&mut self, point: Vec2, progress: f32) {
        let offset = point - self.center;
        let dist = offset.length();
        if !(dist > self.params.min_direction_distance) {
            self.return_home();
            return;
        }
        let dir = offset / dist;
        let push = self.radius * self.params.push_factor * progress.clamp(0.0, 1.0);
        let limit = self.radius * self.params.boundary_ratio;
        for p in &mut self.particles {
            let mut target = p.home + dir * push;
            let from_center = target - self.center;
            let d = from_center.length();
            if d > limit {
                target = self.center + from_center * (limit / d);
            }
            p.target = target;
        }
    }

    pub fn return_home(&mut self) {
        for p in &mut self.particles {
            p.target = p.home;
        }
    }

    /// Integrate one step of `dt` seconds and return the coherence.
    pub fn tick(&mut self, dt: f32) -> f32 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let SwarmParams {
            spring_strength,
            damping,
            max_speed,
            boundary_ratio,
            boundary_damping,
            settle_distance,
            ..
        } = self.params;
        let limit = self.radius * boundary_ratio;
        let max_step = max_speed * dt;

        let mut sum_velocity = Vec2::ZERO;
        let mut total_speed = 0.0_f32;
        for p in &mut self.particles {
            let to_target = p.target - p.position;
            if to_target.length() > settle_distance {
                p.velocity += to_target * spring_strength * dt;
            } else {
                p.velocity *= SETTLE_DAMPING;
            }
            // Flat per-tick damping, independent of dt.
            p.velocity *= damping;

            let speed = p.velocity.length();
            if speed > max_step {
                p.velocity = if speed > 0.0 {
                    p.velocity * (max_step / speed)
                } else {
                    Vec2::ZERO
                };
            }
            p.position += p.velocity;

            let from_center = p.position - self.center;
            let d = from_center.length();
            if d > limit && d > 0.0 {
                p.position = self.center + from_center * (limit / d);
                p.velocity *= boundary_damping;
            }

            sum_velocity += p.velocity;
            total_speed += p.velocity.length();
        }

        self.coherence = if total_speed > 0.0 {
            (sum_velocity.length() / (total_speed + COHERENCE_EPSILON)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.coherence
    }

    /// Move the swarm to a new center/radius, scaling homes relative to the
    /// old center. Particles that end up far from their new home snap to it.
    pub fn recenter(&mut self, center: Vec2, radius: f32) {
        let radius = radius.max(0.0);
        let scale = if self.radius > 0.0 {
            radius / self.radius
        } else {
            1.0
        };
        let snap = radius * SNAP_RADIUS_MULTIPLIER;
        for p in &mut self.particles {
            let was_home = p.target.distance(p.home) < 1.0;
            p.home = center + (p.home - self.center) * scale;
            if was_home || p.position.distance(p.home) > snap {
                p.position = p.home;
                p.velocity = Vec2::ZERO;
                p.target = p.home;
            }
        }
        self.center = center;
        self.radius = radius;
    }

    /// Mean velocity across all particles.
    pub fn mean_velocity(&self) -> Vec2 {
        if self.particles.is_empty() {
            return Vec2::ZERO;
        }
        self.particles.iter().map(|p| p.velocity).sum::<Vec2>() / self.particles.len() as f32
    }
}

/// Home offsets on the unit disc for the configured pattern.
pub fn home_offsets(params: &SwarmParams) -> Vec<Vec2> {
    match params.home_pattern {
        HomePattern::Electrodes => ELECTRODE_POSITIONS
            .iter()
            .take(params.particle_count)
            .map(|[x, y]| Vec2::new(*x, *y) * params.home_ratio)
            .collect(),
        HomePattern::JitteredGrid => {
            let mut rng = StdRng::seed_from_u64(params.seed);
            let spacing = GRID_SPAN / GRID_SIDE as f32;
            let half = GRID_SIDE as f32 / 2.0;
            let jitter = spacing * GRID_JITTER;
            let mut offsets = Vec::with_capacity(GRID_SIDE * GRID_SIDE);
            for row in 0..GRID_SIDE {
                for col in 0..GRID_SIDE {
                    let o = Vec2::new(
                        (col as f32 - half) * spacing + rng.gen_range(-jitter..=jitter),
                        (row as f32 - half) * spacing + rng.gen_range(-jitter..=jitter),
                    );
                    if o.length() < params.home_ratio {
                        offsets.push(o);
                    }
                }
            }
            offsets.shuffle(&mut rng);
            offsets.truncate(params.particle_count);
            offsets
        }
    }
}
