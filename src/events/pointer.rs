use glam::Vec2;

/// Scripted pointer path: straight-line segments between timed waypoints.
/// Stands in for a mouse or gaze device when running headless.
#[derive(Clone, Debug, Default)]
pub struct PointerScript {
    waypoints: Vec<(f64, Vec2)>,
}

impl PointerScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a waypoint. Times must not decrease.
    pub fn then(mut self, at_sec: f64, pos: Vec2) -> Self {
        let at = self.waypoints.last().map_or(at_sec, |(t, _)| at_sec.max(*t));
        self.waypoints.push((at, pos));
        self
    }

    /// Hold `pos` from the last waypoint for `secs`.
    pub fn hold(self, secs: f64, pos: Vec2) -> Self {
        let start = self.duration();
        self.then(start, pos).then(start + secs.max(0.0), pos)
    }

    pub fn duration(&self) -> f64 {
        self.waypoints.last().map_or(0.0, |(t, _)| *t)
    }

    /// Interpolated position at `t`; clamps to the first/last waypoint.
    pub fn sample(&self, t: f64) -> Option<Vec2> {
        let first = self.waypoints.first()?;
        if t <= first.0 {
            return Some(first.1);
        }
        for pair in self.waypoints.windows(2) {
            let (t0, p0) = pair[0];
            let (t1, p1) = pair[1];
            if t <= t1 {
                let span = t1 - t0;
                let k = if span > 0.0 { ((t - t0) / span) as f32 } else { 1.0 };
                return Some(p0.lerp(p1, k));
            }
        }
        self.waypoints.last().map(|(_, p)| *p)
    }
}

/// Convert a pixel position to normalized window coordinates, the form gaze
/// samples arrive in.
#[inline]
pub fn normalize_to_window(pos: Vec2, width: f32, height: f32) -> [f32; 2] {
    if width <= 0.0 || height <= 0.0 {
        return [0.5, 0.5];
    }
    [pos.x / width, pos.y / height]
}

/// Visit every target in turn, resting `dwell_secs` on each and returning to
/// `center` for `rest_secs` in between.
pub fn target_tour(
    center: Vec2,
    targets: &[Vec2],
    dwell_secs: f64,
    rest_secs: f64,
) -> PointerScript {
    let mut script = PointerScript::new().then(0.0, center);
    for t in targets {
        let now = script.duration();
        script = script
            .then(now + 0.2, *t)
            .hold(dwell_secs, *t)
            .then(now + 0.4 + dwell_secs, center)
            .hold(rest_secs, center);
    }
    script
}
