use bci_core::constants::TICK_INTERVAL_MS;
use bci_core::{InstantClock, ManualClock, SessionConfig, SessionController};
use bci_swarm::{run_until, target_tour, FrameContext};
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SessionConfig::default();
    let controller = SessionController::new(config)?;
    let layout = controller.layout().clone();
    let centers: Vec<_> = layout.targets.iter().map(|t| t.center).collect();
    let dwell = controller.dwell().dwell_threshold() + 0.5;
    let script = target_tour(layout.center, &centers, dwell, 0.6);

    // Testing tour first, then a short calibration session.
    let tour_end = script.duration();
    let keys = vec![
        (1.0, " ".to_string()),
        (tour_end + 0.5, "k".to_string()),
        (tour_end + 1.0, "c".to_string()),
    ];
    let calibration = &controller.config().calibration;
    let calibration_secs = (calibration.focus_time + calibration.gap_time)
        * (calibration.rounds * layout.len()) as f64;
    let until = tour_end + 1.5 + calibration_secs;
    let tick = Duration::from_millis(TICK_INTERVAL_MS);

    let realtime = std::env::var("BCI_REALTIME").is_ok_and(|v| v == "1");
    log::info!(
        "bci-swarm starting: {} targets, run {:.1}s ({})",
        layout.len(),
        until,
        if realtime { "realtime" } else { "scripted" }
    );

    let stats = if realtime {
        let clock = InstantClock::new();
        let mut ctx = FrameContext::new(controller, &clock, script).with_keys(keys);
        run_until(&mut ctx, until, std::thread::sleep, tick)
    } else {
        let clock = ManualClock::new(0.0);
        let mut ctx = FrameContext::new(controller, &clock, script).with_keys(keys);
        run_until(
            &mut ctx,
            until,
            |d| {
                clock.advance(d.as_secs_f64());
            },
            tick,
        )
    };

    log::info!(
        "done: {} ticks, {} held, peak coherence {:.2}, max progress {:.0}, calibration complete: {}",
        stats.ticks,
        stats.held_ticks,
        stats.peak_coherence,
        stats.max_progress,
        stats.calibration_completed
    );
    Ok(())
}
