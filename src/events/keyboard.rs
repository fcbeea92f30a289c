use bci_core::constants::DWELL_THRESHOLD_OPTIONS;
use bci_core::{InputMode, Phase, SessionController};

/// Commands reachable from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Neuro,
    StartCalibration,
    StopCalibration,
    DwellThreshold(f64),
    SetPhase(Phase),
    SetInputMode(InputMode),
}

#[inline]
pub fn dwell_threshold_for_digit(key: &str) -> Option<f64> {
    match key {
        "1" => Some(DWELL_THRESHOLD_OPTIONS[0]),
        "2" => Some(DWELL_THRESHOLD_OPTIONS[1]),
        "3" => Some(DWELL_THRESHOLD_OPTIONS[2]),
        "4" => Some(DWELL_THRESHOLD_OPTIONS[3]),
        "5" => Some(DWELL_THRESHOLD_OPTIONS[4]),
        _ => None,
    }
}

#[inline]
pub fn phase_for_key(key: &str) -> Option<Phase> {
    match key {
        "t" | "T" => Some(Phase::Testing),
        "k" | "K" => Some(Phase::Calibration),
        "s" | "S" => Some(Phase::Start),
        _ => None,
    }
}

pub fn command_for_key(key: &str) -> Option<Command> {
    if let Some(secs) = dwell_threshold_for_digit(key) {
        return Some(Command::DwellThreshold(secs));
    }
    if let Some(phase) = phase_for_key(key) {
        return Some(Command::SetPhase(phase));
    }
    match key {
        " " | "Space" => Some(Command::Neuro),
        "c" | "C" => Some(Command::StartCalibration),
        "x" | "X" | "Escape" => Some(Command::StopCalibration),
        "m" | "M" => Some(Command::SetInputMode(InputMode::Mouse)),
        "e" | "E" => Some(Command::SetInputMode(InputMode::EyeTracker)),
        _ => None,
    }
}

/// Apply a command. Rejected commands are logged and otherwise ignored.
pub fn apply_command(
    controller: &mut SessionController,
    command: Command,
    now: f64,
    tracker_available: bool,
) {
    match command {
        Command::Neuro => {
            controller.neuro_trigger();
        }
        Command::StartCalibration => {
            let cal = controller.config().calibration.clone();
            if let Err(e) =
                controller.start_calibration(cal.rounds, cal.focus_time, cal.gap_time, now)
            {
                log::warn!("[keys] {}", e);
            }
        }
        Command::StopCalibration => controller.stop_calibration(),
        Command::DwellThreshold(secs) => controller.set_dwell_threshold(secs),
        Command::SetPhase(phase) => controller.set_phase(phase),
        Command::SetInputMode(mode) => {
            if let Err(e) = controller.set_input_mode(mode, tracker_available) {
                log::warn!("[keys] {}", e);
            }
        }
    }
}
