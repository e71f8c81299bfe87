use serde::Serialize;

/// Snapshot of how far through the wizard the user is.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Progress {
    pub current_step: u8,
    pub total_steps: u8,
    /// Fill of the progress bar, 0.0 to 100.0.
    pub percent: f64,
    pub label: String,
}

impl Progress {
    pub fn new(current_step: u8, total_steps: u8) -> Self {
        Self {
            current_step,
            total_steps,
            percent: fill_percent(current_step, total_steps),
            label: format!("Step {current_step}/{total_steps}"),
        }
    }
}

pub fn fill_percent(current_step: u8, total_steps: u8) -> f64 {
    if total_steps == 0 {
        return 0.0;
    }
    (f64::from(current_step) / f64::from(total_steps) * 100.0).clamp(0.0, 100.0)
}
