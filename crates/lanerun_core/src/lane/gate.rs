//! Optional time gate between held keys and lane steps.
//!
//! Calling [`LocomotionController::handle_input`] every frame while a key is
//! held walks the body one lane per frame until it hits the bound.  A
//! debounced policy instead waits for the body to settle and for a minimum
//! interval before it lets the next step through.

use super::LocomotionController;

/// Default debounce interval in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StepPolicy {
    /// Forward every frame's input unchanged.
    #[default]
    EveryFrame,
    /// Only step when the body is idle and more than `interval_ms` has
    /// passed since the last accepted step.
    Debounced { interval_ms: f64 },
}

impl StepPolicy {
    pub fn debounced() -> Self {
        StepPolicy::Debounced { interval_ms: DEFAULT_DEBOUNCE_MS }
    }
}

/// Applies a [`StepPolicy`] in front of a locomotion controller.
#[derive(Debug, Clone)]
pub struct StepGate {
    policy:       StepPolicy,
    last_step_ms: Option<f64>,
}

impl StepGate {
    pub fn new(policy: StepPolicy) -> Self {
        Self { policy, last_step_ms: None }
    }

    pub fn policy(&self) -> StepPolicy {
        self.policy
    }

    /// Timestamp of the last step that went through, if any.
    pub fn last_step_ms(&self) -> Option<f64> {
        self.last_step_ms
    }

    /// Filters the frame's intent and forwards it to `controller`.
    ///
    /// Returns `true` when the desired lane changed.
    pub fn apply(
        &mut self,
        controller: &mut LocomotionController,
        move_left: bool,
        move_right: bool,
        now_ms: f64,
    ) -> bool {
        let open = match self.policy {
            StepPolicy::EveryFrame => true,
            StepPolicy::Debounced { interval_ms } => {
                let elapsed_ok = self
                    .last_step_ms
                    .map_or(true, |last| now_ms - last > interval_ms);
                elapsed_ok && controller.is_idle()
            }
        };

        let before = controller.desired_lane();
        if open {
            controller.handle_input(move_left, move_right);
        } else {
            // keep target and desired in lock-step even on dropped frames
            controller.handle_input(false, false);
        }

        let stepped = controller.desired_lane() != before;
        if stepped {
            self.last_step_ms = Some(now_ms);
        }
        stepped
    }

    /// Forget the last step time, e.g. after the controller was reset.
    pub fn reset(&mut self) {
        self.last_step_ms = None;
    }
}

impl Default for StepGate {
    fn default() -> Self {
        Self::new(StepPolicy::default())
    }
}
