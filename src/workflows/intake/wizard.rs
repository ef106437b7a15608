use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// The three screens of the intake wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Capture,
    Placement,
    Review,
}

impl WizardStep {
    pub const fn ordered() -> [Self; 3] {
        [Self::Capture, Self::Placement, Self::Review]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Capture => 0,
            Self::Placement => 1,
            Self::Review => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ordered().get(index).copied()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Capture => "Client & Office",
            Self::Placement => "Placement & County",
            Self::Review => "Review",
        }
    }

    const fn next(self) -> Option<Self> {
        match self {
            Self::Capture => Some(Self::Placement),
            Self::Placement => Some(Self::Review),
            Self::Review => None,
        }
    }

    const fn previous(self) -> Option<Self> {
        match self {
            Self::Capture => None,
            Self::Placement => Some(Self::Capture),
            Self::Review => Some(Self::Placement),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Editing(WizardStep),
    /// Cosmetic busy state between steps; carries no data semantics.
    Validating {
        from: WizardStep,
        target: WizardStep,
        ready_at: Instant,
    },
    Submitting,
    Submitted,
    Cancelled,
}

impl WizardPhase {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Editing(_) => "editing",
            Self::Validating { .. } => "validating",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
            Self::Cancelled => "cancelled",
        }
    }
}

/// What the caller must do after a `next` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    Advancing { target: WizardStep },
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("a step transition or submission is already in progress")]
    Busy,
    #[error("the intake session has already ended")]
    Closed,
    #[error("direct navigation is only available from the review step")]
    JumpUnavailable,
    #[error("submission can only start from the review step")]
    NotOnReview,
}

/// Step sequencing for one intake session.
#[derive(Debug, Clone)]
pub struct WizardController {
    phase: WizardPhase,
    validating_delay: Duration,
}

impl WizardController {
    pub fn new(validating_delay: Duration) -> Self {
        Self {
            phase: WizardPhase::Editing(WizardStep::Capture),
            validating_delay,
        }
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    /// Step currently on screen. While validating this is still the origin step.
    pub fn step(&self) -> Option<WizardStep> {
        match self.phase {
            WizardPhase::Editing(step) => Some(step),
            WizardPhase::Validating { from, .. } => Some(from),
            WizardPhase::Submitting => Some(WizardStep::Review),
            WizardPhase::Submitted | WizardPhase::Cancelled => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.phase, WizardPhase::Submitted | WizardPhase::Cancelled)
    }

    pub fn accepts_input(&self) -> bool {
        matches!(
            self.phase,
            WizardPhase::Editing(_) | WizardPhase::Validating { .. }
        )
    }

    /// Complete a pending step change once its delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> WizardPhase {
        if let WizardPhase::Validating {
            target, ready_at, ..
        } = self.phase
        {
            if now >= ready_at {
                debug!(step = target.label(), "wizard step settled");
                self.phase = WizardPhase::Editing(target);
            }
        }
        self.phase
    }

    pub fn next(&mut self, now: Instant) -> Result<NextAction, WizardError> {
        let step = self.settled_step(now)?;
        match step.next() {
            Some(target) => {
                self.begin_move(step, target, now);
                Ok(NextAction::Advancing { target })
            }
            None => Ok(NextAction::Submit),
        }
    }

    /// Step back; backing out of the first step cancels the session.
    pub fn back(&mut self, now: Instant) -> Result<WizardPhase, WizardError> {
        let step = self.settled_step(now)?;
        match step.previous() {
            Some(target) => self.begin_move(step, target, now),
            None => {
                debug!("wizard cancelled from first step");
                self.phase = WizardPhase::Cancelled;
            }
        }
        Ok(self.phase)
    }

    pub fn go_to(&mut self, target: WizardStep, now: Instant) -> Result<WizardStep, WizardError> {
        match self.settled_step(now)? {
            WizardStep::Review => {
                self.phase = WizardPhase::Editing(target);
                Ok(target)
            }
            _ => Err(WizardError::JumpUnavailable),
        }
    }

    pub fn begin_submission(&mut self, now: Instant) -> Result<(), WizardError> {
        match self.settled_step(now)? {
            WizardStep::Review => {
                self.phase = WizardPhase::Submitting;
                Ok(())
            }
            _ => Err(WizardError::NotOnReview),
        }
    }

    /// Resolve an in-flight submission. Failures return to the review step.
    pub fn finish_submission(&mut self, succeeded: bool) {
        if self.phase != WizardPhase::Submitting {
            return;
        }
        self.phase = if succeeded {
            WizardPhase::Submitted
        } else {
            WizardPhase::Editing(WizardStep::Review)
        };
    }

    fn settled_step(&mut self, now: Instant) -> Result<WizardStep, WizardError> {
        match self.poll(now) {
            WizardPhase::Editing(step) => Ok(step),
            WizardPhase::Validating { .. } | WizardPhase::Submitting => Err(WizardError::Busy),
            WizardPhase::Submitted | WizardPhase::Cancelled => Err(WizardError::Closed),
        }
    }

    fn begin_move(&mut self, from: WizardStep, target: WizardStep, now: Instant) {
        debug!(from = from.label(), to = target.label(), "wizard validating");
        self.phase = WizardPhase::Validating {
            from,
            target,
            ready_at: now + self.validating_delay,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    fn settle(controller: &mut WizardController, at: Instant) -> Instant {
        let later = at + DELAY;
        controller.poll(later);
        later
    }

    #[test]
    fn next_passes_through_validating() {
        let start = Instant::now();
        let mut controller = WizardController::new(DELAY);

        assert_eq!(
            controller.next(start),
            Ok(NextAction::Advancing {
                target: WizardStep::Placement
            })
        );
        assert_eq!(controller.phase().label(), "validating");
        assert_eq!(controller.step(), Some(WizardStep::Capture));
        assert_eq!(controller.next(start), Err(WizardError::Busy));

        settle(&mut controller, start);
        assert_eq!(controller.phase(), WizardPhase::Editing(WizardStep::Placement));
    }

    #[test]
    fn next_on_review_requests_submission() {
        let mut now = Instant::now();
        let mut controller = WizardController::new(DELAY);
        controller.next(now).expect("advance to placement");
        now = settle(&mut controller, now);
        controller.next(now).expect("advance to review");
        now = settle(&mut controller, now);

        assert_eq!(controller.next(now), Ok(NextAction::Submit));
        assert_eq!(controller.phase(), WizardPhase::Editing(WizardStep::Review));
    }

    #[test]
    fn back_from_first_step_cancels() {
        let now = Instant::now();
        let mut controller = WizardController::new(DELAY);
        assert_eq!(controller.back(now), Ok(WizardPhase::Cancelled));
        assert!(controller.is_closed());
        assert_eq!(controller.next(now), Err(WizardError::Closed));
    }

    #[test]
    fn go_to_only_from_review() {
        let mut now = Instant::now();
        let mut controller = WizardController::new(Duration::ZERO);
        assert_eq!(
            controller.go_to(WizardStep::Placement, now),
            Err(WizardError::JumpUnavailable)
        );

        controller.next(now).expect("to placement");
        now += Duration::from_millis(1);
        controller.next(now).expect("to review");
        now += Duration::from_millis(1);

        assert_eq!(controller.go_to(WizardStep::Capture, now), Ok(WizardStep::Capture));
        assert_eq!(controller.phase(), WizardPhase::Editing(WizardStep::Capture));
    }

    #[test]
    fn submission_blocks_every_transition() {
        let mut now = Instant::now();
        let mut controller = WizardController::new(Duration::ZERO);
        controller.next(now).expect("to placement");
        controller.next(now).expect("to review");
        now += Duration::from_millis(1);

        controller.begin_submission(now).expect("submission starts");
        assert_eq!(controller.next(now), Err(WizardError::Busy));
        assert_eq!(controller.back(now), Err(WizardError::Busy));
        assert_eq!(
            controller.go_to(WizardStep::Capture, now),
            Err(WizardError::Busy)
        );
        assert!(!controller.accepts_input());

        controller.finish_submission(false);
        assert_eq!(controller.phase(), WizardPhase::Editing(WizardStep::Review));

        controller.begin_submission(now).expect("retry starts");
        controller.finish_submission(true);
        assert_eq!(controller.phase(), WizardPhase::Submitted);
        assert_eq!(controller.step(), None);
    }

    #[test]
    fn submission_requires_review_step() {
        let now = Instant::now();
        let mut controller = WizardController::new(DELAY);
        assert_eq!(controller.begin_submission(now), Err(WizardError::NotOnReview));
    }

    #[test]
    fn steps_round_trip_through_indices() {
        assert_eq!(WizardStep::from_index(2), Some(WizardStep::Review));
        assert_eq!(WizardStep::from_index(3), None);
        assert_eq!(WizardStep::Placement.index(), 1);
    }
}
