use std::fmt;

/// Outcome of the backend startup race. Every state but `Pending` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum BackendOutcome {
    #[default]
    Pending,
    Ready,
    TimedOut,
    Failed,
}

impl BackendOutcome {
    pub(crate) fn is_terminal(self) -> bool {
        self != Self::Pending
    }

    /// Moves out of `Pending`. Anything else is rejected and leaves the state untouched.
    pub(crate) fn transition(&mut self, to: BackendOutcome) -> Result<(), RejectedTransition> {
        if self.is_terminal() || to == Self::Pending {
            return Err(RejectedTransition { from: *self, to });
        }
        *self = to;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RejectedTransition {
    pub(crate) from: BackendOutcome,
    pub(crate) to: BackendOutcome,
}

impl fmt::Display for RejectedTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "backend outcome is already {:?}, ignoring {:?}",
            self.from, self.to
        )
    }
}

/// Both halves of startup readiness plus whether the main document was loaded.
///
/// A timed-out backend still counts as ready so the UI can load degraded. A
/// failed backend never does, and the loading document then stays up.
#[derive(Debug, Clone, Default)]
pub(crate) struct ReadinessState {
    pub(crate) backend: BackendOutcome,
    frontend_ready: bool,
    presented: bool,
}

impl ReadinessState {
    pub(crate) fn backend_ready(&self) -> bool {
        matches!(
            self.backend,
            BackendOutcome::Ready | BackendOutcome::TimedOut
        )
    }

    pub(crate) fn frontend_ready(&self) -> bool {
        self.frontend_ready
    }

    pub(crate) fn presented(&self) -> bool {
        self.presented
    }

    /// Returns false if the frontend had already reported ready.
    pub(crate) fn mark_frontend_ready(&mut self) -> bool {
        !std::mem::replace(&mut self.frontend_ready, true)
    }

    pub(crate) fn should_present(&self) -> bool {
        self.backend_ready() && self.frontend_ready && !self.presented
    }

    /// The single presentation gate: true at most once per run.
    pub(crate) fn take_presentation(&mut self) -> bool {
        if !self.should_present() {
            return false;
        }
        self.presented = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_accepts_each_terminal_outcome() {
        for to in [
            BackendOutcome::Ready,
            BackendOutcome::TimedOut,
            BackendOutcome::Failed,
        ] {
            let mut outcome = BackendOutcome::Pending;
            assert!(outcome.transition(to).is_ok());
            assert_eq!(outcome, to);
        }
    }

    #[test]
    fn terminal_outcomes_reject_every_transition() {
        let all = [
            BackendOutcome::Pending,
            BackendOutcome::Ready,
            BackendOutcome::TimedOut,
            BackendOutcome::Failed,
        ];
        for from in &all[1..] {
            for to in all {
                let mut outcome = *from;
                assert_eq!(
                    outcome.transition(to),
                    Err(RejectedTransition { from: *from, to })
                );
                assert_eq!(outcome, *from);
            }
        }
    }

    #[test]
    fn pending_cannot_transition_to_pending() {
        let mut outcome = BackendOutcome::Pending;
        assert!(outcome.transition(BackendOutcome::Pending).is_err());
    }

    #[test]
    fn presentation_requires_both_flags() {
        let mut state = ReadinessState::default();
        assert!(!state.take_presentation());

        assert!(state.mark_frontend_ready());
        assert!(!state.take_presentation());

        state.backend.transition(BackendOutcome::Ready).unwrap();
        assert!(state.take_presentation());
        assert!(state.presented());
    }

    #[test]
    fn presentation_is_granted_only_once() {
        let mut state = ReadinessState::default();
        state.mark_frontend_ready();
        state.backend.transition(BackendOutcome::TimedOut).unwrap();

        assert!(state.take_presentation());
        assert!(!state.take_presentation());
        assert!(!state.should_present());
    }

    #[test]
    fn failed_backend_never_presents() {
        let mut state = ReadinessState::default();
        state.backend.transition(BackendOutcome::Failed).unwrap();
        state.mark_frontend_ready();

        assert!(!state.backend_ready());
        assert!(!state.take_presentation());
    }

    #[test]
    fn repeated_frontend_ready_is_reported() {
        let mut state = ReadinessState::default();
        assert!(state.mark_frontend_ready());
        assert!(!state.mark_frontend_ready());
        assert!(state.frontend_ready());
    }
}
