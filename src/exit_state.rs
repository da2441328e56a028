#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum LifecyclePhase {
    #[default]
    Starting,
    Running,
    Terminating,
}

/// `Starting -> Running -> Terminating`. Terminating is entered once.
#[derive(Debug, Default)]
pub(crate) struct LifecycleStateMachine {
    phase: LifecyclePhase,
}

impl LifecycleStateMachine {
    pub(crate) fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub(crate) fn is_terminating(&self) -> bool {
        self.phase == LifecyclePhase::Terminating
    }

    /// Returns false unless the run was still starting.
    pub(crate) fn begin_running(&mut self) -> bool {
        if self.phase != LifecyclePhase::Starting {
            return false;
        }
        self.phase = LifecyclePhase::Running;
        true
    }

    /// Returns true only for the first caller, who owns the exit cleanup.
    pub(crate) fn begin_terminating(&mut self) -> bool {
        if self.is_terminating() {
            return false;
        }
        self.phase = LifecyclePhase::Terminating;
        true
    }
}
