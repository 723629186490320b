use chrono::{DateTime, Local};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Running {
        project_id: Uuid,
        started_at: DateTime<Local>,
    },
}

impl TimerState {
    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running { .. })
    }

    pub fn project_id(&self) -> Option<Uuid> {
        match self {
            TimerState::Running { project_id, .. } => Some(*project_id),
            TimerState::Idle => None,
        }
    }

    /// Whole seconds since the start, floored. Zero when idle or when the
    /// clock went backwards.
    pub fn elapsed(&self, now: DateTime<Local>) -> u64 {
        match self {
            TimerState::Running { started_at, .. } => {
                now.signed_duration_since(*started_at).num_seconds().max(0) as u64
            }
            TimerState::Idle => 0,
        }
    }
}
