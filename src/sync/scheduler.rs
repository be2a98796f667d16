//! Poll scheduler lifecycle: `Idle` until playback starts, `Polling` while it
//! runs. Each start mints a fresh handle so a stale timer cannot be confused
//! with the live one.

use crate::player::PlayerState;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PollHandle(u64);

impl PollHandle {
    pub fn generation(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PollHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "poll#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    #[default]
    Idle,
    Polling {
        handle: PollHandle,
    },
}

/// What the caller should do with its timer after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerCommand {
    Start(PollHandle),
    Stop(PollHandle),
}

#[derive(Debug, Default)]
pub struct PollScheduler {
    state: SchedulerState,
    next_generation: u64,
}

impl PollScheduler {
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_polling(&self) -> bool {
        matches!(self.state, SchedulerState::Polling { .. })
    }

    pub fn handle(&self) -> Option<PollHandle> {
        match self.state {
            SchedulerState::Polling { handle } => Some(handle),
            SchedulerState::Idle => None,
        }
    }

    /// Starting while already polling is a no-op.
    pub fn start(&mut self) -> Option<SchedulerCommand> {
        if self.is_polling() {
            return None;
        }
        self.next_generation = self.next_generation.wrapping_add(1);
        let handle = PollHandle(self.next_generation);
        self.state = SchedulerState::Polling { handle };
        Some(SchedulerCommand::Start(handle))
    }

    /// Stopping while idle is a no-op.
    pub fn stop(&mut self) -> Option<SchedulerCommand> {
        match std::mem::take(&mut self.state) {
            SchedulerState::Polling { handle } => Some(SchedulerCommand::Stop(handle)),
            SchedulerState::Idle => None,
        }
    }

    /// Map a player state onto the scheduler.
    pub fn on_player_state(&mut self, state: PlayerState) -> Option<SchedulerCommand> {
        match state {
            PlayerState::Playing => self.start(),
            PlayerState::Paused | PlayerState::Ended => self.stop(),
            PlayerState::Unstarted => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_playing_keeps_one_timer() {
        let mut scheduler = PollScheduler::default();
        let first = scheduler.on_player_state(PlayerState::Playing);
        let Some(SchedulerCommand::Start(handle)) = first else {
            panic!("expected a start command, got {first:?}");
        };
        assert_eq!(scheduler.on_player_state(PlayerState::Playing), None);
        assert_eq!(scheduler.handle(), Some(handle));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut scheduler = PollScheduler::default();
        assert_eq!(scheduler.stop(), None);
        scheduler.start();
        let handle = scheduler.handle().expect("polling");
        assert_eq!(
            scheduler.on_player_state(PlayerState::Paused),
            Some(SchedulerCommand::Stop(handle))
        );
        assert_eq!(scheduler.on_player_state(PlayerState::Ended), None);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn restart_mints_a_new_handle() {
        let mut scheduler = PollScheduler::default();
        scheduler.start();
        let first = scheduler.handle().expect("polling");
        scheduler.stop();
        scheduler.start();
        let second = scheduler.handle().expect("polling");
        assert_ne!(first, second);
        assert!(second.generation() > first.generation());
    }

    #[test]
    fn unstarted_leaves_scheduler_alone() {
        let mut scheduler = PollScheduler::default();
        assert_eq!(scheduler.on_player_state(PlayerState::Unstarted), None);
        assert!(!scheduler.is_polling());
        scheduler.start();
        assert_eq!(scheduler.on_player_state(PlayerState::Unstarted), None);
        assert!(scheduler.is_polling());
    }
}
