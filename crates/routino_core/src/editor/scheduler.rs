//! Debounced, re-entrancy guarded scheduling of segmentation passes.
//!
//! # Responsibility
//! - Collapse bursts of pass requests into one cancel-and-replace timer.
//! - Drop timer fires that arrive while a pass is still processing.
//!
//! # Invariants
//! - At most one timer is armed at any time.
//! - A fire while `Processing` is dropped, never queued.
//! - Time is supplied by the caller as monotonic milliseconds; the scheduler
//!   never reads a clock itself.

use log::debug;

pub const IMMEDIATE_DELAY_MS: u64 = 50;
pub const DEFERRED_DELAY_MS: u64 = 200;

/// Delay class requested for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleTier {
    /// Token-boundary edits: whitespace, punctuation, line breaks.
    Immediate,
    /// Any other edit.
    Deferred,
}

impl ScheduleTier {
    pub fn from_immediate(immediate: bool) -> Self {
        if immediate {
            Self::Immediate
        } else {
            Self::Deferred
        }
    }

    pub fn delay_ms(self) -> u64 {
        match self {
            Self::Immediate => IMMEDIATE_DELAY_MS,
            Self::Deferred => DEFERRED_DELAY_MS,
        }
    }
}

/// Observable scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Scheduled,
    Processing,
}

/// Identifier of one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Result of polling the scheduler at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// Nothing armed, or the armed timer is not due yet.
    NotDue,
    /// The timer came due while a pass was processing and was discarded.
    Dropped(TimerId),
    /// The timer fired; the scheduler is now `Processing`.
    Fire(TimerId),
}

#[derive(Debug, Clone, Copy)]
struct ArmedTimer {
    id: TimerId,
    due_ms: u64,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    armed: Option<ArmedTimer>,
    processing: bool,
    next_timer_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any armed timer and arms a new one `tier.delay_ms()` from now.
    pub fn schedule(&mut self, tier: ScheduleTier, now_ms: u64) -> TimerId {
        if let Some(previous) = self.armed.take() {
            debug!(
                "event=pass_rescheduled module=scheduler cancelled_timer={}",
                previous.id.0
            );
        }
        self.next_timer_id += 1;
        let id = TimerId(self.next_timer_id);
        self.armed = Some(ArmedTimer {
            id,
            due_ms: now_ms.saturating_add(tier.delay_ms()),
        });
        id
    }

    /// Fires the armed timer when it is due.
    pub fn poll(&mut self, now_ms: u64) -> Poll {
        let Some(timer) = self.armed else {
            return Poll::NotDue;
        };
        if timer.due_ms > now_ms {
            return Poll::NotDue;
        }

        self.armed = None;
        if self.processing {
            debug!(
                "event=pass_dropped module=scheduler timer={} reason=processing",
                timer.id.0
            );
            return Poll::Dropped(timer.id);
        }
        self.processing = true;
        Poll::Fire(timer.id)
    }

    /// Ends the current pass.
    pub fn finish(&mut self) {
        self.processing = false;
    }

    pub fn state(&self) -> SchedulerState {
        if self.processing {
            SchedulerState::Processing
        } else if self.armed.is_some() {
            SchedulerState::Scheduled
        } else {
            SchedulerState::Idle
        }
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Due time of the armed timer, if any.
    pub fn pending_due_ms(&self) -> Option<u64> {
        self.armed.map(|timer| timer.due_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{Poll, ScheduleTier, Scheduler, SchedulerState};

    #[test]
    fn tiers_map_to_delays() {
        assert_eq!(ScheduleTier::from_immediate(true).delay_ms(), 50);
        assert_eq!(ScheduleTier::from_immediate(false).delay_ms(), 200);
    }

    #[test]
    fn fires_once_when_due_then_returns_to_idle() {
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.state(), SchedulerState::Idle);

        let timer = scheduler.schedule(ScheduleTier::Immediate, 1_000);
        assert_eq!(scheduler.state(), SchedulerState::Scheduled);
        assert_eq!(scheduler.poll(1_049), Poll::NotDue);
        assert_eq!(scheduler.poll(1_050), Poll::Fire(timer));
        assert_eq!(scheduler.state(), SchedulerState::Processing);
        assert_eq!(scheduler.poll(5_000), Poll::NotDue);

        scheduler.finish();
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn reschedule_replaces_pending_timer() {
        let mut scheduler = Scheduler::new();
        let first = scheduler.schedule(ScheduleTier::Deferred, 0);
        let second = scheduler.schedule(ScheduleTier::Deferred, 30);
        assert_ne!(first, second);
        assert_eq!(scheduler.pending_due_ms(), Some(230));
        assert_eq!(scheduler.poll(200), Poll::NotDue);
        assert_eq!(scheduler.poll(230), Poll::Fire(second));
    }

    #[test]
    fn fire_during_processing_is_dropped() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ScheduleTier::Immediate, 0);
        assert!(matches!(scheduler.poll(50), Poll::Fire(_)));

        let late = scheduler.schedule(ScheduleTier::Immediate, 60);
        assert_eq!(scheduler.state(), SchedulerState::Processing);
        assert_eq!(scheduler.poll(110), Poll::Dropped(late));

        scheduler.finish();
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(scheduler.poll(500), Poll::NotDue);
    }
}
