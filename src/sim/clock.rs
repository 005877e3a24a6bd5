//! Virtual play-time clock and keyed task scheduler
//!
//! Every timed activity (frame, countdown, spawn, fluctuation, modifier
//! expiry) is a task keyed by purpose. There is at most one task per kind:
//! scheduling a kind replaces its pending task, so a cadence change can never
//! leave a stale timer behind. Time only moves inside `pop_due`/`settle`,
//! which makes replays with the same inputs bit-identical.
//!
//! Tasks due at the same instant fire in `TaskKind` declaration order, no
//! matter when each one was last armed.

use serde::{Deserialize, Serialize};

/// Purpose of a scheduled task, in same-instant firing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// Motion, combo timeout, speed-up eligibility
    Frame,
    Spawn,
    /// One-second countdown
    Countdown,
    /// Runs after a coinciding spawn, so the spawn due now is kept
    Fluctuation,
    SpeedUpExpiry,
    BonusExpiry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScheduledTask {
    kind: TaskKind,
    due_ms: u64,
    /// `Some` for periodic tasks
    period_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now_ms: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current play time
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Run `kind` every `period_ms`, first firing one period from now
    pub fn every(&mut self, kind: TaskKind, period_ms: u64) {
        let period = period_ms.max(1);
        self.insert(kind, period, Some(period));
    }

    /// Run `kind` once after `delay_ms`
    pub fn after(&mut self, kind: TaskKind, delay_ms: u64) {
        self.insert(kind, delay_ms, None);
    }

    fn insert(&mut self, kind: TaskKind, delay_ms: u64, period_ms: Option<u64>) {
        self.cancel(kind);
        self.tasks.push(ScheduledTask {
            kind,
            due_ms: self.now_ms.saturating_add(delay_ms),
            period_ms,
        });
    }

    /// Cancel the pending task of this kind. Returns whether one existed.
    pub fn cancel(&mut self, kind: TaskKind) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.kind != kind);
        self.tasks.len() != before
    }

    /// Stop every activity
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn is_scheduled(&self, kind: TaskKind) -> bool {
        self.tasks.iter().any(|t| t.kind == kind)
    }

    /// Next firing time of a kind
    pub fn due_ms(&self, kind: TaskKind) -> Option<u64> {
        self.tasks.iter().find(|t| t.kind == kind).map(|t| t.due_ms)
    }

    /// Period of a periodic kind
    pub fn period_ms(&self, kind: TaskKind) -> Option<u64> {
        self.tasks
            .iter()
            .find(|t| t.kind == kind)
            .and_then(|t| t.period_ms)
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Pop the earliest task due at or before `until_ms`
    ///
    /// Moves the clock to the task's due time. Periodic tasks are re-armed
    /// before returning, so the task body may freely reschedule or cancel
    /// its own kind.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TaskKind> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.kind))
            .map(|(i, _)| i)?;

        let mut task = self.tasks.swap_remove(idx);
        self.now_ms = self.now_ms.max(task.due_ms);
        let kind = task.kind;

        if let Some(period) = task.period_ms {
            task.due_ms = task.due_ms.saturating_add(period);
            self.tasks.push(task);
        }

        Some(kind)
    }

    /// Move the clock forward to `until_ms` once nothing else is due
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler, until_ms: u64) -> Vec<(u64, TaskKind)> {
        let mut fired = Vec::new();
        while let Some(kind) = scheduler.pop_due(until_ms) {
            fired.push((scheduler.now_ms(), kind));
        }
        scheduler.settle(until_ms);
        fired
    }

    #[test]
    fn test_periodic_fires_each_period() {
        let mut scheduler = Scheduler::new();
        scheduler.every(TaskKind::Countdown, 1000);

        let fired = drain(&mut scheduler, 3500);
        assert_eq!(
            fired,
            vec![
                (1000, TaskKind::Countdown),
                (2000, TaskKind::Countdown),
                (3000, TaskKind::Countdown),
            ]
        );
        assert_eq!(scheduler.now_ms(), 3500);
        assert_eq!(scheduler.due_ms(TaskKind::Countdown), Some(4000));
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut scheduler = Scheduler::new();
        scheduler.after(TaskKind::BonusExpiry, 5000);

        assert!(drain(&mut scheduler, 4999).is_empty());
        assert_eq!(drain(&mut scheduler, 5000), vec![(5000, TaskKind::BonusExpiry)]);
        assert!(!scheduler.is_scheduled(TaskKind::BonusExpiry));
        assert!(drain(&mut scheduler, 20_000).is_empty());
    }

    #[test]
    fn test_reschedule_replaces_pending_task() {
        let mut scheduler = Scheduler::new();
        scheduler.every(TaskKind::Spawn, 1000);
        drain(&mut scheduler, 600);

        // New cadence counts from now; the old 1000 ms deadline is gone
        scheduler.every(TaskKind::Spawn, 500);
        assert_eq!(scheduler.period_ms(TaskKind::Spawn), Some(500));

        let fired = drain(&mut scheduler, 2000);
        assert_eq!(
            fired,
            vec![
                (1100, TaskKind::Spawn),
                (1600, TaskKind::Spawn),
            ]
        );
    }

    #[test]
    fn test_restarting_one_shot_extends_deadline() {
        let mut scheduler = Scheduler::new();
        scheduler.after(TaskKind::BonusExpiry, 5000);
        drain(&mut scheduler, 3000);
        scheduler.after(TaskKind::BonusExpiry, 5000);

        assert!(drain(&mut scheduler, 7999).is_empty());
        assert_eq!(drain(&mut scheduler, 8000), vec![(8000, TaskKind::BonusExpiry)]);
    }

    #[test]
    fn test_ties_fire_in_kind_order() {
        let mut scheduler = Scheduler::new();
        scheduler.every(TaskKind::Fluctuation, 1000);
        scheduler.every(TaskKind::Countdown, 1000);
        scheduler.every(TaskKind::Spawn, 1000);

        let fired = drain(&mut scheduler, 1000);
        assert_eq!(
            fired,
            vec![
                (1000, TaskKind::Spawn),
                (1000, TaskKind::Countdown),
                (1000, TaskKind::Fluctuation),
            ]
        );
    }

    #[test]
    fn test_rearmed_task_keeps_its_tie_order() {
        let mut scheduler = Scheduler::new();
        scheduler.every(TaskKind::Spawn, 1000);
        scheduler.every(TaskKind::Fluctuation, 3000);

        // Spawn is re-armed at 1000 and 2000, long after fluctuation was armed
        let fired = drain(&mut scheduler, 3000);
        assert_eq!(
            fired,
            vec![
                (1000, TaskKind::Spawn),
                (2000, TaskKind::Spawn),
                (3000, TaskKind::Spawn),
                (3000, TaskKind::Fluctuation),
            ]
        );
    }

    #[test]
    fn test_cancel_all_stops_everything() {
        let mut scheduler = Scheduler::new();
        scheduler.every(TaskKind::Frame, 16);
        scheduler.every(TaskKind::Countdown, 1000);
        scheduler.after(TaskKind::SpeedUpExpiry, 10_000);

        scheduler.cancel_all();
        assert!(scheduler.is_idle());
        assert!(drain(&mut scheduler, 60_000).is_empty());
    }

    #[test]
    fn test_huge_period_does_not_overflow() {
        let mut scheduler = Scheduler::new();
        scheduler.settle(10);
        scheduler.every(TaskKind::Spawn, u64::MAX);
        assert_eq!(scheduler.due_ms(TaskKind::Spawn), Some(u64::MAX));
        assert!(drain(&mut scheduler, 1_000_000).is_empty());
    }
}
