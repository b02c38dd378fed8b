//! Single-slot timer that gates deferred effects behind animation windows.

use std::time::Duration;

use kitchen_tactics_core::UnitId;

use crate::turn::CommittedAction;

/// Continuation that runs once its delay has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Deferred {
    ResolveAction(CommittedAction),
    OpenShop,
    BeginEnemyPhase,
    ActivateEnemy(UnitId),
    EnemyStrike { unit: UnitId, target: UnitId },
    FinishEnemyPhase,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    effect: Deferred,
    total: Duration,
    remaining: Duration,
}

/// Holds at most one pending effect; player input is frozen while it is armed.
#[derive(Debug, Default)]
pub(crate) struct Schedule {
    pending: Option<Pending>,
}

impl Schedule {
    pub(crate) fn new() -> Self {
        Self { pending: None }
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    /// Arms the timer. Only an idle schedule may be armed.
    pub(crate) fn arm(&mut self, delay: Duration, effect: Deferred) {
        debug_assert!(self.pending.is_none(), "schedule armed twice");
        self.pending = Some(Pending {
            effect,
            total: delay,
            remaining: delay,
        });
    }

    /// Consumes `budget` and yields the effect once its delay has fully elapsed,
    /// together with the unspent remainder of the budget.
    pub(crate) fn advance(&mut self, budget: Duration) -> Option<(Deferred, Duration)> {
        let pending = self.pending.as_mut()?;
        if pending.remaining > budget {
            pending.remaining -= budget;
            return None;
        }
        let leftover = budget - pending.remaining;
        let effect = pending.effect;
        self.pending = None;
        Some((effect, leftover))
    }

    pub(crate) fn pending(&self) -> Option<Deferred> {
        self.pending.map(|pending| pending.effect)
    }

    /// Elapsed share of the armed window in thousandths.
    pub(crate) fn progress_permille(&self) -> u32 {
        let Some(pending) = self.pending else {
            return 0;
        };
        if pending.total.is_zero() {
            return 1000;
        }
        let elapsed = pending.total.saturating_sub(pending.remaining);
        let permille = elapsed.as_micros().saturating_mul(1000) / pending.total.as_micros();
        u32::try_from(permille).unwrap_or(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_fires_once_delay_elapses() {
        let mut schedule = Schedule::new();
        schedule.arm(Duration::from_millis(500), Deferred::OpenShop);

        assert_eq!(schedule.advance(Duration::from_millis(200)), None);
        assert_eq!(schedule.progress_permille(), 400);
        assert_eq!(
            schedule.advance(Duration::from_millis(450)),
            Some((Deferred::OpenShop, Duration::from_millis(150)))
        );
        assert!(schedule.is_idle());
        assert_eq!(schedule.advance(Duration::from_secs(1)), None);
    }

    #[test]
    fn zero_delay_fires_on_empty_tick() {
        let mut schedule = Schedule::new();
        schedule.arm(Duration::ZERO, Deferred::FinishEnemyPhase);
        assert_eq!(schedule.progress_permille(), 1000);
        assert_eq!(
            schedule.advance(Duration::ZERO),
            Some((Deferred::FinishEnemyPhase, Duration::ZERO))
        );
    }
}
