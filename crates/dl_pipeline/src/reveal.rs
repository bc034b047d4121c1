//! Staged reveal of a drawn draft order.
//!
//! A single-threaded cooperative state machine: the caller owns pacing and
//! calls `advance()` once per reveal step; the controller never loops or
//! sleeps internally. States: `Idle → Revealing → {Complete, Cancelled}`.
//! `skip()` emits everything left in one batch and lands on `Complete` with
//! the skipped flag set. Illegal transitions are loud `StateError`s, not
//! no-ops; cancellation is a normal terminal state, not an error.

use core::fmt;

use dl_core::entities::{DraftOrder, TeamId};

/// Which end of the order is revealed first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RevealDirection {
    /// Classic suspense order: the last pick is shown first, the first
    /// overall pick last.
    LastToFirst,
    /// Straight reading order, first overall pick shown first.
    FirstToLast,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RevealPhase {
    Idle,
    Revealing,
    Complete,
    Cancelled,
}

/// One revealed slot: the 0-based draft position and the team holding it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Emission {
    pub position: usize,
    pub team: TeamId,
}

/// Out-of-order driver calls.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StateError {
    /// `start()` called outside `Idle`.
    NotIdle(RevealPhase),
    /// `advance()`/`skip()` called outside `Revealing`, or `cancel()` called
    /// in a terminal phase.
    NotRevealing(RevealPhase),
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::NotIdle(p) => write!(f, "start() requires Idle, state is {p:?}"),
            StateError::NotRevealing(p) => {
                write!(f, "operation requires Revealing, state is {p:?}")
            }
        }
    }
}

/// Owns the reveal cursor; the cursor moves only through `advance()`,
/// `skip()`, and `cancel()`.
#[derive(Debug)]
pub struct RevealController {
    order: Option<DraftOrder>,
    direction: RevealDirection,
    emitted: usize,
    phase: RevealPhase,
    skipped: bool,
}

impl RevealController {
    pub fn new(direction: RevealDirection) -> Self {
        Self {
            order: None,
            direction,
            emitted: 0,
            phase: RevealPhase::Idle,
            skipped: false,
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn direction(&self) -> RevealDirection {
        self.direction
    }

    /// True once the terminal `Complete` was reached through `skip()`.
    pub fn was_skipped(&self) -> bool {
        self.skipped
    }

    /// Positions not yet emitted.
    pub fn remaining(&self) -> usize {
        self.order.as_ref().map_or(0, |o| o.len() - self.emitted)
    }

    /// Idle → Revealing. An empty order completes immediately (nothing to
    /// emit, guarantee trivially satisfied).
    pub fn start(&mut self, order: DraftOrder) -> Result<(), StateError> {
        if self.phase != RevealPhase::Idle {
            return Err(StateError::NotIdle(self.phase));
        }
        self.phase = if order.is_empty() {
            RevealPhase::Complete
        } else {
            RevealPhase::Revealing
        };
        self.order = Some(order);
        Ok(())
    }

    /// Emit the next position in the configured direction. Transitions to
    /// `Complete` when the last position goes out.
    pub fn advance(&mut self) -> Result<Emission, StateError> {
        if self.phase != RevealPhase::Revealing {
            return Err(StateError::NotRevealing(self.phase));
        }
        let emission = self.emit_next();
        if self.remaining() == 0 {
            self.phase = RevealPhase::Complete;
        }
        Ok(emission)
    }

    /// Emit every remaining position in one batch and complete.
    pub fn skip(&mut self) -> Result<Vec<Emission>, StateError> {
        if self.phase != RevealPhase::Revealing {
            return Err(StateError::NotRevealing(self.phase));
        }
        let mut batch = Vec::with_capacity(self.remaining());
        while self.remaining() > 0 {
            batch.push(self.emit_next());
        }
        self.phase = RevealPhase::Complete;
        self.skipped = true;
        Ok(batch)
    }

    /// Halt further emission. Valid from `Idle` or `Revealing`; already-made
    /// emissions are not rolled back.
    pub fn cancel(&mut self) -> Result<(), StateError> {
        match self.phase {
            RevealPhase::Idle | RevealPhase::Revealing => {
                self.phase = RevealPhase::Cancelled;
                Ok(())
            }
            terminal => Err(StateError::NotRevealing(terminal)),
        }
    }

    fn emit_next(&mut self) -> Emission {
        let order = self.order.as_ref().expect("Revealing implies an order");
        let position = match self.direction {
            RevealDirection::LastToFirst => order.len() - 1 - self.emitted,
            RevealDirection::FirstToLast => self.emitted,
        };
        let team = order
            .pick(position)
            .expect("position is in range by construction")
            .clone();
        self.emitted += 1;
        Emission { position, team }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(n: usize) -> DraftOrder {
        DraftOrder::new((0..n).map(|i| format!("t{i}").parse().unwrap()).collect())
    }

    #[test]
    fn five_advances_reveal_last_to_first_then_fail_loudly() {
        let mut ctrl = RevealController::new(RevealDirection::LastToFirst);
        ctrl.start(order(5)).unwrap();

        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(ctrl.advance().unwrap().position);
        }
        assert_eq!(seen, vec![4, 3, 2, 1, 0]);
        assert_eq!(ctrl.phase(), RevealPhase::Complete);
        assert!(!ctrl.was_skipped());

        assert_eq!(
            ctrl.advance(),
            Err(StateError::NotRevealing(RevealPhase::Complete))
        );
    }

    #[test]
    fn first_to_last_is_a_named_option() {
        let mut ctrl = RevealController::new(RevealDirection::FirstToLast);
        ctrl.start(order(3)).unwrap();
        let positions: Vec<usize> = (0..3).map(|_| ctrl.advance().unwrap().position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(ctrl.phase(), RevealPhase::Complete);
    }

    #[test]
    fn skip_after_one_advance_emits_the_rest_once() {
        let mut ctrl = RevealController::new(RevealDirection::LastToFirst);
        ctrl.start(order(5)).unwrap();

        let first = ctrl.advance().unwrap();
        let rest = ctrl.skip().unwrap();
        assert_eq!(rest.len(), 4);
        assert_eq!(ctrl.phase(), RevealPhase::Complete);
        assert!(ctrl.was_skipped());

        // Total distinct emissions across the lifecycle equal the order
        // length, no repeats.
        let mut positions: Vec<usize> = rest.iter().map(|e| e.position).collect();
        positions.push(first.position);
        positions.sort_unstable();
        assert_eq!(positions, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn cancel_is_terminal_and_quiet() {
        let mut ctrl = RevealController::new(RevealDirection::LastToFirst);
        ctrl.start(order(4)).unwrap();
        let _ = ctrl.advance().unwrap();
        ctrl.cancel().unwrap();
        assert_eq!(ctrl.phase(), RevealPhase::Cancelled);

        assert!(ctrl.advance().is_err());
        assert!(ctrl.skip().is_err());
        assert!(ctrl.cancel().is_err());
    }

    #[test]
    fn cancel_from_idle_is_allowed() {
        let mut ctrl = RevealController::new(RevealDirection::LastToFirst);
        ctrl.cancel().unwrap();
        assert_eq!(ctrl.phase(), RevealPhase::Cancelled);
        assert_eq!(
            ctrl.start(order(2)),
            Err(StateError::NotIdle(RevealPhase::Cancelled))
        );
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut ctrl = RevealController::new(RevealDirection::LastToFirst);
        ctrl.start(order(2)).unwrap();
        assert_eq!(
            ctrl.start(order(2)),
            Err(StateError::NotIdle(RevealPhase::Revealing))
        );
    }

    #[test]
    fn skip_before_start_is_rejected() {
        let mut ctrl = RevealController::new(RevealDirection::LastToFirst);
        assert_eq!(
            ctrl.skip(),
            Err(StateError::NotRevealing(RevealPhase::Idle))
        );
    }

    #[test]
    fn empty_order_completes_without_emissions() {
        let mut ctrl = RevealController::new(RevealDirection::LastToFirst);
        ctrl.start(DraftOrder::new(Vec::new())).unwrap();
        assert_eq!(ctrl.phase(), RevealPhase::Complete);
        assert_eq!(ctrl.remaining(), 0);
    }
}
