//! The click sequencer (spec §4.5): a separate, pure scheduler that turns an
//! `Action::Click { n }` into `n` timed button down/up pulses, polled by the
//! host once per loop iteration.

/// Lifecycle phase of a single button pulse within a run of clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerPhase {
  Idle,
  Pressed,
  Released,
}

/// What the host should do with the HID sink this poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerOutput {
  ButtonDown,
  ButtonUp,
  Idle,
}

/// Turns `pending_clicks` into `click_press_ms`-wide down pulses separated by
/// `click_gap_ms`, one step per [`ClickSequencer::poll`] call (spec §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClickSequencer {
  pending_clicks: u8,
  phase: SequencerPhase,
  phase_change_time: u64,
  click_press_ms: u64,
  click_gap_ms: u64,
}

impl ClickSequencer {
  pub const fn new(click_press_ms: u64, click_gap_ms: u64) -> Self {
    Self { pending_clicks: 0, phase: SequencerPhase::Idle, phase_change_time: 0, click_press_ms, click_gap_ms }
  }

  /// Queue `n` clicks, restarting the sequencer from `Idle` regardless of
  /// whatever run it was mid-way through (the engine emits at most one
  /// `Click` per chain, so this never races with an in-flight run in
  /// practice).
  pub fn queue(&mut self, n: u8, now_ms: u64) {
    self.pending_clicks = n;
    self.phase = SequencerPhase::Idle;
    self.phase_change_time = now_ms;
  }

  pub fn is_idle(&self) -> bool {
    self.phase == SequencerPhase::Idle && self.pending_clicks == 0
  }

  /// Advance one step. Call every host poll cycle, whether or not a click
  /// is pending.
  pub fn poll(&mut self, now_ms: u64) -> SequencerOutput {
    match self.phase {
      SequencerPhase::Idle if self.pending_clicks > 0 => {
        self.phase = SequencerPhase::Pressed;
        self.phase_change_time = now_ms;
        SequencerOutput::ButtonDown
      }
      SequencerPhase::Idle => SequencerOutput::Idle,
      SequencerPhase::Pressed => {
        if now_ms.saturating_sub(self.phase_change_time) >= self.click_press_ms {
          self.phase = SequencerPhase::Released;
          self.phase_change_time = now_ms;
          self.pending_clicks -= 1;
          SequencerOutput::ButtonUp
        } else {
          SequencerOutput::Idle
        }
      }
      SequencerPhase::Released => {
        if self.pending_clicks == 0 {
          self.phase = SequencerPhase::Idle;
          SequencerOutput::Idle
        } else if now_ms.saturating_sub(self.phase_change_time) >= self.click_gap_ms {
          self.phase = SequencerPhase::Idle;
          SequencerOutput::Idle
        } else {
          SequencerOutput::Idle
        }
      }
    }
  }
}

impl Default for ClickSequencer {
  /// `click_press_ms ~= 10`, `click_gap_ms ~= 30` (spec §4.5).
  fn default() -> Self {
    Self::new(10, 30)
  }
}

/// Bounded retry helper for a HID sink that can report "not ready" (spec
/// §4.5 "Failure semantics"). Owned by the host/demo layer, not the engine:
/// the engine does not know whether sinks succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkRetry {
  max_attempts: u8,
  attempts_left: u8,
}

impl SinkRetry {
  pub const fn new(max_attempts: u8) -> Self {
    Self { max_attempts, attempts_left: max_attempts }
  }

  /// Record one failed send attempt. Returns `true` while the caller
  /// should retry, `false` once the bounded attempt count is exhausted and
  /// the report should be discarded.
  pub fn record_failure(&mut self) -> bool {
    if self.attempts_left == 0 {
      false
    } else {
      self.attempts_left -= 1;
      self.attempts_left > 0
    }
  }

  /// Restore the full attempt budget, ready to track a fresh report.
  pub fn reset(&mut self) {
    self.attempts_left = self.max_attempts;
  }
}

impl Default for SinkRetry {
  /// Five attempts (spec §4.5: "five is a reasonable default").
  fn default() -> Self {
    Self::new(5)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn idle_with_no_pending_clicks_stays_idle() {
    let mut seq = ClickSequencer::default();
    assert_eq!(seq.poll(0), SequencerOutput::Idle);
  }

  #[test]
  fn single_click_runs_down_then_up_then_idle() {
    let mut seq = ClickSequencer::default();
    seq.queue(1, 0);
    assert_eq!(seq.poll(0), SequencerOutput::ButtonDown);
    assert_eq!(seq.poll(5), SequencerOutput::Idle);
    assert_eq!(seq.poll(10), SequencerOutput::ButtonUp);
    assert_eq!(seq.poll(20), SequencerOutput::Idle);
    assert!(seq.is_idle());
  }

  #[test]
  fn double_click_emits_two_down_up_pulses() {
    let mut seq = ClickSequencer::default();
    seq.queue(2, 0);
    assert_eq!(seq.poll(0), SequencerOutput::ButtonDown);
    assert_eq!(seq.poll(10), SequencerOutput::ButtonUp);
    assert_eq!(seq.poll(20), SequencerOutput::Idle); // still in click_gap_ms
    assert_eq!(seq.poll(40), SequencerOutput::Idle); // gap elapsed, back to Idle
    assert_eq!(seq.poll(40), SequencerOutput::ButtonDown);
    assert_eq!(seq.poll(50), SequencerOutput::ButtonUp);
    assert_eq!(seq.poll(80), SequencerOutput::Idle);
    assert!(seq.is_idle());
  }

  #[test]
  fn sink_retry_discards_after_bound_exhausted() {
    let mut retry = SinkRetry::new(2);
    assert!(retry.record_failure());
    assert!(!retry.record_failure());
  }

  #[test]
  fn sink_retry_reset_restores_full_budget() {
    let mut retry = SinkRetry::new(5);
    retry.record_failure();
    retry.record_failure();
    retry.reset();
    // all 5 attempts should be available again, not just the 3 remaining
    // before reset.
    for _ in 0..4 {
      assert!(retry.record_failure());
    }
    assert!(!retry.record_failure());
  }
}
