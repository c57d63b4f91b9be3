//! Click-sequencer example: draining a `Click{n}` action into simulated HID
//! button reports.
#![allow(unused)]
use trackpad_gesture_engine::{Action, ClickSequencer, SequencerOutput, SinkRetry};

#[allow(dead_code)]
fn drain_clicks(action: Action, now_ms: u64) {
  let Action::Click { n } = action else { return };

  let mut sequencer = ClickSequencer::default();
  sequencer.queue(n, now_ms);
  let mut retry = SinkRetry::default();

  let mut t = now_ms;
  while !sequencer.is_idle() {
    match sequencer.poll(t) {
      SequencerOutput::ButtonDown => send_to_hid(true, &mut retry),
      SequencerOutput::ButtonUp => send_to_hid(false, &mut retry),
      SequencerOutput::Idle => {}
    }
    t += 1;
  }
}

#[allow(dead_code)]
fn send_to_hid(pressed: bool, retry: &mut SinkRetry) {
  let sent = true; // simulated sink; always succeeds here
  if !sent && !retry.record_failure() {
    // report discarded after the bounded retry budget is exhausted
  }
}

fn main() {}
