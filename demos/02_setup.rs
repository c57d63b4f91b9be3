//! Manual gesture-engine session example: drive `process_input`/`tick` from
//! a scripted sample trace, as a host polling loop would.
#![allow(unused)]
use trackpad_gesture_engine::{Action, EngineConfig, GestureEngine, TouchEvent, Tuning};

#[allow(dead_code)]
fn run_trace(mut dev: GestureEngine) {
  let trace = [
    (TouchEvent::Pressed { x: 100, y: 100 }, 0u64),
    (TouchEvent::Pressing { x: 130, y: 100 }, 10),
    (TouchEvent::Pressing { x: 160, y: 100 }, 20),
    (TouchEvent::Released { x: 160, y: 100 }, 30),
  ];

  for (event, now_ms) in trace {
    if let Some(action) = dev.process_input(event, now_ms) {
      handle(action);
    }
  }

  if let Some(action) = dev.tick(400) {
    handle(action);
  }
}

#[allow(dead_code)]
fn handle(action: Action) {
  match action {
    Action::Move { dx, dy } => {
      let _ = (dx, dy); // feed into a simulated HID relative-move report
    }
    Action::Click { n } => {
      let _ = n; // hand off to the click sequencer
    }
    Action::DragStart | Action::DragEnd => {}
    Action::DragMove { dx, dy } => {
      let _ = (dx, dy);
    }
    Action::ScrollV { units } | Action::ScrollH { units } => {
      let _ = units;
    }
  }
}

fn main() {}
