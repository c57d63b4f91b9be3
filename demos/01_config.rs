//! Minimal configuration example.
#![allow(unused)]
use trackpad_gesture_engine::{EngineConfig, GestureEngine, Tuning};

#[allow(dead_code)]
fn build() -> Result<GestureEngine, trackpad_gesture_engine::ConfigError> {
  let config = EngineConfig::new(320, 240, 40, 40)?;
  let tuning = Tuning::default()
    .with_jitter_px(3.0)
    .with_acceleration(0.4, 2.5, 900.0, 1.8)
    .with_drag(150, 20.0);

  GestureEngine::new(config, tuning)
}

fn main() {}
