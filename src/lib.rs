#![no_std]
//! A pure, framework-independent state machine that converts raw
//! capacitive-touch samples into high-level pointing-device actions:
//! move, click, multi-click, scroll and drag.
//!
//! The engine owns no I/O, no clock, and no heap allocation beyond its own
//! fixed-size state. A host polling loop feeds it samples through
//! [`GestureEngine::process_input`] and drives time-based transitions
//! through [`GestureEngine::tick`]; actions it returns are translated into
//! HID reports by the host, optionally via [`ClickSequencer`] for
//! multi-click runs.

mod action;
mod config;
mod error;
mod geometry;
mod gesture;
mod mathf;
mod sequencer;
mod signal;
mod zone;

pub use action::Action;
pub use config::{EngineConfig, Tuning};
pub use error::ConfigError;
pub use geometry::Point;
pub use gesture::{GestureEngine, Phase, TouchEvent};
pub use sequencer::{ClickSequencer, SequencerOutput, SequencerPhase, SinkRetry};
pub use zone::Zone;
