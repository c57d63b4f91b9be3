//! The gesture state machine (spec §4.3): the 45% piece that turns raw touch
//! samples into tap/drag/scroll/move intent.

use crate::action::{clamp_delta, Action};
use crate::config::{EngineConfig, Tuning};
use crate::error::ConfigError;
use crate::geometry::Point;
use crate::gesture::event::TouchEvent;
use crate::gesture::state::{EngineState, Phase};
use crate::mathf::sqrtf;
use crate::signal::{accelerate, accumulate, dead_zone, ewma, instantaneous_velocity, is_jitter};
use crate::zone::{classify, Zone};

/// Outcome of classifying a completed touch against the tap-timing and
/// movement thresholds (spec §4.3 "Tap classification").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TapResult {
  Tap,
  Bounce,
  Hold,
  Swipe,
}

fn classify_tap(duration_ms: u64, net_displacement: f32, tuning: &Tuning) -> TapResult {
  if duration_ms <= tuning.tap_min_ms {
    TapResult::Bounce
  } else if duration_ms >= tuning.tap_max_ms {
    TapResult::Hold
  } else if net_displacement >= tuning.tap_move_px {
    TapResult::Swipe
  } else {
    // The spec's jitter-allowance clause ("total_movement > 2*tap_move_px
    // while net_displacement < tap_move_px still taps") is already implied
    // here: we only reach this branch when net_displacement is below
    // threshold, regardless of how much total_movement accrued getting
    // there.
    TapResult::Tap
  }
}

/// Converts a stream of [`TouchEvent`] samples into pointing actions.
///
/// Owns immutable configuration plus one mutable [`EngineState`] value, per
/// spec §3's data model. Construction is the only fallible operation;
/// `process_input`, `tick` and `reset` are total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEngine {
  config: EngineConfig,
  tuning: Tuning,
  state: EngineState,
}

impl GestureEngine {
  pub fn new(config: EngineConfig, tuning: Tuning) -> Result<Self, ConfigError> {
    let tuning = tuning.validated()?;
    Ok(Self { config, tuning, state: EngineState::new() })
  }

  /// Current touch-lifecycle phase, for host-side status display.
  pub fn phase(&self) -> Phase {
    self.state.phase
  }

  /// Reset to a clean `Idle` state, preserving configuration (spec §5
  /// "Cancellation"). Idempotent.
  pub fn reset(&mut self) {
    self.state = EngineState::new();
  }

  /// Feed one raw touch sample (spec §6 "Sample ingestion").
  pub fn process_input(&mut self, event: TouchEvent, now_ms: u64) -> Option<Action> {
    let action = match event {
      TouchEvent::Pressed { x, y } => self.on_press(Point::new(x, y), now_ms),
      TouchEvent::Pressing { x, y } => self.on_move(Point::new(x, y), now_ms),
      TouchEvent::Released { x, y } => self.on_release(Point::new(x, y), now_ms),
    };
    debug_assert!(self.invariants_hold());
    action
  }

  /// Drive time-based transitions: multi-tap window expiry and hold-to-drag
  /// promotion (spec §4.3 "Tick semantics"). Consumes no spatial sample.
  pub fn tick(&mut self, now_ms: u64) -> Option<Action> {
    let action = if self.state.phase == Phase::WaitingForChain {
      if self.state.contact_down {
        self.tick_drag_hold(now_ms)
      } else {
        self.tick_window_expiry(now_ms)
      }
    } else {
      None
    };
    debug_assert!(self.invariants_hold());
    action
  }

  fn tick_drag_hold(&mut self, now_ms: u64) -> Option<Action> {
    let elapsed = now_ms.saturating_sub(self.state.touch_down_time);
    if elapsed >= self.tuning.drag_hold_ms {
      self.promote_to_drag()
    } else {
      None
    }
  }

  fn tick_window_expiry(&mut self, now_ms: u64) -> Option<Action> {
    let elapsed = now_ms.saturating_sub(self.state.last_release_time);
    if elapsed >= self.tuning.multi_tap_window_ms {
      let action = self.flush_chain();
      self.state.phase = Phase::Idle;
      action
    } else {
      None
    }
  }

  fn promote_to_drag(&mut self) -> Option<Action> {
    self.state.tap_count = 0;
    self.state.button_held = true;
    self.state.phase = Phase::Dragging;
    Some(Action::DragStart)
  }

  fn flush_chain(&mut self) -> Option<Action> {
    if self.state.tap_count > 0 {
      let n = self.state.tap_count;
      self.state.tap_count = 0;
      Some(Action::Click { n })
    } else {
      None
    }
  }

  // --- press dispatch -----------------------------------------------------

  fn on_press(&mut self, point: Point, now_ms: u64) -> Option<Action> {
    match self.state.phase {
      Phase::Idle => {
        let zone = classify(point.x, point.y, &self.config);
        self.state.begin_contact(point, now_ms, zone);
        self.state.phase = Phase::Down;
        None
      }
      Phase::WaitingForChain => {
        let zone = classify(point.x, point.y, &self.config);
        self.state.begin_contact(point, now_ms, zone);
        // still WaitingForChain: the new contact is the candidate for
        // chaining/drag promotion, not a fresh independent press.
        None
      }
      // A press while a contact is already recognised as down elsewhere
      // in the machine can't happen over a single-point contact stream;
      // ignored rather than panicking (spec §7 "total over well-typed
      // inputs").
      Phase::Down | Phase::Moving | Phase::Scrolling | Phase::Dragging => None,
    }
  }

  // --- move dispatch -------------------------------------------------------

  fn on_move(&mut self, point: Point, now_ms: u64) -> Option<Action> {
    match self.state.phase {
      Phase::Idle => None,
      Phase::Down => self.on_move_down(point, now_ms),
      Phase::Moving => self.pointer_delta(point, now_ms).map(|(dx, dy)| Action::Move { dx, dy }),
      Phase::Scrolling => self.handle_scrolling_move(point, now_ms),
      Phase::WaitingForChain => self.on_move_waiting(point, now_ms),
      Phase::Dragging => self.pointer_delta(point, now_ms).map(|(dx, dy)| Action::DragMove { dx, dy }),
    }
  }

  /// `Down`'s move handling decides *this sample* whether cumulative
  /// movement crosses the tap-movement threshold. If it does, the zone
  /// locked at press time (spec §4.3 "Zone lock") decides whether the
  /// contact becomes a pointer (`Moving`) or a scroll (`Scrolling`)
  /// contact, and this same sample is immediately run through that
  /// phase's conditioner rather than deferred — otherwise a contact that
  /// crosses the threshold on its only move before release would never
  /// produce the action a caller expects from it.
  fn on_move_down(&mut self, point: Point, now_ms: u64) -> Option<Action> {
    let dx_raw = point.x as f32 - self.state.last_pos.x as f32;
    let dy_raw = point.y as f32 - self.state.last_pos.y as f32;
    let prospective_total = self.state.total_movement + dx_raw.abs() + dy_raw.abs();

    if prospective_total >= self.tuning.tap_move_px {
      if self.state.chain_start_zone.is_scroll() {
        self.state.phase = Phase::Scrolling;
        self.handle_scrolling_move(point, now_ms)
      } else {
        self.state.phase = Phase::Moving;
        self.pointer_delta(point, now_ms).map(|(dx, dy)| Action::Move { dx, dy })
      }
    } else {
      self.state.total_movement = prospective_total;
      self.state.last_pos = point;
      self.state.last_sample_time = now_ms;
      None
    }
  }

  /// `WaitingForChain`'s move handling tracks the second, candidate
  /// contact. Crossing `drag_move_px` promotes eagerly; crossing the
  /// smaller `tap_move_px` flushes the pending chain and hands the
  /// contact to `Moving`/`Scrolling`, deferring that sample's own motion
  /// processing to the next one (its position is already recorded in
  /// `last_pos`, so nothing is lost).
  fn on_move_waiting(&mut self, point: Point, now_ms: u64) -> Option<Action> {
    let dx_raw = point.x as f32 - self.state.last_pos.x as f32;
    let dy_raw = point.y as f32 - self.state.last_pos.y as f32;
    self.state.total_movement += dx_raw.abs() + dy_raw.abs();
    self.state.last_pos = point;
    self.state.last_sample_time = now_ms;

    if self.state.total_movement >= self.tuning.drag_move_px {
      self.promote_to_drag()
    } else if self.state.total_movement >= self.tuning.tap_move_px {
      let zone = self.state.chain_start_zone;
      let action = self.flush_chain();
      self.state.phase = if zone.is_scroll() { Phase::Scrolling } else { Phase::Moving };
      action
    } else {
      None
    }
  }

  /// Shared conditioner pipeline for pointer-zone moves (`Moving` and
  /// `Dragging`): dead-zone, EWMA velocity, acceleration, sub-pixel
  /// accumulation (spec §4.2). Always updates `last_pos`/`last_sample_time`/
  /// `total_movement`; returns `None` on jitter or when the accumulated
  /// fraction hasn't crossed an integer boundary yet.
  fn pointer_delta(&mut self, point: Point, now_ms: u64) -> Option<(i8, i8)> {
    let (ax, ay) = self.condition_move(point, now_ms)?;
    let ex = accumulate(&mut self.state.accum_x, ax);
    let ey = accumulate(&mut self.state.accum_y, ay);
    if ex == 0 && ey == 0 {
      None
    } else {
      Some((clamp_delta(ex as f32), clamp_delta(ey as f32)))
    }
  }

  fn condition_move(&mut self, point: Point, now_ms: u64) -> Option<(f32, f32)> {
    let dt_ms = now_ms.saturating_sub(self.state.last_sample_time);
    let dx_raw = point.x as f32 - self.state.last_pos.x as f32;
    let dy_raw = point.y as f32 - self.state.last_pos.y as f32;

    self.state.total_movement += dx_raw.abs() + dy_raw.abs();
    self.state.last_pos = point;
    self.state.last_sample_time = now_ms;

    if is_jitter(dx_raw, dy_raw, self.tuning.jitter_px) {
      return None;
    }

    let dx = dead_zone(dx_raw, self.tuning.jitter_px);
    let dy = dead_zone(dy_raw, self.tuning.jitter_px);

    let vx_instant = instantaneous_velocity(dx, dt_ms);
    let vy_instant = instantaneous_velocity(dy, dt_ms);
    self.state.vx_smooth = ewma(self.state.vx_smooth, vx_instant, self.tuning.alpha);
    self.state.vy_smooth = ewma(self.state.vy_smooth, vy_instant, self.tuning.alpha);

    let speed = sqrtf(self.state.vx_smooth * self.state.vx_smooth + self.state.vy_smooth * self.state.vy_smooth);
    Some((accelerate(dx, speed, &self.tuning), accelerate(dy, speed, &self.tuning)))
  }

  /// `Scrolling`'s move handling (spec §4.3): accumulate into the
  /// accumulator(s) selected by the locked zone, scaled by
  /// `1 / scroll_sensitivity_px`, emitting at most one action per call. In
  /// `ScrollCorner` both accumulators are always extracted from this
  /// sample, keeping both within invariant 5's `(-1, 1)` bound regardless
  /// of which axis wins; if vertical wins the call, horizontal's
  /// already-extracted integer is simply not turned into an action this
  /// call (spec §4.4 "at most one action per call, defer the second") —
  /// it is not pushed back onto the accumulator, which would push it back
  /// out of bounds.
  fn handle_scrolling_move(&mut self, point: Point, now_ms: u64) -> Option<Action> {
    let dx_raw = point.x as f32 - self.state.last_pos.x as f32;
    let dy_raw = point.y as f32 - self.state.last_pos.y as f32;
    self.state.total_movement += dx_raw.abs() + dy_raw.abs();
    self.state.last_pos = point;
    self.state.last_sample_time = now_ms;

    if is_jitter(dx_raw, dy_raw, self.tuning.jitter_px) {
      return None;
    }

    let dx = dead_zone(dx_raw, self.tuning.jitter_px);
    let dy = dead_zone(dy_raw, self.tuning.jitter_px);
    let sensitivity = self.tuning.scroll_sensitivity_px;

    match self.state.chain_start_zone {
      Zone::ScrollV => {
        let units = accumulate(&mut self.state.scroll_accum_v, dy / sensitivity);
        (units != 0).then(|| Action::ScrollV { units: clamp_delta(-(units as f32)) })
      }
      Zone::ScrollH => {
        let units = accumulate(&mut self.state.scroll_accum_h, dx / sensitivity);
        (units != 0).then(|| Action::ScrollH { units: clamp_delta(units as f32) })
      }
      Zone::ScrollCorner => {
        let v_units = accumulate(&mut self.state.scroll_accum_v, dy / sensitivity);
        let h_units = accumulate(&mut self.state.scroll_accum_h, dx / sensitivity);
        if v_units != 0 {
          Some(Action::ScrollV { units: clamp_delta(-(v_units as f32)) })
        } else if h_units != 0 {
          Some(Action::ScrollH { units: clamp_delta(h_units as f32) })
        } else {
          None
        }
      }
      // Unreachable: `Scrolling` is only entered while `chain_start_zone`
      // is a scroll zone.
      Zone::Main => None,
    }
  }

  // --- release dispatch ----------------------------------------------------

  fn on_release(&mut self, point: Point, now_ms: u64) -> Option<Action> {
    match self.state.phase {
      Phase::Idle => None,
      Phase::Down => self.on_release_down(point, now_ms),
      Phase::Moving => self.on_release_moving(point, now_ms),
      Phase::Scrolling => self.on_release_scrolling(now_ms),
      Phase::WaitingForChain => self.on_release_waiting(point, now_ms),
      Phase::Dragging => self.on_release_dragging(now_ms),
    }
  }

  fn net_displacement(&self, point: Point) -> f32 {
    (point.x as i32 - self.state.touch_start.x as i32).unsigned_abs() as f32
      + (point.y as i32 - self.state.touch_start.y as i32).unsigned_abs() as f32
  }

  fn on_release_down(&mut self, point: Point, now_ms: u64) -> Option<Action> {
    self.state.last_pos = point;
    self.state.last_sample_time = now_ms;
    self.state.contact_down = false;

    let duration = now_ms.saturating_sub(self.state.touch_down_time);
    let net = self.net_displacement(point);

    match classify_tap(duration, net, &self.tuning) {
      TapResult::Tap => {
        self.state.tap_count += 1;
        self.state.last_release_time = now_ms;
        self.state.phase = Phase::WaitingForChain;
      }
      TapResult::Bounce | TapResult::Hold | TapResult::Swipe => {
        self.state.phase = Phase::Idle;
      }
    }
    None
  }

  fn on_release_moving(&mut self, point: Point, now_ms: u64) -> Option<Action> {
    self.state.last_pos = point;
    self.state.last_sample_time = now_ms;
    self.state.contact_down = false;
    self.state.phase = Phase::Idle;
    // tap_count is already 0 here: any pending chain was flushed at the
    // Down->Moving / WaitingForChain->Moving transition. Flushing again
    // is a no-op kept for symmetry and defence in depth.
    self.flush_chain()
  }

  fn on_release_scrolling(&mut self, now_ms: u64) -> Option<Action> {
    self.state.last_sample_time = now_ms;
    self.state.contact_down = false;
    self.state.phase = Phase::Idle;
    None
  }

  fn on_release_waiting(&mut self, point: Point, now_ms: u64) -> Option<Action> {
    self.state.last_pos = point;
    self.state.last_sample_time = now_ms;
    self.state.contact_down = false;

    let duration = now_ms.saturating_sub(self.state.touch_down_time);
    let net = self.net_displacement(point);

    match classify_tap(duration, net, &self.tuning) {
      TapResult::Tap => {
        self.state.tap_count += 1;
        self.state.last_release_time = now_ms;
        None
      }
      TapResult::Bounce | TapResult::Hold | TapResult::Swipe => {
        let action = self.flush_chain();
        self.state.phase = Phase::Idle;
        action
      }
    }
  }

  fn on_release_dragging(&mut self, now_ms: u64) -> Option<Action> {
    self.state.last_sample_time = now_ms;
    self.state.contact_down = false;
    self.state.button_held = false;
    self.state.phase = Phase::Idle;
    Some(Action::DragEnd)
  }

  /// Spec §3's seven invariants, checked in debug builds only.
  fn invariants_hold(&self) -> bool {
    let s = &self.state;
    (s.phase != Phase::Idle || (!s.button_held && s.tap_count == 0))
      && (!s.button_held || s.phase == Phase::Dragging)
      && (s.tap_count == 0 || s.phase == Phase::WaitingForChain)
      && s.accum_x > -1.0
      && s.accum_x < 1.0
      && s.accum_y > -1.0
      && s.accum_y < 1.0
      && s.scroll_accum_v > -1.0
      && s.scroll_accum_v < 1.0
      && s.scroll_accum_h > -1.0
      && s.scroll_accum_h < 1.0
  }
}
