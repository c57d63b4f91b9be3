use crate::ConfigError;

/// The full tuning constants table from spec §6, with defaults seeded
/// from the concrete scenarios in spec §8 (320x240 panel, 40px scroll
/// strips). Construct with [`Tuning::default`] and adjust with the
/// chainable `with_*` builders, mirroring the teacher's
/// `Trackpad`/`Gestures` builder style.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tuning {
  /// Per-axis dead-zone width in pixels; raw moves within this are
  /// swallowed by [`crate::signal`].
  pub jitter_px: f32,
  /// EWMA responsiveness in `(0, 1]`. Larger = more responsive.
  pub alpha: f32,
  /// Lower multiplier bound for cursor acceleration.
  pub accel_min: f32,
  /// Upper multiplier bound for cursor acceleration.
  pub accel_max: f32,
  /// Speed (px/s) at which acceleration approaches `accel_max`.
  pub accel_velocity_scale: f32,
  /// Shape (curvature) of the acceleration curve.
  pub accel_exponent: f32,
  /// Minimum touch duration, in ms, that still counts as a tap.
  pub tap_min_ms: u64,
  /// Maximum touch duration, in ms, that still counts as a tap.
  pub tap_max_ms: u64,
  /// Maximum net displacement, in pixels, for a touch to still count as
  /// a tap.
  pub tap_move_px: f32,
  /// Time window, in ms, within which successive taps chain.
  pub multi_tap_window_ms: u64,
  /// Hold time, in ms, after a tap that promotes the follow-up touch to
  /// a drag.
  pub drag_hold_ms: u64,
  /// Movement, in pixels, on the second touch that promotes to drag
  /// immediately.
  pub drag_move_px: f32,
  /// Pixels of finger travel that equal one scroll unit.
  pub scroll_sensitivity_px: f32,
}

impl Tuning {
  pub const fn new(
    jitter_px: f32,
    alpha: f32,
    accel_min: f32,
    accel_max: f32,
    accel_velocity_scale: f32,
    accel_exponent: f32,
    tap_min_ms: u64,
    tap_max_ms: u64,
    tap_move_px: f32,
    multi_tap_window_ms: u64,
    drag_hold_ms: u64,
    drag_move_px: f32,
    scroll_sensitivity_px: f32,
  ) -> Self {
    Self {
      jitter_px,
      alpha,
      accel_min,
      accel_max,
      accel_velocity_scale,
      accel_exponent,
      tap_min_ms,
      tap_max_ms,
      tap_move_px,
      multi_tap_window_ms,
      drag_hold_ms,
      drag_move_px,
      scroll_sensitivity_px,
    }
  }

  /// Validate `alpha ∈ (0, 1]` (spec §7 "Invalid configuration").
  pub fn validated(self) -> Result<Self, ConfigError> {
    if self.alpha <= 0.0 || self.alpha > 1.0 {
      return Err(ConfigError::AlphaOutOfRange);
    }
    Ok(self)
  }

  pub const fn with_jitter_px(mut self, jitter_px: f32) -> Self {
    self.jitter_px = jitter_px;
    self
  }

  pub const fn with_alpha(mut self, alpha: f32) -> Self {
    self.alpha = alpha;
    self
  }

  pub const fn with_acceleration(mut self, min: f32, max: f32, velocity_scale: f32, exponent: f32) -> Self {
    self.accel_min = min;
    self.accel_max = max;
    self.accel_velocity_scale = velocity_scale;
    self.accel_exponent = exponent;
    self
  }

  pub const fn with_tap_window(mut self, min_ms: u64, max_ms: u64, move_px: f32) -> Self {
    self.tap_min_ms = min_ms;
    self.tap_max_ms = max_ms;
    self.tap_move_px = move_px;
    self
  }

  pub const fn with_multi_tap_window(mut self, window_ms: u64) -> Self {
    self.multi_tap_window_ms = window_ms;
    self
  }

  pub const fn with_drag(mut self, hold_ms: u64, move_px: f32) -> Self {
    self.drag_hold_ms = hold_ms;
    self.drag_move_px = move_px;
    self
  }

  pub const fn with_scroll_sensitivity(mut self, sensitivity_px: f32) -> Self {
    self.scroll_sensitivity_px = sensitivity_px;
    self
  }
}

impl Default for Tuning {
  fn default() -> Self {
    Self::new(2.0, 0.35, 0.4, 2.2, 800.0, 1.6, 50, 150, 5.0, 300, 150, 20.0, 20.0)
  }
}
