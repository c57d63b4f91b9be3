//! Jitter dead-zone, EWMA velocity smoothing, acceleration shaping and
//! sub-pixel accumulation (spec §4.2).

use crate::config::Tuning;
use crate::mathf::powf;

/// Apply the per-axis jitter dead-zone to a raw delta.
///
/// `|d| <= threshold` is swallowed to zero; otherwise the dead-zone width
/// is subtracted from the magnitude rather than passing `d` through
/// untouched, so motion just past the threshold doesn't jump.
pub fn dead_zone(d: f32, threshold: f32) -> f32 {
  if d.abs() <= threshold {
    0.0
  } else {
    d - threshold * d.signum()
  }
}

/// Whether both axes of a raw delta lie within the jitter threshold.
///
/// Short-circuits the rest of the conditioner: callers still update
/// `last_pos`/`last_sample_time` but skip the velocity update entirely.
pub fn is_jitter(dx: f32, dy: f32, threshold: f32) -> bool {
  dx.abs() <= threshold && dy.abs() <= threshold
}

/// Exponentially-weighted moving average: `v <- alpha*instant + (1-alpha)*prev`.
pub fn ewma(prev: f32, instant: f32, alpha: f32) -> f32 {
  alpha * instant + (1.0 - alpha) * prev
}

/// Instantaneous velocity (px/s) for a filtered delta over an elapsed
/// time in milliseconds, floored at 1ms to avoid division by zero.
pub fn instantaneous_velocity(delta: f32, dt_ms: u64) -> f32 {
  let dt_s = dt_ms.max(1) as f32 / 1000.0;
  delta / dt_s
}

/// Smooth-power acceleration multiplier `m(s) = m_min + (m_max - m_min) * min(s/scale, 1)^e`.
///
/// Monotonically non-decreasing in `s` by construction: `min(s/scale, 1)`
/// is non-decreasing in `s` and raising it to a positive power preserves
/// monotonicity.
pub fn accel_multiplier(speed: f32, tuning: &Tuning) -> f32 {
  let normalized = (speed / tuning.accel_velocity_scale).min(1.0).max(0.0);
  tuning.accel_min + (tuning.accel_max - tuning.accel_min) * powf(normalized, tuning.accel_exponent)
}

/// Apply acceleration shaping to a filtered delta. Sub-pixel deltas
/// (`|d| < 0.5`) pass through unmultiplied to avoid amplifying noise.
pub fn accelerate(delta: f32, speed: f32, tuning: &Tuning) -> f32 {
  if delta.abs() < 0.5 {
    delta
  } else {
    delta * accel_multiplier(speed, tuning)
  }
}

/// Accumulate `delta` into `accum`, emit the truncated integer part, and
/// subtract it back out so `accum` always ends in `(-1, 1)` (invariants
/// 4/5 in spec §3).
pub fn accumulate(accum: &mut f32, delta: f32) -> i32 {
  *accum += delta;
  let emitted = *accum as i32; // truncates toward zero
  *accum -= emitted as f32;
  emitted
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dead_zone_swallows_small_deltas() {
    assert_eq!(dead_zone(1.0, 2.0), 0.0);
    assert_eq!(dead_zone(-2.0, 2.0), 0.0);
  }

  #[test]
  fn dead_zone_subtracts_threshold_past_it() {
    assert_eq!(dead_zone(5.0, 2.0), 3.0);
    assert_eq!(dead_zone(-5.0, 2.0), -3.0);
  }

  #[test]
  fn jitter_requires_both_axes_within_threshold() {
    assert!(is_jitter(1.0, 1.0, 2.0));
    assert!(!is_jitter(3.0, 1.0, 2.0));
    assert!(!is_jitter(1.0, 3.0, 2.0));
  }

  #[test]
  fn ewma_moves_toward_instant() {
    let v = ewma(0.0, 10.0, 0.5);
    assert_eq!(v, 5.0);
  }

  #[test]
  fn velocity_floors_elapsed_time_at_one_ms() {
    let v = instantaneous_velocity(1.0, 0);
    assert_eq!(v, 1000.0);
  }

  #[test]
  fn accel_multiplier_is_monotonic_in_speed() {
    let tuning = Tuning::default();
    let m_low = accel_multiplier(10.0, &tuning);
    let m_mid = accel_multiplier(400.0, &tuning);
    let m_high = accel_multiplier(5000.0, &tuning);
    assert!(m_low <= m_mid);
    assert!(m_mid <= m_high);
    assert!(m_high <= tuning.accel_max + f32::EPSILON);
  }

  #[test]
  fn subpixel_deltas_bypass_multiplier() {
    let tuning = Tuning::default();
    assert_eq!(accelerate(0.3, 5000.0, &tuning), 0.3);
  }

  #[test]
  fn accumulate_preserves_fractional_remainder() {
    let mut accum = 0.0f32;
    assert_eq!(accumulate(&mut accum, 0.6), 0);
    assert!((accum - 0.6).abs() < 1e-6);
    assert_eq!(accumulate(&mut accum, 0.6), 1);
    assert!((accum - 0.2).abs() < 1e-6);
  }

  #[test]
  fn accumulate_truncates_toward_zero_for_negatives() {
    let mut accum = 0.0f32;
    assert_eq!(accumulate(&mut accum, -1.7), -1);
    assert!((accum - -0.7).abs() < 1e-6);
  }
}
