//! Thin `libm` wrappers.
//!
//! `core::f32` has no `sqrt`/`powf` — those pull in a libm on every other
//! target. This crate stays `no_std` so it takes the dependency explicitly
//! instead of assuming `std` is linked in by some other part of the binary.

#[inline]
pub(crate) fn sqrtf(x: f32) -> f32 {
  libm::sqrtf(x)
}

#[inline]
pub(crate) fn powf(base: f32, exp: f32) -> f32 {
  libm::powf(base, exp)
}
