use crate::config::EngineConfig;

/// Classification of a panel coordinate into the region whose action
/// semantics govern it for the lifetime of a contact (spec §4.1, §4.3
/// "zone lock").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Zone {
  /// Pointer region: moves steer the cursor.
  Main,
  /// Right-edge vertical scroll strip.
  ScrollV,
  /// Bottom-edge horizontal scroll strip.
  ScrollH,
  /// Both strips apply (bottom-right corner).
  ScrollCorner,
}

impl Zone {
  pub const fn is_scroll(self) -> bool {
    matches!(self, Zone::ScrollV | Zone::ScrollH | Zone::ScrollCorner)
  }
}

/// Classify a panel coordinate using the panel geometry in `config`.
///
/// Boundary coordinates belong to the scroll zone (`>=`, not `>`). A zero
/// strip width/height disables that strip entirely, regardless of where
/// `x`/`y` land.
pub fn classify(x: u16, y: u16, config: &EngineConfig) -> Zone {
  let in_v = config.scroll_zone_w > 0 && x >= config.hres.saturating_sub(config.scroll_zone_w);
  let in_h = config.scroll_zone_h > 0 && y >= config.vres.saturating_sub(config.scroll_zone_h);

  match (in_v, in_h) {
    (true, true) => Zone::ScrollCorner,
    (true, false) => Zone::ScrollV,
    (false, true) => Zone::ScrollH,
    (false, false) => Zone::Main,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cfg() -> EngineConfig {
    EngineConfig::new(320, 240, 40, 40).unwrap()
  }

  #[test]
  fn main_zone_by_default() {
    assert_eq!(classify(100, 100, &cfg()), Zone::Main);
  }

  #[test]
  fn vertical_strip_boundary() {
    let c = cfg();
    // 320 - 40 = 280 is the first column inside the strip.
    assert_eq!(classify(280, 100, &c), Zone::ScrollV);
    assert_eq!(classify(279, 100, &c), Zone::Main);
  }

  #[test]
  fn horizontal_strip_boundary() {
    let c = cfg();
    // 240 - 40 = 200 is the first row inside the strip.
    assert_eq!(classify(100, 200, &c), Zone::ScrollH);
    assert_eq!(classify(100, 199, &c), Zone::Main);
  }

  #[test]
  fn corner_when_both_strips_apply() {
    let c = cfg();
    assert_eq!(classify(300, 220, &c), Zone::ScrollCorner);
  }

  #[test]
  fn zero_width_disables_vertical_strip() {
    let c = EngineConfig::new(320, 240, 0, 40).unwrap();
    assert_eq!(classify(319, 100, &c), Zone::Main);
  }

  #[test]
  fn zero_height_disables_horizontal_strip() {
    let c = EngineConfig::new(320, 240, 40, 0).unwrap();
    assert_eq!(classify(100, 239, &c), Zone::Main);
  }
}
