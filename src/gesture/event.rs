/// A single raw touch sample handed to [`crate::GestureEngine::process_input`]
/// (spec §6 "Sample ingestion").
///
/// Coordinates are panel pixels, already rotated/mirrored by the host so the
/// axes match the [`crate::EngineConfig`] the engine was constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchEvent {
  /// A new contact touched down.
  Pressed { x: u16, y: u16 },
  /// An existing contact moved (or held position) while still down.
  Pressing { x: u16, y: u16 },
  /// The contact lifted off.
  Released { x: u16, y: u16 },
}
