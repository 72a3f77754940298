//! Event trait for messages dispatched through the state hierarchy.
//!
//! Events are plain values. A machine never keeps an event past the
//! `handle_event` call that delivered it, so callers may build a fresh
//! value per occurrence or reuse one between dispatches.

use std::fmt::Debug;

/// Trait for events processed by state machine states.
///
/// Implementations are normally closed enums with one variant per
/// occurrence kind. Handlers match on the variant directly; `kind` and
/// `label` exist for logging and for comparing occurrences.
///
/// # Example
///
/// ```rust
/// use zumo_hsm::core::Event;
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum ButtonEvent {
///     Pressed,
///     Released { held_ms: u32 },
/// }
///
/// impl Event for ButtonEvent {
///     fn kind(&self) -> u8 {
///         match self {
///             Self::Pressed => 0,
///             Self::Released { .. } => 1,
///         }
///     }
///
///     fn label(&self) -> &'static str {
///         match self {
///             Self::Pressed => "pressed",
///             Self::Released { .. } => "released",
///         }
///     }
/// }
///
/// let a = ButtonEvent::Released { held_ms: 10 };
/// let b = ButtonEvent::Released { held_ms: 900 };
/// assert!(a.same_kind(&b));
/// assert!(!a.same_kind(&ButtonEvent::Pressed));
/// ```
pub trait Event: Debug {
    /// Numeric tag, unique per event variant.
    fn kind(&self) -> u8;

    /// Short human-readable name for debugging.
    fn label(&self) -> &'static str;

    /// Two events describe the same kind of occurrence iff their tags match.
    fn same_kind(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.kind() == other.kind()
    }
}
