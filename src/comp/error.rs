//! Error types for composition bookkeeping.
//!
//! One enum covers every failure mode in the crate. All variants except
//! [`Error::UndefinedElement`] are soft: the operation that produced them
//! leaves the composition unchanged and the caller can simply re-issue a
//! corrected call. Undefined-element lookup is the one hard failure; the
//! panicking `Index` impl on `Composition` treats it as fatal, while
//! [`Composition::get`](crate::Composition::get) surfaces it as an `Err`.

use thiserror::Error;

/// Errors that can occur while registering, mutating, or converting a
/// composition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Symbol lookup failed: the element was never registered in this
    /// composition.
    #[error("element '{0}' is not defined in this composition")]
    UndefinedElement(String),

    /// The same element was registered twice.
    #[error("element '{0}' is defined more than once")]
    DuplicateElement(&'static str),

    /// Classification found no element flagged as major.
    #[error("no major element defined")]
    NoMajorElement,

    /// Classification found more than one element flagged as major.
    #[error("more than one major element defined ({first} and {second})")]
    MultipleMajorElements {
        /// Symbol of the first major element encountered.
        first: &'static str,
        /// Symbol of the offending second one.
        second: &'static str,
    },

    /// The major element's fractions are derived from the balance and can
    /// never be set directly.
    #[error("cannot set fraction of major element '{0}'; it is derived from the balance")]
    MajorElementFraction(&'static str),

    /// The element's fractions are locked (`is_allowed_to_vary` is false).
    #[error("cannot set fraction of locked element '{0}'")]
    ElementLocked(&'static str),

    /// Mass-fraction input is only supported while the composition is
    /// unlocked; mole-fraction input remains available.
    #[error(
        "setting mass fraction of '{0}' is not supported while the composition is locked; \
         set the mole fraction instead"
    )]
    LockedWeightInput(&'static str),
}
