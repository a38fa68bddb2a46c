//! Mole, mass, and site fraction bookkeeping for multi-element alloy
//! compositions.
//!
//! An alloy is registered once as a fixed set of elements — one major
//! (solvent) element plus alloying elements classified as interstitial or
//! substitutional and as variable or fixed. Callers then set mole (atomic)
//! or mass (weight) fractions on individual elements and the crate keeps
//! the three representations consistent:
//!
//! - **X** — mole fraction over all elements
//! - **W** — mass fraction over all elements
//! - **U** — site fraction, normalized against the substitutional
//!   sublattice (interstitial elements are excluded from the normalizer)
//!
//! # Features
//!
//! - **Full conversion** — while unlocked, every update recomputes all
//!   fractions and the average molar mass from scratch
//! - **Locked incremental conversion** — [`Composition::lock`] freezes the
//!   site fractions of the fixed elements; subsequent updates only
//!   re-derive what changed, reusing cached fixed-element partial sums
//! - **Case-insensitive lookup** — elements are addressed by symbol;
//!   `"fe"`, `"Fe"`, and `"FE"` resolve to the same record
//! - **Text report** — [`report`] renders the composition as a fixed-width
//!   table
//!
//! # Quick Start
//!
//! ```
//! use alloy_comp::{Composition, Element, ElementEntry};
//!
//! // A simple steel: Fe solvent, interstitial C, substitutional Mn,
//! // both free to vary after locking.
//! let mut steel = Composition::builder()
//!     .add(ElementEntry::new(Element::Fe).major())
//!     .add(ElementEntry::new(Element::C).interstitial().variable())
//!     .add(ElementEntry::new(Element::Mn).variable())
//!     .build()?;
//!
//! steel.set_x("C", 0.005)?;
//! steel.set_x("Mn", 0.02)?;
//! steel.lock()?;
//!
//! // The major element takes the balance.
//! assert!((steel.x("Fe")? - 0.975).abs() < 1e-12);
//!
//! // Site fractions are normalized against the substitutional sublattice.
//! let norm = 1.0 - steel.x("C")?;
//! assert!((steel.u("Mn")? - 0.02 / norm).abs() < 1e-12);
//!
//! // While locked, fixed site fractions survive variable-element changes.
//! let u_c = steel.u("C")?;
//! steel.set_x("Mn", 0.03)?;
//! steel.update_fractions()?;
//! assert_eq!(steel.u("C")?, u_c);
//! # Ok::<(), alloy_comp::CompositionError>(())
//! ```
//!
//! # Module Organization
//!
//! - `model` — Periodic-table reference data ([`Element`])
//! - `comp` (re-exported at the root) — [`Composition`],
//!   [`CompositionBuilder`], [`ElementRecord`], and the conversion engine
//! - [`report`] — Fixed-width table rendering

mod comp;
mod model;

pub mod report;

pub use comp::{Composition, CompositionBuilder, ElementEntry, ElementRecord};
pub use comp::Error as CompositionError;
pub use model::element::{Element, ParseElementError};
