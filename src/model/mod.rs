//! Static reference data underlying composition bookkeeping.
//!
//! Currently just the periodic table: [`element::Element`] with symbol,
//! name, atomic number, and molar mass lookups.

pub mod element;
