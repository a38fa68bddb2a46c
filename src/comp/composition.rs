//! The composition aggregate: owned element records, memoized category
//! views, and the lock/unlock lifecycle.

use std::ops::Index;

use super::classify::{classify, Categories};
use super::engine::{self, Scalars};
use super::error::Error;
use super::record::ElementRecord;
use crate::model::element::title_case;

/// A multi-element alloy composition with mole/mass/site fraction
/// bookkeeping.
///
/// The element set is fixed at construction (see
/// [`CompositionBuilder`](super::builder::CompositionBuilder)); afterwards
/// callers set mole or mass fractions on individual elements, call
/// [`update_fractions`](Composition::update_fractions), and read the
/// derived values back.
///
/// While unlocked (the initial state) every update is a full recompute.
/// [`lock`](Composition::lock) freezes the site fractions of the
/// non-variable elements and switches updates to an incremental pass that
/// only re-derives what changed; [`unlock`](Composition::unlock) reverses
/// this.
///
/// Category views are index sets into the owned record array, so a cloned
/// composition is immediately usable — the clone's views refer to the
/// clone's own records.
///
/// A `Composition` has no internal synchronization; mutate each instance
/// from a single thread.
#[derive(Debug, Clone)]
pub struct Composition {
    records: Vec<ElementRecord>,
    categories: Option<Categories>,
    locked: bool,
    scalars: Scalars,
}

impl Composition {
    pub(super) fn from_records(records: Vec<ElementRecord>) -> Self {
        Self {
            records,
            categories: None,
            locked: false,
            scalars: Scalars::default(),
        }
    }

    /// Starts a new [`CompositionBuilder`](super::builder::CompositionBuilder).
    pub fn builder() -> super::builder::CompositionBuilder {
        super::builder::CompositionBuilder::new()
    }

    /// Builds the category views if they are not built yet. Idempotent; a
    /// classification failure leaves them unset so a later call re-attempts.
    fn ensure_categories(&mut self) -> Result<(), Error> {
        if self.categories.is_none() {
            self.categories = Some(classify(&self.records)?);
        }
        Ok(())
    }

    /// Looks up an element record by symbol, case-insensitively.
    pub fn get(&self, symbol: &str) -> Result<&ElementRecord, Error> {
        let title = title_case(symbol);
        self.records
            .iter()
            .find(|rec| rec.symbol() == title)
            .ok_or(Error::UndefinedElement(title))
    }

    /// Mutable variant of [`get`](Composition::get). The returned record
    /// only exposes the guarded setters, so lock-state invariants hold.
    pub fn get_mut(&mut self, symbol: &str) -> Result<&mut ElementRecord, Error> {
        let title = title_case(symbol);
        self.records
            .iter_mut()
            .find(|rec| rec.symbol() == title)
            .ok_or(Error::UndefinedElement(title))
    }

    /// Sets the mole fraction of `symbol`.
    pub fn set_x(&mut self, symbol: &str, x: f64) -> Result<(), Error> {
        self.get_mut(symbol)?.set_x(x)
    }

    /// Sets the mass fraction of `symbol`.
    pub fn set_w(&mut self, symbol: &str, w: f64) -> Result<(), Error> {
        self.get_mut(symbol)?.set_w(w)
    }

    /// Mole fraction of `symbol`, as of the last update.
    pub fn x(&self, symbol: &str) -> Result<f64, Error> {
        Ok(self.get(symbol)?.x())
    }

    /// Mass fraction of `symbol`, as of the last update.
    pub fn w(&self, symbol: &str) -> Result<f64, Error> {
        Ok(self.get(symbol)?.w())
    }

    /// Site fraction of `symbol`, as of the last update.
    pub fn u(&self, symbol: &str) -> Result<f64, Error> {
        Ok(self.get(symbol)?.u())
    }

    /// Molar mass of `symbol`.
    pub fn molar_mass(&self, symbol: &str) -> Result<f64, Error> {
        Ok(self.get(symbol)?.molar_mass())
    }

    /// Average molar mass of the composition, as of the last update.
    /// Zero until the first successful update.
    #[inline]
    pub fn molar_mass_avg(&self) -> f64 {
        self.scalars.molar_mass_avg
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The major (solvent) element's record.
    pub fn major_element(&mut self) -> Result<&ElementRecord, Error> {
        self.ensure_categories()?;
        let idx = self.categories.as_ref().expect("categories just built").major;
        Ok(&self.records[idx])
    }

    /// Iterates over all defined elements in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ElementRecord> {
        self.records.iter()
    }

    /// Number of defined elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Locks the composition: runs one full update to seed the
    /// fixed-element caches, forbids further input on the fixed elements,
    /// and switches [`update_fractions`](Composition::update_fractions) to
    /// the incremental path. From here on the fixed elements keep their
    /// site fractions no matter how the variable elements move.
    pub fn lock(&mut self) -> Result<(), Error> {
        self.ensure_categories()?;
        let cats = self.categories.as_ref().expect("categories just built");

        engine::update_full(&mut self.records, cats, &mut self.scalars);

        for &i in &cats.fixed {
            self.records[i].is_allowed_to_vary = false;
        }
        for &i in &cats.alloying {
            self.records[i].is_composition_locked = true;
        }
        self.locked = true;
        Ok(())
    }

    /// Unlocks the composition, restoring input on every alloying element.
    /// The fixed-element caches become stale and are reseeded by the next
    /// [`lock`](Composition::lock).
    pub fn unlock(&mut self) -> Result<(), Error> {
        self.ensure_categories()?;
        let cats = self.categories.as_ref().expect("categories just built");

        for &i in &cats.alloying {
            self.records[i].is_allowed_to_vary = true;
            self.records[i].is_composition_locked = false;
        }
        self.locked = false;
        Ok(())
    }

    /// Re-derives all fractions from the user-supplied values: the full
    /// recompute while unlocked, the incremental fixed-site-fraction pass
    /// while locked. Fails softly (no mutation) when the element set has no
    /// resolvable major element.
    pub fn update_fractions(&mut self) -> Result<(), Error> {
        self.ensure_categories()?;
        let cats = self.categories.as_ref().expect("categories just built");

        if self.locked {
            engine::update_locked(&mut self.records, cats, &mut self.scalars);
        } else {
            engine::update_full(&mut self.records, cats, &mut self.scalars);
        }
        Ok(())
    }
}

/// Panicking symbol lookup, for contexts where an undefined element is a
/// programming error. Prefer [`Composition::get`] when the symbol comes
/// from user input.
impl Index<&str> for Composition {
    type Output = ElementRecord;

    fn index(&self, symbol: &str) -> &Self::Output {
        match self.get(symbol) {
            Ok(rec) => rec,
            Err(e) => panic!("{e}"),
        }
    }
}
