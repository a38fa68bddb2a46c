//! Per-element state within a composition.

use super::error::Error;
use crate::model::element::Element;

/// One element of an alloy composition: identity, molar mass,
/// classification flags, and the mole/mass/site fraction fields.
///
/// Records are created by the
/// [`CompositionBuilder`](super::builder::CompositionBuilder) and owned by a
/// [`Composition`](super::composition::Composition). Callers supply input
/// through the guarded [`set_x`](ElementRecord::set_x) /
/// [`set_w`](ElementRecord::set_w) setters; every derived field (`x`, `w`,
/// `u`) is written exclusively by the conversion engine during
/// `update_fractions`.
///
/// At most one of `user_x` / `user_w` is non-zero at any time: setting one
/// channel clears the other along with the derived site fraction.
#[derive(Debug, Clone)]
pub struct ElementRecord {
    element: Element,
    molar_mass: f64,
    is_major: bool,
    is_interstitial: bool,
    is_variable: bool,
    pub(super) is_allowed_to_vary: bool,
    pub(super) is_updated: bool,
    pub(super) is_composition_locked: bool,
    pub(super) user_x: f64,
    pub(super) user_w: f64,
    pub(super) x: f64,
    pub(super) w: f64,
    pub(super) u: f64,
}

impl ElementRecord {
    pub(super) fn new(element: Element, is_interstitial: bool, is_variable: bool, is_major: bool) -> Self {
        Self {
            element,
            molar_mass: element.molar_mass(),
            is_major,
            is_interstitial,
            is_variable,
            is_allowed_to_vary: true,
            is_updated: false,
            is_composition_locked: false,
            user_x: 0.0,
            user_w: 0.0,
            x: 0.0,
            w: 0.0,
            u: 0.0,
        }
    }

    /// Sets the mole (atomic) fraction.
    ///
    /// Clears the mass-fraction channel and marks the record dirty so the
    /// next `update_fractions` re-derives the dependent fields. Fails
    /// without mutating if this is the major element or if the record is
    /// currently not allowed to vary.
    pub fn set_x(&mut self, x: f64) -> Result<(), Error> {
        if self.is_major {
            tracing::error!(element = %self.element, "cannot set X of the major element");
            return Err(Error::MajorElementFraction(self.element.symbol()));
        }
        if !self.is_allowed_to_vary {
            tracing::error!(element = %self.element, "cannot set locked X composition");
            return Err(Error::ElementLocked(self.element.symbol()));
        }
        self.user_x = x;
        self.x = x;
        self.user_w = 0.0;
        self.w = 0.0;
        self.u = 0.0;
        self.is_updated = false;
        Ok(())
    }

    /// Sets the mass (weight) fraction.
    ///
    /// Same guards as [`set_x`](ElementRecord::set_x), plus one more:
    /// mass-fraction input is rejected while the owning composition is
    /// locked (mole-fraction input remains available).
    pub fn set_w(&mut self, w: f64) -> Result<(), Error> {
        if self.is_major {
            tracing::error!(element = %self.element, "cannot set W of the major element");
            return Err(Error::MajorElementFraction(self.element.symbol()));
        }
        if !self.is_allowed_to_vary {
            tracing::error!(element = %self.element, "cannot set locked W composition");
            return Err(Error::ElementLocked(self.element.symbol()));
        }
        if self.is_composition_locked {
            tracing::error!(
                element = %self.element,
                "setting mass fraction not supported while composition is locked; set X instead"
            );
            return Err(Error::LockedWeightInput(self.element.symbol()));
        }
        self.user_w = w;
        self.w = w;
        self.user_x = 0.0;
        self.x = 0.0;
        self.u = 0.0;
        self.is_updated = false;
        Ok(())
    }

    #[inline]
    pub fn element(&self) -> Element {
        self.element
    }

    #[inline]
    pub fn symbol(&self) -> &'static str {
        self.element.symbol()
    }

    #[inline]
    pub fn molar_mass(&self) -> f64 {
        self.molar_mass
    }

    /// Mole (atomic) fraction, as of the last `update_fractions`.
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Mass (weight) fraction, as of the last `update_fractions`.
    #[inline]
    pub fn w(&self) -> f64 {
        self.w
    }

    /// Site fraction on the substitutional sublattice, as of the last
    /// `update_fractions`.
    #[inline]
    pub fn u(&self) -> f64 {
        self.u
    }

    #[inline]
    pub fn is_major(&self) -> bool {
        self.is_major
    }

    #[inline]
    pub fn is_interstitial(&self) -> bool {
        self.is_interstitial
    }

    /// Whether this element may change composition even while the owning
    /// composition is locked.
    #[inline]
    pub fn is_variable(&self) -> bool {
        self.is_variable
    }

    /// Whether the setters currently accept input.
    #[inline]
    pub fn is_allowed_to_vary(&self) -> bool {
        self.is_allowed_to_vary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_x_clears_weight_channel() {
        let mut rec = ElementRecord::new(Element::C, true, true, false);
        rec.set_w(0.01).unwrap();
        rec.set_x(0.005).unwrap();
        assert_eq!(rec.user_x, 0.005);
        assert_eq!(rec.x(), 0.005);
        assert_eq!(rec.user_w, 0.0);
        assert_eq!(rec.w(), 0.0);
        assert_eq!(rec.u(), 0.0);
        assert!(!rec.is_updated);
    }

    #[test]
    fn set_w_clears_mole_channel() {
        let mut rec = ElementRecord::new(Element::Mn, false, true, false);
        rec.set_x(0.02).unwrap();
        rec.set_w(0.015).unwrap();
        assert_eq!(rec.user_w, 0.015);
        assert_eq!(rec.w(), 0.015);
        assert_eq!(rec.user_x, 0.0);
        assert_eq!(rec.x(), 0.0);
    }

    #[test]
    fn major_element_rejects_both_setters() {
        let mut rec = ElementRecord::new(Element::Fe, false, false, true);
        assert_eq!(
            rec.set_x(0.9),
            Err(Error::MajorElementFraction("Fe"))
        );
        assert_eq!(
            rec.set_w(0.9),
            Err(Error::MajorElementFraction("Fe"))
        );
        assert_eq!(rec.x(), 0.0);
        assert_eq!(rec.w(), 0.0);
    }

    #[test]
    fn disallowed_record_rejects_setters_without_mutation() {
        let mut rec = ElementRecord::new(Element::Cr, false, false, false);
        rec.set_x(0.03).unwrap();
        rec.is_allowed_to_vary = false;
        assert_eq!(rec.set_x(0.05), Err(Error::ElementLocked("Cr")));
        assert_eq!(rec.set_w(0.05), Err(Error::ElementLocked("Cr")));
        assert_eq!(rec.user_x, 0.03);
    }

    #[test]
    fn locked_composition_rejects_weight_input_only() {
        let mut rec = ElementRecord::new(Element::C, true, true, false);
        rec.is_composition_locked = true;
        assert_eq!(rec.set_w(0.01), Err(Error::LockedWeightInput("C")));
        rec.set_x(0.005).unwrap();
        assert_eq!(rec.user_x, 0.005);
    }

    #[test]
    fn molar_mass_comes_from_periodic_table() {
        let rec = ElementRecord::new(Element::Fe, false, false, true);
        assert_eq!(rec.molar_mass(), Element::Fe.molar_mass());
        assert_eq!(rec.symbol(), "Fe");
    }
}
