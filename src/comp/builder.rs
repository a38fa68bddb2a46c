//! Runtime registration of an alloy's element set.
//!
//! A composition's membership is fixed for its whole life, so registration
//! happens once through [`CompositionBuilder`]: one [`ElementEntry`] per
//! element carrying the (interstitial, variable, major) classification
//! flags. Defaults match the common case of a fixed substitutional
//! alloying element.

use super::composition::Composition;
use super::error::Error;
use super::record::ElementRecord;
use crate::model::element::Element;

/// One element registration: the element plus its classification flags.
///
/// Defaults: substitutional, fixed (not variable), not major.
#[derive(Debug, Clone, Copy)]
pub struct ElementEntry {
    element: Element,
    interstitial: bool,
    variable: bool,
    major: bool,
}

impl ElementEntry {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            interstitial: false,
            variable: false,
            major: false,
        }
    }

    /// Marks the element interstitial (default is substitutional).
    pub fn interstitial(mut self) -> Self {
        self.interstitial = true;
        self
    }

    /// Allows the element's composition to change even while the owning
    /// composition is locked.
    pub fn variable(mut self) -> Self {
        self.variable = true;
        self
    }

    /// Marks the element as the major (solvent) element. Exactly one entry
    /// per composition should carry this flag; violations surface as soft
    /// classification errors on first use, not at build time.
    pub fn major(mut self) -> Self {
        self.major = true;
        self
    }
}

/// Builder for a [`Composition`] with a fixed element set.
#[derive(Debug, Clone, Default)]
pub struct CompositionBuilder {
    entries: Vec<ElementEntry>,
}

impl CompositionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one element. Registration order is preserved for
    /// iteration and reporting.
    pub fn add(mut self, entry: ElementEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Builds the composition. Fails on duplicate elements; major-element
    /// cardinality is deliberately not checked here (see
    /// [`ElementEntry::major`]).
    pub fn build(self) -> Result<Composition, Error> {
        let mut records = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if records
                .iter()
                .any(|r: &ElementRecord| r.element() == entry.element)
            {
                return Err(Error::DuplicateElement(entry.element.symbol()));
            }
            records.push(ElementRecord::new(
                entry.element,
                entry.interstitial,
                entry.variable,
                entry.major,
            ));
        }
        Ok(Composition::from_records(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_default_to_fixed_substitutional() {
        let comp = CompositionBuilder::new()
            .add(ElementEntry::new(Element::Fe).major())
            .add(ElementEntry::new(Element::Al))
            .build()
            .unwrap();
        let al = comp.get("Al").unwrap();
        assert!(!al.is_interstitial());
        assert!(!al.is_variable());
        assert!(!al.is_major());
    }

    #[test]
    fn flags_are_applied() {
        let comp = CompositionBuilder::new()
            .add(ElementEntry::new(Element::Fe).major())
            .add(ElementEntry::new(Element::C).interstitial().variable())
            .build()
            .unwrap();
        let c = comp.get("C").unwrap();
        assert!(c.is_interstitial());
        assert!(c.is_variable());
        assert!(comp.get("Fe").unwrap().is_major());
    }

    #[test]
    fn duplicate_element_is_rejected() {
        let err = CompositionBuilder::new()
            .add(ElementEntry::new(Element::Fe).major())
            .add(ElementEntry::new(Element::Fe))
            .build()
            .unwrap_err();
        assert_eq!(err, Error::DuplicateElement("Fe"));
    }

    #[test]
    fn missing_major_still_builds() {
        // The single-major invariant is enforced at classification time,
        // not at build time.
        assert!(CompositionBuilder::new()
            .add(ElementEntry::new(Element::C).interstitial())
            .build()
            .is_ok());
    }
}
