//! Partitioning of a composition's elements into category views.
//!
//! Categories are index sets into the composition's record array rather
//! than references, so they survive moves and clones of the owning
//! [`Composition`](super::composition::Composition). Within every union the
//! concatenation order is variable-then-fixed (and interstitial before
//! substitutional for the alloying union); iteration output depends on this
//! order, the arithmetic does not.

use super::error::Error;
use super::record::ElementRecord;

/// Index sets partitioning the element records of one composition.
#[derive(Debug, Clone)]
pub(super) struct Categories {
    /// Index of the single major element.
    pub major: usize,
    /// Every non-major element: interstitial union, then substitutional union.
    pub alloying: Vec<usize>,
    /// Variable interstitial, then fixed interstitial.
    pub interstitial: Vec<usize>,
    pub variable_interstitial: Vec<usize>,
    pub fixed_interstitial: Vec<usize>,
    /// Variable substitutional, then fixed substitutional.
    pub substitutional: Vec<usize>,
    pub variable_substitutional: Vec<usize>,
    pub fixed_substitutional: Vec<usize>,
    /// Variable interstitial, then variable substitutional.
    pub variable: Vec<usize>,
    /// Fixed interstitial, then fixed substitutional.
    pub fixed: Vec<usize>,
}

/// Buckets the records by (major, interstitial, variable) and derives the
/// union sets.
///
/// Exactly one record must be flagged major; zero or more than one is a
/// classification error, reported and returned without building any
/// category.
pub(super) fn classify(records: &[ElementRecord]) -> Result<Categories, Error> {
    let mut major: Option<usize> = None;
    let mut variable_interstitial = Vec::new();
    let mut fixed_interstitial = Vec::new();
    let mut variable_substitutional = Vec::new();
    let mut fixed_substitutional = Vec::new();

    for (idx, rec) in records.iter().enumerate() {
        if rec.is_major() {
            if let Some(first) = major {
                tracing::error!(
                    first = records[first].symbol(),
                    second = rec.symbol(),
                    "more than one major element defined"
                );
                return Err(Error::MultipleMajorElements {
                    first: records[first].symbol(),
                    second: rec.symbol(),
                });
            }
            major = Some(idx);
        } else if rec.is_interstitial() {
            if rec.is_variable() {
                variable_interstitial.push(idx);
            } else {
                fixed_interstitial.push(idx);
            }
        } else if rec.is_variable() {
            variable_substitutional.push(idx);
        } else {
            fixed_substitutional.push(idx);
        }
    }

    let major = major.ok_or_else(|| {
        tracing::error!("no major element defined");
        Error::NoMajorElement
    })?;

    let interstitial = concat(&variable_interstitial, &fixed_interstitial);
    let substitutional = concat(&variable_substitutional, &fixed_substitutional);
    let variable = concat(&variable_interstitial, &variable_substitutional);
    let fixed = concat(&fixed_interstitial, &fixed_substitutional);
    let alloying = concat(&interstitial, &substitutional);

    Ok(Categories {
        major,
        alloying,
        interstitial,
        variable_interstitial,
        fixed_interstitial,
        substitutional,
        variable_substitutional,
        fixed_substitutional,
        variable,
        fixed,
    })
}

fn concat(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out
}
