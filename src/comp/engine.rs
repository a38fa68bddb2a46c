//! The two fraction-conversion algorithms.
//!
//! [`update_full`] is the from-scratch pass used while the composition is
//! unlocked; it is the reference computation and also seeds the partial-sum
//! caches. [`update_locked`] is the incremental pass used while locked: it
//! holds the site fractions of the fixed elements constant and reuses the
//! cached fixed-element contributions instead of re-deriving them.
//!
//! The caches in [`Scalars`] are only valid between a `lock()` (which runs
//! the full pass) and the next `unlock()`; [`update_locked`] must never run
//! without a prior full pass in the same locked episode.

use super::classify::Categories;
use super::record::ElementRecord;

/// Composition-wide scalars: the published average molar mass and the two
/// fixed-element partial sums consumed by the locked path.
#[derive(Debug, Clone, Default)]
pub(super) struct Scalars {
    pub molar_mass_avg: f64,
    pub molar_mass_avg_fixed_partial: f64,
    pub x_sum_substitutional_fixed_partial: f64,
}

/// Full recompute over the alloying elements (unlocked path).
///
/// Derives the average molar mass from the user-supplied fractions, assigns
/// the major element the balance, converts each alloying element between X
/// and W according to which channel the caller set, and normalizes site
/// fractions against the substitutional sublattice. Marks every element
/// clean and caches the fixed-element partial sums for the locked path.
pub(super) fn update_full(records: &mut [ElementRecord], cats: &Categories, scalars: &mut Scalars) {
    let m_major = records[cats.major].molar_mass();

    // Average molar mass: numerator collects the mole-fraction inputs,
    // denominator the mass-fraction inputs.
    let mut m_avg_num = m_major;
    let mut m_avg_den = 1.0;
    let mut x_sum = 0.0;
    let mut w_sum = 0.0;
    for &i in &cats.alloying {
        let rec = &records[i];
        x_sum += rec.user_x;
        m_avg_num -= (m_major - rec.molar_mass()) * rec.user_x;

        w_sum += rec.user_w / rec.molar_mass();
        m_avg_den += (m_major / rec.molar_mass() - 1.0) * rec.user_w;
    }

    scalars.molar_mass_avg = m_avg_num / m_avg_den;
    let x_major = 1.0 - x_sum - w_sum * scalars.molar_mass_avg;

    records[cats.major].x = x_major;
    records[cats.major].w = x_major * m_major / scalars.molar_mass_avg;

    // Complete the channel the caller did not set.
    for &i in &cats.alloying {
        let rec = &mut records[i];
        let conversion_factor = scalars.molar_mass_avg / rec.molar_mass();
        if rec.user_x > 0.0 {
            rec.w = rec.user_x / conversion_factor;
        } else if rec.user_w > 0.0 {
            rec.x = rec.user_w * conversion_factor;
        }
    }

    // Substitutional-sublattice normalizer for the site fractions.
    let mut x_sum_substitutional = 1.0;
    for &i in &cats.interstitial {
        x_sum_substitutional -= records[i].x;
    }

    records[cats.major].u = records[cats.major].x / x_sum_substitutional;
    records[cats.major].is_updated = true;

    for &i in &cats.variable {
        let rec = &mut records[i];
        rec.u = rec.x / x_sum_substitutional;
        rec.is_updated = true;
    }

    scalars.molar_mass_avg_fixed_partial = 0.0;
    for &i in &cats.fixed {
        let u = records[i].x / x_sum_substitutional;
        records[i].u = u;
        records[i].is_updated = true;
        scalars.molar_mass_avg_fixed_partial += u * (m_major - records[i].molar_mass());
    }

    scalars.x_sum_substitutional_fixed_partial = 1.0;
    for &i in &cats.fixed_interstitial {
        scalars.x_sum_substitutional_fixed_partial -= records[i].x;
    }
}

/// Incremental recompute with fixed site fractions (locked path).
///
/// Only the variable elements marked dirty since the last update
/// participate; if none are dirty the call is a no-op. The order here is
/// deliberate and matches the full pass's conventions: the interstitial
/// sweep runs before the substitutional one, and the `x`-from-`u` resync of
/// already-clean alloying elements only happens when an interstitial
/// element was dirty.
pub(super) fn update_locked(records: &mut [ElementRecord], cats: &Categories, scalars: &mut Scalars) {
    let m_major = records[cats.major].molar_mass();

    let mut x_m_sum_product = 0.0;
    let mut x_sum_substitutional = scalars.x_sum_substitutional_fixed_partial;
    let mut dirty_interstitial = 0usize;
    let mut dirty_substitutional = 0usize;

    // Variable interstitials always contribute through their mole fraction;
    // they also shrink the substitutional normalizer.
    for &i in &cats.variable_interstitial {
        let rec = &records[i];
        if !rec.is_updated {
            dirty_interstitial += 1;
        }
        x_sum_substitutional -= rec.x;
        x_m_sum_product += rec.x * (m_major - rec.molar_mass());
    }

    // Variable substitutionals contribute through x when dirty, through
    // their (stable) site fraction when clean.
    for &i in &cats.variable_substitutional {
        let rec = &records[i];
        if !rec.is_updated {
            x_m_sum_product += rec.x * (m_major - rec.molar_mass());
            dirty_substitutional += 1;
        } else {
            x_m_sum_product += x_sum_substitutional * rec.u * (m_major - rec.molar_mass());
        }
    }

    // Nothing changed since the last update.
    if dirty_interstitial + dirty_substitutional == 0 {
        return;
    }

    scalars.molar_mass_avg =
        m_major - x_m_sum_product - x_sum_substitutional * scalars.molar_mass_avg_fixed_partial;

    if dirty_interstitial > 0 {
        for &i in &cats.variable_interstitial {
            let rec = &mut records[i];
            if !rec.is_updated {
                rec.u = rec.x / x_sum_substitutional;
            }
        }
    }

    for &i in &cats.variable_substitutional {
        let rec = &mut records[i];
        if !rec.is_updated {
            rec.u = rec.x / x_sum_substitutional;
        }
    }

    let mut x_sum_alloying = 0.0;
    for &i in &cats.alloying {
        let rec = &mut records[i];
        if dirty_interstitial > 0 {
            if rec.is_updated {
                // The normalizer moved under this element; resync x from
                // its constant site fraction.
                rec.x = rec.u * x_sum_substitutional;
            } else {
                rec.is_updated = true;
            }
        }
        rec.w = rec.x * rec.molar_mass() / scalars.molar_mass_avg;
        x_sum_alloying += rec.x;
    }

    let major = &mut records[cats.major];
    major.x = 1.0 - x_sum_alloying;
    major.w = major.x * major.molar_mass() / scalars.molar_mass_avg;
    major.u = major.x / x_sum_substitutional;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comp::classify::classify;
    use crate::model::element::Element;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn fe_c_mn() -> Vec<ElementRecord> {
        vec![
            ElementRecord::new(Element::Fe, false, false, true),
            ElementRecord::new(Element::C, true, true, false),
            ElementRecord::new(Element::Mn, false, true, false),
        ]
    }

    #[test]
    fn full_pass_from_mole_fractions() {
        let mut records = fe_c_mn();
        let cats = classify(&records).unwrap();
        let mut scalars = Scalars::default();

        records[1].set_x(0.005).unwrap();
        records[2].set_x(0.02).unwrap();
        update_full(&mut records, &cats, &mut scalars);

        // Major element takes the balance.
        assert!(approx_eq(records[0].x(), 0.975, 1e-12));

        // Mole fractions over all elements sum to one.
        let x_total: f64 = records.iter().map(|r| r.x()).sum();
        assert!(approx_eq(x_total, 1.0, 1e-12));

        // Mass fractions sum to one as well.
        let w_total: f64 = records.iter().map(|r| r.w()).sum();
        assert!(approx_eq(w_total, 1.0, 1e-12));

        // Site fractions: interstitials are excluded from the normalizer.
        let x_sum_sub = 1.0 - records[1].x();
        assert!(approx_eq(records[1].u(), 0.005 / x_sum_sub, 1e-12));
        assert!(approx_eq(records[2].u(), 0.02 / x_sum_sub, 1e-12));
        assert!(approx_eq(records[0].u(), 0.975 / x_sum_sub, 1e-12));
    }

    #[test]
    fn full_pass_from_weight_fractions() {
        let mut records = fe_c_mn();
        let cats = classify(&records).unwrap();
        let mut scalars = Scalars::default();

        records[1].set_w(0.005).unwrap();
        records[2].set_w(0.02).unwrap();
        update_full(&mut records, &cats, &mut scalars);

        // Definition of the average molar mass: x_i = w_i * M_avg / M_i.
        let m_avg = scalars.molar_mass_avg;
        assert!(approx_eq(
            records[1].x(),
            0.005 * m_avg / Element::C.molar_mass(),
            1e-12
        ));
        assert!(approx_eq(
            records[2].x(),
            0.02 * m_avg / Element::Mn.molar_mass(),
            1e-12
        ));

        let x_total: f64 = records.iter().map(|r| r.x()).sum();
        assert!(approx_eq(x_total, 1.0, 1e-12));

        // M_avg is the mole-fraction-weighted mean of the molar masses.
        let weighted: f64 = records.iter().map(|r| r.x() * r.molar_mass()).sum();
        assert!(approx_eq(weighted, m_avg, 1e-9));
    }

    #[test]
    fn x_round_trips_through_w() {
        let mut records = fe_c_mn();
        let cats = classify(&records).unwrap();
        let mut scalars = Scalars::default();

        records[2].set_x(0.02).unwrap();
        update_full(&mut records, &cats, &mut scalars);

        let w = records[2].w();
        let back = w * scalars.molar_mass_avg / Element::Mn.molar_mass();
        assert!(approx_eq(back, 0.02, 1e-12));
    }

    #[test]
    fn full_pass_seeds_fixed_partial_caches() {
        let mut records = vec![
            ElementRecord::new(Element::Fe, false, false, true),
            ElementRecord::new(Element::C, true, true, false),
            ElementRecord::new(Element::N, true, false, false),
            ElementRecord::new(Element::Cr, false, false, false),
        ];
        let cats = classify(&records).unwrap();
        let mut scalars = Scalars::default();

        records[1].set_x(0.004).unwrap();
        records[2].set_x(0.001).unwrap();
        records[3].set_x(0.03).unwrap();
        update_full(&mut records, &cats, &mut scalars);

        let m_fe = Element::Fe.molar_mass();
        let expected_partial = records[2].u() * (m_fe - Element::N.molar_mass())
            + records[3].u() * (m_fe - Element::Cr.molar_mass());
        assert!(approx_eq(
            scalars.molar_mass_avg_fixed_partial,
            expected_partial,
            1e-12
        ));
        assert!(approx_eq(
            scalars.x_sum_substitutional_fixed_partial,
            1.0 - records[2].x(),
            1e-12
        ));
    }

    #[test]
    fn locked_pass_is_a_noop_when_all_clean() {
        let mut records = fe_c_mn();
        let cats = classify(&records).unwrap();
        let mut scalars = Scalars::default();

        records[1].set_x(0.005).unwrap();
        records[2].set_x(0.02).unwrap();
        update_full(&mut records, &cats, &mut scalars);

        let before: Vec<(f64, f64, f64)> =
            records.iter().map(|r| (r.x(), r.w(), r.u())).collect();
        let m_avg_before = scalars.molar_mass_avg;

        update_locked(&mut records, &cats, &mut scalars);

        let after: Vec<(f64, f64, f64)> =
            records.iter().map(|r| (r.x(), r.w(), r.u())).collect();
        assert_eq!(before, after);
        assert_eq!(scalars.molar_mass_avg, m_avg_before);
    }

    #[test]
    fn locked_pass_keeps_interstitial_site_fraction_invariant_under_substitutional_change() {
        let mut records = fe_c_mn();
        let cats = classify(&records).unwrap();
        let mut scalars = Scalars::default();

        records[1].set_x(0.005).unwrap();
        records[2].set_x(0.02).unwrap();
        update_full(&mut records, &cats, &mut scalars);

        let u_c = records[1].u();
        let x_fe = records[0].x();

        // A substitutional change leaves the interstitial untouched.
        records[2].set_x(0.03).unwrap();
        update_locked(&mut records, &cats, &mut scalars);

        assert_eq!(records[1].u(), u_c);
        assert!(records[0].x() < x_fe);
        let x_total: f64 = records.iter().map(|r| r.x()).sum();
        assert!(approx_eq(x_total, 1.0, 1e-12));
    }

    #[test]
    fn locked_pass_resyncs_x_after_interstitial_change() {
        let mut records = fe_c_mn();
        let cats = classify(&records).unwrap();
        let mut scalars = Scalars::default();

        records[1].set_x(0.005).unwrap();
        records[2].set_x(0.02).unwrap();
        update_full(&mut records, &cats, &mut scalars);

        let u_mn = records[2].u();

        // An interstitial change moves the substitutional normalizer; the
        // clean substitutional element keeps u and gets x resynced.
        records[1].set_x(0.01).unwrap();
        update_locked(&mut records, &cats, &mut scalars);

        assert_eq!(records[2].u(), u_mn);
        let x_sum_sub = 1.0 - records[1].x();
        assert!(approx_eq(records[2].x(), u_mn * x_sum_sub, 1e-12));
        let x_total: f64 = records.iter().map(|r| r.x()).sum();
        assert!(approx_eq(x_total, 1.0, 1e-12));
    }

    #[test]
    fn locked_pass_agrees_with_full_pass_on_substitutional_update() {
        // Substitutional-only alloy: the incremental path and a fresh full
        // pass must land on the same state.
        let mut records = vec![
            ElementRecord::new(Element::Fe, false, false, true),
            ElementRecord::new(Element::Mn, false, true, false),
            ElementRecord::new(Element::Ni, false, true, false),
        ];
        let cats = classify(&records).unwrap();
        let mut scalars = Scalars::default();

        records[1].set_x(0.02).unwrap();
        records[2].set_x(0.01).unwrap();
        update_full(&mut records, &cats, &mut scalars);

        records[1].set_x(0.04).unwrap();
        update_locked(&mut records, &cats, &mut scalars);

        let mut reference = vec![
            ElementRecord::new(Element::Fe, false, false, true),
            ElementRecord::new(Element::Mn, false, true, false),
            ElementRecord::new(Element::Ni, false, true, false),
        ];
        let ref_cats = classify(&reference).unwrap();
        let mut ref_scalars = Scalars::default();
        reference[1].set_x(0.04).unwrap();
        reference[2].set_x(0.01).unwrap();
        update_full(&mut reference, &ref_cats, &mut ref_scalars);

        for (a, b) in records.iter().zip(reference.iter()) {
            assert!(approx_eq(a.x(), b.x(), 1e-12));
            assert!(approx_eq(a.w(), b.w(), 1e-12));
            assert!(approx_eq(a.u(), b.u(), 1e-12));
        }
        assert!(approx_eq(scalars.molar_mass_avg, ref_scalars.molar_mass_avg, 1e-12));
    }
}
