//! Tabular text rendering of a composition.
//!
//! The layout is a compatibility surface: one row per element with a
//! positive mole fraction, columns for the atomic, weight, and site
//! fractions at six significant digits, fixed elements bracketed as
//! `>Sym<`, the major element marked with a trailing `*`, and a closing
//! average-molar-mass line.

use std::io::{self, Write};

use crate::comp::{Composition, Error};

/// Renders the composition table from already-computed fractions.
///
/// Call [`Composition::update_fractions`] (or use
/// [`print_table`](crate::Composition::print_table)) first if inputs have
/// changed since the last update.
pub fn render(comp: &Composition) -> String {
    let mut out = String::new();
    out.push_str("        | At. fraction (X) | Wt. fraction (W) | Site fraction (U)\n");
    out.push_str("  ------+------------------+------------------+-------------------\n");

    for rec in comp.iter() {
        if rec.x() <= 0.0 {
            continue;
        }
        let (prefix, suffix) = if rec.is_major() {
            (' ', '*')
        } else if rec.is_allowed_to_vary() {
            (' ', ' ')
        } else {
            ('>', '<')
        };
        out.push_str(&format!(
            "   {}{:>2}{} | {:>16} | {:>16} | {:>17}\n",
            prefix,
            rec.symbol(),
            suffix,
            sig6(rec.x()),
            sig6(rec.w()),
            sig6(rec.u()),
        ));
    }

    out.push_str(&format!(
        "  Average molar mass: {:>8}\n",
        sig6(comp.molar_mass_avg())
    ));
    out
}

/// Writes the rendered table to `out`.
pub fn write_table<W: Write>(comp: &Composition, out: &mut W) -> io::Result<()> {
    out.write_all(render(comp).as_bytes())
}

impl Composition {
    /// Refreshes the fractions and prints the composition table to stdout.
    /// Fails softly with no resolvable major element.
    pub fn print_table(&mut self) -> Result<(), Error> {
        self.update_fractions()?;
        print!("{}", render(self));
        Ok(())
    }
}

/// Formats with six significant digits, trailing zeros trimmed, switching
/// to scientific notation outside the `%g` decimal range.
fn sig6(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let exp = v.abs().log10().floor() as i32;
    if (-4..6).contains(&exp) {
        let decimals = (5 - exp).max(0) as usize;
        let s = format!("{:.*}", decimals, v);
        trim_zeros(&s)
    } else {
        let s = format!("{:.5e}", v);
        // Rust renders `1.23000e-7`; compact the mantissa.
        match s.split_once('e') {
            Some((mantissa, e)) => format!("{}e{}", trim_zeros(mantissa), e),
            None => s,
        }
    }
}

fn trim_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comp::ElementEntry;
    use crate::model::element::Element;

    #[test]
    fn sig6_decimal_range() {
        assert_eq!(sig6(0.0), "0");
        assert_eq!(sig6(0.975), "0.975");
        assert_eq!(sig6(0.005), "0.005");
        assert_eq!(sig6(55.845), "55.845");
        assert_eq!(sig6(1.0), "1");
        assert_eq!(sig6(0.0234567891), "0.0234568");
    }

    #[test]
    fn sig6_scientific_range() {
        assert_eq!(sig6(1.5e-7), "1.5e-7");
        assert_eq!(sig6(2.5e8), "2.5e8");
    }

    #[test]
    fn table_skips_zero_fraction_rows_and_marks_roles() {
        let mut comp = Composition::builder()
            .add(ElementEntry::new(Element::Fe).major())
            .add(ElementEntry::new(Element::C).interstitial().variable())
            .add(ElementEntry::new(Element::Cr))
            .add(ElementEntry::new(Element::Ni))
            .build()
            .unwrap();
        comp.set_x("C", 0.005).unwrap();
        comp.set_x("Cr", 0.03).unwrap();
        comp.lock().unwrap();

        let table = render(&comp);
        // Ni has x == 0 and is skipped.
        assert!(!table.contains("Ni"));
        // Major element is starred; the locked fixed element is bracketed.
        assert!(table.contains("Fe*"));
        assert!(table.contains(">Cr<"));
        // Variable element rendered without markers.
        assert!(table.contains(" C  |"));
        assert!(table.contains("Average molar mass:"));
    }

    #[test]
    fn table_layout_is_stable() {
        let mut comp = Composition::builder()
            .add(ElementEntry::new(Element::Fe).major())
            .add(ElementEntry::new(Element::Mn).variable())
            .build()
            .unwrap();
        comp.set_x("Mn", 0.02).unwrap();
        comp.update_fractions().unwrap();

        let table = render(&comp);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines[0],
            "        | At. fraction (X) | Wt. fraction (W) | Site fraction (U)"
        );
        assert_eq!(
            lines[1],
            "  ------+------------------+------------------+-------------------"
        );
        assert!(lines[2].starts_with("    Fe* |"));
        assert!(lines[3].starts_with("    Mn  |"));
        assert!(lines[4].starts_with("  Average molar mass:"));
    }
}
