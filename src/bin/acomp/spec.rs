//! TOML alloy definition: the declarative registration surface of the CLI.
//!
//! ```toml
//! [[element]]
//! symbol = "Fe"
//! major = true
//!
//! [[element]]
//! symbol = "C"
//! interstitial = true
//! variable = true
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use alloy_comp::{Composition, CompositionBuilder, Element, ElementEntry};

#[derive(Debug, Deserialize)]
pub struct AlloySpec {
    #[serde(rename = "element")]
    pub elements: Vec<ElementSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementSpec {
    pub symbol: String,
    #[serde(default)]
    pub interstitial: bool,
    #[serde(default)]
    pub variable: bool,
    #[serde(default)]
    pub major: bool,
}

pub fn load(path: &Path) -> Result<Composition> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read alloy definition '{}'", path.display()))?;
    let spec: AlloySpec = toml::from_str(&text)
        .with_context(|| format!("failed to parse alloy definition '{}'", path.display()))?;
    build(&spec)
}

fn build(spec: &AlloySpec) -> Result<Composition> {
    let mut builder = CompositionBuilder::new();
    for el in &spec.elements {
        let element = Element::from_symbol(&el.symbol)
            .with_context(|| format!("unknown element in alloy definition: '{}'", el.symbol))?;
        let mut entry = ElementEntry::new(element);
        if el.interstitial {
            entry = entry.interstitial();
        }
        if el.variable {
            entry = entry.variable();
        }
        if el.major {
            entry = entry.major();
        }
        builder = builder.add(entry);
    }
    builder.build().context("invalid alloy definition")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_steel_definition() {
        let spec: AlloySpec = toml::from_str(
            r#"
            [[element]]
            symbol = "Fe"
            major = true

            [[element]]
            symbol = "c"
            interstitial = true
            variable = true

            [[element]]
            symbol = "Mn"
            "#,
        )
        .unwrap();
        let comp = build(&spec).unwrap();
        assert_eq!(comp.len(), 3);
        assert!(comp.get("Fe").unwrap().is_major());
        assert!(comp.get("C").unwrap().is_interstitial());
        assert!(!comp.get("Mn").unwrap().is_variable());
    }

    #[test]
    fn rejects_unknown_symbols() {
        let spec = AlloySpec {
            elements: vec![ElementSpec {
                symbol: "Xx".to_string(),
                interstitial: false,
                variable: false,
                major: false,
            }],
        };
        assert!(build(&spec).is_err());
    }
}
