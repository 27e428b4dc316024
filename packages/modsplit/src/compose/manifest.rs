//! Aggregator generation: declare every unit and re-export its symbols.

use std::collections::HashMap;

use crate::config::{exported_name, GLOB_EXPORT};
use crate::error::{Result, SplitError};
use crate::spec::{AggregatorSpec, UnitSpec};
use crate::types::Unit;

/// Check that no symbol is re-exported twice.
///
/// Glob exports are not checked; their contents are unknown here. Aliased
/// exports (`Foo as Bar`) are checked under the name they introduce.
///
/// # Errors
/// `SplitError::DuplicateReexport` naming the first repeated symbol.
pub fn validate_exports(units: &[UnitSpec]) -> Result<()> {
    let mut owners: HashMap<&str, &str> = HashMap::new();
    for unit in units {
        for symbol in &unit.exports {
            if symbol == GLOB_EXPORT {
                continue;
            }
            let name = exported_name(symbol);
            if let Some(first) = owners.insert(name, &unit.name) {
                tracing::debug!(
                    symbol = %name,
                    first = %first,
                    second = %unit.name,
                    "Symbol re-exported twice"
                );
                return Err(SplitError::DuplicateReexport(name.to_string()));
            }
        }
    }
    Ok(())
}

/// Render the re-export statement for one unit.
///
/// A unit without an explicit export list is re-exported with a glob.
fn reexport_line(unit: &UnitSpec) -> String {
    match unit.exports.as_slice() {
        [] => format!("pub use {}::{GLOB_EXPORT};", unit.name),
        [single] => format!("pub use {}::{single};", unit.name),
        many => format!("pub use {}::{{{}}};", unit.name, many.join(", ")),
    }
}

/// Generate the aggregator unit.
///
/// Layout: optional `//!` doc lines, one `mod` declaration per unit in
/// declared order, then one `pub use` per unit in the same order.
/// Callers run [`validate_exports`] first.
#[must_use]
pub fn generate(aggregator: &AggregatorSpec, units: &[UnitSpec]) -> Unit {
    let mut sections: Vec<String> = Vec::new();

    if !aggregator.doc.is_empty() {
        let doc = aggregator
            .doc
            .iter()
            .map(|line| {
                if line.is_empty() {
                    "//!".to_string()
                } else {
                    format!("//! {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(doc);
    }

    let prefix = aggregator
        .visibility
        .as_deref()
        .map(|v| format!("{} ", v.trim()))
        .unwrap_or_default();
    let declarations = units
        .iter()
        .map(|unit| format!("{prefix}mod {};", unit.name))
        .collect::<Vec<_>>();
    if !declarations.is_empty() {
        sections.push(declarations.join("\n"));
    }

    let reexports = units
        .iter()
        .map(|unit| {
            let mut lines = unit.export_attributes.clone();
            lines.push(reexport_line(unit));
            lines.join("\n")
        })
        .collect::<Vec<_>>();
    if !reexports.is_empty() {
        sections.push(reexports.join("\n"));
    }

    let mut body = sections.join("\n\n");
    body.push('\n');
    Unit::new(aggregator.name.clone(), body)
}
