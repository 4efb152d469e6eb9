//! Module discovery: find module elements and resolve their breakpoint tables.

use crate::config::Config;
use crate::error::ModuleError;
use crate::host::Host;
use crate::table::BreakpointTable;
use log::{trace, warn};

/// Where a module's breakpoint table came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TableSource {
    /// Parsed from the element's own breakpoint attribute.
    Attribute,
    /// The engine-wide default table.
    Default,
    /// The attribute was malformed; the module has no breakpoints.
    Invalid,
}

/// One responsive element and the breakpoints that apply to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Module<N> {
    pub element: N,
    pub breakpoints: BreakpointTable,
    pub source: TableSource,
    /// Modules nested inside this one at discovery time.
    pub descendant_match_count: usize,
}

/// Modules in document order plus the overrides that were rejected.
#[derive(Debug)]
pub struct Discovery<N> {
    pub modules: Vec<Module<N>>,
    pub errors: Vec<ModuleError>,
}

/// Scan the document for modules.
///
/// Every matched element gets the ready class. A malformed override only
/// affects its own module, which is kept with an empty table so it still
/// takes part in ordering and teardown.
pub fn discover<H: Host>(host: &mut H, config: &Config) -> Discovery<H::Node> {
    let selector = config.selector();
    let elements = host.find_matching(&selector);
    let mut modules = Vec::with_capacity(elements.len());
    let mut errors = Vec::new();

    for (index, element) in elements.into_iter().enumerate() {
        let override_value = host
            .attribute(element, &config.prefix)
            .filter(|value| !value.is_empty());

        let (breakpoints, source) = match override_value {
            None => (config.bps.clone(), TableSource::Default),
            Some(value) => match BreakpointTable::from_json(&value) {
                Ok(table) => (table, TableSource::Attribute),
                Err(source) => {
                    let err = ModuleError {
                        index,
                        value,
                        source,
                    };
                    warn!("{err}");
                    errors.push(err);
                    (BreakpointTable::new(), TableSource::Invalid)
                }
            },
        };

        let descendant_match_count = host.count_matching_within(element, &selector);
        trace!(
            "discovered module #{index} {element:?}: {source:?} table with {} entries, {descendant_match_count} nested",
            breakpoints.len()
        );

        host.add_class(element, &config.ready_class);
        modules.push(Module {
            element,
            breakpoints,
            source,
            descendant_match_count,
        });
    }

    Discovery { modules, errors }
}
