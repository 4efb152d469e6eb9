//! Width-to-class mapping.

use crate::config::Config;
use crate::discovery::Module;
use crate::host::Host;
use log::trace;

/// Host mutations performed by one classification pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub modules: usize,
    pub added: usize,
    pub removed: usize,
}

impl PassSummary {
    /// True if the pass changed nothing on the page.
    pub fn is_quiet(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// Classify every module in registry order.
///
/// A class is present iff the measured width meets at least one threshold
/// that carries it. The
/// current-breakpoint attribute holds the largest threshold met and is
/// removed when none is. Classes and the attribute are only touched when they
/// differ from the wanted state, so repeated passes at a fixed width are
/// silent.
pub fn classify<H: Host>(host: &mut H, config: &Config, modules: &[Module<H::Node>]) -> PassSummary {
    let mut summary = PassSummary {
        modules: modules.len(),
        ..PassSummary::default()
    };

    for module in modules {
        let element = module.element;
        let width = host.measure_width(element, config.width_box);

        for (class, met) in module.breakpoints.wanted(width) {
            let present = host.has_class(element, class);
            if met && !present {
                host.add_class(element, class);
                summary.added += 1;
            } else if !met && present {
                host.remove_class(element, class);
                summary.removed += 1;
            }
        }

        let recorded = host.attribute(element, &config.current_prefix);
        match module.breakpoints.current(width) {
            Some(current) => {
                let value = current.to_string();
                if recorded.as_deref() != Some(value.as_str()) {
                    host.set_attribute(element, &config.current_prefix, &value);
                }
            }
            None => {
                if recorded.is_some() {
                    host.remove_attribute(element, &config.current_prefix);
                }
            }
        }

        trace!("classified {element:?} at {width}px");
    }

    if config.fire_events {
        let elements: Vec<H::Node> = modules.iter().map(|module| module.element).collect();
        host.dispatch(&config.event_name, &elements);
    }

    summary
}

/// Remove everything the engine put on the page for `modules`.
pub fn strip<H: Host>(host: &mut H, config: &Config, modules: &[Module<H::Node>]) {
    for module in modules {
        let element = module.element;
        host.remove_class(element, &config.ready_class);
        for class in module.breakpoints.classes() {
            host.remove_class(element, class);
        }
        host.remove_attribute(element, &config.current_prefix);
    }
}
