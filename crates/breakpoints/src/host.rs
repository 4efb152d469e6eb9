//! Capabilities the engine needs from its document host.
//!
//! The engine never touches a concrete DOM. Everything it reads or writes goes
//! through [`Host`], so a browser binding, a layout engine or the in-memory
//! arena document can all drive the same classification logic.

use core::fmt::{self, Debug, Display, Formatter};
use serde::Deserialize;

/// Which box edge a width measurement includes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WidthBox {
    /// Content box only.
    Content,
    /// Content plus padding.
    Inner,
    /// Content, padding and border.
    #[default]
    Outer,
    /// Content, padding, border and margin.
    OuterWithMargin,
}

/// Signals delivered by the host to [`crate::Engine::handle_signal`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The document structure is ready (DOMContentLoaded).
    DocumentReady,
    /// The window and all subresources finished loading.
    WindowLoad,
    /// The viewport was resized. Hosts may debounce before delivering.
    Resize,
    /// An out-of-band request to re-run classification.
    Reclassify,
}

/// Matches elements that carry the breakpoint attribute or the module class.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModuleSelector {
    /// Attribute name whose presence marks a module.
    pub attribute: String,
    /// Class token whose presence marks a module.
    pub class: String,
}

impl ModuleSelector {
    /// Build a selector from an attribute name and a class token.
    pub fn new(attribute: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            class: class.into(),
        }
    }

    /// True if an element carries the selector's attribute or class.
    ///
    /// `has_attribute` and `has_class` answer for the element being tested.
    pub fn matches(
        &self,
        has_attribute: impl FnOnce(&str) -> bool,
        has_class: impl FnOnce(&str) -> bool,
    ) -> bool {
        has_attribute(&self.attribute) || has_class(&self.class)
    }
}

impl Display for ModuleSelector {
    /// Renders the equivalent CSS selector list, e.g. `[data-js-bp], .js-bp`.
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "[{}], .{}", self.attribute, self.class)
    }
}

/// Document access used by discovery, classification and the lifecycle.
///
/// Implementations are expected to be cheap to call repeatedly; the engine
/// queries widths and class state once per module per pass.
pub trait Host {
    /// Non-owning element handle.
    type Node: Copy + Eq + Debug;

    /// All elements matching `selector`, in document order.
    fn find_matching(&self, selector: &ModuleSelector) -> Vec<Self::Node>;

    /// Number of elements matching `selector` strictly inside `node`'s subtree.
    fn count_matching_within(&self, node: Self::Node, selector: &ModuleSelector) -> usize;

    /// Rendered width of `node` in CSS pixels.
    fn measure_width(&self, node: Self::Node, sizing: WidthBox) -> f64;

    /// Attribute value, if present.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    fn remove_attribute(&mut self, node: Self::Node, name: &str);

    fn has_class(&self, node: Self::Node, class: &str) -> bool;

    fn add_class(&mut self, node: Self::Node, class: &str);

    fn remove_class(&mut self, node: Self::Node, class: &str);

    /// Whether a one-shot startup signal has already fired.
    ///
    /// Only [`Signal::DocumentReady`] and [`Signal::WindowLoad`] are ever asked.
    fn has_fired(&self, signal: Signal) -> bool;

    /// Ask the host to start delivering `signal` to the engine.
    fn subscribe(&mut self, signal: Signal);

    /// Emit a named event carrying the elements processed by a pass.
    fn dispatch(&mut self, event: &str, modules: &[Self::Node]);
}
