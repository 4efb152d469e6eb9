//! In-memory arena document for driving the breakpoint engine.
//!
//! The tree is built from [`DOMUpdate`] messages, the same shape a parser or a
//! mirrored browser DOM would stream. Element widths are not computed here;
//! the embedder supplies [`BoxMetrics`] per element through
//! [`DOMUpdate::SetMetrics`].

use anyhow::Result;

pub mod document;
pub mod host;
pub mod layout;
pub mod printing;

pub use document::{DOMNode, DispatchedEvent, Document, NodeKind};
pub use layout::BoxMetrics;

/// A 64-bit stable key for document nodes.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeKey(pub u64);

impl NodeKey {
    /// The document root key (always present).
    pub const ROOT: Self = Self(0);
}

/// A batchable update applied to a [`Document`].
#[derive(Debug, Clone)]
pub enum DOMUpdate {
    InsertElement {
        parent: NodeKey,
        node: NodeKey,
        tag: String,
        pos: usize,
    },
    SetAttr {
        node: NodeKey,
        name: String,
        value: String,
    },
    RemoveAttr {
        node: NodeKey,
        name: String,
    },
    /// Layout result for an element, as reported by whatever lays the page out.
    SetMetrics {
        node: NodeKey,
        metrics: BoxMetrics,
    },
    RemoveNode {
        node: NodeKey,
    },
    /// Parsing finished; the structural-ready signal fires.
    EndOfDocument,
}

/// A subscriber that receives [`DOMUpdate`] values and mirrors them into its own state.
pub trait DOMSubscriber {
    /// Apply a single update.
    ///
    /// # Errors
    /// Fails when the update cannot be applied to the current state.
    fn apply_update(&mut self, update: DOMUpdate) -> Result<()>;
}
