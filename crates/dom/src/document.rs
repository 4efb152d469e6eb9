use crate::layout::BoxMetrics;
use crate::{DOMSubscriber, DOMUpdate, NodeKey};
use anyhow::{Error, anyhow};
use breakpoints::Signal;
use indextree::{Arena, Node, NodeId};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub enum NodeKind {
    #[default]
    Document,
    Element {
        tag: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DOMNode {
    pub key: NodeKey,
    pub kind: NodeKind,
    pub attrs: SmallVec<(String, String), 4>,
    pub metrics: BoxMetrics,
}

impl DOMNode {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr, _)| attr.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(slot) = self
            .attrs
            .iter_mut()
            .find(|(attr, _)| attr.eq_ignore_ascii_case(name))
        {
            value.clone_into(&mut slot.1);
        } else {
            self.attrs.push((name.to_ascii_lowercase(), value.to_owned()));
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(attr, _)| !attr.eq_ignore_ascii_case(name));
    }

    /// Class tokens in attribute order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|token| token == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut tokens: Vec<&str> = self.classes().collect();
        tokens.push(class);
        let joined = tokens.join(" ");
        self.set_attr("class", &joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let joined = self
            .classes()
            .filter(|token| *token != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr("class", &joined);
    }
}

/// An event emitted through the host by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedEvent {
    pub name: String,
    pub nodes: Vec<NodeKey>,
}

/// In-memory document tree built from [`DOMUpdate`] batches.
///
/// Besides the tree it records what a browser window would: which startup
/// signals have fired, which signals the engine subscribed to and the events
/// it dispatched.
///
/// Keys of removed nodes are retired and never bound again, so an engine
/// still holding one cannot end up pointing at a different element.
pub struct Document {
    pub(crate) dom: Arena<DOMNode>,
    pub(crate) root: NodeId,
    keys: HashMap<NodeKey, NodeId>,
    retired: HashSet<NodeKey>,
    fired: Vec<Signal>,
    pub(crate) subscriptions: Vec<Signal>,
    pub(crate) events: Vec<DispatchedEvent>,
}

impl Document {
    pub fn new() -> Self {
        let mut dom = Arena::new();
        let root = dom.new_node(DOMNode::default());
        let mut keys = HashMap::new();
        keys.insert(NodeKey::ROOT, root);
        Self {
            dom,
            root,
            keys,
            retired: HashSet::new(),
            fired: Vec::new(),
            subscriptions: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Apply a batch of updates in order, stopping at the first failure.
    ///
    /// # Errors
    /// Fails when an update references an unknown node or reuses a key.
    pub fn apply_batch(&mut self, batch: impl IntoIterator<Item = DOMUpdate>) -> Result<(), Error> {
        for update in batch {
            self.apply_update(update)?;
        }
        Ok(())
    }

    pub(crate) fn id_of(&self, key: NodeKey) -> Option<NodeId> {
        self.keys.get(&key).copied()
    }

    pub fn node(&self, key: NodeKey) -> Option<&DOMNode> {
        let id = self.id_of(key)?;
        self.dom.get(id).map(Node::get)
    }

    pub(crate) fn node_mut(&mut self, key: NodeKey) -> Option<&mut DOMNode> {
        let id = self.id_of(key)?;
        self.dom.get_mut(id).map(Node::get_mut)
    }

    pub fn attr(&self, key: NodeKey, name: &str) -> Option<&str> {
        self.node(key)?.attr(name)
    }

    /// Class tokens of `key`, empty for unknown nodes.
    pub fn classes(&self, key: NodeKey) -> Vec<&str> {
        self.node(key)
            .map(|node| node.classes().collect())
            .unwrap_or_default()
    }

    /// Element keys below the root in document order.
    pub fn elements(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.root
            .descendants(&self.dom)
            .skip(1)
            .filter_map(|id| self.dom.get(id))
            .map(|node| node.get().key)
    }

    /// Record a host signal.
    ///
    /// Startup signals are remembered so later `has_fired` checks see them.
    /// Returns true when the signal should be forwarded to a subscriber: the
    /// first firing of a subscribed startup signal, or any subscribed
    /// repeatable signal.
    pub fn fire(&mut self, signal: Signal) -> bool {
        let first = match signal {
            Signal::DocumentReady | Signal::WindowLoad => {
                let first = !self.fired.contains(&signal);
                if first {
                    self.fired.push(signal);
                }
                first
            }
            Signal::Resize | Signal::Reclassify => true,
        };
        first && self.subscriptions.contains(&signal)
    }

    pub fn signal_fired(&self, signal: Signal) -> bool {
        self.fired.contains(&signal)
    }

    pub fn subscriptions(&self) -> &[Signal] {
        &self.subscriptions
    }

    /// Events dispatched so far, oldest first.
    pub fn events(&self) -> &[DispatchedEvent] {
        &self.events
    }

    fn insert_element(
        &mut self,
        parent: NodeKey,
        key: NodeKey,
        tag: String,
        pos: usize,
    ) -> Result<(), Error> {
        if self.keys.contains_key(&key) {
            return Err(anyhow!("node {key:?} already exists"));
        }
        if self.retired.contains(&key) {
            return Err(anyhow!("node {key:?} was removed and cannot be reused"));
        }
        let parent_id = self
            .id_of(parent)
            .ok_or_else(|| anyhow!("unknown parent {parent:?} for {key:?}"))?;
        let id = self.dom.new_node(DOMNode {
            key,
            kind: NodeKind::Element { tag },
            ..DOMNode::default()
        });
        let sibling = parent_id.children(&self.dom).nth(pos);
        let inserted = match sibling {
            Some(sibling) => sibling.checked_insert_before(id, &mut self.dom),
            None => parent_id.checked_append(id, &mut self.dom),
        };
        inserted.map_err(|err| anyhow!("cannot insert {key:?} under {parent:?}: {err:?}"))?;
        self.keys.insert(key, id);
        Ok(())
    }

    fn remove_node(&mut self, key: NodeKey) -> Result<(), Error> {
        if key == NodeKey::ROOT {
            return Err(anyhow!("the document root cannot be removed"));
        }
        let id = self
            .id_of(key)
            .ok_or_else(|| anyhow!("unknown node {key:?}"))?;
        let removed: Vec<NodeKey> = id
            .descendants(&self.dom)
            .filter_map(|child| self.dom.get(child))
            .map(|node| node.get().key)
            .collect();
        id.remove_subtree(&mut self.dom);
        for gone in removed {
            self.keys.remove(&gone);
            self.retired.insert(gone);
        }
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl DOMSubscriber for Document {
    fn apply_update(&mut self, update: DOMUpdate) -> Result<(), Error> {
        match update {
            DOMUpdate::InsertElement {
                parent,
                node,
                tag,
                pos,
            } => self.insert_element(parent, node, tag, pos),
            DOMUpdate::SetAttr { node, name, value } => {
                self.node_mut(node)
                    .ok_or_else(|| anyhow!("SetAttr on unknown node {node:?}"))?
                    .set_attr(&name, &value);
                Ok(())
            }
            DOMUpdate::RemoveAttr { node, name } => {
                self.node_mut(node)
                    .ok_or_else(|| anyhow!("RemoveAttr on unknown node {node:?}"))?
                    .remove_attr(&name);
                Ok(())
            }
            DOMUpdate::SetMetrics { node, metrics } => {
                self.node_mut(node)
                    .ok_or_else(|| anyhow!("SetMetrics on unknown node {node:?}"))?
                    .metrics = metrics;
                Ok(())
            }
            DOMUpdate::RemoveNode { node } => self.remove_node(node),
            DOMUpdate::EndOfDocument => {
                self.fire(Signal::DocumentReady);
                Ok(())
            }
        }
    }
}
