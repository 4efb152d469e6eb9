//! [`Host`] capabilities over the arena document.

use crate::document::{DOMNode, DispatchedEvent, Document};
use crate::NodeKey;
use breakpoints::{Host, ModuleSelector, Signal, WidthBox};
use log::{trace, warn};

fn is_module(node: &DOMNode, selector: &ModuleSelector) -> bool {
    selector.matches(|name| node.attr(name).is_some(), |class| node.has_class(class))
}

impl Host for Document {
    type Node = NodeKey;

    fn find_matching(&self, selector: &ModuleSelector) -> Vec<NodeKey> {
        self.root
            .descendants(&self.dom)
            .skip(1)
            .filter_map(|id| self.dom.get(id))
            .map(|node| node.get())
            .filter(|node| is_module(node, selector))
            .map(|node| node.key)
            .collect()
    }

    fn count_matching_within(&self, node: NodeKey, selector: &ModuleSelector) -> usize {
        let Some(id) = self.id_of(node) else {
            return 0;
        };
        id.descendants(&self.dom)
            .skip(1)
            .filter_map(|child| self.dom.get(child))
            .filter(|child| is_module(child.get(), selector))
            .count()
    }

    fn measure_width(&self, node: NodeKey, sizing: WidthBox) -> f64 {
        self.node(node)
            .map_or(0.0, |element| element.metrics.width(sizing))
    }

    fn attribute(&self, node: NodeKey, name: &str) -> Option<String> {
        self.attr(node, name).map(str::to_owned)
    }

    fn set_attribute(&mut self, node: NodeKey, name: &str, value: &str) {
        match self.node_mut(node) {
            Some(element) => element.set_attr(name, value),
            None => warn!("set_attribute on detached node {node:?}"),
        }
    }

    fn remove_attribute(&mut self, node: NodeKey, name: &str) {
        if let Some(element) = self.node_mut(node) {
            element.remove_attr(name);
        }
    }

    fn has_class(&self, node: NodeKey, class: &str) -> bool {
        self.node(node).is_some_and(|element| element.has_class(class))
    }

    fn add_class(&mut self, node: NodeKey, class: &str) {
        match self.node_mut(node) {
            Some(element) => element.add_class(class),
            None => warn!("add_class on detached node {node:?}"),
        }
    }

    fn remove_class(&mut self, node: NodeKey, class: &str) {
        if let Some(element) = self.node_mut(node) {
            element.remove_class(class);
        }
    }

    fn has_fired(&self, signal: Signal) -> bool {
        self.signal_fired(signal)
    }

    fn subscribe(&mut self, signal: Signal) {
        if !self.subscriptions.contains(&signal) {
            self.subscriptions.push(signal);
        }
    }

    fn dispatch(&mut self, event: &str, modules: &[NodeKey]) {
        trace!("dispatch {event} with {} modules", modules.len());
        self.events.push(DispatchedEvent {
            name: event.to_owned(),
            nodes: modules.to_vec(),
        });
    }
}
