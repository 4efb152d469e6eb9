#![allow(dead_code, reason = "Helpers are shared between test binaries")]

use breakpoints::{Engine, InitOn, Options, Signal};
use dom::{BoxMetrics, DOMUpdate, Document, NodeKey};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn element(parent: NodeKey, node: NodeKey) -> DOMUpdate {
    DOMUpdate::InsertElement {
        parent,
        node,
        tag: "div".into(),
        pos: usize::MAX,
    }
}

pub fn attr(node: NodeKey, name: &str, value: &str) -> DOMUpdate {
    DOMUpdate::SetAttr {
        node,
        name: name.into(),
        value: value.into(),
    }
}

pub fn width(node: NodeKey, px: f64) -> DOMUpdate {
    DOMUpdate::SetMetrics {
        node,
        metrics: BoxMetrics::content(px),
    }
}

/// Options that start the engine inside `init`.
pub fn immediate() -> Options {
    Options {
        init_on: Some(InitOn::Immediate),
        ..Options::default()
    }
}

/// Fire `signal` on the document and forward it to the engine when subscribed.
pub fn fire(doc: &mut Document, engine: &mut Engine<Document>, signal: Signal) -> bool {
    let forwarded = doc.fire(signal);
    if forwarded {
        engine.handle_signal(doc, signal);
    }
    forwarded
}

/// Change a module's width and deliver a resize.
pub fn resize(
    doc: &mut Document,
    engine: &mut Engine<Document>,
    node: NodeKey,
    px: f64,
) -> anyhow::Result<()> {
    doc.apply_batch([width(node, px)])?;
    fire(doc, engine, Signal::Resize);
    Ok(())
}

pub fn has(doc: &Document, node: NodeKey, class: &str) -> bool {
    doc.classes(node).contains(&class)
}

/// Breakpoint classes on `node`, i.e. every class except the ready marker and `js-bp`.
pub fn bp_classes(doc: &Document, node: NodeKey) -> Vec<String> {
    doc.classes(node)
        .into_iter()
        .filter(|class| *class != "js-bp" && *class != "js-bp-ready")
        .map(str::to_owned)
        .collect()
}
