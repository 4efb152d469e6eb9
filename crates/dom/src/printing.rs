use core::fmt::{self, Debug, Formatter};

use crate::document::{DOMNode, Document, NodeKind};
use breakpoints::WidthBox;
use indextree::NodeId;
use serde_json::{Map, Value, json};

fn node_to_json(doc: &Document, id: NodeId) -> Value {
    let Some(node_ref) = doc.dom.get(id) else {
        return Value::Null;
    };
    let DOMNode {
        kind,
        attrs,
        metrics,
        ..
    } = node_ref.get();
    let children: Vec<Value> = id
        .children(&doc.dom)
        .map(|child| node_to_json(doc, child))
        .filter(|value| !value.is_null())
        .collect();
    match kind {
        NodeKind::Document => json!({ "type": "document", "children": children }),
        NodeKind::Element { tag } => {
            // Sorted for deterministic snapshots
            let mut pairs: Vec<&(String, String)> = attrs.iter().collect();
            pairs.sort_by(|left, right| left.0.cmp(&right.0));
            let mut attrs_obj = Map::new();
            for (name, value) in pairs {
                attrs_obj.insert(name.clone(), Value::String(value.clone()));
            }
            json!({
                "type": "element",
                "tag": tag.to_lowercase(),
                "attrs": Value::Object(attrs_obj),
                "width": metrics.width(WidthBox::Outer),
                "children": children,
            })
        }
    }
}

impl Document {
    /// Deterministic JSON form of the tree.
    ///
    /// - Document: `{ "type": "document", "children": [...] }`
    /// - Element: `{ "type": "element", "tag": "div", "attrs": {..}, "width": 0.0, "children": [...] }`
    pub fn to_json_value(&self) -> Value {
        node_to_json(self, self.root)
    }

    /// Pretty JSON string for snapshots and test failure messages.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.to_json_value()).unwrap_or_else(|_| String::from("{}"))
    }
}

impl Debug for Document {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        fn write_node(
            doc: &Document,
            id: NodeId,
            formatter: &mut Formatter<'_>,
            depth: usize,
        ) -> fmt::Result {
            let Some(node_ref) = doc.dom.get(id) else {
                return Ok(());
            };
            let node = node_ref.get();
            let indent = "  ".repeat(depth);
            match &node.kind {
                NodeKind::Document => writeln!(formatter, "{indent}#document")?,
                NodeKind::Element { tag } => {
                    write!(formatter, "{indent}<{tag}")?;
                    for (name, value) in node.attrs.iter() {
                        write!(formatter, " {name}={value:?}")?;
                    }
                    writeln!(formatter, "> {:?}", node.key)?;
                }
            }
            for child in id.children(&doc.dom) {
                write_node(doc, child, formatter, depth + 1)?;
            }
            Ok(())
        }

        write_node(self, self.root, formatter, 0)
    }
}
