//! SIRI XML → tree conversion.
//!
//! SIRI producers publish the same VehicleMonitoring document as JSON or as
//! XML. The XML form is folded into the same [`serde_json::Value`] tree the
//! JSON decoder produces so that a single navigation path serves both:
//!
//! - elements are keyed by their local name (`siri:VehicleActivity` →
//!   `VehicleActivity`)
//! - an element with child elements becomes an object
//! - a leaf element becomes a string, or `null` when it has no text
//! - repeated sibling elements become an array
//! - attributes, comments and processing instructions are dropped

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};

use super::error::FetchError;

/// An element whose closing tag has not been seen yet.
#[derive(Default)]
struct OpenElement {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl OpenElement {
    fn named(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    fn into_value(self) -> Value {
        if !self.children.is_empty() {
            Value::Object(self.children)
        } else {
            let text = self.text.trim();
            if text.is_empty() {
                Value::Null
            } else {
                Value::String(text.to_string())
            }
        }
    }

    fn insert_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }
}

fn local_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// Parse an XML document into a tree rooted at an object holding the
/// document element (`{"Siri": {...}}`).
pub fn parse_document(bytes: &[u8]) -> Result<Value, FetchError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    // The bottom of the stack is a synthetic document node.
    let mut stack = vec![OpenElement::default()];
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            FetchError::XmlError(format!("{} at byte {}", e, reader.buffer_position()))
        })?;

        match event {
            Event::Start(e) => {
                stack.push(OpenElement::named(local_name(e.local_name().as_ref())));
            }
            Event::Empty(e) => {
                let name = local_name(e.local_name().as_ref());
                if let Some(parent) = stack.last_mut() {
                    parent.insert_child(name, Value::Null);
                }
            }
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|e| FetchError::XmlError(e.to_string()))?;
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&text);
                }
            }
            Event::CData(c) => {
                let raw = c.into_inner();
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&raw));
                }
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(FetchError::XmlError("unbalanced closing tag".to_string()));
                }
                if let Some(closed) = stack.pop() {
                    let name = closed.name.clone();
                    let value = closed.into_value();
                    if let Some(parent) = stack.last_mut() {
                        parent.insert_child(name, value);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    if stack.len() != 1 {
        return Err(FetchError::XmlError(
            "document ended inside an open element".to_string(),
        ));
    }

    let document = stack.pop().unwrap_or_default();
    if document.children.is_empty() {
        return Err(FetchError::XmlError(
            "document has no root element".to_string(),
        ));
    }

    Ok(Value::Object(document.children))
}
