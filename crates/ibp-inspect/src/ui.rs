//! UI layout scanning.
//!
//! Qt Designer layouts nest `<property>` elements directly under each
//! `<widget>`. Numeric properties hold a `<number>` or `<double>` child:
//!
//! ```xml
//! <widget class="QSpinBox" name="mSpinRadius">
//!   <property name="minimum"><number>1</number></property>
//!   <property name="maximum"><number>50</number></property>
//! </widget>
//! ```
//!
//! Only widgets with a recognized spin/slider prefix contribute. When two
//! widgets map to the same parameter, later values replace earlier ones.

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::InspectError;
use crate::model::UiHints;
use crate::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HintKey {
    Minimum,
    Maximum,
    Value,
}

impl HintKey {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "minimum" => Some(Self::Minimum),
            "maximum" => Some(Self::Maximum),
            "value" => Some(Self::Value),
            _ => None,
        }
    }

    const fn store(self, hints: &mut UiHints, number: f64) {
        match self {
            Self::Minimum => hints.minimum = Some(number),
            Self::Maximum => hints.maximum = Some(number),
            Self::Value => hints.value = Some(number),
        }
    }
}

/// One open element on the reader's stack.
#[derive(Debug)]
enum Frame {
    /// A `<widget>`, with its normalized parameter name if recognized.
    Widget(Option<String>),
    /// A `<property>` directly under a recognized widget.
    Property(Option<HintKey>),
    /// A `<number>` or `<double>` inside a tracked property.
    Number(Option<HintKey>),
    Other,
}

/// Extracts numeric hints from a UI layout.
///
/// # Errors
///
/// Returns [`InspectError::Layout`] when the document is not well-formed.
pub fn layout_hints(source: &str) -> Result<BTreeMap<String, UiHints>, InspectError> {
    let mut reader = Reader::from_str(source);
    reader.trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut hints: BTreeMap<String, UiHints> = BTreeMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref element)) => {
                let frame = open_frame(element, stack.last());
                stack.push(frame);
            }
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Text(ref text)) => {
                let Some(Frame::Number(Some(key))) = stack.last() else {
                    continue;
                };
                let raw = String::from_utf8_lossy(text);
                let (Ok(number), Some(widget)) = (raw.trim().parse::<f64>(), enclosing_widget(&stack))
                else {
                    continue;
                };
                key.store(hints.entry(widget.to_owned()).or_default(), number);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(InspectError::Layout {
                    position: reader.buffer_position(),
                    message: e.to_string(),
                });
            }
            Ok(_) => {}
        }
    }

    Ok(hints)
}

fn open_frame(element: &BytesStart<'_>, parent: Option<&Frame>) -> Frame {
    match element.name().as_ref() {
        b"widget" => Frame::Widget(
            attribute(element, b"name").and_then(|name| normalize::widget_name(&name)),
        ),
        b"property" => match parent {
            Some(Frame::Widget(Some(_))) => {
                Frame::Property(attribute(element, b"name").and_then(|name| HintKey::parse(&name)))
            }
            _ => Frame::Property(None),
        },
        b"number" | b"double" => match parent {
            Some(Frame::Property(key)) => Frame::Number(*key),
            _ => Frame::Number(None),
        },
        _ => Frame::Other,
    }
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

fn enclosing_widget(stack: &[Frame]) -> Option<&str> {
    stack.iter().rev().find_map(|frame| match frame {
        Frame::Widget(name) => Some(name.as_deref()),
        _ => None,
    })?
}
