mod builder;
mod node;

pub use node::XmlNode;

use crate::error::Result;
use builder::TreeBuilder;
use quick_xml::{
    Reader,
    escape::{resolve_predefined_entity, unescape},
    events::{BytesStart, Event},
};
use std::io::BufRead;

const XMLNS: &[u8] = b"xmlns";

/// Read a whole XML document into an [`XmlNode`] tree.
pub(crate) fn read_xml<R: BufRead>(mut reader: Reader<R>) -> Result<XmlNode> {
    let mut builder = TreeBuilder::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(bs) => builder.start(element(&bs, &reader)?)?,
            Event::Empty(bs) => builder.empty(element(&bs, &reader)?)?,
            Event::End(_) => builder.end()?,
            Event::Text(bt) => builder.text(&unescape(&String::from_utf8_lossy(&bt))?),
            Event::CData(cd) => builder.text(&String::from_utf8_lossy(&cd)),
            Event::GeneralRef(reference) => {
                builder.text(&resolve_reference(&String::from_utf8_lossy(&reference)))
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    builder.finish()
}

fn element<R>(bs: &BytesStart, reader: &Reader<R>) -> Result<XmlNode> {
    let mut attributes = Vec::new();
    for attribute in bs.attributes() {
        let attribute = attribute?;
        if attribute.key.as_ref().starts_with(XMLNS) {
            continue;
        }
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute.decode_and_unescape_value(reader.decoder())?;
        attributes.push((key, value.into_owned()));
    }
    Ok(XmlNode::new(
        String::from_utf8_lossy(bs.local_name().as_ref()),
        attributes,
    ))
}

// `&amp;`, `&#38;` and `&#x26;` all come through here without the `&` and `;`.
fn resolve_reference(name: &str) -> String {
    let char_ref = name.strip_prefix('#').and_then(|code| {
        match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse().ok(),
        }
        .and_then(char::from_u32)
    });

    match char_ref {
        Some(c) => c.to_string(),
        None => resolve_predefined_entity(name)
            .map(str::to_string)
            .unwrap_or_else(|| format!("&{name};")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn read(xml: &str) -> Result<XmlNode> {
        read_xml(Reader::from_str(xml))
    }

    #[test]
    fn strips_prefixes_and_namespace_declarations() -> Result<(), Box<dyn std::error::Error>> {
        let root = read(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <bpmn2:definitions xmlns:bpmn2="http://www.omg.org/spec/BPMN/20100524/MODEL" id="Defs">
              <bpmn2:process id="P1"><bpmn2:task id="T1" name="Pay &amp; close"/></bpmn2:process>
            </bpmn2:definitions>"#,
        )?;
        assert_eq!(root.name(), "definitions");
        assert_eq!(root.attr("id"), Some("Defs"));
        assert_eq!(root.attr("bpmn2"), None);
        let task = root.path(&["process", "task"]);
        assert_eq!(task[0].attr("name"), Some("Pay & close"));
        Ok(())
    }

    #[test]
    fn collects_text_with_references() -> Result<(), Box<dyn std::error::Error>> {
        let root = read("<laneSet><flowNodeRef> Task_&#49;&lt;x&gt; </flowNodeRef></laneSet>")?;
        assert_eq!(root.path(&["flowNodeRef"])[0].text(), "Task_1<x>");
        Ok(())
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(read("<not-xml").is_err());
        assert!(read("<a><b></a>").is_err());
        assert!(matches!(read("<a><b>"), Err(Error::UnclosedElement(_))));
        assert!(matches!(read(""), Err(Error::EmptyDocument)));
        assert!(matches!(read("just text"), Err(Error::EmptyDocument)));
    }

    #[test]
    fn references() {
        assert_eq!(resolve_reference("amp"), "&");
        assert_eq!(resolve_reference("#x41"), "A");
        assert_eq!(resolve_reference("#65"), "A");
        assert_eq!(resolve_reference("nbsp"), "&nbsp;");
    }
}
