//! Manifest XML reading and writing

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};

use super::element::{AndroidManifest, Element};
use crate::{Error, Result};

const FORMAT: &str = "manifest XML";
const INDENT: &str = "    ";

/// Parse manifest XML into the tree model.
///
/// The root element must be `<manifest>`. Comments, processing instructions
/// and whitespace-only text are dropped.
pub fn parse_manifest(content: &str) -> Result<AndroidManifest> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    // (tag, element) pairs for currently open elements
    let mut stack: Vec<(String, Element)> = Vec::new();
    let mut root: Option<(String, Element)> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::parse(
                FORMAT,
                format!("at position {}: {e}", reader.buffer_position()),
            )
        })?;

        match event {
            Event::Start(start) => {
                let opened = open_element(&start)?;
                stack.push(opened);
            }
            Event::Empty(start) => {
                let (tag, element) = open_element(&start)?;
                close_element(&mut stack, &mut root, tag, element)?;
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                let Some((tag, element)) = stack.pop() else {
                    return Err(Error::parse(FORMAT, format!("unexpected closing tag </{name}>")));
                };
                if tag != name {
                    return Err(Error::parse(
                        FORMAT,
                        format!("expected </{tag}>, found </{name}>"),
                    ));
                }
                close_element(&mut stack, &mut root, tag, element)?;
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|e| Error::parse(FORMAT, e.to_string()))?;
                append_text(&mut stack, &value);
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data).into_owned();
                append_text(&mut stack, &value);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((tag, _)) = stack.last() {
        return Err(Error::parse(FORMAT, format!("unclosed element <{tag}>")));
    }

    match root {
        Some((tag, element)) if tag == "manifest" => Ok(AndroidManifest::new(element)),
        Some((tag, _)) => Err(Error::parse(
            FORMAT,
            format!("root element is <{tag}>, expected <manifest>"),
        )),
        None => Err(Error::parse(FORMAT, "document has no root element")),
    }
}

fn open_element(start: &BytesStart<'_>) -> Result<(String, Element)> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::parse(FORMAT, e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::parse(FORMAT, e.to_string()))?
            .into_owned();
        element.attrs.insert(key, value);
    }
    Ok((tag, element))
}

fn close_element(
    stack: &mut [(String, Element)],
    root: &mut Option<(String, Element)>,
    tag: String,
    element: Element,
) -> Result<()> {
    match stack.last_mut() {
        Some((_, parent)) => parent.push_child(tag, element),
        None if root.is_none() => *root = Some((tag, element)),
        None => {
            return Err(Error::parse(
                FORMAT,
                format!("second root element <{tag}>"),
            ));
        }
    }
    Ok(())
}

fn append_text(stack: &mut [(String, Element)], value: &str) {
    if value.trim().is_empty() {
        return;
    }
    if let Some((_, element)) = stack.last_mut() {
        match &mut element.text {
            Some(text) => text.push_str(value),
            None => element.text = Some(value.to_string()),
        }
    }
}

/// Render the tree as an indented XML document.
///
/// Attributes keep their order. Comments are not part of the tree, and
/// children of one kind render together in first-seen kind order.
pub fn render_manifest(manifest: &AndroidManifest) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    write_element(&mut out, "manifest", &manifest.manifest, 0);
    out
}

fn write_element(out: &mut String, tag: &str, element: &Element, depth: usize) {
    let indent = INDENT.repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(tag);
    for (key, value) in element.attrs.iter() {
        out.push_str(&format!(" {key}=\"{}\"", escape(value)));
    }

    let text = element.text.as_deref().filter(|t| !t.is_empty());
    if !element.has_children() && text.is_none() {
        out.push_str(" />\n");
        return;
    }

    out.push('>');
    if let Some(text) = text {
        out.push_str(&escape(text));
    }
    if element.has_children() {
        out.push('\n');
        for (kind, children) in element.children.iter() {
            for child in children {
                write_element(out, kind, child, depth + 1);
            }
        }
        out.push_str(&indent);
    }
    out.push_str(&format!("</{tag}>\n"));
}
