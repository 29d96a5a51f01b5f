// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimal XML element tree and pretty printer.
//!
//! Only what the document generator needs: elements with ordered
//! attributes, text content or child elements, escaping, and an indented
//! serialization with an XML declaration.

use std::fmt::{self, Write};

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: &str = "  ";

/// An XML element. Text and children are not mixed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder-style text setter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First direct child with the given tag.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Serializes with the XML declaration and two-space indentation.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::with_capacity(4096);
        out.push_str(DECLARATION);
        out.push('\n');
        // Writing into a String cannot fail
        let _ = self.write_indented(&mut out, 0);
        out
    }

    fn write_indented(&self, out: &mut String, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            out.push_str(INDENT);
        }
        write!(out, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            write!(out, " {}=\"{}\"", name, escape_attr(value))?;
        }

        if self.children.is_empty() {
            match &self.text {
                Some(text) if !text.is_empty() => {
                    writeln!(out, ">{}</{}>", escape_text(text), self.name)?
                }
                _ => out.push_str(" />\n"),
            }
            return Ok(());
        }

        out.push_str(">\n");
        for child in &self.children {
            child.write_indented(out, depth + 1)?;
        }
        for _ in 0..depth {
            out.push_str(INDENT);
        }
        writeln!(out, "</{}>", self.name)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml_string())
    }
}

pub fn escape_text(text: &str) -> String {
    escape(text, false)
}

pub fn escape_attr(text: &str) -> String {
    escape(text, true)
}

fn escape(text: &str, quote: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quote => out.push_str("&quot;"),
            '\n' if quote => out.push_str("&#10;"),
            '\t' if quote => out.push_str("&#9;"),
            // parsers fold a literal CR into a newline
            '\r' => out.push_str("&#13;"),
            // Control characters other than tab/newline/CR are not valid XML 1.0
            c if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') => {}
            c => out.push(c),
        }
    }
    out
}

/// Turns an arbitrary property key into a valid (unprefixed) XML name.
///
/// Characters that cannot appear in a name become `_`; a `_` is prepended
/// when the first character cannot start a name.
pub fn sanitize_name(key: &str) -> String {
    let mut name: String = key
        .chars()
        .map(|c| if is_name_char(c) { c } else { '_' })
        .collect();
    match name.chars().next() {
        Some(c) if is_name_start(c) => {}
        _ => name.insert(0, '_'),
    }
    name
}

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_alphanumeric() || c == '-' || c == '.'
}
