//! Minimal SVG element tree and serializer.
//!
//! Documents are built as a tree of [`Element`]s and serialized once, so
//! attribute and text escaping happen in a single place.

use std::fmt::{self, Display, Write};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An SVG (or HTML) element with ordered attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Numeric attribute, trimmed to at most three decimals.
    pub fn num(self, name: impl Into<String>, value: f64) -> Self {
        self.attr(name, fmt_num(value))
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Display) {
        let name = name.into();
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Direct element children.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text content of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => out.push_str(&e.text_content()),
            }
        }
        out
    }

    /// All descendants (depth first, including self) matching a predicate.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect(pred, &mut found);
        found
    }

    fn collect<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(self) {
            out.push(self);
        }
        for child in self.elements() {
            child.collect(pred, out);
        }
    }

    fn write_to(&self, out: &mut String) -> fmt::Result {
        write!(out, "<{}", self.name)?;
        for (name, value) in &self.attrs {
            write!(out, " {}=\"{}\"", name, escape_attr(value))?;
        }
        if self.children.is_empty() {
            return out.write_str("/>");
        }
        out.write_char('>')?;
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_to(out)?,
                Node::Text(t) => out.write_str(&escape_text(t))?,
            }
        }
        write!(out, "</{}>", self.name)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out)?;
        f.write_str(&out)
    }
}

/// A serialized SVG document and its outer size in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    pub root: Element,
    pub width: f64,
    pub height: f64,
}

impl SvgDocument {
    pub fn markup(&self) -> String {
        self.root.to_string()
    }
}

/// Formats a coordinate with up to three decimals and no trailing zeros.
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}

pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attr(s: &str) -> String {
    escape_text(s)
        .replace('"', "&quot;")
        .replace('\n', "&#10;")
}
