//! Tag-writing primitives shared by every helper.
//!
//! Helpers return [`maud::Markup`] so views built with `html!` can embed them
//! directly. Elements with children are written with `html!`; void elements
//! go through [`VoidTag`], which keeps the `<tag attr="..." />` form the site
//! templates expect. Every attribute value is escaped with maud's escaper.

use maud::{Markup, PreEscaped, html};

/// Markup that renders to nothing.
pub fn empty() -> Markup {
    PreEscaped(String::new())
}

/// Escape text for use inside an attribute value or element body.
pub(crate) fn escape(value: &str) -> String {
    html! { (value) }.into_string()
}

/// True when the string has no visible content.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Builder for a self-closing element such as `<img ... />`.
#[derive(Debug)]
pub(crate) struct VoidTag {
    buf: String,
}

impl VoidTag {
    pub fn new(name: &str) -> Self {
        let mut buf = String::with_capacity(64);
        buf.push('<');
        buf.push_str(name);
        Self { buf }
    }

    /// Append ` name="value"`, escaping the value.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.buf.push(' ');
        self.buf.push_str(name);
        self.buf.push_str("=\"");
        self.buf.push_str(&escape(value));
        self.buf.push('"');
        self
    }

    /// Append the attribute only when a value is present.
    pub fn attr_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    pub fn finish(mut self) -> Markup {
        self.buf.push_str(" />");
        PreEscaped(self.buf)
    }
}
