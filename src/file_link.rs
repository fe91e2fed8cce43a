//! Download links with a file-type icon.
//!
//! The icon class comes from a fixed table keyed by lowercase dotted
//! extension. The extension is taken from the file name when one is given
//! (CMS file URLs often carry none), otherwise from the link itself. Empty
//! and unrecognized extensions both use the `.default` entry.

use crate::markup::is_blank;
use maud::{Markup, PreEscaped, html};

pub const DEFAULT_EXTENSION: &str = ".default";
const DEFAULT_ICON: &str = "icon-file";

static KNOWN_FILE_TYPES: &[(&str, &str)] = &[
    (DEFAULT_EXTENSION, DEFAULT_ICON),
    (".pdf", "icon-file-pdf"),
    (".ppt", "icon-file-powerpoint"),
    (".pptx", "icon-file-powerpoint"),
    (".doc", "icon-file-word"),
    (".docx", "icon-file-word"),
    (".xls", "icon-file-excel"),
    (".xlsx", "icon-file-excel"),
    (".zip", "icon-file-zip"),
    (".7z", "icon-file-zip"),
];

/// Icon class for a dotted extension such as `".pdf"`.
pub fn icon_class(extension: &str) -> &'static str {
    let extension = extension.to_ascii_lowercase();
    KNOWN_FILE_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map_or(DEFAULT_ICON, |(_, class)| *class)
}

/// Lowercase dotted extension of the last path segment, ignoring any query
/// or fragment. `None` when the segment has no extension.
pub fn extension_of(path: &str) -> Option<String> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let name = path.rsplit(['/', '\\']).next().unwrap_or_default();
    let dot = name.rfind('.')?;
    let ext = &name[dot..];
    (ext.len() > 1).then(|| ext.to_ascii_lowercase())
}

/// A link to a downloadable file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLink<'a> {
    pub link: &'a str,
    pub text: &'a str,
    pub title: Option<&'a str>,
    /// Name of the file behind `link`, used to find the extension.
    pub file_name: Option<&'a str>,
    /// Window target, e.g. `_blank`.
    pub target: Option<&'a str>,
}

impl FileLink<'_> {
    /// The extension that decides the icon, or `.default`.
    pub fn extension(&self) -> String {
        self.file_name
            .filter(|name| !is_blank(name))
            .and_then(extension_of)
            .or_else(|| extension_of(self.link))
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
    }

    pub fn icon_class(&self) -> &'static str {
        icon_class(&self.extension())
    }
}

/// `<span class="{icon}">&nbsp;</span><a href="{link}" ...>{text}</a>`
pub fn file_link(link: &FileLink<'_>) -> Markup {
    let target = link.target.filter(|t| !is_blank(t));
    let title = link.title.filter(|t| !is_blank(t));
    html! {
        span class=(link.icon_class()) { (PreEscaped("&nbsp;")) }
        a href=(link.link) target=[target] title=[title] { (link.text) }
    }
}
