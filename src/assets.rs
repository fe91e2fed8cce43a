//! Cache-busted static asset tags.
//!
//! The stylesheet, script and image helpers append `?v={version}` to a site
//! URL so browsers refetch assets after a deploy. Before emitting anything
//! they check that the file exists under the web root: a missing file logs a
//! warning and renders nothing rather than a broken reference.
//!
//! The version token is computed once per process. By default it comes from
//! the build (see `build.rs`): the package version on a release tag, else the
//! package version suffixed with the short git hash.

use crate::config::HelperConfig;
use crate::markup::{self, VoidTag, is_blank};
use crate::transform::{append_query, encode_component};
use maud::{Markup, html};
use percent_encoding::percent_decode_str;
use std::fmt;
use std::path::{Path, PathBuf};

/// Cache-busting version shared by every asset helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionToken(String);

impl VersionToken {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Version derived from the build environment.
    pub fn build() -> Self {
        let version = env!("CARGO_PKG_VERSION");
        let on_tag = env!("CMS_HELPERS_ON_RELEASE_TAG") == "true";
        let hash = env!("CMS_HELPERS_GIT_HASH");
        if on_tag || hash.is_empty() {
            Self(version.to_string())
        } else {
            Self(format!("{version}-{hash}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `url` with `v={version}` appended to its query.
    pub fn apply(&self, url: &str) -> String {
        append_query(url, &format!("v={}", encode_component(&self.0)))
    }
}

impl Default for VersionToken {
    fn default() -> Self {
        Self::build()
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Answers whether a site URL refers to an existing static file.
pub trait AssetStore {
    fn exists(&self, url_path: &str) -> bool;
}

impl<F> AssetStore for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, url_path: &str) -> bool {
        self(url_path)
    }
}

/// Static files served from a directory on disk.
#[derive(Debug, Clone)]
pub struct WebRoot {
    root: PathBuf,
}

impl WebRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Web root named by `config.web_root`, relative to `site_dir` unless absolute.
    pub fn from_config(config: &HelperConfig, site_dir: &Path) -> Self {
        Self::new(site_dir.join(&config.web_root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a site URL (`/css/site.css`, `~/css/site.css`) to a file path.
    /// The emitted tags drop the `~` as well, see [`public_url`].
    ///
    /// Query and fragment are ignored and percent-escapes decoded. Returns
    /// `None` for paths that would leave the web root.
    pub fn map_path(&self, url_path: &str) -> Option<PathBuf> {
        let path = url_path.trim();
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.strip_prefix('~').unwrap_or(path);
        let decoded = percent_decode_str(path).decode_utf8().ok()?;

        let mut mapped = self.root.clone();
        let mut segments = 0;
        for segment in decoded.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => return None,
                s if s.contains(':') => return None,
                s => {
                    mapped.push(s);
                    segments += 1;
                }
            }
        }
        (segments > 0).then_some(mapped)
    }
}

impl AssetStore for WebRoot {
    fn exists(&self, url_path: &str) -> bool {
        self.map_path(url_path).is_some_and(|p| p.is_file())
    }
}

/// The URL written into a tag. App-relative `~/x` becomes `/x`, since
/// browsers do not resolve `~`.
pub fn public_url(path: &str) -> &str {
    let path = path.trim();
    match path.strip_prefix('~') {
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

fn asset_available(assets: &dyn AssetStore, path: &str) -> bool {
    if is_blank(path) {
        tracing::warn!("Couldn't find asset: path is blank");
        return false;
    }
    if !assets.exists(path) {
        tracing::warn!("Couldn't find: {path}");
        return false;
    }
    true
}

/// `<link rel="stylesheet" href="{path}?v={version}" />`, or nothing when
/// the file is missing.
pub fn versioned_css_url(assets: &dyn AssetStore, version: &VersionToken, path: &str) -> Markup {
    if !asset_available(assets, path) {
        return markup::empty();
    }
    VoidTag::new("link")
        .attr("rel", "stylesheet")
        .attr("href", &version.apply(public_url(path)))
        .finish()
}

/// `<script src="{path}?v={version}"></script>`, or nothing when the file is
/// missing.
pub fn versioned_js_url(assets: &dyn AssetStore, version: &VersionToken, path: &str) -> Markup {
    if !asset_available(assets, path) {
        return markup::empty();
    }
    html! {
        script src=(version.apply(public_url(path))) {}
    }
}

/// Optional attributes of a versioned `<img>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImgAttrs<'a> {
    pub alt: Option<&'a str>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// `<img src="{path}?v={version}" ... />`, or nothing when the file is
/// missing. Blank alt text is left out.
pub fn versioned_img_url(
    assets: &dyn AssetStore,
    version: &VersionToken,
    path: &str,
    attrs: &ImgAttrs<'_>,
) -> Markup {
    if !asset_available(assets, path) {
        return markup::empty();
    }
    let width = attrs.width.map(|w| w.to_string());
    let height = attrs.height.map(|h| h.to_string());
    VoidTag::new("img")
        .attr("src", &version.apply(public_url(path)))
        .attr_opt("alt", attrs.alt.filter(|a| !is_blank(a)))
        .attr_opt("width", width.as_deref())
        .attr_opt("height", height.as_deref())
        .finish()
}
