//! The helper surface views call.
//!
//! [`ViewHelpers`] bundles the capabilities the individual helpers need (a
//! content repository, a dictionary, an asset store, the version token and
//! the site config) so a template receives one value instead of reaching
//! for ambient request state. Construct one per render, or once per process
//! when the capabilities are immutable.
//!
//! ```rust,no_run
//! use cms_view_helpers::{ContentStore, HelperConfig, MediaRef, ViewHelpers, WebRoot};
//! use std::collections::HashMap;
//!
//! let store = ContentStore::load("content.json".as_ref()).unwrap();
//! let dictionary: HashMap<String, String> = HashMap::new();
//! let web_root = WebRoot::new("wwwroot");
//! let helpers = ViewHelpers::new(&store, &dictionary, &web_root)
//!     .with_config(HelperConfig::default());
//!
//! let options = helpers.media_image().size(640, 480);
//! let img = helpers.media_img(MediaRef::Id(1101), &options);
//! ```

use crate::assets::{self, AssetStore, ImgAttrs, VersionToken};
use crate::config::HelperConfig;
use crate::content::{ContentNode, ContentRepository, MediaRef};
use crate::dictionary::{self, Dictionary, DictionaryLookup};
use crate::file_link::{self, FileLink};
use crate::image::{self, MediaImage};
use crate::lazyload::{self, LazyImage};
use crate::seo;
use maud::Markup;

pub struct ViewHelpers<'a> {
    content: &'a dyn ContentRepository,
    dictionary: &'a dyn Dictionary,
    assets: &'a dyn AssetStore,
    version: VersionToken,
    config: HelperConfig,
}

impl<'a> ViewHelpers<'a> {
    /// Helpers with the default config and the build version token.
    pub fn new(
        content: &'a dyn ContentRepository,
        dictionary: &'a dyn Dictionary,
        assets: &'a dyn AssetStore,
    ) -> Self {
        Self {
            content,
            dictionary,
            assets,
            version: VersionToken::build(),
            config: HelperConfig::default(),
        }
    }

    /// Replace the config. The version token follows `assets.version`.
    pub fn with_config(mut self, config: HelperConfig) -> Self {
        self.version = config.version_token();
        self.config = config;
        self
    }

    pub fn with_version(mut self, version: VersionToken) -> Self {
        self.version = version;
        self
    }

    pub fn version(&self) -> &VersionToken {
        &self.version
    }

    pub fn config(&self) -> &HelperConfig {
        &self.config
    }

    // =========================================================================
    // Cache-busted assets
    // =========================================================================

    pub fn versioned_css_url(&self, path: &str) -> Markup {
        assets::versioned_css_url(self.assets, &self.version, path)
    }

    pub fn versioned_js_url(&self, path: &str) -> Markup {
        assets::versioned_js_url(self.assets, &self.version, path)
    }

    pub fn versioned_img_url(
        &self,
        path: &str,
        alt: Option<&str>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Markup {
        let attrs = ImgAttrs { alt, width, height };
        assets::versioned_img_url(self.assets, &self.version, path, &attrs)
    }

    // =========================================================================
    // Media
    // =========================================================================

    /// Image options seeded from `[images]` in the config.
    pub fn media_image(&self) -> MediaImage<'_> {
        MediaImage::new().or_defaults(&self.config.images)
    }

    /// Options left unset fall back to `[images]` in the config.
    pub fn media_img<'m>(&self, media: impl Into<MediaRef<'m>>, options: &MediaImage<'_>) -> Markup {
        let options = options.clone().or_defaults(&self.config.images);
        image::media_img(self.content, media.into(), &options)
    }

    pub fn lazy_load<'m>(&self, media: impl Into<MediaRef<'m>>, image: &LazyImage<'_>) -> Markup {
        lazyload::lazy_load(
            self.content,
            media.into(),
            image,
            &self.config.lazyload.placeholder,
        )
    }

    // =========================================================================
    // SEO
    // =========================================================================

    pub fn robots_tag(&self, node: &dyn ContentNode) -> Markup {
        seo::robots_tag(node)
    }

    pub fn canonical_tag(&self, node: &dyn ContentNode) -> Markup {
        seo::canonical_tag(self.content, node, self.config.site.base_url.as_deref())
    }

    // =========================================================================
    // Text and links
    // =========================================================================

    pub fn dictionary_value(&self, key: &str, lookup: &DictionaryLookup) -> String {
        dictionary::dictionary_value(self.dictionary, key, lookup)
    }

    /// Dictionary value with the defaults: key fallback, casing preserved.
    pub fn translate(&self, key: &str) -> String {
        self.dictionary_value(key, &DictionaryLookup::default())
    }

    pub fn file_link(&self, link: &FileLink<'_>) -> Markup {
        file_link::file_link(link)
    }
}
