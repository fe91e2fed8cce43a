//! # CMS View Helpers
//!
//! Rendering helpers for views of a CMS-backed website. Each helper takes
//! content the CMS has already resolved, or a primitive like an asset path,
//! and returns a fragment of HTML ready to embed in the page.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`helpers`] | [`ViewHelpers`], the one value a template receives |
//! | [`image`] | Media image tags: resize query, dimensions, fallback image |
//! | [`lazyload`] | Lazy-loaded images built from named crops |
//! | [`assets`] | Cache-busted `<link>`, `<script>` and `<img>` tags, version token, web root |
//! | [`seo`] | Robots meta tag and canonical link |
//! | [`dictionary`] | Translation lookup with key fallback and casing |
//! | [`file_link`] | Download links with a file-type icon |
//! | [`content`] | The `ContentNode`/`ContentRepository` capabilities helpers consume |
//! | [`store`] | JSON-backed in-memory repository |
//! | [`transform`] | Image transform directives and query strings |
//! | [`crop`] | Named crop definitions and crop URLs |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`markup`] | Escaping and void-tag writing shared by the emitters |
//!
//! # Design Decisions
//!
//! ## Render Something, Never Break the Page
//!
//! No helper returns an error. A media id that does not resolve, a property
//! missing from a content type, a stylesheet that was never deployed: each
//! degrades to a fallback or to empty markup. Errors exist only where a site
//! is set up (loading config, content exports and translations).
//!
//! ## Capabilities, Not Ambient Context
//!
//! Helpers never reach for a current request or a global CMS context. The
//! content repository, dictionary, asset store and version token are passed
//! in, through [`ViewHelpers`] or as arguments of the free functions. Any
//! content store can sit behind the two [`content`] traits; [`store`] is the
//! adapter this crate ships.
//!
//! ## Maud Markup
//!
//! Every helper returns [`maud::Markup`], so sites templating with Maud embed
//! results as `(helpers.media_img(...))` and other engines call
//! `.into_string()`. All interpolated values are escaped.

pub mod assets;
pub mod config;
pub mod content;
pub mod crop;
pub mod dictionary;
pub mod file_link;
pub mod helpers;
pub mod image;
pub mod lazyload;
pub mod markup;
pub mod seo;
pub mod store;
pub mod transform;

pub use assets::{AssetStore, ImgAttrs, VersionToken, WebRoot};
pub use config::{ConfigError, HelperConfig, load_config};
pub use content::{ContentNode, ContentRepository, MediaRef, PropertyError, PropertyValue};
pub use dictionary::{Casing, Dictionary, DictionaryLookup, Translations};
pub use file_link::FileLink;
pub use helpers::ViewHelpers;
pub use image::MediaImage;
pub use lazyload::LazyImage;
pub use store::{ContentStore, StoreError, StoredNode};
pub use transform::{Anchor, ImageTransform, ResizeMode};

#[cfg(test)]
pub(crate) mod test_helpers;
