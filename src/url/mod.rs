//! URL handling for discovered images
//!
//! Markup references images in every form a browser accepts. Everything
//! stored in the cache goes through [`resolve_image_url`] first, so cache
//! values are always absolute.

mod origin;
mod resolve;

pub use origin::origin_of;
pub use resolve::resolve_image_url;
