//! Preview image extraction from page markup
//!
//! Markup is parsed once and handed to an ordered chain of strategies. The
//! first strategy that produces an image wins:
//!
//! 1. `<meta property="og:image">`
//! 2. `<meta name="twitter:image">`
//! 3. The `image` field of the first JSON-LD block
//! 4. The largest declared `<img>` that is not a logo, icon, or avatar
//!
//! Every returned URL has been through [`resolve_image_url`], so it is
//! absolute.

use crate::url::resolve_image_url;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use url::Url;

/// Image source substrings that mark page furniture rather than artwork
const EXCLUDED_SOURCES: &[&str] = &["logo", "icon", "avatar"];

/// One heuristic for locating a representative image in a page
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Returns the absolute image URL this strategy finds, if any
    fn attempt(&self, document: &Html, base_url: &Url) -> Option<String>;
}

/// An image found by the extractor, with the strategy that found it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub strategy: &'static str,
    pub image_url: String,
}

/// Ordered chain of extraction strategies
pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Extractor {
    /// Creates an extractor with a custom strategy chain
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Names of the strategies, in the order they are tried
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Finds the preview image for a page
    ///
    /// # Arguments
    ///
    /// * `markup` - The page HTML
    /// * `base_url` - The page URL, used to resolve relative references
    ///
    /// # Returns
    ///
    /// * `Some(String)` - Absolute URL of the chosen image
    /// * `None` - No strategy found an image (not an error)
    ///
    /// # Example
    ///
    /// ```
    /// use thumbnail_resolver::resolver::Extractor;
    /// use url::Url;
    ///
    /// let html = r#"<html><head><meta property="og:image" content="/img/a.jpg"></head></html>"#;
    /// let base = Url::parse("https://site.example/a").unwrap();
    /// let image = Extractor::default().extract(html, &base);
    /// assert_eq!(image, Some("https://site.example/img/a.jpg".to_string()));
    /// ```
    pub fn extract(&self, markup: &str, base_url: &Url) -> Option<String> {
        self.extract_with_source(markup, base_url)
            .map(|found| found.image_url)
    }

    /// Like [`Extractor::extract`], but also reports which strategy matched
    pub fn extract_with_source(&self, markup: &str, base_url: &Url) -> Option<Extraction> {
        let document = Html::parse_document(markup);

        self.strategies.iter().find_map(|strategy| {
            strategy
                .attempt(&document, base_url)
                .map(|image_url| Extraction {
                    strategy: strategy.name(),
                    image_url,
                })
        })
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::with_strategies(vec![
            Box::new(MetaImageStrategy::open_graph()),
            Box::new(MetaImageStrategy::social_card()),
            Box::new(JsonLdStrategy),
            Box::new(LargestImageStrategy),
        ])
    }
}

/// Image named by a `<meta>` tag's `content` attribute
pub struct MetaImageStrategy {
    name: &'static str,
    selector: &'static str,
}

impl MetaImageStrategy {
    /// `<meta property="og:image" content="...">`
    pub fn open_graph() -> Self {
        Self {
            name: "open-graph",
            selector: r#"meta[property="og:image"][content]"#,
        }
    }

    /// `<meta name="twitter:image" content="...">`
    pub fn social_card() -> Self {
        Self {
            name: "social-card",
            selector: r#"meta[name="twitter:image"][content]"#,
        }
    }
}

impl ExtractionStrategy for MetaImageStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn attempt(&self, document: &Html, base_url: &Url) -> Option<String> {
        let selector = Selector::parse(self.selector).ok()?;

        document
            .select(&selector)
            .filter_map(|element| element.value().attr("content"))
            .find_map(|content| resolve_image_url(content, base_url))
    }
}

/// `image` field of the first `application/ld+json` script
///
/// Malformed JSON is skipped silently; structured data on product pages is
/// often hand-written.
pub struct JsonLdStrategy;

impl JsonLdStrategy {
    /// Picks an image reference out of a JSON-LD `image` value
    ///
    /// Sequences yield their first element; `ImageObject`s yield their `url`.
    fn image_reference(value: &Value) -> Option<&str> {
        match value {
            Value::String(reference) => Some(reference.as_str()),
            Value::Array(items) => items.first().and_then(Self::image_reference),
            Value::Object(object) => object.get("url").and_then(Value::as_str),
            _ => None,
        }
    }
}

impl ExtractionStrategy for JsonLdStrategy {
    fn name(&self) -> &'static str {
        "json-ld"
    }

    fn attempt(&self, document: &Html, base_url: &Url) -> Option<String> {
        let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;
        let script = document.select(&selector).next()?;
        let content = script.text().collect::<String>();

        let data: Value = match serde_json::from_str(content.trim()) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!("Ignoring malformed JSON-LD: {}", e);
                return None;
            }
        };

        let reference = Self::image_reference(data.get("image")?)?;
        resolve_image_url(reference, base_url)
    }
}

/// Largest `<img>` by declared width × height
///
/// Sources containing `logo`, `icon`, or `avatar` are skipped. Missing or
/// non-numeric dimensions count as zero. Equal areas keep document order.
pub struct LargestImageStrategy;

impl LargestImageStrategy {
    /// Declared area of an image element
    fn area(element: &ElementRef<'_>) -> u64 {
        let width = Self::dimension(element, "width");
        let height = Self::dimension(element, "height");
        width.saturating_mul(height)
    }

    fn dimension(element: &ElementRef<'_>, name: &str) -> u64 {
        element
            .value()
            .attr(name)
            .filter(|value| !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|value| value.parse().ok())
            .unwrap_or(0)
    }

    fn is_excluded(src: &str) -> bool {
        EXCLUDED_SOURCES.iter().any(|keyword| src.contains(keyword))
    }
}

impl ExtractionStrategy for LargestImageStrategy {
    fn name(&self) -> &'static str {
        "largest-image"
    }

    fn attempt(&self, document: &Html, base_url: &Url) -> Option<String> {
        let selector = Selector::parse("img[src]").ok()?;
        let mut best: Option<(&str, u64)> = None;

        for element in document.select(&selector) {
            let src = match element.value().attr("src") {
                Some(src) if !src.trim().is_empty() => src,
                _ => continue,
            };

            if Self::is_excluded(src) {
                continue;
            }

            let area = Self::area(&element);
            match best {
                // Strictly larger only, so the first of equal areas stays
                Some((_, best_area)) if area <= best_area => {}
                _ => best = Some((src, area)),
            }
        }

        let (src, _) = best?;
        resolve_image_url(src, base_url)
    }
}
