use crate::url::origin_of;
use url::Url;

/// Resolves an image reference found in markup to an absolute URL
///
/// # Resolution Rules
///
/// | Reference | Result |
/// |-----------|--------|
/// | Carries a scheme (`https://…`, `http://…`) | Unchanged |
/// | Protocol-relative (`//cdn/x.jpg`) | `https:` + reference |
/// | Root-relative (`/img/x.jpg`) | base origin + reference |
/// | Anything else (`img/x.jpg`) | base origin + `/` + reference |
///
/// Relative references are resolved against the origin of the base URL, not
/// against its path, so `../x.jpg` on `https://site/a/b` becomes
/// `https://site/../x.jpg`. Existing cache data was produced with this rule.
///
/// # Returns
///
/// * `Some(String)` - The absolute image URL
/// * `None` - The reference is empty, or it is relative and the base URL has
///   no host to resolve against
///
/// # Examples
///
/// ```
/// use thumbnail_resolver::url::resolve_image_url;
/// use url::Url;
///
/// let base = Url::parse("https://site.example/products/a").unwrap();
/// assert_eq!(
///     resolve_image_url("/img/a.jpg", &base),
///     Some("https://site.example/img/a.jpg".to_string())
/// );
/// assert_eq!(
///     resolve_image_url("//cdn.example/a.jpg", &base),
///     Some("https://cdn.example/a.jpg".to_string())
/// );
/// ```
pub fn resolve_image_url(reference: &str, base: &Url) -> Option<String> {
    let reference = reference.trim();

    if reference.is_empty() {
        return None;
    }

    if has_scheme(reference) {
        return Some(reference.to_string());
    }

    if reference.starts_with("//") {
        return Some(format!("https:{}", reference));
    }

    let origin = origin_of(base)?;
    if reference.starts_with('/') {
        Some(format!("{}{}", origin, reference))
    } else {
        Some(format!("{}/{}", origin, reference))
    }
}

/// Returns true if the reference starts with a URI scheme
///
/// Syntax only: `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`. A reference
/// with a scheme is kept as-is even when the rest of it is malformed.
fn has_scheme(reference: &str) -> bool {
    let Some((scheme, _)) = reference.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}
