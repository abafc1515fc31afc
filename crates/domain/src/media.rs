//! Media URL helpers

/// Resolves an image reference from the backend into a loadable URL.
///
/// Remote (`http://`, `https://`) and local (`file://`) URLs pass through;
/// anything else is treated as a path under `base_url`.
#[must_use]
pub fn full_image_url(base_url: &str, image_url: &str) -> String {
    if image_url.is_empty() {
        return String::new();
    }
    if ["http://", "https://", "file://"]
        .iter()
        .any(|prefix| image_url.starts_with(prefix))
    {
        return image_url.to_string();
    }
    if image_url.starts_with('/') {
        format!("{base_url}{image_url}")
    } else {
        format!("{base_url}/{image_url}")
    }
}
