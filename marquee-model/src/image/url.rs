use super::sizes::ImageSize;

/// Public TMDB image CDN, used until the remote configuration is known.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Build the full URL of an image from its base URL, size bucket and path.
///
/// Pure and deterministic. Returns `None` (the "missing image" sentinel)
/// whenever `path` is absent or blank, whatever the bucket.
pub fn build_image_url(
    base_url: &str,
    size: ImageSize,
    path: Option<&str>,
) -> Option<String> {
    let path = path.map(str::trim).filter(|path| !path.is_empty())?;
    let base = if base_url.trim().is_empty() {
        DEFAULT_IMAGE_BASE_URL
    } else {
        base_url.trim()
    };
    Some(format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        size.as_str(),
        path.trim_start_matches('/')
    ))
}
