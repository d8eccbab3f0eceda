//! Device locale detection for the `language` query parameter.

/// Used when the environment names no usable locale.
pub const FALLBACK_LANGUAGE: &str = "en-US";

const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// BCP 47 language tag derived from the POSIX locale environment,
/// e.g. `en_US.UTF-8` becomes `en-US`.
pub fn language_tag() -> String {
    LOCALE_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| normalize_locale(&value))
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
}

/// Convert a POSIX locale string into the tag TMDB expects.
///
/// Returns `None` for empty values and the `C`/`POSIX` locales.
pub fn normalize_locale(raw: &str) -> Option<String> {
    // strip codeset and modifier: en_US.UTF-8@euro
    let base = raw
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }

    let mut parts = base.split(['_', '-']);
    let language = parts.next()?.to_ascii_lowercase();
    if language.len() < 2
        || language.len() > 3
        || !language.chars().all(|c| c.is_ascii_alphabetic())
    {
        return None;
    }

    match parts.next().filter(|region| !region.is_empty()) {
        Some(region) => {
            Some(format!("{language}-{}", region.to_ascii_uppercase()))
        }
        None => Some(language),
    }
}
