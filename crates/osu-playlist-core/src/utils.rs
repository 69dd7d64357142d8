//! Utility functions shared across modules.

use std::path::{Component, Path};

/// Escape text for inclusion in HTML element content or attribute values.
///
/// # Examples
///
/// ```
/// use osu_playlist_core::utils::escape_html;
///
/// assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Forward-slash relative link to `path` from the directory `base`, prefixed
/// with `./`. Falls back to the file name when `path` is not below `base`.
pub fn relative_link(path: &Path, base: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or_else(|_| {
        path.file_name().map(Path::new).unwrap_or(path)
    });

    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    format!("./{}", parts.join("/"))
}
