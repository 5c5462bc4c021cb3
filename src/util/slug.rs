/// Derive a URL-safe slug from a display name.
///
/// ASCII letters and digits are kept (lowercased), whitespace, `-` and `_`
/// become a single `-`, everything else is dropped. The result never starts or
/// ends with `-`.
pub fn slugify(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_dash = false;

    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else if ch == '-' || ch == '_' || ch.is_whitespace() {
            pending_dash = true;
        }
    }

    out
}
