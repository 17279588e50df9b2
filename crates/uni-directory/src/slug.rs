//! URL-safe identifiers derived from university names.

/// Derive a slug: lowercase, every run of characters outside `[a-z0-9]`
/// becomes a single `-`, no leading or trailing `-`.
///
/// Non-ASCII letters count as separators, so `"München"` becomes `"m-nchen"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}
