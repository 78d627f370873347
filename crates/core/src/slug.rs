//! URL slug generation for titles and names.
//!
//! Slugs are lowercase ASCII, with runs of anything that is not a letter or
//! digit collapsed into a single `-`. Latin diacritics used in French titles
//! are folded to their base letter (`é` -> `e`, `œ` -> `oe`).

/// Maximum slug length in bytes. Longer slugs are cut at a `-` boundary.
pub const MAX_SLUG_LEN: usize = 96;

/// Build a slug from arbitrary text.
///
/// # Examples
///
/// ```
/// use rouge_core::slug::slugify;
///
/// assert_eq!(slugify("Le Misanthrope"), "le-misanthrope");
/// assert_eq!(slugify("Été à l'Opéra !"), "ete-a-l-opera");
/// assert_eq!(slugify("Cœur  &  Âme"), "coeur-ame");
/// ```
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.chars() {
        let folded = if ch.is_ascii_alphanumeric() {
            None
        } else {
            match fold_diacritic(ch) {
                Some(base) => Some(base),
                None => {
                    pending_dash = true;
                    continue;
                }
            }
        };
        if pending_dash && !out.is_empty() {
            out.push('-');
        }
        pending_dash = false;
        match folded {
            Some(base) => out.push_str(base),
            None => out.push(ch.to_ascii_lowercase()),
        }
    }

    truncate_at_boundary(out)
}

/// Whether `slug` is already in canonical form.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Return the slug to persist: the caller-supplied one when present and
/// valid, otherwise one derived from `fallback`.
pub fn resolve_slug(explicit: Option<&str>, fallback: &str) -> Option<String> {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) if is_valid_slug(s) => Some(s.to_string()),
        Some(s) => non_empty(slugify(s)),
        None => non_empty(slugify(fallback)),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn fold_diacritic(ch: char) -> Option<&'static str> {
    let base = match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => "a",
        'ç' | 'Ç' => "c",
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => "i",
        'ñ' | 'Ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => "o",
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => "u",
        'ý' | 'ÿ' | 'Ý' | 'Ÿ' => "y",
        'œ' | 'Œ' => "oe",
        'æ' | 'Æ' => "ae",
        'ß' => "ss",
        _ => return None,
    };
    Some(base)
}

fn truncate_at_boundary(mut slug: String) -> String {
    if slug.len() <= MAX_SLUG_LEN {
        return slug;
    }
    slug.truncate(MAX_SLUG_LEN);
    if let Some(idx) = slug.rfind('-') {
        slug.truncate(idx);
    }
    slug
}
