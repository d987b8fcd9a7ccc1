//! Text rendering utilities for human-friendly error messages.
//!
//! Binding names are free-form strings, conventionally dotted
//! (`"db.pool"`, `"http.client"`). The helpers here format lists of
//! names and find near misses for "did you mean?" hints.

/// Renders a list of binding names as a readable, comma separated string.
///
/// # Examples
/// ```
/// use bindery_support::rendering::render_names;
///
/// let names = vec!["config", "db.pool", "http.client"];
/// assert_eq!(render_names(&names), "config, db.pool, http.client");
/// ```
pub fn render_names(names: &[impl AsRef<str>]) -> String {
    names
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Returns the last dotted segment of a binding name.
///
/// ```
/// use bindery_support::rendering::last_segment;
///
/// assert_eq!(last_segment("app.services.users"), "users");
/// assert_eq!(last_segment("config"), "config");
/// ```
pub fn last_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Quick "close enough" check between two names.
///
/// Not a full Levenshtein: same length within 3, and at least 60% of
/// positions agree.
pub fn is_close(a: &str, b: &str) -> bool {
    let (a_len, b_len) = (a.chars().count(), b.chars().count());
    let len_diff = a_len.abs_diff(b_len);
    if len_diff > 3 {
        return false;
    }

    let common: usize = a
        .chars()
        .zip(b.chars())
        .filter(|(ca, cb)| ca == cb)
        .count();

    let max_len = a_len.max(b_len);
    if max_len == 0 {
        return true;
    }

    common * 100 / max_len >= 60
}

/// Generates "did you mean?" suggestions from the bound names.
///
/// Compares the requested name against available names and returns up
/// to `max_suggestions` close matches, best first.
///
/// ```
/// use bindery_support::rendering::suggest_similar;
///
/// let bound = ["db.pool", "db.migrations", "mailer"];
/// let hints = suggest_similar("db.pol", &bound, 3);
/// assert_eq!(hints[0], "db.pool");
/// ```
pub fn suggest_similar(
    requested: &str,
    available: &[&str],
    max_suggestions: usize,
) -> Vec<String> {
    if max_suggestions == 0 || requested.is_empty() {
        return Vec::new();
    }

    let requested_lower = requested.to_lowercase();
    let requested_last = last_segment(&requested_lower).to_string();

    let mut scored: Vec<(&str, usize)> = available
        .iter()
        .filter(|&&name| name != requested)
        .filter_map(|&name| {
            let name_lower = name.to_lowercase();
            let name_last = last_segment(&name_lower);

            // Whole-name substring match
            if name_lower.contains(&requested_lower)
                || requested_lower.contains(&name_lower)
            {
                return Some((name, 100));
            }

            if is_close(&name_lower, &requested_lower) {
                return Some((name, 90));
            }

            // Last segment match
            if !name_last.is_empty()
                && (name_last.contains(requested_last.as_str())
                    || requested_last.contains(name_last))
            {
                return Some((name, 80));
            }

            // Common prefix
            let common = name_lower
                .chars()
                .zip(requested_lower.chars())
                .take_while(|(a, b)| a == b)
                .count();

            if common >= 3 {
                return Some((name, common * 10));
            }

            None
        })
        .collect();

    // Stable on ties so the caller's ordering decides
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(name, _)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_several_names() {
        let names = vec!["a", "b", "c"];
        assert_eq!(render_names(&names), "a, b, c");
    }

    #[test]
    fn render_single_name() {
        assert_eq!(render_names(&["a"]), "a");
    }

    #[test]
    fn render_no_names() {
        let names: Vec<String> = vec![];
        assert_eq!(render_names(&names), "");
    }

    #[test]
    fn last_segment_of_dotted_name() {
        assert_eq!(last_segment("foo.bar"), "bar");
        assert_eq!(last_segment("foo."), "");
        assert_eq!(last_segment(""), "");
    }

    #[test]
    fn close_names() {
        assert!(is_close("user.service", "user.servise"));
        assert!(is_close("database", "databse"));
        assert!(!is_close("database", "logger"));
    }

    #[test]
    fn close_names_count_chars_not_bytes() {
        assert!(is_close("café.db", "cafe.db"));
        assert!(is_close("日本語", "日本人"));
        assert!(!is_close("日本語", "ab"));
    }

    #[test]
    fn suggest_typo() {
        let available = ["user.service", "user.repository", "logger", "database"];

        let suggestions = suggest_similar("user.servise", &available, 3);
        assert!(!suggestions.is_empty());
        assert_eq!(suggestions[0], "user.service");
    }

    #[test]
    fn suggest_by_last_segment() {
        let available = ["app.mailer", "app.database"];
        let suggestions = suggest_similar("mailer", &available, 3);
        assert_eq!(suggestions, vec!["app.mailer".to_string()]);
    }

    #[test]
    fn suggest_no_match() {
        let available = ["database"];
        assert!(suggest_similar("xyz", &available, 3).is_empty());
    }

    #[test]
    fn suggest_respects_limit() {
        let available = ["foo.a", "foo.b", "foo.c", "foo.d"];
        assert_eq!(suggest_similar("foo", &available, 2).len(), 2);
        assert!(suggest_similar("foo", &available, 0).is_empty());
    }

    #[test]
    fn suggest_skips_exact_name() {
        let available = ["foo"];
        assert!(suggest_similar("foo", &available, 3).is_empty());
    }
}
