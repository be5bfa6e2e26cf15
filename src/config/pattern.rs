//! Matching check ids against `checks.disabled` entries.

/// Short names accepted in `checks.disabled` for built-in checks.
const CHECK_ALIASES: &[(&str, &str)] = &[
    ("dockerfile", "common:dockerfile"),
    ("ci", "common:ci"),
    ("license", "common:license"),
    ("files", "file_exists"),
];

/// Whether `check_id` matches a single disabled pattern.
///
/// Supported forms: an exact id, `*` (everything), `*:*` (any namespaced
/// id), `*:suffix` and `prefix:*`. Any other use of `*` matches nothing.
pub fn matches_pattern(check_id: &str, pattern: &str) -> bool {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return false;
    }

    if !pattern.contains('*') {
        return check_id == pattern;
    }

    match pattern {
        "*" => true,
        "*:*" => check_id.contains(':'),
        _ => {
            if let Some(suffix) = pattern.strip_prefix("*:") {
                !suffix.contains('*') && check_id.ends_with(&format!(":{}", suffix))
            } else if let Some(prefix) = pattern.strip_suffix(":*") {
                !prefix.contains('*') && check_id.starts_with(&format!("{}:", prefix))
            } else {
                false
            }
        }
    }
}

/// Whether any of `patterns` disables `check_id`, honouring short aliases.
pub fn is_disabled(check_id: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        matches_pattern(check_id, pattern)
            || CHECK_ALIASES
                .iter()
                .any(|(alias, id)| *alias == pattern.trim() && *id == check_id)
    })
}
