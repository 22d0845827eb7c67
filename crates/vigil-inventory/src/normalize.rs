//! Identity and environment normalization.
//!
//! Both inventories are human-maintained, so names and environment tags
//! disagree on casing, separators, and generic suffixes ("srv", "prod").
//! Normalization strips exactly that noise so the comparator can treat
//! `Trading-Srv-DB` and `trading db` as the same identity.

use std::sync::LazyLock;

/// Generic infrastructure tokens carrying no identity, longest first.
static GENERIC_TOKENS: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\b(?:production|prod|development|dev|server|srv|staging|stg)\b")
        .expect("GENERIC_TOKENS is a valid regex pattern")
});

/// One-or-more whitespace runs.
static WHITESPACE_RUNS: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\s+").expect("WHITESPACE_RUNS is a valid regex pattern"));

/// Normalize an asset name for identity comparison.
///
/// Lowercases, collapses `-`/`_` separators to spaces, strips generic
/// infrastructure tokens, collapses whitespace runs, and trims. Distinct
/// assets can normalize to the same string; the comparator accepts that
/// and leaves disambiguation to the reviewing operator.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    let lowered = raw.to_lowercase().replace(['-', '_'], " ");
    let stripped = GENERIC_TOKENS.replace_all(&lowered, " ");
    WHITESPACE_RUNS.replace_all(&stripped, " ").trim().to_string()
}

/// Normalize an environment tag for comparison.
///
/// Lowercases and collapses the long forms `production`/`development` onto
/// `prod`/`dev`, so the two inventories' conventions compare equal.
#[must_use]
pub fn normalize_environment(raw: &str) -> String {
    raw.to_lowercase()
        .replace("production", "prod")
        .replace("development", "dev")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lowercases_and_splits_separators() {
        assert_eq!(normalize_name("Trading-DB"), "trading db");
        assert_eq!(normalize_name("File_Share_01"), "file share 01");
    }

    #[test]
    fn test_name_strips_generic_tokens() {
        assert_eq!(normalize_name("Trading-Srv-DB"), "trading db");
        assert_eq!(normalize_name("prod-web-server-02"), "web 02");
        assert_eq!(normalize_name("Staging_APP_srv"), "app");
    }

    #[test]
    fn test_name_token_strip_is_word_bounded() {
        // "developer" contains "dev" but is not a generic token
        assert_eq!(normalize_name("developer-tools"), "developer tools");
        // "srvx" is not "srv"
        assert_eq!(normalize_name("srvx-01"), "srvx 01");
    }

    #[test]
    fn test_name_collapses_whitespace_after_strip() {
        assert_eq!(normalize_name("Trading  Srv   DB"), "trading db");
    }

    #[test]
    fn test_name_can_normalize_to_empty() {
        // All-generic names degrade to an empty identity; the comparator
        // accepts the resulting loose matches rather than special-casing.
        assert_eq!(normalize_name("Prod-Server"), "");
    }

    #[test]
    fn test_environment_collapses_long_forms() {
        assert_eq!(normalize_environment("Production"), "prod");
        assert_eq!(normalize_environment("prod"), "prod");
        assert_eq!(normalize_environment("DEVELOPMENT"), "dev");
        assert_eq!(normalize_environment("dev"), "dev");
    }

    #[test]
    fn test_environment_preserves_other_tags() {
        assert_eq!(normalize_environment("UAT"), "uat");
        assert_eq!(normalize_environment("pre-production"), "pre-prod");
    }
}
