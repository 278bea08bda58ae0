//! Wiring for the default oracles

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::config::UsernameConfig;
use crate::domain::username::{FingerprintNormalizer, UsernameValidator, ValidationResult};
use crate::domain::DomainError;

use super::confusables::ConfusableTable;
use super::decorative::TransliteratingFlattener;
use super::word_list::WordListOracle;

/// Normalizer over the built-in tables
pub fn default_normalizer() -> FingerprintNormalizer {
    FingerprintNormalizer::new(
        Arc::new(ConfusableTable::builtin()),
        Arc::new(TransliteratingFlattener::new()),
        Arc::new(WordListOracle::builtin()),
    )
}

/// Validator over the built-in tables with the default limits
pub fn default_validator() -> UsernameValidator {
    UsernameValidator::new(default_normalizer())
}

static DEFAULT_VALIDATOR: Lazy<UsernameValidator> = Lazy::new(default_validator);

/// Fingerprint of `raw` under the built-in tables; `None` when prohibited
pub fn normalize_fingerprint(raw: &str) -> Option<String> {
    DEFAULT_VALIDATOR
        .normalizer()
        .normalize(raw)
        .map(|fp| fp.into_inner())
}

/// Validate `raw` under the built-in tables and default limits
pub fn validate_username(raw: &str) -> ValidationResult {
    DEFAULT_VALIDATOR.validate(raw)
}

/// Normalizer with the built-in tables extended from configuration
pub fn build_normalizer(config: &UsernameConfig) -> Result<FingerprintNormalizer, DomainError> {
    let confusables = ConfusableTable::builtin().with_extra(parse_confusables(config)?);

    let mut words = WordListOracle::builtin();
    if let Some(path) = &config.prohibited_words_path {
        words = words.extend(WordListOracle::load(path)?);
    }
    words = words.extend(WordListOracle::from_words(&config.extra_prohibited_words));

    tracing::debug!(
        confusables = confusables.len(),
        prohibited_words = words.len(),
        "Username tables loaded"
    );

    Ok(FingerprintNormalizer::new(
        Arc::new(confusables),
        Arc::new(TransliteratingFlattener::new()),
        Arc::new(words),
    ))
}

/// Validator built from configuration
pub fn build_validator(config: &UsernameConfig) -> Result<UsernameValidator, DomainError> {
    let policy = config.policy();

    if policy.min_length > policy.max_length {
        return Err(DomainError::configuration(format!(
            "username.min_length ({}) exceeds username.max_length ({})",
            policy.min_length, policy.max_length
        )));
    }

    Ok(UsernameValidator::with_policy(
        build_normalizer(config)?,
        policy,
    ))
}

fn parse_confusables(config: &UsernameConfig) -> Result<Vec<(char, char)>, DomainError> {
    config
        .extra_confusables
        .iter()
        .map(|(from, to)| match (single_char(from), single_char(to)) {
            (Some(from), Some(to)) => Ok((from, to)),
            _ => Err(DomainError::configuration(format!(
                "Confusable mapping '{}' -> '{}' must map one character to one character",
                from, to
            ))),
        })
        .collect()
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::username::{RejectionReason, UsernameErrorCode};
    use regex::Regex;
    use std::io::Write;

    fn normalize(raw: &str) -> Option<String> {
        normalize_fingerprint(raw)
    }

    #[test]
    fn test_lookalike_collisions() {
        assert_eq!(normalize("PaypaI").as_deref(), Some("paypal"));
        assert_eq!(normalize("Paypal").as_deref(), Some("paypal"));
        assert_eq!(normalize("G00g1e").as_deref(), Some("google"));
    }

    #[test]
    fn test_stylized_digits_collide_with_ascii() {
        assert_eq!(
            normalize("\u{FF27}\u{FF10}\u{FF10}\u{FF47}\u{FF11}\u{FF45}").as_deref(),
            Some("google")
        );
        assert_eq!(
            normalize("G\u{1D7CE}\u{1D7CE}g\u{1D7CF}e").as_deref(),
            Some("google")
        );
        assert_eq!(normalize("G\u{2070}\u{2070}gle").as_deref(), Some("google"));
        assert_eq!(normalize("\u{A4D4}est").as_deref(), Some("test"));
    }

    #[test]
    fn test_leet_folding() {
        assert_eq!(normalize("h4ck3r").as_deref(), Some("hacker"));
        assert_eq!(normalize("7es7").as_deref(), Some("test"));
    }

    #[test]
    fn test_prohibited_content() {
        assert_eq!(normalize("fuck"), None);
        assert_eq!(normalize("5hit"), None);
        assert_eq!(normalize("Bull 5hit"), None);
        assert!(normalize("Scunthorpe").is_none());
        assert_eq!(normalize("peacock").as_deref(), Some("peacock"));
    }

    #[test]
    fn test_stylised_alphabets_collapse() {
        // Fullwidth
        assert_eq!(
            normalize("\u{FF30}\u{FF41}\u{FF59}\u{FF50}\u{FF41}\u{FF4C}").as_deref(),
            Some("paypal")
        );
        // Mathematical bold
        assert_eq!(
            normalize("\u{1D40F}\u{1D41A}\u{1D432}\u{1D429}\u{1D41A}\u{1D425}").as_deref(),
            Some("paypal")
        );
        // Circled
        assert_eq!(
            normalize("\u{24C5}\u{24D0}\u{24E8}\u{24DF}\u{24D0}\u{24DB}").as_deref(),
            Some("paypal")
        );
    }

    #[test]
    fn test_cross_script_homoglyphs() {
        assert_eq!(
            normalize("\u{0440}\u{0430}\u{0443}\u{0440}\u{0430}l").as_deref(),
            Some("paypal")
        );
        assert_eq!(normalize("\u{0410}pple").as_deref(), Some("apple"));
    }

    #[test]
    fn test_emoji_is_dropped_by_default_flattener() {
        let result = normalize("John\u{1F600}Doe").unwrap();
        assert!(result.starts_with("john"), "got {result}");
        assert!(result.ends_with("doe"), "got {result}");
    }

    #[test]
    fn test_output_format() {
        let pattern = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
        let inputs = [
            "  John   Doe ",
            "__x__y__",
            "Ünïcödé Nämé",
            "a.b,c;d",
            "ＭＩＸＥＤ case",
            "\u{0430}\u{0431}\u{0432}",
            "tab\there",
            "Ω mega",
            "42",
        ];

        for raw in inputs {
            if let Some(fp) = normalize(raw) {
                assert!(fp.is_empty() || pattern.is_match(&fp), "{raw:?} -> {fp:?}");
            }
        }
    }

    #[test]
    fn test_determinism_across_instances() {
        let first = default_normalizer();
        let second = default_normalizer();

        for raw in ["PaypaI", "h4ck3r", "Jos\u{E9} Mar\u{ED}a", "\u{1D40F}\u{1D41A}y"] {
            assert_eq!(first.normalize(raw), second.normalize(raw));
        }
    }

    #[test]
    fn test_validation_is_idempotent() {
        let validator = default_validator();

        for raw in ["PaypaI", "John Doe", "h4ck3r", "Ren\u{E9}e_99"] {
            let first = validator.validate(raw);
            let fingerprint = first.fingerprint.clone().unwrap();
            let second = validator.validate(fingerprint.as_str());

            assert!(second.valid, "{raw}");
            assert_eq!(second.fingerprint, Some(fingerprint));
        }
    }

    #[test]
    fn test_shared_default_matches_fresh_instance() {
        for raw in ["John Doe", "5hit", "!!!", "G00g1e"] {
            assert_eq!(validate_username(raw), default_validator().validate(raw));
        }
    }

    #[test]
    fn test_validator_examples() {
        let validator = default_validator();

        assert!(!validator.validate("!!!").valid);
        assert!(!validator.validate("a!!").valid);
        assert!(validator.validate("cafe\u{0301}\u{0301}").valid);
        assert!(!validator.validate("cafe\u{0301}\u{0301}\u{0301}").valid);
        assert_eq!(
            validator.check("fuck"),
            Err(RejectionReason::ProhibitedContent)
        );

        let rejected = validator.validate("5hit");
        assert_eq!(rejected.error, Some(UsernameErrorCode::UsernameNotAvailable));
        assert!(rejected.fingerprint.is_none());
    }

    #[test]
    fn test_length_counts_code_points() {
        let validator = default_validator();
        let bold_a = "\u{1D41A}";

        assert!(validator.validate(&bold_a.repeat(3)).valid);
        assert!(validator.validate(&bold_a.repeat(30)).valid);
        assert_eq!(
            validator.check(&bold_a.repeat(31)),
            Err(RejectionReason::TooLong(30))
        );
    }

    #[test]
    fn test_build_from_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# local additions").unwrap();
        writeln!(file, "*zebra").unwrap();

        let config = UsernameConfig {
            max_length: 12,
            prohibited_words_path: Some(file.path().to_path_buf()),
            extra_prohibited_words: vec!["walrus".to_string()],
            extra_confusables: [("\u{263A}".to_string(), "l".to_string())]
                .into_iter()
                .collect(),
            ..UsernameConfig::default()
        };

        let validator = build_validator(&config).unwrap();

        assert_eq!(validator.policy().max_length, 12);
        assert!(!validator.validate("bigzebras").valid);
        assert!(!validator.validate("the walrus").valid);
        assert!(!validator.validate("fuck").valid);
        assert_eq!(
            validator.validate("pa\u{263A}").fingerprint.map(|fp| fp.into_inner()),
            Some("pal".to_string())
        );
    }

    #[test]
    fn test_build_rejects_bad_confusable() {
        let config = UsernameConfig {
            extra_confusables: [("ab".to_string(), "c".to_string())].into_iter().collect(),
            ..UsernameConfig::default()
        };

        assert!(matches!(
            build_validator(&config),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_build_rejects_inverted_limits() {
        let config = UsernameConfig {
            min_length: 10,
            max_length: 5,
            ..UsernameConfig::default()
        };

        assert!(build_validator(&config).is_err());
    }

    #[test]
    fn test_build_missing_word_file() {
        let config = UsernameConfig {
            prohibited_words_path: Some("/nonexistent/words.txt".into()),
            ..UsernameConfig::default()
        };

        assert!(build_normalizer(&config).is_err());
    }
}
