//! Language detection from marker files.

use std::collections::BTreeMap;
use std::path::Path;

use crate::checker::Language;
use crate::config::Config;
use crate::error::{Result, VettedError};
use crate::safepath;

/// Marker files that indicate each ecosystem.
pub fn indicators(language: Language) -> &'static [&'static str] {
    match language {
        Language::Go => &["go.mod", "go.sum"],
        Language::Python => &[
            "pyproject.toml",
            "setup.py",
            "requirements.txt",
            "Pipfile",
            "poetry.lock",
            "setup.cfg",
        ],
        Language::Node => &[
            "package.json",
            "package-lock.json",
            "yarn.lock",
            "pnpm-lock.yaml",
            "bun.lockb",
        ],
        Language::TypeScript => &["tsconfig.json"],
        Language::Java => &[
            "pom.xml",
            "build.gradle",
            "build.gradle.kts",
            "settings.gradle",
            "settings.gradle.kts",
            "mvnw",
            "gradlew",
        ],
        Language::Rust => &["Cargo.toml", "Cargo.lock"],
        Language::Swift => &["Package.swift"],
        Language::Common => &[],
    }
}

/// Languages found in a project and the files that gave them away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageDetection {
    /// Detected languages in [`Language::ALL`] order, or as declared.
    pub languages: Vec<Language>,
    /// Marker files per language. Empty when languages were declared.
    pub indicators: BTreeMap<Language, Vec<String>>,
}

impl LanguageDetection {
    /// The first detected language.
    pub fn primary(&self) -> Option<Language> {
        self.languages.first().copied()
    }

    pub fn is_multi_language(&self) -> bool {
        self.languages.len() > 1
    }

    pub fn has(&self, language: Language) -> bool {
        self.languages.contains(&language)
    }
}

/// Scan `root` for marker files.
pub fn detect(root: &Path) -> LanguageDetection {
    let mut detection = LanguageDetection::default();

    for language in Language::ALL {
        let found: Vec<String> = indicators(language)
            .iter()
            .filter(|marker| safepath::exists(root, marker))
            .map(|marker| marker.to_string())
            .collect();
        if !found.is_empty() {
            detection.languages.push(language);
            detection.indicators.insert(language, found);
        }
    }

    tracing::debug!(languages = ?detection.languages, "detected languages");
    detection
}

/// Declared languages win over detection.
pub fn detect_with_override(root: &Path, explicit: &[Language]) -> LanguageDetection {
    if explicit.is_empty() {
        return detect(root);
    }
    LanguageDetection {
        languages: explicit.to_vec(),
        indicators: BTreeMap::new(),
    }
}

/// Languages for a run, honouring `language.explicit` and `language.auto_detect`.
pub fn detect_for_config(root: &Path, config: &Config) -> Result<LanguageDetection> {
    let explicit = config
        .language
        .explicit
        .iter()
        .map(|name| {
            name.parse::<Language>()
                .map_err(|message| VettedError::ConfigValidationError { message })
        })
        .collect::<Result<Vec<_>>>()?;

    if explicit.is_empty() && !config.language.auto_detect {
        return Ok(LanguageDetection::default());
    }
    Ok(detect_with_override(root, &explicit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_project_has_no_languages() {
        let temp = TempDir::new().unwrap();
        let detection = detect(temp.path());
        assert!(detection.languages.is_empty());
        assert_eq!(detection.primary(), None);
    }

    #[test]
    fn detects_multiple_languages_in_stable_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{}").unwrap();
        fs::write(temp.path().join("tsconfig.json"), "{}").unwrap();
        fs::write(temp.path().join("go.mod"), "module x").unwrap();

        let detection = detect(temp.path());
        assert_eq!(
            detection.languages,
            vec![Language::Go, Language::Node, Language::TypeScript]
        );
        assert_eq!(detection.primary(), Some(Language::Go));
        assert!(detection.is_multi_language());
        assert_eq!(detection.indicators[&Language::Go], vec!["go.mod"]);
    }

    #[test]
    fn explicit_languages_skip_detection() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("go.mod"), "module x").unwrap();

        let detection = detect_with_override(temp.path(), &[Language::Rust]);
        assert_eq!(detection.languages, vec![Language::Rust]);
        assert!(detection.indicators.is_empty());
    }

    #[test]
    fn config_can_disable_detection() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Cargo.toml"), "[package]").unwrap();

        let mut config = Config::default();
        config.language.auto_detect = false;
        assert!(detect_for_config(temp.path(), &config)
            .unwrap()
            .languages
            .is_empty());

        config.language.explicit = vec!["golang".into()];
        assert_eq!(
            detect_for_config(temp.path(), &config).unwrap().languages,
            vec![Language::Go]
        );
    }

    #[test]
    fn config_with_unknown_language_errors() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.language.explicit = vec!["cobol".into()];
        assert!(detect_for_config(temp.path(), &config).is_err());
    }
}
