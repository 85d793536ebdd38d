//! Subtitle language detection from file names.

/// Subtitle language with its ISO 639-1 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    /// Lowercase English name matched against file names.
    pub name: &'static str,
}

/// Languages recognized in subtitle file names, in matching order.
pub const LANGUAGES: [Language; 24] = [
    Language::new("en", "english"),
    Language::new("es", "spanish"),
    Language::new("fr", "french"),
    Language::new("pt", "portuguese"),
    Language::new("ru", "russian"),
    Language::new("it", "italian"),
    Language::new("de", "german"),
    Language::new("nl", "dutch"),
    Language::new("ja", "japanese"),
    Language::new("ar", "arabic"),
    Language::new("zh", "chinese"),
    Language::new("ko", "korean"),
    Language::new("bg", "bulgarian"),
    Language::new("cs", "czech"),
    Language::new("da", "danish"),
    Language::new("fi", "finnish"),
    Language::new("hu", "hungarian"),
    Language::new("pl", "polish"),
    Language::new("ro", "romanian"),
    Language::new("sl", "slovenian"),
    Language::new("sv", "swedish"),
    Language::new("tr", "turkish"),
    Language::new("he", "hebrew"),
    Language::new("no", "norwegian"),
];

impl Language {
    const fn new(code: &'static str, name: &'static str) -> Self {
        Self { code, name }
    }

    /// Language name with the first letter in uppercase, e.g. "English".
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect::<String>()
        })
    }
}

/// Find all languages whose name appears in the given file name, ignoring case.
///
/// Returned in table order. Empty if nothing matches.
#[must_use]
pub fn detect_languages(file_name: &str) -> Vec<Language> {
    let lowercase = file_name.to_lowercase();
    LANGUAGES
        .iter()
        .filter(|language| lowercase.contains(language.name))
        .copied()
        .collect()
}

#[cfg(test)]
mod language_tests {
    use super::*;

    #[test]
    fn detects_language_case_insensitive() {
        let languages = detect_languages("3_ENGLISH.srt");
        assert_eq!(languages.len(), 1);
        assert_eq!(languages[0].code, "en");
    }

    #[test]
    fn detects_extended_languages() {
        assert_eq!(detect_languages("12_Norwegian.srt")[0].code, "no");
        assert_eq!(detect_languages("Slovenian.srt")[0].code, "sl");
    }

    #[test]
    fn unknown_language_is_empty() {
        assert!(detect_languages("4_Klingon.srt").is_empty());
        assert!(detect_languages("sub.srt").is_empty());
    }

    #[test]
    fn multiple_matches_follow_table_order() {
        let codes: Vec<&str> = detect_languages("German.and.English.srt")
            .iter()
            .map(|language| language.code)
            .collect();
        assert_eq!(codes, vec!["en", "de"]);
    }

    #[test]
    fn display_name_is_capitalized() {
        assert_eq!(LANGUAGES[0].display_name(), "English");
        assert_eq!(LANGUAGES[23].display_name(), "Norwegian");
    }
}
