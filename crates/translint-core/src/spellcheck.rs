//! Whitelist-backed spellchecking for metadata prose fields.
//!
//! The matching rule is deliberately simple: a token is acceptable iff its
//! lowercased form is a member of the base dictionary, the global whitelist,
//! or the whitelist for the file's language. No stemming, no suggestions.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::Path;

use crate::types::Language;

/// Filename of the whitelist that applies to every language.
const GLOBAL_WHITELIST: &str = "global.txt";

/// Spellchecker over a base dictionary plus per-language whitelists.
///
/// All word lists are loaded once at construction and are read-only after
/// that. A missing per-language whitelist is not an error; only the global
/// whitelist (and the dictionary) apply to that language.
#[derive(Debug)]
pub struct SpellChecker {
    dictionary: HashSet<String>,
    global: HashSet<String>,
    by_language: HashMap<String, HashSet<String>>,
}

impl SpellChecker {
    /// Load the base dictionary and every whitelist under `whitelist_dir`.
    ///
    /// Word list files hold one word per line; blank lines and `#` comments
    /// are ignored. `global.txt` is the global whitelist, any other
    /// `<language>.txt` is language-specific. Missing files and a missing
    /// whitelist directory yield empty sets.
    ///
    /// # Errors
    ///
    /// Returns any IO error other than the files simply not existing.
    pub fn load(dictionary: &Path, whitelist_dir: &Path) -> io::Result<Self> {
        let global = load_word_list(&whitelist_dir.join(GLOBAL_WHITELIST))?;

        let mut by_language = HashMap::new();
        if whitelist_dir.is_dir() {
            for entry in fs::read_dir(whitelist_dir)? {
                let path = entry?.path();
                if !path.extension().is_some_and(|e| e == "txt") {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if path.file_name().is_some_and(|n| n == GLOBAL_WHITELIST) {
                    continue;
                }
                by_language.insert(stem.to_lowercase(), load_word_list(&path)?);
            }
        }

        Ok(Self {
            dictionary: load_word_list(dictionary)?,
            global,
            by_language,
        })
    }

    /// The words in `text` not covered by any applicable word list.
    ///
    /// Tokens are contiguous runs of letters; each is lowercased before the
    /// membership check. Results keep first-occurrence order and are deduped
    /// by lowercased form. An empty result means the text passed.
    pub fn check(&self, text: &str, language: &Language) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut unknown = Vec::new();

        for token in tokenize(text) {
            let normalized = token.to_lowercase();
            if self.is_known(&normalized, language) {
                continue;
            }
            if seen.insert(normalized) {
                unknown.push(token.to_string());
            }
        }

        unknown
    }

    fn is_known(&self, normalized: &str, language: &Language) -> bool {
        self.dictionary.contains(normalized)
            || self.global.contains(normalized)
            || self
                .by_language
                .get(language.as_str())
                .is_some_and(|set| set.contains(normalized))
    }
}

/// Split `text` into contiguous alphabetic runs.
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|t| !t.is_empty())
}

/// Read a word-per-line file into a set of lowercased words.
///
/// A missing file is an empty set, not an error.
fn load_word_list(path: &Path) -> io::Result<HashSet<String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashSet::new()),
        Err(e) => return Err(e),
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture(dictionary: &str, whitelists: &[(&str, &str)]) -> (TempDir, SpellChecker) {
        let dir = TempDir::new().unwrap();
        let dict_path = dir.path().join("dictionary.txt");
        fs::write(&dict_path, dictionary).unwrap();

        let wl_dir = dir.path().join("whitelists");
        fs::create_dir(&wl_dir).unwrap();
        for (name, body) in whitelists {
            fs::write(wl_dir.join(name), body).unwrap();
        }

        let checker = SpellChecker::load(&dict_path, &wl_dir).unwrap();
        (dir, checker)
    }

    #[test]
    fn whitelisted_words_never_flagged() {
        let (_dir, checker) = fixture(
            "a\nfast\ntool\n",
            &[("global.txt", "yaml\n"), ("de.txt", "werkzeug\n")],
        );
        let de = Language::new("de");
        assert!(checker.check("Werkzeug YAML fast", &de).is_empty());
    }

    #[test]
    fn language_whitelist_does_not_leak_across_languages() {
        let (_dir, checker) = fixture("", &[("de.txt", "werkzeug\n")]);
        let unknown = checker.check("werkzeug", &Language::new("en"));
        assert_eq!(unknown, vec!["werkzeug"]);
    }

    #[test]
    fn unknown_words_deduped_in_first_occurrence_order() {
        let (_dir, checker) = fixture("the\n", &[]);
        let unknown = checker.check("the Frobnicator frobnicator gizmo", &Language::new("en"));
        assert_eq!(unknown, vec!["Frobnicator", "gizmo"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let (_dir, checker) = fixture("widget\n", &[]);
        assert!(checker.check("WIDGET Widget widget", &Language::new("en")).is_empty());
    }

    #[test]
    fn tokens_split_on_digits_and_punctuation() {
        let (_dir, checker) = fixture("utf\nready\n", &[]);
        // "utf8-ready" splits into "utf" and "ready"
        assert!(checker.check("utf8-ready!", &Language::new("en")).is_empty());
    }

    #[test]
    fn comments_and_blank_lines_ignored() {
        let (_dir, checker) = fixture("# test dictionary\n\n  spaced  \n", &[]);
        assert!(checker.check("spaced", &Language::new("en")).is_empty());
    }

    #[test]
    fn missing_whitelist_dir_is_empty_not_error() {
        let dir = TempDir::new().unwrap();
        let checker = SpellChecker::load(
            &dir.path().join("no-dictionary.txt"),
            &dir.path().join("no-whitelists"),
        )
        .unwrap();
        assert_eq!(
            checker.check("anything", &Language::new("en")),
            vec!["anything"]
        );
    }
}
