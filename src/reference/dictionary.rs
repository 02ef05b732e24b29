//! Ranked dictionary loading and lookup.
//!
//! A dictionary file holds one word per line, most common first. The rank of
//! a word is the line number of its first occurrence (1-based).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::DictionaryLoadError;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedDictionary {
    name: String,
    ranks: HashMap<String, usize>,
    max_word_len: usize,
}

impl RankedDictionary {
    /// Builds a dictionary from words in frequency order.
    ///
    /// Words are trimmed and lowercased. The rank is the 1-based position of
    /// the first occurrence; empty entries are not stored but still take
    /// their position.
    pub fn from_words<I, S>(name: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ranks = HashMap::new();
        let mut max_word_len = 0;
        for (index, word) in words.into_iter().enumerate() {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            max_word_len = max_word_len.max(word.chars().count());
            ranks.entry(word).or_insert(index + 1);
        }
        Self {
            name: name.into(),
            ranks,
            max_word_len,
        }
    }

    /// Parses dictionary file content.
    ///
    /// `path` is only used for error reporting.
    pub fn parse(
        name: impl Into<String>,
        content: &str,
        path: &Path,
    ) -> Result<Self, DictionaryLoadError> {
        if content.trim().is_empty() {
            return Err(DictionaryLoadError::EmptyFile(path.to_path_buf()));
        }

        for (index, line) in content.lines().enumerate() {
            let word = line.trim();
            if word.chars().any(char::is_whitespace) {
                return Err(DictionaryLoadError::Malformed {
                    path: path.to_path_buf(),
                    line: index + 1,
                    reason: "entry contains whitespace".to_string(),
                });
            }
            if word.contains('\0') {
                return Err(DictionaryLoadError::Malformed {
                    path: path.to_path_buf(),
                    line: index + 1,
                    reason: "entry contains a NUL character".to_string(),
                });
            }
        }

        Ok(Self::from_words(name, content.lines()))
    }

    /// Loads a dictionary file; the dictionary is named after the file stem.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryLoadError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Dictionary load FAILED: FileNotFound {:?}", path);
            return Err(DictionaryLoadError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let name = dictionary_name(path);
        let dictionary = Self::parse(name, &content, path)?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Dictionary loaded: {} ({} words) from {:?}",
            dictionary.name,
            dictionary.len(),
            path
        );

        Ok(dictionary)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rank of an already lowercased word.
    pub fn rank(&self, word: &str) -> Option<usize> {
        self.ranks.get(word).copied()
    }

    /// Longest entry, in characters.
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

fn dictionary_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| PathBuf::from(path).display().to_string())
}
