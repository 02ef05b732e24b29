//! Process-wide reference data: ranked dictionaries and keyboard graphs.
//!
//! Loaded once at startup, never mutated afterwards, and shared by reference
//! (usually behind an `Arc`) with every evaluation.
//!
//! # Environment Variable
//!
//! Set `PWD_DICTIONARY_DIR` to load every `*.txt` file in that directory as a
//! ranked dictionary instead of the built-in lists.

mod dictionary;
mod keyboard;

use std::path::{Path, PathBuf};

pub use dictionary::RankedDictionary;
pub use keyboard::KeyboardGraph;

use crate::error::DictionaryLoadError;

pub const DICTIONARY_DIR_ENV: &str = "PWD_DICTIONARY_DIR";

const BUILTIN_DICTIONARIES: [(&str, &str); 3] = [
    ("passwords", include_str!("../../assets/passwords.txt")),
    ("english", include_str!("../../assets/english.txt")),
    ("names", include_str!("../../assets/names.txt")),
];

#[derive(Debug, Clone)]
pub struct ReferenceData {
    dictionaries: Vec<RankedDictionary>,
    keyboards: Vec<KeyboardGraph>,
}

impl ReferenceData {
    /// Reference data built from the embedded word lists.
    pub fn builtin() -> Result<Self, DictionaryLoadError> {
        let dictionaries = BUILTIN_DICTIONARIES
            .iter()
            .map(|(name, content)| {
                RankedDictionary::parse(*name, content, Path::new(name))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(dictionaries))
    }

    /// Loads every `*.txt` file in `dir`, in file name order.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, DictionaryLoadError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(DictionaryLoadError::FileNotFound(dir.to_path_buf()));
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(DictionaryLoadError::NoDictionaries(dir.to_path_buf()));
        }

        let dictionaries = paths
            .iter()
            .map(RankedDictionary::load_from_path)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(dictionaries))
    }

    /// Uses `PWD_DICTIONARY_DIR` when set, the built-in lists otherwise.
    ///
    /// The value is taken as an OS path, so a non-UTF-8 directory is loaded
    /// (or fails to load) like any other.
    pub fn from_env() -> Result<Self, DictionaryLoadError> {
        match std::env::var_os(DICTIONARY_DIR_ENV) {
            Some(dir) => Self::from_dir(PathBuf::from(dir)),
            None => Self::builtin(),
        }
    }

    /// Builds reference data over the given dictionaries and the standard
    /// keyboard graphs.
    pub fn new(dictionaries: Vec<RankedDictionary>) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!("Reference data ready: {} dictionaries", dictionaries.len());

        Self {
            dictionaries,
            keyboards: vec![KeyboardGraph::qwerty(), KeyboardGraph::keypad()],
        }
    }

    pub fn with_dictionary(mut self, dictionary: RankedDictionary) -> Self {
        self.dictionaries.push(dictionary);
        self
    }

    pub fn dictionaries(&self) -> &[RankedDictionary] {
        &self.dictionaries
    }

    pub fn keyboards(&self) -> &[KeyboardGraph] {
        &self.keyboards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_builtin_loads_all_lists() {
        let reference = ReferenceData::builtin().expect("builtin lists are well formed");
        let names: Vec<&str> = reference.dictionaries().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["passwords", "english", "names"]);
        assert_eq!(reference.dictionaries()[0].rank("password"), Some(1));
        assert!(reference.dictionaries()[0].rank("pass").is_some());
        assert_eq!(reference.keyboards().len(), 2);
    }

    #[test]
    fn test_from_dir_sorted_by_file_name() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("b_words.txt"), "zebra\n").expect("write");
        std::fs::write(dir.path().join("a_words.txt"), "apple\n").expect("write");
        std::fs::write(dir.path().join("notes.md"), "ignored\n").expect("write");

        let reference = ReferenceData::from_dir(dir.path()).expect("should load");
        let names: Vec<&str> = reference.dictionaries().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["a_words", "b_words"]);
    }

    #[test]
    fn test_from_dir_without_dictionaries() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let result = ReferenceData::from_dir(dir.path());
        assert!(matches!(result, Err(DictionaryLoadError::NoDictionaries(_))));
    }

    #[test]
    fn test_from_dir_propagates_corrupt_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("empty.txt"), "\n\n").expect("write");
        let result = ReferenceData::from_dir(dir.path());
        assert!(matches!(result, Err(DictionaryLoadError::EmptyFile(_))));
    }

    #[test]
    #[serial]
    fn test_from_env_missing_dir() {
        // SAFETY: environment access is serialized
        unsafe { std::env::set_var(DICTIONARY_DIR_ENV, "/nonexistent/dictionaries"); }
        let result = ReferenceData::from_env();
        assert!(matches!(result, Err(DictionaryLoadError::FileNotFound(_))));
        unsafe { std::env::remove_var(DICTIONARY_DIR_ENV); }
    }

    #[test]
    #[serial]
    fn test_from_env_loads_custom_dir() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("team.txt"), "zorglub\n").expect("write");

        unsafe { std::env::set_var(DICTIONARY_DIR_ENV, dir.path()); }
        let result = ReferenceData::from_env();
        unsafe { std::env::remove_var(DICTIONARY_DIR_ENV); }

        let reference = result.expect("custom dir loads");
        let names: Vec<&str> = reference.dictionaries().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["team"]);
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_from_env_non_utf8_dir_is_not_ignored() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = OsStr::from_bytes(b"/nonexistent/\xffdictionaries");
        unsafe { std::env::set_var(DICTIONARY_DIR_ENV, dir); }
        let result = ReferenceData::from_env();
        unsafe { std::env::remove_var(DICTIONARY_DIR_ENV); }

        assert!(matches!(result, Err(DictionaryLoadError::FileNotFound(_))));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_to_builtin() {
        unsafe { std::env::remove_var(DICTIONARY_DIR_ENV); }
        let reference = ReferenceData::from_env().expect("builtin");
        assert_eq!(reference.dictionaries().len(), 3);
    }
}
