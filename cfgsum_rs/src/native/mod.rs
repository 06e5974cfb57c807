//! Best-effort mining of native (C++) calculator sources.
//!
//! Two facts are extracted without a grammar:
//! - registration pairs from files whose name contains the register marker
//!   ([`register::extract_registrations`]),
//! - settings read with their defaults from every other file's `init` routine
//!   ([`defaults::DefaultsExtractor`]).
//!
//! Both locate their routine with [`scanner::extract_body`]. Each file is
//! mined into its own [`NativeFile`] value; [`NativeIndex::fold`] merges them.

pub mod defaults;
mod regexes;
pub mod register;
pub mod scanner;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::NativeConfig;
use crate::fs_utils::read_source_lossy;
use crate::types::{DefaultPropertyEntry, RegistrationEntry};

use defaults::{DefaultsExtractor, implementation_key};
use register::extract_registrations;

/// What one native file contributed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NativeFile {
    Registrations {
        path: PathBuf,
        entries: Vec<RegistrationEntry>,
    },
    Defaults(DefaultPropertyEntry),
}

/// Registration and default facts from all native files of a run.
#[derive(Clone, Debug, Default)]
pub struct NativeIndex {
    /// Registration files in input order with the entries each declared.
    pub registrations: Vec<(PathBuf, Vec<RegistrationEntry>)>,
    /// One merged entry per implementation id, in first-seen order.
    pub defaults: Vec<DefaultPropertyEntry>,
}

impl NativeIndex {
    pub fn fold(files: impl IntoIterator<Item = NativeFile>) -> Self {
        let mut index = Self::default();
        for file in files {
            match file {
                NativeFile::Registrations { path, entries } => {
                    index.registrations.push((path, entries));
                }
                NativeFile::Defaults(entry) => index.merge_defaults(entry),
            }
        }
        index
    }

    /// Merges a header and its source (`Foo.h`, `Foo.cpp`) under one id;
    /// the first file to declare a property keeps its default.
    fn merge_defaults(&mut self, entry: DefaultPropertyEntry) {
        match self
            .defaults
            .iter_mut()
            .find(|d| d.implementation_id == entry.implementation_id)
        {
            Some(existing) => {
                for (name, value) in entry.properties {
                    if !existing.properties.iter().any(|(n, _)| *n == name) {
                        existing.properties.push((name, value));
                    }
                }
            }
            None => self.defaults.push(entry),
        }
    }

    /// Defaults declared for `calculator_type` (compared case-insensitively).
    pub fn defaults_for(&self, calculator_type: &str) -> Option<&DefaultPropertyEntry> {
        let key = calculator_type.to_lowercase();
        self.defaults.iter().find(|d| d.implementation_id == key)
    }

    pub fn registration_count(&self) -> usize {
        self.registrations.iter().map(|(_, e)| e.len()).sum()
    }
}

/// Routes native files to the matching extractor.
pub struct NativeMiner {
    defaults: DefaultsExtractor,
    register_marker: String,
    implementation_suffix: String,
}

impl NativeMiner {
    pub fn from_config(config: &NativeConfig) -> Self {
        Self {
            defaults: DefaultsExtractor::new(&config.tag_variable, config.default_literal),
            register_marker: config.register_file_marker.to_lowercase(),
            implementation_suffix: config.implementation_suffix.clone(),
        }
    }

    pub fn is_register_file(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .is_some_and(|name| name.contains(&self.register_marker))
    }

    /// Mine `content` as if read from `path`.
    pub fn mine_source(&self, path: &Path, content: &str) -> NativeFile {
        if self.is_register_file(path) {
            let entries = extract_registrations(content);
            if entries.is_empty() {
                debug!("no registration routine found in {}", path.display());
            }
            return NativeFile::Registrations {
                path: path.to_path_buf(),
                entries,
            };
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let properties = self.defaults.extract(content);
        if properties.is_empty() {
            debug!("no init settings found in {}", path.display());
        }
        NativeFile::Defaults(DefaultPropertyEntry {
            implementation_id: implementation_key(&stem, &self.implementation_suffix),
            properties,
        })
    }

    /// Read and mine `path`; missing or unreadable files are skipped.
    pub fn mine_file(&self, path: &Path) -> Option<NativeFile> {
        if !path.is_file() {
            warn!("native source {} not found, skipping", path.display());
            return None;
        }
        match read_source_lossy(path) {
            Ok(content) => Some(self.mine_source(path, &content)),
            Err(e) => {
                warn!("failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn mine_all(&self, paths: &[PathBuf]) -> NativeIndex {
        NativeIndex::fold(paths.iter().filter_map(|p| self.mine_file(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn miner() -> NativeMiner {
        NativeMiner::from_config(&NativeConfig::default())
    }

    #[test]
    fn routes_register_files_case_insensitively() {
        let miner = miner();
        assert!(miner.is_register_file(Path::new("src/CalcRegister.cpp")));
        assert!(miner.is_register_file(Path::new("REGISTER.cpp")));
        assert!(!miner.is_register_file(Path::new("src/FooCalculator.cpp")));
    }

    #[test]
    fn defaults_are_keyed_by_normalised_stem() {
        let content = r#"void FooCalculator::init() { a = vm->GetIntSetting(m_cfgTag + ".n", 3); }"#;
        let mined = miner().mine_source(Path::new("lib/FooCalculator.cpp"), content);
        match mined {
            NativeFile::Defaults(entry) => {
                assert_eq!(entry.implementation_id, "foo");
                assert_eq!(entry.properties, vec![("n".to_string(), "3".to_string())]);
            }
            other => panic!("expected defaults, got {other:?}"),
        }
    }

    #[test]
    fn fold_merges_defaults_first_wins() {
        let index = NativeIndex::fold(vec![
            NativeFile::Defaults(DefaultPropertyEntry {
                implementation_id: "foo".into(),
                properties: vec![("a".into(), "1".into())],
            }),
            NativeFile::Defaults(DefaultPropertyEntry {
                implementation_id: "foo".into(),
                properties: vec![("a".into(), "2".into()), ("b".into(), "3".into())],
            }),
        ]);
        assert_eq!(index.defaults.len(), 1);
        assert_eq!(
            index.defaults_for("FOO").map(|d| d.properties.clone()),
            Some(vec![("a".into(), "1".into()), ("b".into(), "3".into())])
        );
    }

    #[test]
    fn missing_files_are_skipped() {
        let temp = TempDir::new().expect("temp dir");
        let register = temp.path().join("Register.cpp");
        std::fs::write(
            &register,
            r#"void F::Register() { Registrator<Calculator> r("Foo", ObjectFactory<Calculator>::DFactoryMethod<FooCalculator>); }"#,
        )
        .expect("write register");

        let index = miner().mine_all(&[temp.path().join("Gone.cpp"), register.clone()]);
        assert_eq!(index.registrations.len(), 1);
        assert_eq!(index.registrations[0].0, register);
        assert_eq!(index.registration_count(), 1);
    }

    #[test]
    fn latin1_register_file_keeps_its_registrations() {
        let temp = TempDir::new().expect("temp dir");
        let register = temp.path().join("Register.cpp");
        let mut content = b"// Auteur: R\xE9gis\n".to_vec();
        content.extend_from_slice(
            br#"void F::Register() { Registrator<Calculator> r("Foo", ObjectFactory<Calculator>::DFactoryMethod<FooCalculator>); }"#,
        );
        std::fs::write(&register, content).expect("write register");

        let index = miner().mine_all(&[register]);
        assert_eq!(index.registration_count(), 1);
        assert_eq!(index.registrations[0].1[0].registered_name, "Foo");
    }
}
