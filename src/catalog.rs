//! Subject discovery under the resource root.
//!
//! A subject is one question file (`*.txt`) inside the `materia/` directory.
//! When the root carries a `manifest.json` it is taken as the authoritative
//! list, keeping its order and display names; otherwise the directory is
//! scanned and subjects are sorted by file stem.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// A named question set backed by a file under the resource root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    pub path: PathBuf,
}

/// The subjects available for loading, in display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    subjects: Vec<Subject>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("não foi possível ler {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("manifest inválido em {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct ManifestEntry {
    name: String,
    file: String,
}

impl Catalog {
    /// Enumerate the subjects under `root`. A `manifest.json` in the root
    /// takes precedence over the `*.txt` scan; entries pointing at missing
    /// files are kept so the failure surfaces at load time like any other
    /// unreadable subject.
    pub fn scan<P: AsRef<Path>>(root: P) -> Result<Self, CatalogError> {
        let root = root.as_ref();
        let manifest = root.join("manifest.json");

        let subjects = if manifest.is_file() {
            from_manifest(root, &manifest)?
        } else {
            from_directory(root)?
        };

        Ok(Self { subjects })
    }

    #[cfg(test)]
    pub(crate) fn from_subjects(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Position of the subject with the given display name, if any.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.subjects.iter().position(|subject| subject.name == name)
    }
}

fn from_manifest(root: &Path, path: &Path) -> Result<Vec<Subject>, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let entries: Vec<ManifestEntry> =
        serde_json::from_str(&raw).map_err(|source| CatalogError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(entries
        .into_iter()
        .map(|entry| Subject {
            name: entry.name,
            path: root.join(entry.file),
        })
        .collect())
}

fn from_directory(root: &Path) -> Result<Vec<Subject>, CatalogError> {
    let entries = fs::read_dir(root).map_err(|source| CatalogError::Read {
        path: root.to_path_buf(),
        source,
    })?;

    let mut subjects = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CatalogError::Read {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.extension().and_then(|extension| extension.to_str()) != Some("txt") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };

        subjects.push(Subject {
            name: stem.to_string(),
            path,
        });
    }

    subjects.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(subjects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    struct TempRoot(PathBuf);

    impl TempRoot {
        fn new() -> Self {
            let root = std::env::temp_dir().join(format!("simulado-catalog-{}", Uuid::new_v4()));
            fs::create_dir_all(&root).unwrap();
            Self(root)
        }

        fn write(&self, name: &str, contents: &str) {
            fs::write(self.0.join(name), contents).unwrap();
        }
    }

    impl Drop for TempRoot {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn scans_txt_files_sorted_by_stem() {
        let root = TempRoot::new();
        root.write("portugues.txt", "");
        root.write("matematica.txt", "");
        root.write("notas.md", "");

        let catalog = Catalog::scan(&root.0).unwrap();
        let names: Vec<&str> = catalog
            .subjects()
            .iter()
            .map(|subject| subject.name.as_str())
            .collect();
        assert_eq!(names, ["matematica", "portugues"]);
    }

    #[test]
    fn manifest_overrides_the_scan_order() {
        let root = TempRoot::new();
        root.write("a.txt", "");
        root.write("b.txt", "");
        root.write(
            "manifest.json",
            r#"[
                {"name": "Matemática", "file": "b.txt"},
                {"name": "Português", "file": "a.txt"}
            ]"#,
        );

        let catalog = Catalog::scan(&root.0).unwrap();
        let names: Vec<&str> = catalog
            .subjects()
            .iter()
            .map(|subject| subject.name.as_str())
            .collect();
        assert_eq!(names, ["Matemática", "Português"]);
        assert_eq!(catalog.subjects()[0].path, root.0.join("b.txt"));
    }

    #[test]
    fn manifest_keeps_entries_for_missing_files() {
        let root = TempRoot::new();
        root.write(
            "manifest.json",
            r#"[{"name": "Fantasma", "file": "fantasma.txt"}]"#,
        );

        let catalog = Catalog::scan(&root.0).unwrap();
        assert_eq!(catalog.subjects().len(), 1);
        assert_eq!(catalog.subjects()[0].name, "Fantasma");
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        let root = TempRoot::new();
        root.write("manifest.json", "{ not json ]");

        assert!(matches!(
            Catalog::scan(&root.0),
            Err(CatalogError::Manifest { .. })
        ));
    }

    #[test]
    fn missing_root_is_an_error() {
        let root = std::env::temp_dir().join(format!("simulado-none-{}", Uuid::new_v4()));
        assert!(matches!(Catalog::scan(&root), Err(CatalogError::Read { .. })));
    }

    #[test]
    fn position_of_matches_display_names() {
        let root = TempRoot::new();
        root.write("historia.txt", "");
        root.write("geografia.txt", "");

        let catalog = Catalog::scan(&root.0).unwrap();
        assert_eq!(catalog.position_of("historia"), Some(1));
        assert_eq!(catalog.position_of("química"), None);
    }
}
