//! Source file scanner for discovering template components.
//!
//! Lists the component directory (optionally recursively, respecting
//! `.gitignore`), keeps files with a configured extension whose stem is a
//! valid component identifier, and reads each one once.

use crate::error::{CliResult, ScanError};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};

/// A discovered component file with its content.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path to the file.
    pub path: PathBuf,

    /// Path relative to the scan root.
    pub relative_path: PathBuf,

    /// Component name, taken from the file stem.
    pub component: String,

    /// File content.
    pub content: String,
}

/// Scanner for discovering component source files.
#[derive(Debug)]
pub struct SourceScanner {
    /// Root directory to scan.
    root: PathBuf,

    /// Accepted file extensions.
    extensions: Vec<String>,

    /// Whether to descend into subdirectories.
    recursive: bool,

    /// Whether to respect .gitignore files.
    respect_gitignore: bool,

    /// Optional glob filter pattern.
    filter: Option<glob::Pattern>,
}

impl SourceScanner {
    /// Create a new scanner for `.tsx` and `.ts` files directly in `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: vec!["tsx".to_string(), "ts".to_string()],
            recursive: false,
            respect_gitignore: true,
            filter: None,
        }
    }

    /// Set the accepted file extensions (without the dot).
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether to descend into subdirectories.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set whether to respect .gitignore files.
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Set a glob filter pattern for files.
    ///
    /// Only files whose path relative to the root matches are included.
    pub fn with_filter(mut self, pattern: &str) -> Result<Self, ScanError> {
        let glob_pattern = glob::Pattern::new(pattern)
            .map_err(|e| ScanError::invalid_pattern(pattern, e.to_string()))?;
        self.filter = Some(glob_pattern);
        Ok(self)
    }

    /// Scan the directory and return all component files, sorted by path.
    pub fn scan(&self) -> CliResult<Vec<SourceFile>> {
        if !self.root.is_dir() {
            return Err(ScanError::not_found(self.root.clone()).into());
        }

        let mut files = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .hidden(false)
            .max_depth(if self.recursive { None } else { Some(1) })
            .sort_by_file_path(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry.map_err(ScanError::Walk)?;
            let path = entry.path();

            if !path.is_file() || !self.matches_extension(path) {
                continue;
            }

            let Some(component) = component_name(path) else {
                trace!(path = %path.display(), "file stem is not a component name");
                continue;
            };

            if let Some(ref pattern) = self.filter {
                if !pattern.matches_path(&self.relative_path(path)) {
                    continue;
                }
            }

            let bytes = std::fs::read(path).map_err(|e| ScanError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            let content = match String::from_utf8(bytes) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), "file is not valid UTF-8, decoding lossily");
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };

            files.push(SourceFile {
                path: path.to_path_buf(),
                relative_path: self.relative_path(path),
                component,
                content,
            });
        }

        if files.is_empty() {
            return Err(ScanError::no_source_files(self.root.clone()).into());
        }

        Ok(files)
    }

    /// Scan without failing on empty results.
    pub fn scan_allow_empty(&self) -> CliResult<Vec<SourceFile>> {
        match self.scan() {
            Ok(files) => Ok(files),
            Err(crate::error::CliError::Scan(ScanError::NoSourceFiles { .. })) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Whether `path` has one of the accepted extensions.
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// The file stem, if it is a usable identifier (`Card.test.tsx` is not).
fn component_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let mut chars = stem.chars();
    let first = chars.next()?;
    let valid = (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    valid.then(|| stem.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        fs::write(dir.path().join("Card.tsx"), "interface CardProps {}").unwrap();
        fs::write(dir.path().join("Badge.ts"), "interface BadgeProps {}").unwrap();
        fs::write(dir.path().join("Card.test.tsx"), "test()").unwrap();
        fs::write(dir.path().join("README.md"), "# Templates").unwrap();

        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/Hero.tsx"), "interface HeroProps {}").unwrap();

        dir
    }

    fn names(files: &[SourceFile]) -> Vec<&str> {
        files.iter().map(|f| f.component.as_str()).collect()
    }

    #[test]
    fn test_scan_top_level_only() {
        let dir = create_test_dir();
        let files = SourceScanner::new(dir.path()).scan().unwrap();

        assert_eq!(names(&files), vec!["Badge", "Card"]);
    }

    #[test]
    fn test_scan_recursive() {
        let dir = create_test_dir();
        let files = SourceScanner::new(dir.path())
            .with_recursive(true)
            .scan()
            .unwrap();

        assert_eq!(names(&files), vec!["Badge", "Card", "Hero"]);
        assert!(files[2].relative_path.starts_with("nested"));
    }

    #[test]
    fn test_scan_custom_extensions() {
        let dir = create_test_dir();
        let files = SourceScanner::new(dir.path())
            .with_extensions(["ts"])
            .scan()
            .unwrap();

        assert_eq!(names(&files), vec!["Badge"]);
    }

    #[test]
    fn test_scan_with_filter() {
        let dir = create_test_dir();
        let files = SourceScanner::new(dir.path())
            .with_filter("C*")
            .unwrap()
            .scan()
            .unwrap();

        assert_eq!(names(&files), vec!["Card"]);
    }

    #[test]
    fn test_invalid_filter() {
        let result = SourceScanner::new(".").with_filter("[");
        assert!(matches!(result, Err(ScanError::InvalidPattern { .. })));
    }

    #[test]
    fn test_scan_nonexistent_directory() {
        let result = SourceScanner::new("/nonexistent/path").scan();

        assert!(matches!(
            result.unwrap_err(),
            crate::error::CliError::Scan(ScanError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = TempDir::new().unwrap();
        let scanner = SourceScanner::new(dir.path());

        assert!(matches!(
            scanner.scan().unwrap_err(),
            crate::error::CliError::Scan(ScanError::NoSourceFiles { .. })
        ));
        assert!(scanner.scan_allow_empty().unwrap().is_empty());
    }

    #[test]
    fn test_source_file_content() {
        let dir = create_test_dir();
        let files = SourceScanner::new(dir.path()).scan().unwrap();

        let card = files.iter().find(|f| f.component == "Card").unwrap();
        assert_eq!(card.content, "interface CardProps {}");
        assert_eq!(card.relative_path, PathBuf::from("Card.tsx"));
    }

    #[test]
    fn test_non_utf8_file_is_decoded_lossily() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Card.tsx"), "interface CardProps {}").unwrap();
        fs::write(
            dir.path().join("Legacy.tsx"),
            b"// caf\xe9\ninterface LegacyProps { title: string }\n",
        )
        .unwrap();

        let files = SourceScanner::new(dir.path()).scan().unwrap();

        assert_eq!(names(&files), vec!["Card", "Legacy"]);
        assert!(files[1].content.contains('\u{FFFD}'));
        assert!(files[1].content.contains("interface LegacyProps"));
    }

    #[test]
    fn test_component_name() {
        assert_eq!(component_name(Path::new("a/Card.tsx")).as_deref(), Some("Card"));
        assert_eq!(component_name(Path::new("Card.test.tsx")), None);
        assert_eq!(component_name(Path::new("my-card.tsx")), None);
        assert_eq!(component_name(Path::new("1Card.tsx")), None);
    }
}
