//! Scanning a module for its `//go:generate` directive.

use std::path::{Path, PathBuf};

use crate::error::{GonectrError, Result};
use crate::module::{MODULE_FILE, SOURCE_SUFFIX};
use crate::ports::FileSystem;

/// Prefix of a generate directive line.
pub const DIRECTIVE_PREFIX: &str = "//go:generate";

/// Where a generate directive was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveLocation {
    /// File containing the directive.
    pub file_path: PathBuf,
    /// One-based line number.
    pub line_number: usize,
    /// Command after the prefix, e.g. `gonectr generate -s $GOFILE`.
    pub command_text: String,
}

/// Finds the first directive that invokes a given generator.
pub struct DirectiveScanner<'a> {
    fs: &'a dyn FileSystem,
    generator_name: &'a str,
}

impl<'a> DirectiveScanner<'a> {
    /// Creates a scanner matching directives whose first command token is `generator_name`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, generator_name: &'a str) -> Self {
        Self { fs, generator_name }
    }

    /// Returns the first matching directive under `module_root`, or `None`.
    ///
    /// Files are visited in walk order (siblings sorted by name, depth first),
    /// with the same exclusions `go generate ./...` applies: `testdata` and
    /// `vendor` directories, names starting with `.` or `_`, and nested modules.
    /// Excluded directories are pruned from the walk and never read. Invalid
    /// UTF-8 in a source file is replaced rather than treated as an error.
    ///
    /// # Errors
    ///
    /// Returns [`GonectrError::ScanIo`] if the tree or a source file cannot be read.
    pub fn find_first_directive(&self, module_root: &Path) -> Result<Option<DirectiveLocation>> {
        let prune = |dir: &Path| {
            dir.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| is_ignored_name(n) || is_excluded_dir(n))
                || self.fs.exists(&dir.join(MODULE_FILE))
        };
        let files = self
            .fs
            .walk_files_pruned(module_root, &prune)
            .map_err(|source| GonectrError::ScanIo { path: module_root.to_path_buf(), source })?;

        for file in files.iter().filter(|f| is_package_source(f)) {
            let text = self
                .fs
                .read_lossy(file)
                .map_err(|source| GonectrError::ScanIo { path: file.clone(), source })?;
            if let Some((line_number, command_text)) = first_directive(&text, self.generator_name) {
                tracing::debug!(file = %file.display(), line_number, "matched generate directive");
                return Ok(Some(DirectiveLocation {
                    file_path: file.clone(),
                    line_number,
                    command_text: command_text.to_string(),
                }));
            }
        }
        Ok(None)
    }
}

/// Returns the one-based line number and command of the first directive in
/// `text` whose command token is `generator_name`.
#[must_use]
pub fn first_directive<'t>(text: &'t str, generator_name: &str) -> Option<(usize, &'t str)> {
    text.lines()
        .enumerate()
        .find_map(|(idx, line)| parse_directive(line, generator_name).map(|cmd| (idx + 1, cmd)))
}

/// Parses one line as a directive for `generator_name`.
///
/// The prefix must start in column one and be followed by whitespace.
#[must_use]
pub fn parse_directive<'l>(line: &'l str, generator_name: &str) -> Option<&'l str> {
    let rest = line.strip_prefix(DIRECTIVE_PREFIX)?;
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    let command = rest.trim();
    let token = command.split_whitespace().next()?;
    (token == generator_name).then_some(command)
}

fn is_package_source(file: &Path) -> bool {
    file.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(SOURCE_SUFFIX) && !is_ignored_name(name))
}

fn is_ignored_name(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}

fn is_excluded_dir(name: &str) -> bool {
    name == "testdata" || name == "vendor"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;

    fn write(root: &Path, rel: &str, text: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, text).unwrap();
    }

    fn scan(root: &Path) -> Option<DirectiveLocation> {
        DirectiveScanner::new(&LiveFileSystem, "gonectr").find_first_directive(root).unwrap()
    }

    #[test]
    fn finds_single_directive_with_exact_line() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "go.mod", "module demo\n");
        write(dir.path(), "util.go", "package main\n\nfunc util() {}\n");
        write(
            dir.path(),
            "main.go",
            "package main\n\nimport \"github.com/gone-io/gone\"\n\n\
             //go:generate gonectr generate -s $GOFILE\nfunc main() {}\n",
        );

        let found = scan(dir.path()).unwrap();
        assert_eq!(found.file_path, dir.path().join("main.go"));
        assert_eq!(found.line_number, 5);
        assert_eq!(found.command_text, "gonectr generate -s $GOFILE");
    }

    #[test]
    fn tree_without_directive_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "go.mod", "module demo\n");
        write(dir.path(), "main.go", "package main\n//go:generate stringer -type=Kind\n");
        assert_eq!(scan(dir.path()), None);
    }

    #[test]
    fn repeated_scans_agree_across_multiple_directives() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "go.mod", "module demo\n");
        write(dir.path(), "z/late.go", "//go:generate gonectr generate\n");
        write(dir.path(), "a/early.go", "package a\n//go:generate gonectr generate -m .\n");
        write(dir.path(), "m.go", "package main\n\n\n//go:generate gonectr generate\n");

        let first = scan(dir.path()).unwrap();
        for _ in 0..5 {
            assert_eq!(scan(dir.path()).as_ref(), Some(&first));
        }
        assert_eq!(first.file_path, dir.path().join("a/early.go"));
    }

    #[test]
    fn skips_excluded_directories_and_nested_modules() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "go.mod", "module demo\n");
        write(dir.path(), "testdata/x.go", "//go:generate gonectr generate\n");
        write(dir.path(), "vendor/y.go", "//go:generate gonectr generate\n");
        write(dir.path(), ".hidden/z.go", "//go:generate gonectr generate\n");
        write(dir.path(), "_skip/w.go", "//go:generate gonectr generate\n");
        write(dir.path(), "inner/go.mod", "module inner\n");
        write(dir.path(), "inner/v.go", "//go:generate gonectr generate\n");
        write(dir.path(), "not_go.txt", "//go:generate gonectr generate\n");
        assert_eq!(scan(dir.path()), None);
    }

    #[test]
    fn non_utf8_source_does_not_hide_later_directive() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "go.mod", "module demo\n");
        std::fs::create_dir_all(dir.path().join("a")).unwrap();
        std::fs::write(dir.path().join("a/legacy.go"), b"package a\n// caf\xe9\n").unwrap();
        write(dir.path(), "main.go", "package main\n//go:generate gonectr generate\n");

        let found = scan(dir.path()).unwrap();
        assert_eq!(found.file_path, dir.path().join("main.go"));
        assert_eq!(found.line_number, 2);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_excluded_directory_does_not_fail_scan() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "go.mod", "module demo\n");
        write(dir.path(), "_cache/x.go", "package cache\n");
        write(dir.path(), "inner/go.mod", "module inner\n");
        write(dir.path(), "inner/locked/y.go", "package locked\n");
        write(dir.path(), "main.go", "package main\n//go:generate gonectr generate\n");
        let locked = [dir.path().join("_cache"), dir.path().join("inner/locked")];
        for path in &locked {
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o000)).unwrap();
        }

        // Privileged users can read mode-000 directories, so there is nothing to prune.
        let privileged = std::fs::read_dir(&locked[0]).is_ok();
        let result =
            DirectiveScanner::new(&LiveFileSystem, "gonectr").find_first_directive(dir.path());
        for path in &locked {
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        if privileged {
            return;
        }

        let found = result.unwrap().unwrap();
        assert_eq!(found.file_path, dir.path().join("main.go"));
    }

    #[test]
    fn unreadable_root_is_scan_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DirectiveScanner::new(&LiveFileSystem, "gonectr")
            .find_first_directive(&dir.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, GonectrError::ScanIo { .. }));
    }

    #[test]
    fn parse_directive_requires_prefix_at_column_one() {
        assert_eq!(
            parse_directive("//go:generate gonectr generate", "gonectr"),
            Some("gonectr generate")
        );
        assert_eq!(parse_directive("  //go:generate gonectr generate", "gonectr"), None);
        assert_eq!(parse_directive("//go:generategonectr", "gonectr"), None);
        assert_eq!(parse_directive("//go:generate gonectrx generate", "gonectr"), None);
        assert_eq!(parse_directive("// go:generate gonectr generate", "gonectr"), None);
    }
}
