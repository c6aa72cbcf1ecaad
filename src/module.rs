//! Locating the Go module that encloses a package argument.

use std::path::{Component, Path, PathBuf};

use crate::error::{GonectrError, Result};
use crate::ports::FileSystem;

/// File that marks a module root.
pub const MODULE_FILE: &str = "go.mod";

/// Suffix of Go source files.
pub const SOURCE_SUFFIX: &str = ".go";

/// A resolved module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Absolute directory containing `go.mod`.
    pub module_path: PathBuf,
    /// Import path declared by the `module` line, when readable.
    pub module_name: Option<String>,
}

/// Finds the nearest enclosing module by walking up from a package location.
///
/// Only probes the filesystem; nothing is written.
pub struct ModuleResolver<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> ModuleResolver<'a> {
    /// Creates a resolver over the given filesystem.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Resolves `package_arg` relative to `cwd` and finds its module.
    ///
    /// The argument may be empty, a directory, a `.go` file path, or a bare
    /// import path. Import paths that do not exist on disk start the search
    /// at `cwd`.
    ///
    /// # Errors
    ///
    /// Returns [`GonectrError::ModuleNotFound`] when no ancestor holds `go.mod`.
    pub fn resolve(&self, package_arg: &str, cwd: &Path) -> Result<ModuleInfo> {
        let start = self.search_start(package_arg, cwd);
        for dir in start.ancestors() {
            let marker = dir.join(MODULE_FILE);
            if self.fs.exists(&marker) {
                let module_name =
                    self.fs.read_to_string(&marker).ok().and_then(|text| module_name(&text));
                return Ok(ModuleInfo { module_path: dir.to_path_buf(), module_name });
            }
        }
        Err(GonectrError::ModuleNotFound { start })
    }

    fn search_start(&self, package_arg: &str, cwd: &Path) -> PathBuf {
        if package_arg.is_empty() {
            return normalize(cwd);
        }
        let candidate = normalize(&cwd.join(package_arg));
        if package_arg.ends_with(SOURCE_SUFFIX) {
            return candidate.parent().map_or_else(|| normalize(cwd), Path::to_path_buf);
        }
        if self.fs.is_dir(&candidate) {
            candidate
        } else {
            normalize(cwd)
        }
    }
}

/// Extracts the module path from `go.mod` text.
#[must_use]
pub fn module_name(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let name = rest.split("//").next()?.trim().trim_matches('"');
        (!name.is_empty()).then(|| name.to_string())
    })
}

/// Lexically removes `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
