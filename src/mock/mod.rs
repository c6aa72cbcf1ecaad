//! Mock synthesis: turns mockgen output into injectable gone components.
//!
//! Every eligible `.go` file under the scan directory is fed to the mock
//! generator. Output containing at least one mock struct is rewritten and
//! written next to the others as `<name>.gone.go`; afterwards one
//! `priest.gone.go` registers every collected mock with the container.

pub mod priest;
pub mod transform;

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::error::{GonectrError, Result};
use crate::module::SOURCE_SUFFIX;
use crate::ports::CommandSpec;

/// Suffix carried by every file this tool generates.
pub const GENERATED_SUFFIX: &str = ".gone.go";

/// Inputs of one synthesis run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockRequest {
    /// Directory scanned recursively for interface sources.
    pub scan_dir: PathBuf,
    /// Go package name of the generated mocks.
    pub package_name: String,
    /// Output directory; defaults to `<scan_dir>/<package_name>`.
    pub destination: Option<PathBuf>,
}

/// Rewritten generator output for one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSourceUnit {
    /// Scanned source file.
    pub original_path: PathBuf,
    /// Package the mock was generated into.
    pub package_name: String,
    /// Source after the gone rewrites.
    pub rewritten_code: String,
    /// Mock structs found in `rewritten_code`.
    pub mocked_type_names: Vec<String>,
}

impl GeneratedSourceUnit {
    /// Output file name: `svc.go` becomes `svc.gone.go`.
    #[must_use]
    pub fn output_file_name(&self) -> String {
        let name = self.original_path.file_name().map_or_else(
            || String::from("unnamed"),
            |n| n.to_string_lossy().into_owned(),
        );
        let stem = name.strip_suffix(SOURCE_SUFFIX).unwrap_or(&name);
        format!("{stem}{GENERATED_SUFFIX}")
    }
}

/// What a synthesis run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisReport {
    /// Per-source mock files written, in scan order.
    pub written: Vec<PathBuf>,
    /// Path of the registration file.
    pub priest_path: PathBuf,
    /// Every mocked type name collected, in discovery order.
    pub mocked: Vec<String>,
    /// Generic names left out of the registration file.
    pub skipped_generic: Vec<String>,
}

/// Drives the mock generator over a directory tree.
pub struct MockSynthesizer<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MockSynthesizer<'a> {
    /// Creates a synthesizer using the given context.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Generates mocks for every source under `request.scan_dir`.
    ///
    /// The registration file is written last, once, and only when every
    /// source was processed without error.
    ///
    /// # Errors
    ///
    /// Returns [`GonectrError::InvalidArgument`] for an empty scan dir or
    /// package, [`GonectrError::ScanIo`] if the tree cannot be walked,
    /// [`GonectrError::Subprocess`] on the first generator failure, and
    /// [`GonectrError::Io`] if an output cannot be written.
    pub fn synthesize(&self, request: &MockRequest) -> Result<SynthesisReport> {
        if request.scan_dir.as_os_str().is_empty() {
            return Err(GonectrError::InvalidArgument("scan dir is required".into()));
        }
        if request.package_name.trim().is_empty() {
            return Err(GonectrError::InvalidArgument("package name is required".into()));
        }
        let destination = request
            .destination
            .clone()
            .filter(|d| !d.as_os_str().is_empty())
            .unwrap_or_else(|| request.scan_dir.join(&request.package_name));

        let fs = self.ctx.fs.as_ref();
        fs.create_dir_all(&destination)
            .map_err(|source| GonectrError::Io { path: destination.clone(), source })?;

        let files = fs
            .walk_files(&request.scan_dir)
            .map_err(|source| GonectrError::ScanIo { path: request.scan_dir.clone(), source })?;

        let mut report = SynthesisReport::default();
        for file in files.iter().filter(|f| is_mock_source(f)) {
            let unit = self.generate_unit(file, &request.package_name)?;
            if unit.mocked_type_names.is_empty() {
                tracing::debug!(file = %file.display(), "no mocks generated; skipping");
                continue;
            }
            let target = destination.join(unit.output_file_name());
            fs.write(&target, &unit.rewritten_code)
                .map_err(|source| GonectrError::Io { path: target.clone(), source })?;
            tracing::debug!(
                file = %file.display(),
                output = %target.display(),
                mocks = unit.mocked_type_names.len(),
                "wrote mock source"
            );
            report.written.push(target);
            report.mocked.extend(unit.mocked_type_names);
        }

        let registration = priest::render(&report.mocked, &request.package_name);
        for name in &registration.skipped {
            tracing::warn!(
                mock = %name,
                "generic mock not registered in {}; bury it with explicit type arguments",
                priest::PRIEST_FILE
            );
        }
        let priest_path = destination.join(priest::PRIEST_FILE);
        fs.write(&priest_path, &registration.code)
            .map_err(|source| GonectrError::Io { path: priest_path.clone(), source })?;
        tracing::info!(
            path = %priest_path.display(),
            registered = registration.registered.len(),
            "wrote registration file"
        );

        report.priest_path = priest_path;
        report.skipped_generic = registration.skipped;
        Ok(report)
    }

    /// Runs the mock generator on one file and applies the gone rewrites.
    ///
    /// # Errors
    ///
    /// Returns [`GonectrError::Subprocess`] if the generator cannot be
    /// started or exits non-zero.
    pub fn generate_unit(&self, source: &Path, package_name: &str) -> Result<GeneratedSourceUnit> {
        let command = CommandSpec::new(&self.ctx.settings.mockgen).args([
            format!("-source={}", source.display()),
            format!("-package={package_name}"),
            "-write_command_comment=false".to_string(),
            "-write_package_comment=false".to_string(),
        ]);
        let output = match self.ctx.shell.run(&command) {
            Ok(output) if output.success() => output,
            Ok(output) => {
                return Err(GonectrError::Subprocess {
                    command: command.to_string(),
                    exit_code: output.exit_code,
                    output: output.combined(),
                })
            }
            Err(err) => {
                return Err(GonectrError::Subprocess {
                    command: command.to_string(),
                    exit_code: -1,
                    output: err.to_string(),
                })
            }
        };

        let rewritten_code = transform::add_gone_code(&output.combined());
        let mocked_type_names = transform::mocked_type_names(&rewritten_code);
        Ok(GeneratedSourceUnit {
            original_path: source.to_path_buf(),
            package_name: package_name.to_string(),
            rewritten_code,
            mocked_type_names,
        })
    }
}

/// A `.go` file that was not itself generated by this tool.
fn is_mock_source(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(SOURCE_SUFFIX) && !n.ends_with(GENERATED_SUFFIX))
}
