//! Generate-then-build/run orchestration.
//!
//! Generation always runs before the requested toolchain subcommand so the
//! framework wiring code is fresh. A module either delegates generation to
//! `go generate ./...` (it carries a directive line) or gets the generator
//! invoked directly with inferred `-s`/`-m` flags.

use std::fmt;
use std::path::Path;

use crate::context::ServiceContext;
use crate::directive::DirectiveScanner;
use crate::error::{GonectrError, PortError, Result};
use crate::module::{ModuleResolver, SOURCE_SUFFIX};
use crate::ports::{CommandSpec, ShellOutput};

/// Toolchain subcommand run after generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoSubcommand {
    /// `go build`
    Build,
    /// `go run`
    Run,
}

impl GoSubcommand {
    /// Name passed to the toolchain.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Run => "run",
        }
    }

    fn failure(self, exit_code: i32) -> GonectrError {
        match self {
            Self::Build => GonectrError::BuildFailed { exit_code },
            Self::Run => GonectrError::RunFailed { exit_code },
        }
    }
}

impl fmt::Display for GoSubcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `go build`/`go run` flags whose value is a separate argument.
const VALUE_FLAGS: &[&str] = &[
    "-C", "-o", "-p", "-asmflags", "-buildmode", "-compiler", "-exec", "-gccgoflags", "-gcflags",
    "-installsuffix", "-ldflags", "-mod", "-modfile", "-overlay", "-pgo", "-pkgdir", "-tags",
    "-toolexec",
];

/// Returns the package argument: the first token that is neither a flag nor a flag's value.
///
/// Scanning stops at `--`. Returns `""` when there is no such token.
#[must_use]
pub fn extract_package_arg(args: &[String]) -> &str {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }
        if let Some(flag) = arg.strip_prefix('-') {
            let name = format!("-{}", flag.trim_start_matches('-'));
            if !arg.contains('=') && VALUE_FLAGS.contains(&name.as_str()) {
                iter.next();
            }
            continue;
        }
        return arg;
    }
    ""
}

/// Directory holding the main package: a `.go` file's parent, otherwise the argument itself.
#[must_use]
pub fn main_dir(package_arg: &str) -> String {
    if package_arg.is_empty() {
        return ".".to_string();
    }
    if package_arg.ends_with(SOURCE_SUFFIX) {
        return match Path::new(package_arg).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.display().to_string(),
            _ => ".".to_string(),
        };
    }
    package_arg.to_string()
}

/// Runs generation followed by a toolchain subcommand.
pub struct Orchestrator<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> Orchestrator<'a> {
    /// Creates an orchestrator using the given context.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Generates code for the module enclosing the package in `args`, then
    /// runs `go <subcommand> <args...>` from `cwd`.
    ///
    /// # Errors
    ///
    /// Propagates resolver and scanner errors; returns
    /// [`GonectrError::InvalidArgument`] before spawning anything when no
    /// directive exists and no generator is configured; returns
    /// [`GonectrError::GenerateFailed`] if generation fails (the toolchain
    /// subcommand is then never run) and `BuildFailed`/`RunFailed` if the
    /// final command exits non-zero.
    pub fn execute(&self, subcommand: GoSubcommand, args: &[String], cwd: &Path) -> Result<()> {
        let settings = &self.ctx.settings;
        let package_arg = extract_package_arg(args);
        let info = ModuleResolver::new(self.ctx.fs.as_ref()).resolve(package_arg, cwd)?;
        tracing::debug!(
            module = %info.module_path.display(),
            package = package_arg,
            "resolved module"
        );

        let directive = DirectiveScanner::new(self.ctx.fs.as_ref(), &settings.generator_name)
            .find_first_directive(&info.module_path)?;

        let generate = if let Some(location) = directive {
            tracing::info!(
                file = %location.file_path.display(),
                line = location.line_number,
                command = %location.command_text,
                "found generate directive"
            );
            CommandSpec::new(&settings.go)
                .args(["generate", "./..."])
                .current_dir(&info.module_path)
        } else {
            CommandSpec::new(settings.require_generator()?)
                .arg("generate")
                .arg(format!("-s={}", info.module_path.display()))
                .arg(format!("-m={}", main_dir(package_arg)))
                .current_dir(cwd)
        };
        tracing::info!(command = %generate, dir = ?generate.cwd, "executing generate step");
        let output = check_generate(&generate, self.ctx.shell.run(&generate))?;
        let printed = output.combined();
        if !printed.trim().is_empty() {
            println!("{}", printed.trim_end());
        }

        let final_command = CommandSpec::new(&settings.go)
            .arg(subcommand.as_str())
            .args(args.iter().cloned())
            .current_dir(cwd);
        tracing::info!(command = %final_command, "executing go {subcommand}");
        match self.ctx.shell.stream(&final_command) {
            Ok(0) => Ok(()),
            Ok(code) => Err(subcommand.failure(code)),
            Err(err) => {
                tracing::error!(command = %final_command, "failed to start: {err}");
                Err(subcommand.failure(-1))
            }
        }
    }
}

fn check_generate(
    command: &CommandSpec,
    result: std::result::Result<ShellOutput, PortError>,
) -> Result<ShellOutput> {
    match result {
        Ok(output) if output.success() => Ok(output),
        Ok(output) => Err(GonectrError::GenerateFailed {
            command: command.to_string(),
            exit_code: output.exit_code,
            output: output.combined(),
        }),
        Err(err) => Err(GonectrError::GenerateFailed {
            command: command.to_string(),
            exit_code: -1,
            output: err.to_string(),
        }),
    }
}
