//! `gonectr mock` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::error::Result;
use crate::mock::{MockRequest, MockSynthesizer, SynthesisReport};

/// Execute the `mock` command and print a one-line summary.
///
/// Missing flags become empty request fields so the synthesizer reports them.
///
/// # Errors
///
/// Returns the synthesizer's error.
pub fn run(
    ctx: &ServiceContext,
    scan_dir: Option<&Path>,
    package: Option<&str>,
    destination: Option<&Path>,
) -> Result<()> {
    let request = build_request(scan_dir, package, destination);
    let report = MockSynthesizer::new(ctx).synthesize(&request)?;
    println!("{}", summary(&report));
    Ok(())
}

fn build_request(
    scan_dir: Option<&Path>,
    package: Option<&str>,
    destination: Option<&Path>,
) -> MockRequest {
    MockRequest {
        scan_dir: scan_dir.map(Path::to_path_buf).unwrap_or_default(),
        package_name: package.unwrap_or_default().to_string(),
        destination: destination.map(Path::to_path_buf),
    }
}

fn summary(report: &SynthesisReport) -> String {
    let mut line = format!(
        "generated {} mock file(s), {} mock(s) registered in {}",
        report.written.len(),
        report.mocked.len() - report.skipped_generic.len(),
        report.priest_path.display()
    );
    if !report.skipped_generic.is_empty() {
        line.push_str(&format!(" ({} generic skipped)", report.skipped_generic.len()));
    }
    line
}
