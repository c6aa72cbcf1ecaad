//! Rendering of the aggregated `priest.gone.go` registration file.

use super::transform::{is_generic, GONE_HEADER};

/// File name of the registration file.
pub const PRIEST_FILE: &str = "priest.gone.go";

/// A rendered registration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriestFile {
    /// Go source text.
    pub code: String,
    /// Type names that received a registration statement, in order.
    pub registered: Vec<String>,
    /// Generic type names left out because they need explicit type arguments.
    pub skipped: Vec<String>,
}

/// Renders `MockPriest`, burying one constructed mock per non-generic type.
#[must_use]
pub fn render(mocked: &[String], package_name: &str) -> PriestFile {
    let (skipped, registered): (Vec<String>, Vec<String>) =
        mocked.iter().cloned().partition(|name| is_generic(name));

    let body = registered
        .iter()
        .map(|name| format!("\tcemetery.Bury(New{name}(ctrl))"))
        .collect::<Vec<_>>()
        .join("\n");

    let code = format!(
        "{GONE_HEADER}

package {package_name}

import (
\t\"github.com/gone-io/gone\"
\tgomock \"go.uber.org/mock/gomock\"
)

func MockPriest(cemetery gone.Cemetery, ctrl *gomock.Controller) {{
{body}
}}
"
    );
    PriestFile { code, registered, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn registers_plain_types_and_skips_generics() {
        let priest = render(&names(&["MockFoo", "MockBar[T any]"]), "mocks");

        assert!(priest.code.contains("\tcemetery.Bury(NewMockFoo(ctrl))\n"));
        assert!(!priest.code.contains("MockBar"));
        assert_eq!(priest.registered, names(&["MockFoo"]));
        assert_eq!(priest.skipped, names(&["MockBar[T any]"]));
    }

    #[test]
    fn keeps_discovery_order_and_duplicates() {
        let priest = render(&names(&["MockB", "MockA", "MockB"]), "mocks");
        let lines: Vec<&str> = priest.code.lines().filter(|l| l.contains("Bury")).collect();
        assert_eq!(
            lines,
            vec![
                "\tcemetery.Bury(NewMockB(ctrl))",
                "\tcemetery.Bury(NewMockA(ctrl))",
                "\tcemetery.Bury(NewMockB(ctrl))",
            ]
        );
    }

    #[test]
    fn empty_input_renders_empty_function() {
        let priest = render(&[], "fakes");
        assert!(priest.code.starts_with(GONE_HEADER));
        assert!(priest.code.contains("package fakes\n"));
        assert!(priest.code.ends_with("ctrl *gomock.Controller) {\n\n}\n"));
    }
}
