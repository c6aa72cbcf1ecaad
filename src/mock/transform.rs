//! Text rewrites applied to mock generator output.

use std::sync::OnceLock;

use regex::Regex;

/// Header the mock generator writes.
pub const MOCKGEN_HEADER: &str = "// Code generated by MockGen. DO NOT EDIT.";
/// Header marking files written by this tool.
pub const GONE_HEADER: &str = "// Code generated by Goner. DO NOT EDIT.";
/// Import path of the dependency-injection framework.
pub const GONE_IMPORT: &str = "github.com/gone-io/gone";

const MARKER_FIELD: &str = "isgomock struct{}";

fn mock_struct_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"type\s+(\w+(?:\[[^\]]*\])?)\s+struct\s*\{[^}]*?\bisgomock\b[^}]*\}")
            .expect("mock struct pattern is valid")
    })
}

/// Rewrites generated mock source so its structs become framework components.
///
/// Replaces the generator header, adds the framework import to the first
/// import block, and appends `gone.Flag` after every marker field.
#[must_use]
pub fn add_gone_code(code: &str) -> String {
    let code = code.replacen(MOCKGEN_HEADER, GONE_HEADER, 1);
    let code = code.replacen("import (", &format!("import (\n\t\"{GONE_IMPORT}\""), 1);
    code.replace(MARKER_FIELD, &format!("{MARKER_FIELD}\n\tgone.Flag"))
}

/// Names of the structs carrying the generator's marker field, in source order.
///
/// Generic mocks keep their type parameter list, e.g. `MockCache[K comparable]`.
#[must_use]
pub fn mocked_type_names(code: &str) -> Vec<String> {
    mock_struct_pattern().captures_iter(code).map(|caps| caps[1].to_string()).collect()
}

/// Returns `true` for names that carry a type parameter list.
#[must_use]
pub fn is_generic(name: &str) -> bool {
    name.contains('[')
}

#[cfg(test)]
mod tests {
    use super::*;

    const PINGER_MOCK: &str = "// Code generated by MockGen. DO NOT EDIT.

package mocks

import (
\treflect \"reflect\"

\tgomock \"go.uber.org/mock/gomock\"
)

// MockPinger is a mock of Pinger interface.
type MockPinger struct {
\tctrl     *gomock.Controller
\trecorder *MockPingerMockRecorder
\tisgomock struct{}
}

// MockPingerMockRecorder is the mock recorder for MockPinger.
type MockPingerMockRecorder struct {
\tmock *MockPinger
}

// MockCache is a mock of Cache interface.
type MockCache[K comparable, V any] struct {
\tctrl     *gomock.Controller
\trecorder *MockCacheMockRecorder[K, V]
\tisgomock struct{}
}
";

    #[test]
    fn rewrite_swaps_header_and_injects_import_and_flag() {
        let code = add_gone_code(PINGER_MOCK);

        assert!(code.starts_with(GONE_HEADER));
        assert!(!code.contains(MOCKGEN_HEADER));
        assert!(code.contains("import (\n\t\"github.com/gone-io/gone\"\n\treflect \"reflect\""));
        assert_eq!(code.matches("isgomock struct{}\n\tgone.Flag\n").count(), 2);
    }

    #[test]
    fn extracts_marker_structs_in_order_including_generics() {
        let names = mocked_type_names(&add_gone_code(PINGER_MOCK));
        assert_eq!(names, vec!["MockPinger".to_string(), "MockCache[K comparable, V any]".into()]);
        assert!(!is_generic(&names[0]));
        assert!(is_generic(&names[1]));
    }

    #[test]
    fn recorder_structs_are_not_matched() {
        let names = mocked_type_names(
            "type Recorder struct {\n\tmock *MockPinger\n}\n\ntype Other struct {\n\tisgomock int\n}\n",
        );
        assert_eq!(names, vec!["Other".to_string()]);
    }

    #[test]
    fn source_without_marker_yields_no_names() {
        let code = add_gone_code("package mocks\n\ntype Plain struct {\n\tName string\n}\n");
        assert!(mocked_type_names(&code).is_empty());
    }

    #[test]
    fn duplicate_names_are_kept() {
        let body = "type MockA struct {\n\tisgomock struct{}\n}\n";
        let names = mocked_type_names(&format!("{body}{body}"));
        assert_eq!(names.len(), 2);
    }
}
