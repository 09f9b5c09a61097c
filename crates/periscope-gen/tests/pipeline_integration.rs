//! End-to-end pipeline tests: source text in, accessor artifacts out.

use periscope_gen::{generate, Emitter, SourceScanner, MANIFEST_FILE};

const FIXTURES: &str = r#"
    pub mod widgets {
        pub struct Widget {
            _value: i32,
            label: String,
        }

        impl Widget {
            fn new() -> Self {
                Self { _value: 0, label: "default".to_string() }
            }

            fn with_parts(label: String, value: i32) -> Self {
                Self { _value: value, label }
            }

            fn bar(&mut self, a: i32, b: i32) -> i32 {
                a + b
            }

            fn reset(&mut self) {
                self._value = 0;
            }
        }

        pub struct Open {
            pub everything: i32,
        }

        impl Open {
            pub fn run(&self) -> i32 {
                self.everything
            }
        }
    }

    pub mod other {
        pub struct Widget {
            hidden: bool,
        }
    }

    #[privates_available(crate::widgets::Widget)]
    #[privates_available(crate::widgets::Widget)]
    #[privates_available(crate::widgets::Open)]
    #[privates_available(crate::other::Widget)]
    #[privates_available(crate::widgets::Missing)]
    mod accessor_tests {}
"#;

fn run_pipeline() -> Vec<periscope_gen::AccessorArtifact> {
    let mut scanner = SourceScanner::new();
    scanner.scan_source(FIXTURES, "").unwrap();
    let (model, markers) = scanner.finish();
    assert_eq!(markers.len(), 5);
    generate(&model, &markers)
}

#[test]
fn test_coverage_of_hidden_members() {
    let artifacts = run_pipeline();
    let widget = artifacts
        .iter()
        .find(|a| a.type_name == "widgets::Widget")
        .unwrap();
    assert!(widget.contents.contains("pub fn bar(&mut self, a: i32, b: i32) -> i32 {"));
    assert!(widget.contents.contains("pub fn reset(&mut self) {"));
    assert!(widget.contents.contains("pub fn _value(&mut self) -> i32"));
    assert!(widget.contents.contains("pub fn set__value(&mut self, value: i32) {"));
    assert!(widget.contents.contains("pub fn label(&mut self) -> String"));
    assert!(widget.contents.contains("pub fn create_instance() -> Widget {"));
    assert!(widget
        .contents
        .contains("pub fn create_instance2(label: String, value: i32) -> Widget {"));
}

#[test]
fn test_type_without_hidden_members_produces_no_artifact() {
    let artifacts = run_pipeline();
    assert!(artifacts.iter().all(|a| a.type_name != "widgets::Open"));
}

#[test]
fn test_duplicate_and_unresolvable_markers_are_collapsed_and_dropped() {
    let artifacts = run_pipeline();
    // widgets::Widget once (despite two markers), other::Widget once,
    // Missing dropped, Open skipped
    assert_eq!(artifacts.len(), 2);
}

#[test]
fn test_same_simple_name_in_two_namespaces_yields_distinct_files() {
    let artifacts = run_pipeline();
    let mut files: Vec<&str> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
    files.sort();
    assert_eq!(files, vec!["Widget_other.rs", "Widget_widgets.rs"]);
}

#[test]
fn test_regeneration_is_byte_identical() {
    let a = run_pipeline();
    let b = run_pipeline();
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.contents, y.contents);
        assert_eq!(x.file_name, y.file_name);
    }
}

#[test]
fn test_artifacts_are_ordered_by_qualified_name() {
    let artifacts = run_pipeline();
    let names: Vec<&str> = artifacts.iter().map(|a| a.type_name.as_str()).collect();
    assert_eq!(names, vec!["other::Widget", "widgets::Widget"]);
}

#[test]
fn test_emit_writes_artifacts_and_manifest() {
    let artifacts = run_pipeline();
    let dir = tempfile::tempdir().unwrap();
    let emitter = Emitter::new(dir.path());
    let paths = emitter.emit_all(&artifacts).unwrap();
    assert_eq!(paths.len(), 2);
    for path in &paths {
        assert!(path.exists());
    }

    let manifest = std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&manifest).unwrap();
    let listed = parsed["artifacts"].as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["type_name"], "other::Widget");
    assert_eq!(listed[1]["file_name"], "Widget_widgets.rs");
}

#[test]
fn test_generated_source_parses_as_rust() {
    let artifacts = run_pipeline();
    for artifact in &artifacts {
        syn::parse_file(&artifact.contents)
            .unwrap_or_else(|e| panic!("{} does not parse: {e}", artifact.file_name));
    }
}

#[test]
fn test_marker_on_generated_accessor_is_ignored() {
    let source = r#"
        pub struct Widget_Privates {
            target: i32,
        }

        #[privates_available(crate::Widget_Privates)]
        mod t {}
    "#;
    let mut scanner = SourceScanner::new();
    scanner.scan_source(source, "").unwrap();
    let (model, markers) = scanner.finish();
    assert!(generate(&model, &markers).is_empty());
}
