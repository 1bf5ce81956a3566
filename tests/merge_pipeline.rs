//! End-to-end tests for the merge pipeline
//!
//! Builds placeholder/fragment trees in a temp directory and asserts on the
//! exact bytes of the merged bundle.

use dts_bundler::merge::{fragment_path, MergeError};
use dts_bundler::{check, merge};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(placeholder: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("placeholder.d.ts"), placeholder).unwrap();
        Self { dir }
    }

    fn fragment(self, key: &str, contents: &str) -> Self {
        let path = fragment_path(self.dir.path(), key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
        self
    }

    fn placeholder(&self) -> std::path::PathBuf {
        self.dir.path().join("placeholder.d.ts")
    }

    fn output(&self) -> std::path::PathBuf {
        self.dir.path().join("dist/index.d.ts")
    }

    fn merge(&self) -> dts_bundler::MergeReport {
        merge(&self.placeholder(), self.dir.path(), &self.output()).unwrap()
    }

    fn output_contents(&self) -> String {
        fs::read_to_string(self.output()).unwrap()
    }
}

/// Marker order strictly determines output order, regardless of key names.
#[test]
fn test_order_preservation() {
    let fx = Fixture::new("// @merge-here Zebra\n// @merge-here Alpha\n// @merge-here Middle")
        .fragment("Alpha", "declare const ALPHA: 1;")
        .fragment("Middle", "declare const MIDDLE: 2;")
        .fragment("Zebra", "declare const ZEBRA: 3;");

    fx.merge();

    assert_eq!(
        fx.output_contents(),
        "declare const ZEBRA: 3;\ndeclare const ALPHA: 1;\ndeclare const MIDDLE: 2;"
    );
}

/// Import lines never reach the output.
#[test]
fn test_import_stripping() {
    let fx = Fixture::new("// @merge-here Actor").fragment(
        "Actor",
        "import { Vector } from './Vector';\nimport './Enums';\ndeclare class Actor {\n  GetLocation(): Vector;\n}",
    );

    fx.merge();

    let output = fx.output_contents();
    assert!(!output.contains("import"));
    assert_eq!(
        output,
        "declare class Actor {\n  GetLocation(): Vector;\n}"
    );
}

/// The `export ` prefix is stripped; everything else is byte-verbatim.
#[test]
fn test_export_stripping() {
    let fx = Fixture::new("// @merge-here Mixed").fragment(
        "Mixed",
        "export declare class Foo {}\nexport type X = Y;\n// mentions export in prose\n  indented_export_stays();",
    );

    fx.merge();

    assert_eq!(
        fx.output_contents(),
        "declare class Foo {}\ntype X = Y;\n// mentions export in prose\n  indented_export_stays();"
    );
}

/// A missing fragment contributes nothing and does not disturb its neighbors.
#[test]
fn test_missing_fragment_resilience() {
    let fx = Fixture::new(
        "// @merge-here First\n// @merge-here entities/Database\n// @merge-here Last",
    )
    .fragment("First", "declare const FIRST: 1;")
    .fragment("Last", "declare const LAST: 2;");

    let report = fx.merge();

    assert_eq!(report.markers, 3);
    assert_eq!(report.merged, 2);
    assert_eq!(
        report.missing,
        vec![fx.dir.path().join("entities/Database.d.ts")]
    );
    assert_eq!(
        fx.output_contents(),
        "declare const FIRST: 1;\ndeclare const LAST: 2;"
    );
}

/// Re-running with unchanged inputs produces byte-identical output.
#[test]
fn test_idempotence() {
    let fx = Fixture::new("// @merge-here Enums\n// @merge-here Actor")
        .fragment("Enums", "export declare enum Weather {\n  Clear,\n  Rain,\n}")
        .fragment("Actor", "export declare class Actor {}");

    fx.merge();
    let first = fx.output_contents();
    fx.merge();
    let second = fx.output_contents();

    assert_eq!(first, second);
}

/// A placeholder with no markers produces an empty output document.
#[test]
fn test_marker_free_placeholder_yields_empty_output() {
    let fx = Fixture::new("// header comment\n// another line of prose\n\ndeclare const X: 1;");

    let report = fx.merge();

    assert_eq!(report.markers, 0);
    assert_eq!(report.lines_written, 0);
    assert_eq!(fx.output_contents(), "");
}

/// One merged fragment followed by a missing one still yields the first.
#[test]
fn test_merged_then_missing() {
    let fx = Fixture::new(
        "// @merge-here Enums\n// not a marker\n// @merge-here entities/Database",
    )
    .fragment("Enums", "export declare enum X {\n  A\n}");

    let report = fx.merge();

    assert_eq!(fx.output_contents(), "declare enum X {\n  A\n}");
    assert_eq!(report.missing.len(), 1);
    assert!(report.missing[0].ends_with("entities/Database.d.ts"));
}

/// Duplicate markers emit the fragment once per marker, no deduplication.
#[test]
fn test_duplicate_markers_not_deduplicated() {
    let fx = Fixture::new("// @merge-here Enums\n// @merge-here Enums")
        .fragment("Enums", "declare enum X {}");

    fx.merge();

    assert_eq!(fx.output_contents(), "declare enum X {}\ndeclare enum X {}");
}

/// The output file is overwritten, not appended to.
#[test]
fn test_output_is_overwritten() {
    let fx = Fixture::new("// @merge-here Enums").fragment("Enums", "declare enum X {}");
    fs::create_dir_all(fx.dir.path().join("dist")).unwrap();
    fs::write(fx.output(), "stale content from a previous run").unwrap();

    fx.merge();

    assert_eq!(fx.output_contents(), "declare enum X {}");
}

#[test]
fn test_missing_placeholder_aborts_without_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("dist/index.d.ts");

    let err = merge(&dir.path().join("absent.d.ts"), dir.path(), &output).unwrap_err();

    assert!(matches!(err, MergeError::PlaceholderRead { .. }));
    assert!(!output.exists());
}

#[test]
fn test_check_matches_merge_resolution() {
    let fx = Fixture::new("// @merge-here Enums\n// @merge-here entities/Database")
        .fragment("Enums", "declare enum X {}");

    let report = check(&fx.placeholder(), fx.dir.path()).unwrap();

    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.entries[0].key, "Enums");
    assert!(report.entries[0].found);
    assert_eq!(report.entries[1].key, "entities/Database");
    assert!(!report.entries[1].found);
    assert_eq!(report.missing_count(), 1);
    // Resolution-only: nothing is written.
    assert!(!fx.output().exists());
}

#[test]
fn test_report_serializes_to_json() {
    let fx = Fixture::new("// @merge-here Enums").fragment("Enums", "declare enum X {}");

    let report = fx.merge();
    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["markers"], 1);
    assert_eq!(value["merged"], 1);
    assert_eq!(value["lines_written"], 1);
    assert!(value["missing"].as_array().unwrap().is_empty());
}

/// Keys resolve relative to the fragments dir even when it is elsewhere.
#[test]
fn test_fragments_dir_is_independent_of_placeholder_location() {
    let dir = TempDir::new().unwrap();
    let placeholder = dir.path().join("docs/placeholder.d.ts");
    fs::create_dir_all(placeholder.parent().unwrap()).unwrap();
    fs::write(&placeholder, "// @merge-here Enums").unwrap();

    let fragments = dir.path().join("types");
    fs::create_dir_all(&fragments).unwrap();
    fs::write(fragments.join("Enums.d.ts"), "declare enum X {}").unwrap();

    let output = dir.path().join("dist/index.d.ts");
    merge(&placeholder, &fragments, &output).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "declare enum X {}");
    assert!(Path::new(&output).is_file());
}
