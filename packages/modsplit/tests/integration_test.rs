//! End-to-end tests for the split pipeline.
//!
//! Splits a preview renderer fixture into a module directory and compares
//! every unit with the expected files under `tests/fixtures/preview/expected`.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use modsplit::splitting::{Marker, MarkerKey};
use modsplit::writer::{commit, retire_source};
use modsplit::{SourceDocument, SplitEngine, SplitError, SplitSpec, UnitSpec};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("preview")
        .join(name)
}

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn preview_document() -> SourceDocument {
    SourceDocument::new("preview.rs", load_fixture("preview.rs"))
}

#[test]
fn test_preview_split_matches_expected_units() {
    let spec = SplitSpec::load(&fixture_path("split.yaml")).unwrap();
    let output = SplitEngine::new().run(&preview_document(), &spec).unwrap();

    assert_eq!(
        output.names().collect::<Vec<_>>(),
        vec!["renderer", "cache", "layers", "types", "utils", "mod"]
    );
    for unit in &output.units {
        let expected = load_fixture(&format!("expected/{}.rs", unit.name));
        assert_eq!(unit.body, expected, "unit '{}' differs", unit.name);
    }
}

#[test]
fn test_preview_split_covers_document() {
    let document = preview_document();
    let spec = SplitSpec::load(&fixture_path("split.yaml")).unwrap();
    let output = SplitEngine::new().run(&document, &spec).unwrap();

    let rebuilt: String = output.blocks.iter().map(|b| b.text(&document)).collect();
    assert_eq!(rebuilt, document.text());
}

#[test]
fn test_preview_split_is_deterministic() {
    let spec = SplitSpec::load(&fixture_path("split.yaml")).unwrap();
    let engine = SplitEngine::new();

    let first = engine.run(&preview_document(), &spec).unwrap().into_map();
    let second = engine.run(&preview_document(), &spec).unwrap().into_map();
    assert_eq!(first, second);
}

#[test]
fn test_json_spec_with_visibility() {
    let spec = SplitSpec::load(&fixture_path("split.json")).unwrap();
    let output = SplitEngine::new().run(&preview_document(), &spec).unwrap();

    let manifest = output.aggregator_unit().unwrap();
    assert_eq!(
        manifest.body,
        "pub(crate) mod front;\npub(crate) mod cache;\npub(crate) mod utils;\n\n\
         pub use front::*;\npub use cache::FrameCache;\npub use utils::clamp_time;\n"
    );
    assert!(output
        .get("front")
        .unwrap()
        .body
        .starts_with("use std::collections::HashMap;\n"));
}

#[test]
fn test_missing_marker_writes_nothing() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("preview");
    let spec = SplitSpec::load(&fixture_path("broken.yaml")).unwrap();

    let result = SplitEngine::new()
        .run(&preview_document(), &spec)
        .and_then(|output| commit(&output, &target, "rs"));
    assert!(matches!(
        result,
        Err(SplitError::MarkerNotFound(ref name)) if name == "missing"
    ));
    assert!(!target.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_repeated_key_resolves_in_order() {
    let document = SourceDocument::new(
        "dup.rs",
        "// section\nfn a() {}\n// section\nfn b() {}\n// section\nfn c() {}\n",
    );
    let spec = SplitSpec::new()
        .with_marker(Marker::line_prefix("// section").named("first"))
        .with_marker(Marker::line_prefix("// section").named("second"))
        .with_marker(Marker::line_prefix("// section").named("third"))
        .with_unit(UnitSpec::new("a").with_block("first"))
        .with_unit(UnitSpec::new("b").with_block("second"))
        .with_unit(UnitSpec::new("c").with_block("third"));

    let output = SplitEngine::new().run(&document, &spec).unwrap();
    assert_eq!(output.get("a").unwrap().body, "fn a() {}\n");
    assert_eq!(output.get("b").unwrap().body, "fn b() {}\n");
    assert_eq!(output.get("c").unwrap().body, "fn c() {}\n");
}

#[test]
fn test_pattern_marker_closing_a_block() {
    let document = SourceDocument::new(
        "consts.rs",
        "const A: u8 = 1;\nconst B: u8 = 2;\n// end of constants\nfn f() {}\n",
    );
    let spec = SplitSpec::new()
        .with_marker(
            Marker::new(
                "consts",
                MarkerKey::Pattern(regex::Regex::new(r"// end of \w+\n").unwrap()),
            )
            .closing(),
        )
        .with_unit(UnitSpec::new("consts").with_block("consts"))
        .with_unit(UnitSpec::new("code").with_block("remainder"));

    let output = SplitEngine::new().run(&document, &spec).unwrap();
    assert_eq!(
        output.get("consts").unwrap().body,
        "const A: u8 = 1;\nconst B: u8 = 2;\n"
    );
    assert_eq!(output.get("code").unwrap().body, "fn f() {}\n");
}

#[test]
fn test_commit_and_retire_source() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("preview.rs");
    fs::write(&source, load_fixture("preview.rs")).unwrap();

    let document = SourceDocument::new("preview.rs", fs::read_to_string(&source).unwrap());
    let spec = SplitSpec::load(&fixture_path("split.yaml")).unwrap();
    let output = SplitEngine::new().run(&document, &spec).unwrap();

    let target = dir.path().join("preview");
    let written = commit(&output, &target, "rs").unwrap();
    assert_eq!(written.len(), 6);
    retire_source(&source).unwrap();

    assert!(!source.exists());
    assert_eq!(
        fs::read_to_string(target.join("mod.rs")).unwrap(),
        load_fixture("expected/mod.rs")
    );
    assert_eq!(
        fs::read_to_string(target.join("cache.rs")).unwrap(),
        load_fixture("expected/cache.rs")
    );
}
