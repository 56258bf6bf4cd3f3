//! Integration test: scanning real directory trees end-to-end.
//!
//! Each test lays out a small project in a temp dir and checks the tree
//! listing, the per-file signatures and the skip bookkeeping.

use docscan_core::{
    Config, EntryKind, LanguageId, ScanConfig, ScanReport, Scanner, SkipReason, TreeEntry,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: impl AsRef<[u8]>) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "README.md", "# Sample\n");
    write(
        root,
        "main.py",
        "def main() -> None:\n    helper(1, 2)\n\n\ndef helper(x, y):\n    return x + y\n",
    );
    write(root, "notes.txt", "def not_code(): pass\n");
    write(root, "logo.png", [0x89, b'P', b'N', b'G']);
    write(root, ".DS_Store", "junk");
    write(
        root,
        "src/lib.rs",
        "pub fn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n",
    );
    write(
        root,
        "src/util.c",
        "int square(int x) {\n    return x * x;\n}\n",
    );
    write(root, "node_modules/pkg/index.js", "function hidden() {}\n");
    write(root, "web/app.js", "const sum = (a, b) => {\n  return a + b;\n};\n");
    tmp
}

fn scan(root: &Path) -> ScanReport {
    Scanner::builder()
        .root(root)
        .build()
        .expect("scanner should build")
        .scan()
}

fn scan_with(root: &Path, config: ScanConfig) -> ScanReport {
    Scanner::builder()
        .root(root)
        .config(config)
        .build()
        .expect("scanner should build")
        .scan()
}

fn entry(depth: usize, name: &str, kind: EntryKind) -> TreeEntry {
    TreeEntry {
        depth,
        name: name.to_string(),
        kind,
    }
}

fn paths(report: &ScanReport) -> Vec<PathBuf> {
    report
        .files
        .iter()
        .map(|f| f.relative_path.clone())
        .collect()
}

// ── Tree listing ──

#[test]
fn tree_lists_files_before_subdirectories_sorted() {
    let tmp = sample_project();
    let report = scan(tmp.path());

    assert_eq!(
        report.tree,
        vec![
            entry(1, "README.md", EntryKind::File),
            entry(1, "main.py", EntryKind::File),
            entry(1, "notes.txt", EntryKind::File),
            entry(1, "src", EntryKind::Directory),
            entry(2, "lib.rs", EntryKind::File),
            entry(2, "util.c", EntryKind::File),
            entry(1, "web", EntryKind::Directory),
            entry(2, "app.js", EntryKind::File),
        ]
    );
}

#[test]
fn ignored_directories_are_pruned() {
    let tmp = sample_project();
    let report = scan(tmp.path());

    assert!(!report.tree.iter().any(|e| e.name == "node_modules"));
    assert!(!report.tree.iter().any(|e| e.name == "index.js"));
}

// ── Signatures ──

#[test]
fn extracts_signatures_in_walk_order() {
    let tmp = sample_project();
    let report = scan(tmp.path());

    assert_eq!(
        paths(&report),
        vec![
            PathBuf::from("main.py"),
            Path::new("src").join("lib.rs"),
            Path::new("src").join("util.c"),
            Path::new("web").join("app.js"),
        ]
    );

    let py = &report.files[0];
    assert_eq!(py.language, LanguageId::Python);
    let names: Vec<&str> = py.signatures.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["main", "helper"]);
    assert_eq!(py.signatures[0].return_type, "None");
    assert_eq!(py.signatures[1].arguments, "x, y");

    let c = &report.files[2];
    assert_eq!(c.signatures[0].name, "square");
    assert_eq!(c.signatures[0].return_type, "int");

    let js = &report.files[3];
    assert_eq!(js.signatures[0].name, "sum");
    assert_eq!(js.signatures[0].arguments, "a, b");
    assert_eq!(js.signatures[0].return_type, "");
}

#[test]
fn unknown_extensions_are_listed_but_not_analyzed() {
    let tmp = sample_project();
    let report = scan(tmp.path());

    assert!(report.tree.iter().any(|e| e.name == "notes.txt"));
    assert!(!paths(&report).contains(&PathBuf::from("notes.txt")));
    assert!(report.skipped.is_empty());
}

#[test]
fn signatures_are_capped_per_file() {
    let tmp = TempDir::new().unwrap();
    let src: String = (0..40).map(|i| format!("def f{i}(a):\n    pass\n")).collect();
    write(tmp.path(), "many.py", src);

    let report = scan(tmp.path());
    let sigs = &report.files[0].signatures;
    assert_eq!(sigs.len(), 25);
    assert_eq!(sigs[0].name, "f0");
    assert_eq!(sigs[24].name, "f24");

    let config = ScanConfig {
        max_signatures: 3,
        ..ScanConfig::default()
    };
    let report = scan_with(tmp.path(), config);
    assert_eq!(report.files[0].signatures.len(), 3);
}

// ── Skips ──

#[test]
fn oversized_files_are_listed_but_skipped() {
    let tmp = TempDir::new().unwrap();
    let mut big = String::from("def big():\n    pass\n");
    big.push_str(&"#".repeat(102_400 - big.len()));
    assert_eq!(big.len(), 102_400);
    write(tmp.path(), "big.py", &big);

    let mut small = String::from("def small():\n    pass\n");
    small.push_str(&"#".repeat(102_399 - small.len()));
    write(tmp.path(), "small.py", &small);

    let report = scan(tmp.path());

    assert!(report.tree.iter().any(|e| e.name == "big.py"));
    assert_eq!(paths(&report), vec![PathBuf::from("small.py")]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].relative_path, PathBuf::from("big.py"));
    assert_eq!(
        report.skipped[0].reason,
        SkipReason::TooLarge {
            size: 102_400,
            limit: 102_400
        }
    );
}

#[test]
fn binary_content_is_recorded_as_extraction_failure() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "blob.c", b"int f(int x) {\0\0\0");

    let report = scan(tmp.path());

    assert!(report.files.is_empty());
    assert!(report.tree.iter().any(|e| e.name == "blob.c"));
    assert!(matches!(
        report.skipped[0].reason,
        SkipReason::ExtractionFailed { .. }
    ));
}

#[test]
fn invalid_utf8_is_decoded_lossily() {
    let tmp = TempDir::new().unwrap();
    let mut bytes = b"# caf\xe9 \xff\n".to_vec();
    bytes.extend_from_slice(b"def ok(a):\n    pass\n");
    write(tmp.path(), "latin.py", bytes);

    let report = scan(tmp.path());
    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].signatures[0].name, "ok");
}

#[cfg(unix)]
#[test]
fn broken_symlinks_are_listed_and_recorded_as_unreadable() {
    use std::os::unix::fs::symlink;

    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "ok.py", "def ok():\n    pass\n");
    symlink(tmp.path().join("gone.py"), tmp.path().join("dangling.py")).unwrap();
    symlink(tmp.path().join("loop.py"), tmp.path().join("loop.py")).unwrap();

    let report = scan(tmp.path());

    assert_eq!(
        report.tree,
        vec![
            entry(1, "dangling.py", EntryKind::File),
            entry(1, "loop.py", EntryKind::File),
            entry(1, "ok.py", EntryKind::File),
        ]
    );
    assert_eq!(paths(&report), vec![PathBuf::from("ok.py")]);

    let skipped: Vec<&Path> = report
        .skipped
        .iter()
        .map(|s| s.relative_path.as_path())
        .collect();
    assert_eq!(skipped, vec![Path::new("dangling.py"), Path::new("loop.py")]);
    assert!(report
        .skipped
        .iter()
        .all(|s| matches!(s.reason, SkipReason::Unreadable { .. })));
}

#[cfg(unix)]
#[test]
fn symlinked_directories_are_listed_but_not_entered() {
    use std::os::unix::fs::symlink;

    let tmp = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write(target.path(), "inner.py", "def inner():\n    pass\n");
    symlink(target.path(), tmp.path().join("linked")).unwrap();
    write(tmp.path(), "top.py", "def top():\n    pass\n");

    let report = scan(tmp.path());

    assert_eq!(
        report.tree,
        vec![
            entry(1, "top.py", EntryKind::File),
            entry(1, "linked", EntryKind::Directory),
        ]
    );
    assert_eq!(paths(&report), vec![PathBuf::from("top.py")]);
    assert!(report.skipped.is_empty());
}

// ── Configuration ──

#[test]
fn exclude_globs_keep_files_in_tree() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "gen/api.py", "def generated():\n    pass\n");
    write(tmp.path(), "app.py", "def real():\n    pass\n");

    let config = ScanConfig {
        exclude: vec!["gen/*".to_string()],
        ..ScanConfig::default()
    };
    let report = scan_with(tmp.path(), config);

    assert!(report.tree.iter().any(|e| e.name == "api.py"));
    assert_eq!(paths(&report), vec![PathBuf::from("app.py")]);
}

#[test]
fn config_file_adds_extension_mapping() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "stubs.pyi", "def stub(x: int) -> int:\n    ...\n");

    let config = Config::parse("[languages.extensions]\n\".pyi\" = \"python\"\n").unwrap();
    let report = Scanner::from_config(tmp.path(), &config)
        .expect("scanner should build")
        .scan();

    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].language, LanguageId::Python);
    assert_eq!(report.files[0].signatures[0].return_type, "int");
}

#[test]
fn ignore_lists_are_configurable() {
    let tmp = sample_project();
    let config = ScanConfig {
        ignore_dirs: vec!["web".to_string()],
        ..ScanConfig::default()
    };
    let report = scan_with(tmp.path(), config);

    assert!(report.tree.iter().any(|e| e.name == "node_modules"));
    assert!(!report.tree.iter().any(|e| e.name == "web"));
    assert!(paths(&report)
        .iter()
        .any(|p| p.ends_with(Path::new("pkg").join("index.js"))));
}

#[test]
fn gitignore_is_honored_when_enabled() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), ".gitignore", "secret.py\n");
    write(tmp.path(), "secret.py", "def hidden():\n    pass\n");
    write(tmp.path(), "open.py", "def shown():\n    pass\n");

    let report = scan(tmp.path());
    assert_eq!(report.files.len(), 2);

    let config = ScanConfig {
        respect_gitignore: true,
        ..ScanConfig::default()
    };
    let report = scan_with(tmp.path(), config);
    assert_eq!(paths(&report), vec![PathBuf::from("open.py")]);
}

#[test]
fn missing_root_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let result = Scanner::builder().root(tmp.path().join("nope")).build();
    assert!(result.is_err());
}
