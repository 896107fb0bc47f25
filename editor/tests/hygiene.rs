//! Source hygiene budgets for the editor crate.
//!
//! The editor runs inside the page, where a panic ends the whole editing
//! session, and inside the host binary. These tests scan the non-test sources
//! under `src/` and hold each risky pattern to a budget, optionally confined
//! to the files allowed to use it. Budgets only go down.

use std::fs;
use std::path::Path;

struct Budget {
    label: &'static str,
    patterns: &'static [&'static str],
    max: usize,
    /// Files allowed to contain the pattern at all; empty means any file.
    only_in: &'static [&'static str],
}

// Panics: a single one aborts the page's editor instance.
const PANICS: &[Budget] = &[
    Budget { label: ".unwrap()", patterns: &[".unwrap()"], max: 0, only_in: &[] },
    Budget { label: ".expect()", patterns: &[".expect("], max: 0, only_in: &[] },
    Budget {
        label: "panicking macros",
        patterns: &["panic!(", "unreachable!(", "todo!(", "unimplemented!("],
        max: 0,
        only_in: &[],
    },
    Budget { label: "slice indexing by literal", patterns: &["[0]", "[1]"], max: 0, only_in: &[] },
];

// Silent loss: failures dropped without a log line or an Action.
const SILENT: &[Budget] = &[
    Budget { label: "let _ =", patterns: &["let _ ="], max: 0, only_in: &[] },
    Budget { label: ".ok()", patterns: &[".ok()"], max: 0, only_in: &[] },
];

// Geometry is f64 end to end. Integer/float crossings belong to table cell
// lookup only, each under an explicit lint allowance.
const CASTS: &[Budget] = &[
    Budget {
        label: "numeric `as` casts",
        patterns: &[" as usize", " as f64", " as i64", " as u32", " as i32", " as u16"],
        max: 4,
        only_in: &["hit.rs"],
    },
    Budget { label: "clippy cast allowances", patterns: &["allow(clippy::cast_"], max: 3, only_in: &["hit.rs"] },
];

// The engine, renderer and model stay browser-free so the host binary and
// the unit tests can drive them natively.
const BOUNDARIES: &[Budget] = &[
    Budget {
        label: "browser bindings",
        patterns: &["wasm_bindgen", "JsError", "JsValue", "web_sys", "js_sys"],
        max: usize::MAX,
        only_in: &["bridge.rs"],
    },
    Budget { label: "stdout/stderr printing", patterns: &["println!", "eprintln!", "dbg!("], max: 0, only_in: &[] },
    Budget { label: "#[allow(dead_code)]", patterns: &["allow(dead_code)"], max: 0, only_in: &[] },
];

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`, excluding `*_test.rs`.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found; run from the editor crate root");
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if path.extension().is_none_or(|e| e != "rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

/// Lines of code (not comments) containing any of `patterns`, per file.
fn hits(files: &[SourceFile], patterns: &[&str]) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| !line.trim_start().starts_with("//"))
                .filter(|line| patterns.iter().any(|p| line.contains(p)))
                .count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn check(budgets: &[Budget]) {
    let files = source_files();
    let mut failures = Vec::new();

    for budget in budgets {
        let found = hits(&files, budget.patterns);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            failures.push(format!("{}: found {count}, max {}", budget.label, budget.max));
        }
        for (path, c) in &found {
            let allowed = budget.only_in.is_empty() || budget.only_in.iter().any(|f| path.ends_with(f));
            if !allowed {
                failures.push(format!("{}: {c} in {path}, allowed only in {:?}", budget.label, budget.only_in));
            }
        }
    }

    assert!(failures.is_empty(), "hygiene budget exceeded:\n  {}", failures.join("\n  "));
}

#[test]
fn no_panic_paths() {
    check(PANICS);
}

#[test]
fn no_silently_dropped_errors() {
    check(SILENT);
}

#[test]
fn numeric_casts_stay_in_table_cell_lookup() {
    check(CASTS);
}

#[test]
fn browser_bindings_stay_in_the_bridge() {
    check(BOUNDARIES);
}
