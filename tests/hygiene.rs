//! Hygiene: enforces coding standards at test time.
//!
//! Scans the production sources under `src/` for antipatterns. Each pattern
//! has a budget (ideally zero). The budget never grows: fix an existing hit
//! before adding a new one.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

/// Pattern, budget, and why it is budgeted.
const BUDGETS: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "panics"),
    (".expect(", 0, "panics"),
    ("panic!(", 0, "panics"),
    ("unreachable!(", 0, "panics"),
    ("todo!(", 0, "stub"),
    ("unimplemented!(", 0, "stub"),
    ("let _ =", 0, "discards an error without inspecting it"),
    (".ok()", 0, "discards an error without inspecting it"),
    ("#[allow(dead_code)]", 0, "hides unused code"),
    (".borrow_mut()", 2, "can panic on re-entrant events"),
];

/// Leaked closures are only allowed where listeners are registered.
const FORGET_ALLOWED_IN: &str = "browser.rs";

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`, excluding tests and test fakes.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
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
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") || path_str.ends_with("fake.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content: strip_test_modules(&content) });
            }
        }
    }
}

/// Drop inline `#[cfg(test)] mod tests { .. }` blocks, which sit at the end
/// of a file by convention.
fn strip_test_modules(content: &str) -> String {
    match content.find("#[cfg(test)]\nmod tests") {
        Some(at) => content[..at].to_string(),
        None => content.to_string(),
    }
}

fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn sources_are_found() {
    assert!(source_files().iter().any(|f| f.path.ends_with("lib.rs")));
}

#[test]
fn pattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for &(pattern, max, reason) in BUDGETS {
        let hits = count_in_source(&files, pattern);
        let count: usize = hits.iter().map(|(_, c)| c).sum();
        if count > max {
            failures.push(format!("{pattern} ({reason}): found {count}, max {max}\n{}", format_hits(&hits)));
        }
    }
    assert!(failures.is_empty(), "budgets exceeded:\n{}", failures.join("\n"));
}

#[test]
fn closures_are_only_leaked_when_wiring_listeners() {
    let files = source_files();
    let stray: Vec<_> = count_in_source(&files, ".forget()")
        .into_iter()
        .filter(|(path, _)| !path.ends_with(FORGET_ALLOWED_IN))
        .collect();
    assert!(stray.is_empty(), "closures leaked outside {FORGET_ALLOWED_IN}:\n{}", format_hits(&stray));
}
