//! Source rules for the browser bundle, checked at test time.
//!
//! The client runs inside a doctor's tab: a panic loses an unsaved
//! inspection, a swallowed error hides a failed save, and a browser API
//! reached from an SSR build breaks the host. Budgets only go down.

use std::fs;
use std::path::{Path, PathBuf};

/// `(pattern, budget, what it costs)` for production sources.
const BUDGETS: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "panics the tab"),
    (".expect(", 0, "panics the tab"),
    ("panic!(", 0, "panics the tab"),
    ("unreachable!(", 0, "panics the tab"),
    ("todo!(", 0, "panics the tab"),
    ("unimplemented!(", 0, "panics the tab"),
    ("dbg!(", 0, "debug leftover"),
    ("#[allow(dead_code)]", 0, "hides unused code"),
    ("let _ =", 0, "drops a result unseen; log it or gate the binding with cfg_attr"),
    // Optional parses: dates, stored token, error bodies, birthday input.
    (".ok()", 10, "turns an error into None"),
];

/// Markers of code that only exists in the browser.
const BROWSER_ONLY: &[&str] = &["web_sys::", "gloo_net::", "gloo_timers::", "spawn_local"];

struct SourceFile {
    path: PathBuf,
    content: String,
}

impl SourceFile {
    fn is_test(&self) -> bool {
        self.path.to_string_lossy().ends_with("_test.rs")
    }

    fn hits(&self, pattern: &str) -> usize {
        self.content.lines().filter(|line| line.contains(pattern)).count()
    }
}

fn load(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            load(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path, content });
            }
        }
    }
}

fn all_sources() -> Vec<SourceFile> {
    let mut files = Vec::new();
    load(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found; run from the client crate root");
    files
}

fn production_sources() -> Vec<SourceFile> {
    all_sources().into_iter().filter(|f| !f.is_test()).collect()
}

// =============================================================================
// Budgets
// =============================================================================

#[test]
fn pattern_budgets_hold() {
    let files = production_sources();
    let mut report = Vec::new();
    for &(pattern, budget, cost) in BUDGETS {
        let per_file: Vec<_> = files
            .iter()
            .map(|f| (f.path.display().to_string(), f.hits(pattern)))
            .filter(|(_, n)| *n > 0)
            .collect();
        let found: usize = per_file.iter().map(|(_, n)| n).sum();
        if found > budget {
            report.push(format!("`{pattern}` ({cost}): found {found}, budget {budget}"));
            report.extend(per_file.iter().map(|(path, n)| format!("    {path}: {n}")));
        }
    }
    assert!(report.is_empty(), "budget exceeded:\n{}", report.join("\n"));
}

// =============================================================================
// Browser boundary
// =============================================================================

#[test]
fn browser_apis_stay_behind_the_hydrate_feature() {
    let offenders: Vec<_> = production_sources()
        .into_iter()
        .filter(|f| BROWSER_ONLY.iter().any(|m| f.content.contains(m)))
        .filter(|f| !f.content.contains("feature = \"hydrate\""))
        .map(|f| f.path.display().to_string())
        .collect();
    assert!(offenders.is_empty(), "browser APIs without a hydrate gate:\n  {}", offenders.join("\n  "));
}

#[test]
fn only_the_storage_module_touches_local_storage() {
    let offenders: Vec<_> = production_sources()
        .into_iter()
        .filter(|f| f.content.contains("local_storage("))
        .filter(|f| !f.path.ends_with("util/storage.rs"))
        .map(|f| f.path.display().to_string())
        .collect();
    assert!(offenders.is_empty(), "token storage accessed outside util/storage.rs:\n  {}", offenders.join("\n  "));
}

#[test]
fn client_never_names_an_upstream_host() {
    // Every call goes through the host's `/api` forwarder.
    let offenders: Vec<_> = production_sources()
        .into_iter()
        .filter(|f| f.content.contains("http://") || f.content.contains("https://"))
        .map(|f| f.path.display().to_string())
        .collect();
    assert!(offenders.is_empty(), "absolute URLs in client code:\n  {}", offenders.join("\n  "));
}

/// `on:event=handler.clone()` moves `handler` into the enclosing children
/// closure, which then only implements `FnOnce`; nested `Show` blocks need
/// `Fn`. Keep such handlers in a `StoredValue` instead.
fn cloned_handler(line: &str) -> bool {
    line.split_whitespace()
        .filter(|token| token.starts_with("on:"))
        .filter_map(|token| token.split_once('='))
        .any(|(_, value)| value.trim_end_matches('>').ends_with(".clone()"))
}

#[test]
fn event_handlers_are_not_cloned_into_views() {
    assert!(cloned_handler(r#"<button on:click=on_logout.clone()>"#));
    assert!(!cloned_handler(r#"<button on:click=move |_| logout.with_value(|f| f())>"#));
    assert!(!cloned_handler("use crate::state::session::Session; let s = session.clone();"));

    let offenders: Vec<_> = production_sources()
        .iter()
        .flat_map(|f| {
            f.content
                .lines()
                .enumerate()
                .filter(|(_, line)| cloned_handler(line))
                .map(|(i, _)| format!("{}:{}", f.path.display(), i + 1))
                .collect::<Vec<_>>()
        })
        .collect();
    assert!(offenders.is_empty(), "cloned event handlers:\n  {}", offenders.join("\n  "));
}

// =============================================================================
// Test wiring
// =============================================================================

#[test]
fn every_test_file_is_attached_to_its_module() {
    let files = all_sources();
    let orphans: Vec<_> = files
        .iter()
        .filter(|f| f.is_test())
        .filter_map(|test| {
            let name = test.path.file_name()?.to_string_lossy().into_owned();
            let owner = test.path.with_file_name(name.replace("_test.rs", ".rs"));
            let attach = format!("#[path = \"{name}\"]");
            let attached = files.iter().any(|f| f.path == owner && f.content.contains(&attach));
            (!attached).then(|| test.path.display().to_string())
        })
        .collect();
    assert!(orphans.is_empty(), "test files no module includes:\n  {}", orphans.join("\n  "));
}
