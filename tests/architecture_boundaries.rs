use std::fs;
use std::path::{Path, PathBuf};

fn rs_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().and_then(|s| s.to_str()) == Some("rs") {
                out.push(path);
            }
        }
    }
    out.sort();
    out
}

fn rel(path: &Path) -> String {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let rel = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string();
    rel.replace('\\', "/")
}

#[test]
fn metrics_module_is_presentation_free() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/metrics");
    let mut violations = Vec::new();

    for file in rs_files(&root) {
        let content = fs::read_to_string(&file).unwrap_or_default();
        for forbidden in ["crate::ui", "crate::app", "crate::event", "ratatui", "crossterm"] {
            if content.contains(forbidden) {
                violations.push(format!(
                    "{} imports forbidden dependency `{}`",
                    rel(&file),
                    forbidden
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Metrics layering violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn sysinfo_is_confined_to_host_source() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut violations = Vec::new();

    for file in rs_files(&root) {
        let content = fs::read_to_string(&file).unwrap_or_default();
        if !content.contains("sysinfo::") {
            continue;
        }
        let rel_path = rel(&file);
        if rel_path != "src/metrics/source.rs" {
            violations.push(format!("{rel_path} uses `sysinfo` outside the host source"));
        }
    }

    assert!(
        violations.is_empty(),
        "Host facility boundary violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn probes_do_not_block_outside_the_cpu_window() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/metrics");
    let mut violations = Vec::new();

    for file in rs_files(&root) {
        let content = fs::read_to_string(&file).unwrap_or_default();
        let rel_path = rel(&file);
        if content.contains("thread::sleep") && rel_path != "src/metrics/source.rs" {
            violations.push(format!("{rel_path} sleeps outside `HostSource::wait`"));
        }
    }

    assert!(
        violations.is_empty(),
        "Blocking violations:\n{}",
        violations.join("\n")
    );
}
