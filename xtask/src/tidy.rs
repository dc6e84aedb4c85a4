use std::path::{Path, PathBuf};

use xshell::Shell;

use crate::project_root;

#[test]
fn library_sources_are_tidy() {
    let sh = Shell::new().unwrap();
    let mut problems = Vec::new();
    for path in rust_files(&sh, &project_root().join("src")) {
        let text = sh.read_file(&path).unwrap();
        check_text(&path, &text, &mut problems);
    }
    assert!(problems.is_empty(), "\n{}\n", problems.join("\n"));
}

#[test]
fn tests_are_tidy() {
    let sh = Shell::new().unwrap();
    let mut problems = Vec::new();
    for path in rust_files(&sh, &project_root().join("tests")) {
        let text = sh.read_file(&path).unwrap();
        check_trailing_whitespace(&path, &text, &mut problems);
    }
    assert!(problems.is_empty(), "\n{}\n", problems.join("\n"));
}

fn check_text(path: &Path, text: &str, problems: &mut Vec<String>) {
    for (marker, what) in [("dbg!(", "debug print"), ("todo!(", "unfinished code")] {
        if text.contains(marker) {
            problems.push(format!("{}: {what} `{marker}`", path.display()));
        }
    }
    check_trailing_whitespace(path, text, problems);
}

fn check_trailing_whitespace(path: &Path, text: &str, problems: &mut Vec<String>) {
    if !text.ends_with('\n') {
        problems.push(format!("{}: missing trailing newline", path.display()));
    }
    for (idx, line) in text.lines().enumerate() {
        if line.ends_with(' ') || line.ends_with('\t') {
            problems.push(format!("{}:{}: trailing whitespace", path.display(), idx + 1));
        }
    }
}

fn rust_files(sh: &Shell, dir: &Path) -> Vec<PathBuf> {
    let mut res = Vec::new();
    let mut work = vec![dir.to_path_buf()];
    while let Some(dir) = work.pop() {
        for path in sh.read_dir(&dir).unwrap() {
            if path.is_dir() {
                work.push(path);
            } else if path.extension().map_or(false, |it| it == "rs") {
                res.push(path);
            }
        }
    }
    res.sort();
    res
}
