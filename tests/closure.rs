use pkgraph::config::{AnalysisConfig, InclusionPolicy, RootConfig};
use pkgraph::core::{expand_dependencies, FileScanner, TreeWalker, WalkState};
use pkgraph::parsers::go::GoParser;
use std::fs;
use std::path::Path;

fn write<P: AsRef<Path>>(path: P, content: &str) {
    let path = path.as_ref();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn config(base: &Path) -> AnalysisConfig {
    let roots = RootConfig::new(base.join("gopath/src"), base.join("goroot/src"), base.join("work"));
    AnalysisConfig::new(roots, InclusionPolicy::default())
}

/// work/main.go -> chain/p0 -> chain/p1 -> ... -> chain/p{n-1}
fn chain(base: &Path, n: usize) {
    write(base.join("work/main.go"), "package main\n\nimport \"chain/p0\"\n");
    for i in 0..n {
        let source = if i + 1 < n {
            format!("package p{}\n\nimport \"chain/p{}\"\n", i, i + 1)
        } else {
            format!("package p{}\n", i)
        };
        write(base.join(format!("gopath/src/chain/p{}/p.go", i)), &source);
    }
}

#[test]
fn closure_follows_a_chain_to_the_end_and_stops() {
    let dir = tempfile::TempDir::new().unwrap();
    let base = dir.path();
    chain(base, 6);

    let config = config(base);
    let scanner = FileScanner::new(&config, Box::new(GoParser::new().unwrap()));
    let mut walker = TreeWalker::new(&config, scanner);
    let mut state = WalkState::new();

    walker.walk(&base.join("work"), true, &mut state);
    assert_eq!(state.dependencies.len(), 1);

    let walked = expand_dependencies(&mut walker, &mut state);
    assert_eq!(walked, 6);
    assert_eq!(state.dependencies.len(), 6);
    for i in 0..6 {
        assert!(state.visited.contains(&base.join(format!("gopath/src/chain/p{}", i))));
    }

    // Nothing left to do on a second pass.
    assert_eq!(expand_dependencies(&mut walker, &mut state), 0);
    assert_eq!(state.dependencies.len(), 6);
}

#[test]
fn closure_handles_import_cycles() {
    let dir = tempfile::TempDir::new().unwrap();
    let base = dir.path();
    write(base.join("work/main.go"), "package main\nimport \"cyc/a\"\n");
    write(base.join("gopath/src/cyc/a/a.go"), "package a\nimport \"cyc/b\"\n");
    write(base.join("gopath/src/cyc/b/b.go"), "package b\nimport \"cyc/a\"\n");

    let config = config(base);
    let scanner = FileScanner::new(&config, Box::new(GoParser::new().unwrap()));
    let mut walker = TreeWalker::new(&config, scanner);
    let mut state = WalkState::new();

    walker.walk(&base.join("work"), true, &mut state);
    let walked = expand_dependencies(&mut walker, &mut state);

    assert_eq!(walked, 2);
    assert_eq!(state.dependencies.len(), 3);
    assert_eq!(state.stats.files_scanned, 3);
}

#[test]
fn destinations_inside_a_root_are_not_walked_again() {
    let dir = tempfile::TempDir::new().unwrap();
    let base = dir.path();
    write(base.join("gopath/src/app/main.go"), "package main\nimport \"app/lib\"\n");
    write(base.join("gopath/src/app/lib/lib.go"), "package lib\n");

    let config = config(base);
    let scanner = FileScanner::new(&config, Box::new(GoParser::new().unwrap()));
    let mut walker = TreeWalker::new(&config, scanner);
    let mut state = WalkState::new();

    walker.walk(&base.join("gopath/src/app"), true, &mut state);
    assert_eq!(expand_dependencies(&mut walker, &mut state), 0);
    assert_eq!(state.stats.files_scanned, 2);
}
