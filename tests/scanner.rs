use pkgraph::config::{AnalysisConfig, InclusionPolicy, RootConfig};
use pkgraph::core::{Dependency, FileScanner};
use pkgraph::parsers::go::GoParser;
use std::fs;
use std::path::Path;

fn go_file(imports: &[&str]) -> String {
    let mut source = String::from("package demo\n\nimport (\n");
    for import in imports {
        source.push_str(&format!("\t\"{}\"\n", import));
    }
    source.push_str(")\n\nfunc Demo() {}\n");
    source
}

fn config(base: &Path, policy: InclusionPolicy) -> AnalysisConfig {
    let roots = RootConfig::new(base.join("gopath/src"), base.join("goroot/src"), base.join("work"));
    AnalysisConfig::new(roots, policy)
}

#[test]
fn scanner_emits_resolved_imports_only() {
    let dir = tempfile::TempDir::new().unwrap();
    let base = dir.path();
    fs::create_dir_all(base.join("gopath/src/libs/util")).unwrap();
    fs::create_dir_all(base.join("gopath/src/libs/log")).unwrap();
    fs::create_dir_all(base.join("work")).unwrap();
    let file = base.join("work/a.go");
    fs::write(&file, go_file(&["fmt", "libs/util", "libs/log"])).unwrap();

    let config = config(base, InclusionPolicy::default());
    let mut scanner = FileScanner::new(&config, Box::new(GoParser::new().unwrap()));
    let deps = scanner.scan(&file).unwrap();

    assert_eq!(
        deps,
        vec![
            Dependency::new(file.clone(), base.join("gopath/src/libs/util")),
            Dependency::new(file.clone(), base.join("gopath/src/libs/log")),
        ]
    );
}

#[test]
fn parse_failure_carries_the_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("broken.go");
    fs::write(&file, "this is not go\n").unwrap();

    let config = config(dir.path(), InclusionPolicy::default());
    let mut scanner = FileScanner::new(&config, Box::new(GoParser::new().unwrap()));
    let err = scanner.scan(&file).unwrap_err();

    assert_eq!(err.path, file);
    assert!(err.to_string().contains("broken.go"));
}

#[test]
fn test_files_follow_policy() {
    let dir = tempfile::TempDir::new().unwrap();
    let base = dir.path();

    let default = config(base, InclusionPolicy::default());
    let scanner = FileScanner::new(&default, Box::new(GoParser::new().unwrap()));
    assert!(scanner.accepts(Path::new("/x/main.go")));
    assert!(!scanner.accepts(Path::new("/x/main_test.go")));
    assert!(!scanner.accepts(Path::new("/x/MAIN_TEST.GO")));
    assert!(!scanner.accepts(Path::new("/x/readme.md")));
    assert!(!scanner.accepts(Path::new("/x/go")));

    let with_tests = config(
        base,
        InclusionPolicy {
            include_tests: true,
            ..InclusionPolicy::default()
        },
    );
    let scanner = FileScanner::new(&with_tests, Box::new(GoParser::new().unwrap()));
    assert!(scanner.accepts(Path::new("/x/main_test.go")));
}
