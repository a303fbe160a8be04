use pkgraph::config::{AnalysisConfig, InclusionPolicy, RootConfig};
use pkgraph::core::PathResolver;
use std::fs;
use std::path::Path;

fn config(base: &Path, policy: InclusionPolicy) -> AnalysisConfig {
    let roots = RootConfig::new(
        base.join("gopath/src"),
        base.join("goroot/src"),
        base.join("work"),
    )
    .with_vendor_root(base.join("work/vendor"));
    AnalysisConfig::new(roots, policy)
}

fn layout() -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    let base = dir.path();
    fs::create_dir_all(base.join("gopath/src/github.com/acme/util")).unwrap();
    fs::create_dir_all(base.join("goroot/src/fmt")).unwrap();
    fs::create_dir_all(base.join("work/vendor/github.com/other/lib")).unwrap();
    fs::create_dir_all(base.join("gopath/src/github.com/acme/app/vendor/dep")).unwrap();
    fs::write(base.join("gopath/src/github.com/acme/not_a_dir"), "x").unwrap();
    dir
}

#[test]
fn library_root_hit() {
    let dir = layout();
    let config = config(dir.path(), InclusionPolicy::default());
    let resolver = PathResolver::new(&config);

    assert_eq!(
        resolver.resolve("github.com/acme/util"),
        Some(dir.path().join("gopath/src/github.com/acme/util"))
    );
}

#[test]
fn system_and_vendor_roots_follow_policy() {
    let dir = layout();

    let closed = config(dir.path(), InclusionPolicy::default());
    let resolver = PathResolver::new(&closed);
    assert_eq!(resolver.resolve("fmt"), None);
    assert_eq!(resolver.resolve("github.com/other/lib"), None);

    let open = config(
        dir.path(),
        InclusionPolicy {
            include_system_root: true,
            include_vendor: true,
            ..InclusionPolicy::default()
        },
    );
    let resolver = PathResolver::new(&open);
    assert_eq!(
        resolver.resolve("fmt"),
        Some(dir.path().join("goroot/src/fmt"))
    );
    assert_eq!(
        resolver.resolve("github.com/other/lib"),
        Some(dir.path().join("work/vendor/github.com/other/lib"))
    );
}

#[test]
fn files_and_missing_paths_do_not_resolve() {
    let dir = layout();
    let config = config(dir.path(), InclusionPolicy::default());
    let resolver = PathResolver::new(&config);

    assert_eq!(resolver.resolve("github.com/acme/not_a_dir"), None);
    assert_eq!(resolver.resolve("github.com/acme/missing"), None);
    assert_eq!(resolver.resolve(""), None);
}

#[test]
fn specifier_is_cleaned() {
    let dir = layout();
    let config = config(dir.path(), InclusionPolicy::default());
    let resolver = PathResolver::new(&config);

    assert_eq!(
        resolver.resolve("github.com/acme/./x/../util"),
        Some(dir.path().join("gopath/src/github.com/acme/util"))
    );
}

#[test]
fn nested_vendor_paths_follow_policy() {
    let dir = layout();

    let closed = config(dir.path(), InclusionPolicy::default());
    let resolver = PathResolver::new(&closed);
    assert_eq!(resolver.resolve("github.com/acme/app/vendor/dep"), None);
    assert_eq!(resolver.resolve("github.com/acme/app/Vendor/dep"), None);

    let open = config(
        dir.path(),
        InclusionPolicy {
            include_vendor: true,
            ..InclusionPolicy::default()
        },
    );
    assert_eq!(
        PathResolver::new(&open).resolve("github.com/acme/app/vendor/dep"),
        Some(dir.path().join("gopath/src/github.com/acme/app/vendor/dep"))
    );
}
