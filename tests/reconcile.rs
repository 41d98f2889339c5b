use permfix::core::event::{dispatch, ActivateEvent, ConfigureEvent, Event};
use permfix::core::fixer::PermissionsFixer;
use permfix::core::manifest;
use permfix::core::oplog::{Level, Operation};
use permfix::util::fs::{current_mode, LocalFilesystem};
use std::path::Path;
use tempfile::TempDir;

const FIXTURE: &str = include_str!("fixtures/permissions.toml");

fn run(root: &Path, manifest_text: &str) -> PermissionsFixer<LocalFilesystem> {
    let manifest = manifest::parse(manifest_text).unwrap();
    let mut fixer = PermissionsFixer::new(LocalFilesystem::new(root));
    dispatch(
        &mut [&mut fixer],
        &Event::Activate(ActivateEvent::new(root.to_path_buf(), false)),
    );
    dispatch(
        &mut [&mut fixer],
        &Event::Configure(ConfigureEvent::new(
            manifest::modules(&manifest),
            manifest.options,
        )),
    );
    fixer
}

#[test]
fn creates_declared_paths() {
    let dir = TempDir::new().unwrap();
    let fixer = run(dir.path(), FIXTURE);

    for d in ["public/static/module1", "public/static/module2"] {
        assert!(dir.path().join(d).is_dir(), "{} missing", d);
    }
    for f in ["public/module1.log", "public/module2.log"] {
        assert!(dir.path().join(f).is_file(), "{} missing", f);
    }
    assert!(!dir.path().join("foo").exists());
    assert!(!dir.path().join("bar").exists());

    let errors: Vec<_> = fixer.log().errors().collect();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.operation == Operation::Collect));
    assert!(errors[0].message.starts_with("Legacy::required_directories()"));
    assert!(errors[1].message.starts_with("Legacy::required_files()"));
    assert!(errors
        .iter()
        .all(|e| e.message.contains("should return an array.")));
}

#[cfg(unix)]
#[test]
fn applies_configured_modes() {
    let dir = TempDir::new().unwrap();
    run(dir.path(), FIXTURE);

    assert_eq!(
        current_mode(&dir.path().join("public/static/module1")).unwrap(),
        Some(0o775)
    );
    assert_eq!(
        current_mode(&dir.path().join("public/module2.log")).unwrap(),
        Some(0o664)
    );
}

#[test]
fn second_run_is_quiet() {
    let dir = TempDir::new().unwrap();
    run(dir.path(), FIXTURE);
    std::fs::write(dir.path().join("public/module1.log"), b"existing\n").unwrap();

    let fixer = run(dir.path(), FIXTURE);
    assert!(fixer
        .log()
        .errors()
        .all(|e| e.operation == Operation::Collect));
    assert_eq!(
        std::fs::read(dir.path().join("public/module1.log")).unwrap(),
        b"existing\n"
    );
}

#[cfg(unix)]
#[test]
fn failures_do_not_stop_the_run() {
    let dir = TempDir::new().unwrap();
    let manifest = r#"
[[modules]]
name = "Escaping"
directories = ["../outside"]

[[modules]]
name = "Orphan"
files = ["missing/dir/orphan.log"]

[[modules]]
name = "Good"
directories = ["var/cache"]
files = ["var/cache/app.log"]
"#;
    let fixer = run(dir.path(), manifest);

    assert!(dir.path().join("var/cache").is_dir());
    assert!(dir.path().join("var/cache/app.log").is_file());
    assert!(!dir.path().join("missing").exists());

    let errors: Vec<_> = fixer
        .log()
        .errors()
        .map(|e| (e.operation, e.level))
        .collect();
    // mkdir + chmod for the escaping dir, touch + chmod for the orphan file
    assert_eq!(
        errors,
        vec![
            (Operation::Mkdir, Level::Error),
            (Operation::Touch, Level::Error),
            (Operation::Chmod, Level::Error),
            (Operation::Chmod, Level::Error),
        ]
    );
    let first = &fixer.log().entries()[0];
    assert!(first.message.contains("outside the project root"));
}
