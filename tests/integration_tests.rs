//! Integration tests for artifact discovery, module staging and copying.
//!
//! These drive the library against a throwaway port tree. No build tool
//! is involved.

mod helpers;

use helpers::{assert_file_absent, assert_file_exists, file_names, TestEnv};
use micropy_build::artifact::{self, collect_artifacts, Exclusions};
use micropy_build::build;
use micropy_build::config::DEFAULT_EXCLUSIONS;
use std::ffi::OsStr;
use std::fs;
use std::os::unix::ffi::OsStrExt;

// =============================================================================
// Artifact discovery
// =============================================================================

#[test]
fn test_excluded_segments_never_returned() {
    let env = TestEnv::new();
    env.port_file("esp-idf/build/x.bin", "");
    env.port_file("build-GENERIC/bootloader/bootloader.bin", "");
    env.port_file("build-GENERIC/partition_table/partition-table.bin", "");
    env.port_file("build-GENERIC/CMakeFiles/compiler_id.bin", "");
    env.port_file("build-GENERIC/micropython.bin", "");
    env.port_file("build-GENERIC/firmware.bin", "");

    let exclusions = Exclusions::new(DEFAULT_EXCLUSIONS);
    let found = collect_artifacts(&env.port_path(), "micropython", &exclusions).unwrap();

    for path in &found {
        let rel = path.strip_prefix(env.port_path()).unwrap();
        for segment in rel.components() {
            let segment = segment.as_os_str().to_string_lossy();
            assert!(
                !DEFAULT_EXCLUSIONS.contains(&&*segment),
                "excluded segment in {}",
                path.display()
            );
        }
    }
    let mut names: Vec<_> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["firmware.bin", "micropython.bin"]);
}

#[test]
fn test_partial_segment_names_are_not_excluded() {
    let env = TestEnv::new();
    env.port_file("my-bootloader-tools/app.bin", "");

    let exclusions = Exclusions::new(DEFAULT_EXCLUSIONS);
    let found = collect_artifacts(&env.port_path(), "micropython", &exclusions).unwrap();
    assert_eq!(found.len(), 1);
}

#[test]
fn test_search_root_inside_excluded_directory_yields_nothing() {
    let env = TestEnv::new();
    let root = env.base().join("esp-idf/ports/esp32");
    helpers::write_file(&root.join("build/x.bin"), "");

    let exclusions = Exclusions::new(DEFAULT_EXCLUSIONS);
    let found = collect_artifacts(&root, "micropython", &exclusions).unwrap();
    assert!(found.is_empty(), "found {:?}", found);
}

#[test]
fn test_non_utf8_artifact_name_is_found() {
    let env = TestEnv::new();
    let dir = env.port_path().join("build-GENERIC");
    fs::create_dir_all(&dir).unwrap();
    let image = dir.join(OsStr::from_bytes(b"fw\xff.bin"));
    fs::write(&image, "image").unwrap();

    let found = collect_artifacts(&env.port_path(), "micropython", &Exclusions::default()).unwrap();
    assert_eq!(found, vec![image]);
}

#[test]
fn test_exact_binary_found_once() {
    let env = TestEnv::new();
    let binary = env.port_file("micropython", "");

    let found = collect_artifacts(&env.port_path(), "micropython", &Exclusions::default()).unwrap();
    assert_eq!(found, vec![binary]);
}

#[test]
fn test_binary_matching_both_passes_found_twice() {
    let env = TestEnv::new();
    let image = env.port_file("build/micropython.bin", "");

    let found =
        collect_artifacts(&env.port_path(), "micropython.bin", &Exclusions::default()).unwrap();
    assert_eq!(found, vec![image.clone(), image]);
}

#[test]
fn test_missing_search_root_yields_nothing() {
    let env = TestEnv::new();
    let root = env.micropy_root.join("ports/stm32");

    let found = collect_artifacts(&root, "micropython", &Exclusions::default()).unwrap();
    assert!(found.is_empty());
}

// =============================================================================
// Module staging
// =============================================================================

#[test]
fn test_staging_replaces_stale_entries() {
    let env = TestEnv::new();
    let modules = env.port_path().join("modules");

    env.module_file("sensors/__init__.py", "");
    env.module_file("sensors/bme280.py", "new");
    env.module_file("boot.py", "print('boot')");

    // Left over from a previous staging run.
    helpers::write_file(&modules.join("sensors/old.txt"), "stale");
    helpers::write_file(&modules.join("sensors/bme280.py"), "old");
    // Not part of the staged set; must survive.
    helpers::write_file(&modules.join("_boot.py"), "port default");

    let staged = build::stage(&env.pymodules, &modules).unwrap();

    assert_eq!(staged.len(), 2);
    assert_file_absent(&modules.join("sensors/old.txt"));
    assert_eq!(fs::read_to_string(modules.join("sensors/bme280.py")).unwrap(), "new");
    assert_file_exists(&modules.join("sensors/__init__.py"));
    assert_file_exists(&modules.join("boot.py"));
    assert_file_exists(&modules.join("_boot.py"));
    for entry in &staged {
        assert!(entry.dest.starts_with(&modules));
    }
}

#[test]
fn test_staging_missing_source_is_fatal() {
    let env = TestEnv::new();
    fs::remove_dir_all(&env.pymodules).unwrap();

    let err = build::stage(&env.pymodules, &env.port_path().join("modules")).unwrap_err();
    assert!(err.to_string().contains(&env.pymodules.display().to_string()));
}

// =============================================================================
// Artifact copy
// =============================================================================

#[test]
fn test_copy_creates_destination_and_is_idempotent() {
    let env = TestEnv::new();
    env.port_file("build-GENERIC/micropython.bin", "image");
    env.port_file("build-GENERIC/bootloader/bootloader.bin", "skip");
    let config = env.config();
    let dest = env.base().join("out/nested/artifacts");

    let first = artifact::copy_artifacts(&config, &dest, "micropython").unwrap();
    assert_eq!(first, 1);
    assert_eq!(file_names(&dest), vec!["micropython.bin"]);

    let second = artifact::copy_artifacts(&config, &dest, "micropython").unwrap();
    assert_eq!(second, 1);
    assert_eq!(file_names(&dest), vec!["micropython.bin"]);
    assert_eq!(fs::read_to_string(dest.join("micropython.bin")).unwrap(), "image");
}

#[test]
fn test_copy_with_no_artifacts_succeeds() {
    let env = TestEnv::new();
    let config = env.config();

    let copied = artifact::copy_artifacts(&config, &env.artifacts, "missing.bin").unwrap();
    assert_eq!(copied, 0);
    assert!(file_names(&env.artifacts).is_empty());
}
