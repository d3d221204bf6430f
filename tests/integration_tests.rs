//! Integration tests for flowdeps
//!
//! These tests verify:
//! - Reconciliation scenarios against package.json files on disk
//! - Idempotence, monotonic upgrades and user-pin preservation
//! - Manifest load/save round-trips
//! - Frontend resource helpers

use flowdeps::domain::{DependencyEntry, DependencyKind};
use flowdeps::manifest::{Manifest, ManifestStore};
use flowdeps::reconcile::reconcile;
use flowdeps::resolver::{DefaultDependencies, DependencyResolver, DesiredDependencies};
use flowdeps::updater::PackageUpdater;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Test fixture directory creation helper
fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Resolver without built-in defaults, so tests control every entry
fn empty_resolver() -> DependencyResolver {
    let defaults = DefaultDependencies::parse("format_version = 1\n", Path::new("empty.toml"))
        .expect("valid defaults");
    DependencyResolver::with_defaults(defaults)
}

fn load(path: &Path) -> Manifest {
    ManifestStore::default().load(path).unwrap()
}

fn framework_version(manifest: &Manifest, name: &str) -> Option<String> {
    manifest
        .framework
        .as_ref()
        .and_then(|record| record.dependencies.get(name).cloned())
}

mod scenarios {
    use super::*;

    #[test]
    fn test_scenario_a_new_dependency() {
        let temp_dir = create_test_dir();
        let updater = PackageUpdater::new(temp_dir.path(), empty_resolver(), ManifestStore::default());

        let outcome = updater
            .update_packages(&[DependencyEntry::new("foo", "1.0.0")], &[])
            .unwrap();

        assert!(outcome.has_changes());
        assert!(outcome.written);
        let manifest = load(&updater.package_json_path());
        assert_eq!(manifest.dependencies.get("foo").unwrap(), "1.0.0");
        assert_eq!(framework_version(&manifest, "foo").as_deref(), Some("1.0.0"));
        assert_eq!(manifest.name.as_deref(), Some("no-name"));
        assert_eq!(manifest.license.as_deref(), Some("UNLICENSED"));
    }

    #[test]
    fn test_scenario_b_framework_upgrade() {
        let temp_dir = create_test_dir();
        fs::write(
            temp_dir.path().join("package.json"),
            r#"{
  "name": "app",
  "dependencies": { "foo": "1.0.0" },
  "vaadin": { "dependencies": { "foo": "1.0.0" }, "hash": "" }
}"#,
        )
        .unwrap();
        let updater = PackageUpdater::new(temp_dir.path(), empty_resolver(), ManifestStore::default());

        let outcome = updater
            .update_packages(&[DependencyEntry::new("foo", "1.2.0")], &[])
            .unwrap();

        assert_eq!(outcome.change_count(), 1);
        assert_eq!(outcome.changes[0].previous.as_deref(), Some("1.0.0"));
        let manifest = load(&updater.package_json_path());
        assert_eq!(manifest.dependencies.get("foo").unwrap(), "1.2.0");
        assert_eq!(framework_version(&manifest, "foo").as_deref(), Some("1.2.0"));
    }

    #[test]
    fn test_scenario_c_user_override_kept() {
        let temp_dir = create_test_dir();
        let path = temp_dir.path().join("package.json");
        let original = r#"{
  "name": "app",
  "dependencies": { "foo": "2.0.0" },
  "vaadin": { "dependencies": { "foo": "1.0.0" }, "hash": "" }
}"#;
        fs::write(&path, original).unwrap();
        let updater = PackageUpdater::new(temp_dir.path(), empty_resolver(), ManifestStore::default());

        let outcome = updater
            .update_packages(&[DependencyEntry::new("foo", "1.2.0")], &[])
            .unwrap();

        assert!(!outcome.has_changes());
        assert!(!outcome.written);
        // Nothing changed at the top level, so the file is left alone
        assert_eq!(fs::read_to_string(&path).unwrap(), original);

        let mut manifest = load(&path);
        let desired = DesiredDependencies::new().with(DependencyKind::Dependencies, "foo", "1.2.0");
        manifest = reconcile(manifest, &desired).unwrap().manifest;
        assert_eq!(manifest.dependencies.get("foo").unwrap(), "2.0.0");
        assert_eq!(framework_version(&manifest, "foo").as_deref(), Some("1.2.0"));
    }

    #[test]
    fn test_scenario_d_malformed_version_aborts() {
        let temp_dir = create_test_dir();
        let path = temp_dir.path().join("package.json");
        let original = "{\n  \"name\": \"app\",\n  \"dependencies\": {}\n}\n";
        fs::write(&path, original).unwrap();
        let updater = PackageUpdater::new(temp_dir.path(), empty_resolver(), ManifestStore::default());

        let err = updater
            .update_packages(
                &[
                    DependencyEntry::new("aaa", "1.0.0"),
                    DependencyEntry::new("bbb", "abc"),
                ],
                &[],
            )
            .unwrap_err();

        assert!(err.to_string().contains("abc"));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }
}

mod properties {
    use super::*;

    #[test]
    fn test_idempotence_with_builtin_defaults() {
        let temp_dir = create_test_dir();
        let updater = PackageUpdater::new(
            temp_dir.path(),
            DependencyResolver::builtin(),
            ManifestStore::default(),
        );
        let scanned = vec![DependencyEntry::new("@vaadin/vaadin-button", "1.2.0")];

        let first = updater.update_packages(&scanned, &[]).unwrap();
        assert_eq!(first.change_count(), 16);
        let after_first = fs::read_to_string(updater.package_json_path()).unwrap();

        let second = updater.update_packages(&scanned, &[]).unwrap();
        assert_eq!(second.change_count(), 0);
        assert!(!second.written);
        assert_eq!(
            fs::read_to_string(updater.package_json_path()).unwrap(),
            after_first
        );
    }

    #[test]
    fn test_monotonic_upgrade() {
        let mut manifest = Manifest::new_application();
        for version in ["1.0.0", "1.1.0", "1.0.5", "2.0.0"] {
            let desired = DesiredDependencies::new().with(DependencyKind::Dependencies, "foo", version);
            let previous_recorded = framework_version(&manifest, "foo");
            manifest = reconcile(manifest, &desired).unwrap().manifest;

            // Framework-managed versions follow the framework in both directions
            assert_eq!(manifest.dependencies.get("foo").unwrap(), version);
            assert_eq!(framework_version(&manifest, "foo").as_deref(), Some(version));
            if let Some(previous) = previous_recorded {
                assert_ne!(previous, version);
            }
        }
        assert!(manifest.unmirrored_entries().is_empty());
    }

    #[test]
    fn test_user_pin_preserved_on_first_introduction() {
        let mut manifest = Manifest::new_application();
        manifest
            .dev_dependencies
            .insert("webpack".to_string(), "5.0.0".to_string());

        let desired =
            DesiredDependencies::new().with(DependencyKind::DevDependencies, "webpack", "4.30.0");
        let result = reconcile(manifest, &desired).unwrap();

        assert!(!result.has_changes());
        assert_eq!(
            result.manifest.dev_dependencies.get("webpack").unwrap(),
            "5.0.0"
        );
        let record = result.manifest.framework.as_ref().unwrap();
        assert_eq!(record.dev_dependencies.get("webpack").unwrap(), "4.30.0");
    }

    #[test]
    fn test_pinned_version_survives_later_runs() {
        let mut manifest = Manifest::new_application();
        manifest
            .dependencies
            .insert("foo".to_string(), "3.0.0".to_string());

        for version in ["1.0.0", "1.1.0", "2.5.0"] {
            let desired = DesiredDependencies::new().with(DependencyKind::Dependencies, "foo", version);
            let result = reconcile(manifest, &desired).unwrap();
            assert!(!result.has_changes());
            manifest = result.manifest;
        }
        assert_eq!(manifest.dependencies.get("foo").unwrap(), "3.0.0");

        // A strictly newer framework version still wins
        let desired = DesiredDependencies::new().with(DependencyKind::Dependencies, "foo", "3.1.0");
        let result = reconcile(manifest, &desired).unwrap();
        assert_eq!(result.change_count(), 1);
        assert_eq!(result.manifest.dependencies.get("foo").unwrap(), "3.1.0");
    }

    #[test]
    fn test_round_trip_without_changes() {
        let temp_dir = create_test_dir();
        let path = temp_dir.path().join("package.json");
        let original = r#"{"scripts":{"build":"webpack"},"name":"app","private":true,
"dependencies":{"lit":"^2.0.0"},"vaadin":{"dependencies":{},"hash":"abc","disableUsageStatistics":true}}"#;
        fs::write(&path, original).unwrap();

        let store = ManifestStore::default();
        let manifest = store.load(&path).unwrap();
        store.save(&path, &manifest).unwrap();

        let before: serde_json::Value = serde_json::from_str(original).unwrap();
        let mut after: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        // Sections the store always writes
        after.as_object_mut().unwrap().remove("devDependencies");
        after["vaadin"]
            .as_object_mut()
            .unwrap()
            .remove("devDependencies");
        assert_eq!(before, after);

        // A second cycle is byte-for-byte stable
        let first = fs::read_to_string(&path).unwrap();
        let manifest = store.load(&path).unwrap();
        store.save(&path, &manifest).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_written_file_format() {
        let temp_dir = create_test_dir();
        let updater = PackageUpdater::new(temp_dir.path(), empty_resolver(), ManifestStore::default());

        updater
            .update_packages(
                &[DependencyEntry::new("foo", "1.0.0")],
                &[DependencyEntry::new("bar", "2.0.0")],
            )
            .unwrap();

        let content = fs::read_to_string(updater.package_json_path()).unwrap();
        let expected = r#"{
  "name": "no-name",
  "license": "UNLICENSED",
  "dependencies": {
    "foo": "1.0.0"
  },
  "devDependencies": {
    "bar": "2.0.0"
  },
  "vaadin": {
    "dependencies": {
      "foo": "1.0.0"
    },
    "devDependencies": {
      "bar": "2.0.0"
    },
    "hash": ""
  }
}
"#;
        assert_eq!(content, expected);
    }
}

mod resolver_and_updater {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_custom_defaults_file() {
        let temp_dir = create_test_dir();
        let defaults_path = temp_dir.path().join("defaults.toml");
        let mut file = fs::File::create(&defaults_path).unwrap();
        writeln!(
            file,
            "format_version = 1\n\n[dependencies]\nlit = \"2.0.0\"\n\n[dev-dependencies]\nvite = \"5.0.0\""
        )
        .unwrap();

        let resolver = DependencyResolver::from_path(&defaults_path).unwrap();
        let updater = PackageUpdater::new(temp_dir.path(), resolver, ManifestStore::default());
        let outcome = updater.update_packages(&[], &[]).unwrap();

        assert_eq!(outcome.change_count(), 2);
        let manifest = load(&updater.package_json_path());
        assert_eq!(manifest.dependencies.get("lit").unwrap(), "2.0.0");
        assert_eq!(manifest.dev_dependencies.get("vite").unwrap(), "5.0.0");
    }

    #[test]
    fn test_scanned_entry_overrides_default() {
        let temp_dir = create_test_dir();
        let updater = PackageUpdater::new(
            temp_dir.path(),
            DependencyResolver::builtin(),
            ManifestStore::default(),
        );

        updater
            .update_packages(&[DependencyEntry::new("@polymer/polymer", "3.3.0")], &[])
            .unwrap();

        let manifest = load(&updater.package_json_path());
        assert_eq!(manifest.dependencies.get("@polymer/polymer").unwrap(), "3.3.0");
        assert_eq!(manifest.dependencies.get("@vaadin/router").unwrap(), "^1.6.0");
        assert_eq!(manifest.dev_dependencies.len(), 12);
    }

    #[test]
    fn test_user_keys_survive_update() {
        let temp_dir = create_test_dir();
        let path = temp_dir.path().join("package.json");
        fs::write(
            &path,
            r#"{"name":"shop","scripts":{"start":"webpack-dev-server"},"dependencies":{"lodash":"4.17.21"}}"#,
        )
        .unwrap();
        let updater = PackageUpdater::new(temp_dir.path(), empty_resolver(), ManifestStore::default());

        updater
            .update_packages(&[DependencyEntry::new("foo", "1.0.0")], &[])
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["name"], "shop");
        assert_eq!(value["scripts"]["start"], "webpack-dev-server");
        assert_eq!(value["dependencies"]["lodash"], "4.17.21");
        assert_eq!(value["dependencies"]["foo"], "1.0.0");
        assert_eq!(value["vaadin"]["hash"], "");
    }

    #[test]
    fn test_dry_run_never_writes() {
        let temp_dir = create_test_dir();
        let resources = temp_dir.path().join("flow-frontend");
        let updater = PackageUpdater::new(
            temp_dir.path(),
            DependencyResolver::builtin(),
            ManifestStore::dry_run(),
        )
        .with_resources_folder(&resources);

        let outcome = updater.update_packages(&[], &[]).unwrap();
        let resources_outcome = updater.update_resources_manifest().unwrap().unwrap();

        assert!(outcome.has_changes());
        assert!(!outcome.written);
        assert!(!resources_outcome.written);
        assert!(!updater.package_json_path().exists());
        assert!(!resources.exists());
    }

    #[test]
    fn test_malformed_manifest_is_reported() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("package.json"), "{ not json").unwrap();
        let updater = PackageUpdater::new(temp_dir.path(), empty_resolver(), ManifestStore::default());

        let err = updater.update_packages(&[], &[]).unwrap_err();
        assert!(err.to_string().contains("package.json"));
    }
}

mod frontend_helpers {
    use super::*;
    use flowdeps::frontend::{generated_modules, DirectoryResourceLocator, ResourcePathResolver};

    #[test]
    fn test_resolve_resources_from_unpacked_jar() {
        let temp_dir = create_test_dir();
        let jar = temp_dir.path().join("component-jar");
        let frontend = jar.join("META-INF").join("resources").join("frontend");
        fs::create_dir_all(frontend.join("src")).unwrap();
        fs::write(frontend.join("src").join("my-view.js"), "export {}").unwrap();

        let resolver = ResourcePathResolver::new(DirectoryResourceLocator::new([&jar]));

        assert_eq!(
            resolver.resolve("./src/my-view.js"),
            "@vaadin/flow-frontend/src/my-view.js"
        );
        assert_eq!(
            resolver.resolve("src/my-view.js"),
            "@vaadin/flow-frontend/src/my-view.js"
        );
        assert_eq!(resolver.resolve("./src/other.js"), "./src/other.js");
        assert_eq!(
            resolver.resolve("@vaadin/vaadin-button/vaadin-button.js"),
            "@vaadin/vaadin-button/vaadin-button.js"
        );
    }

    #[test]
    fn test_generated_modules_listing() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("views")).unwrap();
        fs::create_dir_all(root.join("node_modules").join("lib")).unwrap();
        fs::write(root.join("generated-flow-imports.js"), "").unwrap();
        fs::write(root.join("views").join("main-view.js"), "").unwrap();
        fs::write(root.join("views").join("styles.css"), "").unwrap();
        fs::write(root.join("node_modules").join("lib").join("index.js"), "").unwrap();

        let modules = generated_modules(root, &["generated-flow-imports.js"]).unwrap();

        assert_eq!(
            modules.into_iter().collect::<Vec<_>>(),
            vec!["GENERATED/views/main-view.js".to_string()]
        );
    }

    #[test]
    fn test_generated_modules_missing_directory() {
        let temp_dir = create_test_dir();
        let modules = generated_modules(&temp_dir.path().join("missing"), &[]).unwrap();
        assert!(modules.is_empty());
    }
}
