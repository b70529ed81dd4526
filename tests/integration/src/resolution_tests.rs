//! End-to-end resolution scenarios.
//!
//! Each module walks one realistic module layout from layer files on disk
//! through the loader, resolver and template scan.

use msync_core::{ConfigResolver, GlobalKey, LayerLoader, overrides_to_config};
use msync_fs::scan_targets;
use msync_test_utils::TestConfigDir;
use serde_json::json;

fn resolver_for(dir: &TestConfigDir, settings: &[&str]) -> ConfigResolver {
    LayerLoader::new(GlobalKey::default())
        .defaults_file(dir.defaults_path())
        .module_defaults_file(dir.module_defaults_path())
        .module_config_file(dir.module_config_path())
        .additional_settings(overrides_to_config(settings).unwrap())
        .load_resolver()
        .unwrap()
}

mod ruby_module {
    use super::*;
    use pretty_assertions::assert_eq;

    fn layout() -> TestConfigDir {
        TestConfigDir::new()
            .with_defaults(
                r#":global:
  namespace: acme
  ruby_versions: ['3.1', '3.2']
.travis.yml:
  script: bundle exec rake
  ruby_versions: ['3.3']
Gemfile:
  required:
    ':development':
      - gem: rake
spec:
  delete: false
"#,
            )
            .with_module_config(
                r#"Gemfile:
  required:
    ':development':
      - gem: rubocop
      - gem: rake
.travis.yml:
  script: bundle exec rspec
spec/spec_helper.rb:
  unmanaged: true
"#,
            )
            .with_template(".travis.yml.erb")
            .with_template("Gemfile.erb")
            .with_template("Rakefile.erb")
            .with_template("spec/spec_helper.rb.erb")
            .with_template("spec/default_facts.yml.erb")
    }

    #[test]
    fn travis_config_combines_global_and_target_layers() {
        let resolver = resolver_for(&layout(), &[]);
        let config = resolver.build_file_configs(".travis.yml");

        assert_eq!(
            serde_json::Value::Object(config),
            json!({
                "namespace": "acme",
                "ruby_versions": ["3.1", "3.2", "3.3"],
                "script": "bundle exec rspec"
            })
        );
    }

    #[test]
    fn gem_lists_union_without_merging_entries() {
        let resolver = resolver_for(&layout(), &[]);
        let config = resolver.build_file_configs("Gemfile");

        assert_eq!(
            config["required"][":development"],
            json!([{"gem": "rake"}, {"gem": "rubocop"}])
        );
    }

    #[test]
    fn single_unmanaged_file_leaves_siblings_managed() {
        let dir = layout();
        let resolver = resolver_for(&dir, &[]);
        let scanned = scan_targets(dir.template_dir()).unwrap();

        let partition = resolver.partition(&scanned);
        assert_eq!(
            partition.managed,
            vec![".travis.yml", "Gemfile", "Rakefile", "spec/default_facts.yml", "spec"]
        );
        assert_eq!(partition.unmanaged, vec!["spec/spec_helper.rb"]);
    }

    #[test]
    fn settings_flag_can_unmanage_everything() {
        let dir = layout();
        let resolver = resolver_for(&dir, &["unmanaged=true"]);
        let scanned = scan_targets(dir.template_dir()).unwrap();

        assert!(resolver.managed_files(&scanned).is_empty());
        assert_eq!(resolver.unmanaged_files(&scanned).len(), 6);
    }
}

mod directory_exclusion {
    use super::*;
    use pretty_assertions::assert_eq;

    fn layout() -> TestConfigDir {
        TestConfigDir::new()
            .with_defaults(":global:\n  owner: acme\n")
            .with_module_defaults("spec:\n  unmanaged: true\n")
            .with_module_config("spec/fixtures/keep.txt:\n  unmanaged: false\n")
            .with_template("spec/fixtures/keep.txt.erb")
            .with_template("spec/spec_helper.rb.erb")
            .with_template("lib/module.rb.erb")
    }

    #[test]
    fn excluded_directory_wins_over_file_opt_in() {
        let resolver = resolver_for(&layout(), &[]);

        assert!(!resolver.is_managed("spec/fixtures/keep.txt"));
        assert_eq!(
            resolver.excluded_by("spec/fixtures/keep.txt"),
            Some("spec".to_string())
        );
    }

    #[test]
    fn unrelated_directories_stay_managed() {
        let dir = layout();
        let resolver = resolver_for(&dir, &[]);
        let scanned = scan_targets(dir.template_dir()).unwrap();

        assert_eq!(resolver.managed_files(&scanned), vec!["lib/module.rb"]);
    }

    #[test]
    fn global_key_is_never_a_target() {
        let dir = layout();
        let resolver = resolver_for(&dir, &[]);

        let candidates = resolver.candidate_targets::<&str>(&[]);
        assert!(!candidates.iter().any(|name| name == ":global"));
    }
}

mod formats {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn json_and_toml_layers_resolve_like_yaml() {
        let temp = TempDir::new().unwrap();
        let defaults = temp.path().join("defaults.json");
        let module = temp.path().join("sync.toml");
        fs::write(
            &defaults,
            r#"{":global": {"owner": "acme"}, "Gemfile": {"gems": ["rake"]}}"#,
        )
        .unwrap();
        fs::write(&module, "[Gemfile]\ngems = [\"rspec\"]\n").unwrap();

        let resolver = LayerLoader::new(GlobalKey::default())
            .defaults_file(defaults.as_path())
            .module_config_file(module.as_path())
            .load_resolver()
            .unwrap();

        assert_eq!(
            serde_json::Value::Object(resolver.build_file_configs("Gemfile")),
            json!({"owner": "acme", "gems": ["rake", "rspec"]})
        );
    }
}
