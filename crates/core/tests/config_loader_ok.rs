use notemigrate_core::config::loader::ConfigLoader;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_default_profile_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
vault_root = "/tmp/vault"
attachments_dir = "{{vault_root}}/files"
output_dir = "/tmp/output"
excluded_folders = [".obsidian", "{{vault_root}}/templates"]

[archive]
password = "7281"

[remote]
domain = "disk.example.ru"
api_base = "http://localhost:9000/v1/disk"
"#;

    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.active_profile, "default");
    assert_eq!(rc.vault_root.display().to_string(), "/tmp/vault");
    assert_eq!(rc.attachments_dir.display().to_string(), "/tmp/vault/files");
    assert_eq!(rc.output_dir.display().to_string(), "/tmp/output");
    assert_eq!(
        rc.excluded_folders,
        vec![PathBuf::from(".obsidian"), PathBuf::from("/tmp/vault/templates")]
    );
    assert_eq!(rc.archive.password.as_deref(), Some("7281"));
    assert_eq!(rc.remote.domain, "disk.example.ru");
    assert_eq!(rc.remote.api_base, "http://localhost:9000/v1/disk");
}

#[test]
fn load_with_profile_override_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("notemigrate/config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
vault_root = "/tmp/def"
attachments_dir = "{{vault_root}}/files"
output_dir = "{{vault_root}}/../out"

[profiles.work]
vault_root = "/tmp/work"
attachments_dir = "{{vault_root}}/attachments"
output_dir = "/tmp/work-out"
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), Some("work")).expect("should load");
    assert_eq!(rc.active_profile, "work");
    assert_eq!(rc.vault_root.display().to_string(), "/tmp/work");
    assert_eq!(rc.attachments_dir.display().to_string(), "/tmp/work/attachments");
}
