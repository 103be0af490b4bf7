use std::fs;

use tempfile::tempdir;

use ticket_desk::Config;

#[test]
fn loads_explicit_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("desk.toml");
    fs::write(
        &path,
        r#"
data_dir = "/var/lib/desk"
output_dir = "/tmp/tickets"
log_level = "debug"
"#,
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.output_dir, std::path::PathBuf::from("/tmp/tickets"));
    assert_eq!(
        config.database_path(),
        std::path::PathBuf::from("/var/lib/desk/book_ticket.db")
    );
    assert_eq!(config.log_level, "debug");
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
}
