//! Command-line tests for the `lockopener` binary.
//!
//! Every test points `--data-dir` and `--config` into a temp directory so the
//! user's real configuration is never read.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Unroutable address: anything that reaches the network fails fast.
const OFFLINE_API: &str = "http://127.0.0.1:9/api";

/// A `lockopener` command isolated in `dir`.
fn lockopener(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("lockopener");
    cmd.current_dir(dir.path())
        .env_remove("LOCKOPENER_API_URL")
        .env_remove("VITE_API_URL")
        .env_remove("LOCKOPENER_CONFIG")
        .arg("--data-dir")
        .arg(dir.path().join("data"))
        .arg("--config")
        .arg(dir.path().join("config.toml"));
    cmd
}

mod cli_basics {
    use super::*;

    #[test]
    fn test_help() {
        cargo_bin_cmd!("lockopener")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("order"))
            .stdout(predicate::str::contains("admin"));
    }

    #[test]
    fn test_version() {
        cargo_bin_cmd!("lockopener").arg("--version").assert().success();
    }
}

mod customer {
    use super::*;

    #[test]
    fn test_view_without_token_fails_before_network() {
        let dir = TempDir::new().unwrap();
        lockopener(&dir)
            .args(["--api-url", OFFLINE_API, "view", "abc123"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Token dostępu nie został podany"));
    }

    #[test]
    fn test_order_with_invalid_phone_is_rejected() {
        let dir = TempDir::new().unwrap();
        lockopener(&dir)
            .args([
                "--api-url",
                OFFLINE_API,
                "order",
                "--name",
                "Jan Kowalski",
                "--phone",
                "12ab",
                "--street",
                "ul. Floriańska 1",
                "--gdpr",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Nieprawidłowy numer telefonu"));
    }

    #[test]
    fn test_order_without_consent_is_rejected() {
        let dir = TempDir::new().unwrap();
        lockopener(&dir)
            .args([
                "--lang",
                "en",
                "--api-url",
                OFFLINE_API,
                "order",
                "--name",
                "Jan Kowalski",
                "--phone",
                "+48123456789",
                "--street",
                "ul. Floriańska 1",
            ])
            .assert()
            .failure();
    }

    #[test]
    fn test_orders_with_empty_registry() {
        let dir = TempDir::new().unwrap();
        lockopener(&dir)
            .args(["--api-url", OFFLINE_API, "orders"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Brak śledzonych zamówień"));
    }

    #[test]
    fn test_orders_keeps_records_when_backend_unreachable() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(
            data.join("storage.json"),
            r#"{"orders":"[{\"id\":\"665f1c2ab7e4d91a2c3f4e5d\",\"token\":\"t\",\"createdAt\":\"2026-10-19T08:00:00Z\"}]"}"#,
        )
        .unwrap();

        lockopener(&dir)
            .args(["--api-url", OFFLINE_API, "orders"])
            .assert()
            .success()
            .stdout(predicate::str::contains("#3f4e5d"));
    }

    #[test]
    fn test_forget_unknown_order() {
        let dir = TempDir::new().unwrap();
        lockopener(&dir)
            .args(["forget", "nope"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Zamówienie nie jest śledzone: nope"));
    }

    #[test]
    fn test_forget_speaks_english_on_request() {
        let dir = TempDir::new().unwrap();
        lockopener(&dir)
            .args(["--lang", "en", "forget", "nope"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Order is not tracked: nope"));
    }
}

mod config {
    use super::*;

    #[test]
    fn test_config_path_prints_override() {
        let dir = TempDir::new().unwrap();
        lockopener(&dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn test_config_init_then_validate() {
        let dir = TempDir::new().unwrap();
        lockopener(&dir)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created config.toml"));
        assert!(dir.path().join("config.toml").exists());

        lockopener(&dir)
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration is valid."));
    }

    #[test]
    fn test_config_show_uses_cli_api_url() {
        let dir = TempDir::new().unwrap();
        lockopener(&dir)
            .args(["--api-url", "https://api.example.test/api", "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("https://api.example.test/api"));
    }
}

mod admin {
    use super::*;

    #[test]
    fn test_admin_orders_requires_login() {
        let dir = TempDir::new().unwrap();
        lockopener(&dir)
            .args(["--lang", "en", "--api-url", OFFLINE_API, "admin", "orders"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not logged in"));
    }

    #[test]
    fn test_admin_edit_requires_login_in_polish() {
        let dir = TempDir::new().unwrap();
        lockopener(&dir)
            .args(["--api-url", OFFLINE_API, "admin", "edit", "a1", "--phone", "600100200"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Nie zalogowano"));
    }
}
