// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use anyhow::Result;
use token_authority::config::{AccessConfig, Config, ServerConfig, User};
use tempfile::tempdir;

const VALID_CONFIG: &str = r#"
server:
  address: 0.0.0.0
  port: 9090
access:
  hmac_secret: test-secret
  duration: 120
  users:
    - user: user1
      pass: passwd
    - user: user2
      pass: otherpasswd
endorsing:
  enabled: false
"#;

#[test]
fn test_config_load_and_save() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");

    let config = Config {
        server: ServerConfig {
            port: 8081,
            address: "192.168.1.1".to_string(),
            name: "TestServer".to_string(),
        },
        access: AccessConfig {
            hmac_secret: "secret".to_string(),
            duration: 60,
            users: vec![User {
                user: "user1".to_string(),
                pass: "passwd".to_string(),
            }],
        },
        ..Default::default()
    };

    config.save_to_file(&config_path)?;
    let loaded_config = Config::from_file(&config_path)?;

    assert_eq!(loaded_config.server.port, 8081);
    assert_eq!(loaded_config.server.address, "192.168.1.1");
    assert_eq!(loaded_config.server.name, "TestServer");
    assert_eq!(loaded_config.access.duration, 60);
    assert_eq!(loaded_config.access.users, config.access.users);

    // A missing file is created with default values
    let non_existent_path = temp_dir.path().join("non_existent.yaml");
    let default_config = Config::from_file(&non_existent_path)?;
    assert!(non_existent_path.exists());
    assert_eq!(default_config.server.port, 8080);
    assert_eq!(default_config.server.address, "127.0.0.1");
    assert_eq!(default_config.access.duration, 600);
    assert!(default_config.endorsing.enabled);

    Ok(())
}

#[test]
fn test_config_from_yaml() -> Result<()> {
    let config = Config::from_yaml_str(VALID_CONFIG)?;
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.access.hmac_secret, "test-secret");
    assert!(!config.endorsing.enabled);

    let authority = config.token_authority();
    assert_eq!(authority.lifespan().num_seconds(), 120);
    assert_eq!(authority.credentials().len(), 2);
    assert!(authority.authenticate("user2", "otherpasswd").is_ok());
    assert!(authority.authenticate("user2", "passwd").is_err());

    Ok(())
}

#[test]
fn test_minimal_config_uses_defaults() -> Result<()> {
    let config = Config::from_yaml_str("access:\n  hmac_secret: s\n")?;
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.access.duration, 600);
    assert!(config.access.users.is_empty());
    Ok(())
}

#[test]
fn test_config_validation() {
    // Unknown section
    assert!(Config::from_yaml_str("access:\n  hmac_secret: s\nunknown: 1\n").is_err());

    // Port outside the schema range
    assert!(
        Config::from_yaml_str("server:\n  port: 70000\naccess:\n  hmac_secret: s\n").is_err()
    );

    // Empty secret
    assert!(Config::from_yaml_str("access:\n  hmac_secret: \"\"\n").is_err());

    // Zero lifespan
    assert!(Config::from_yaml_str("access:\n  hmac_secret: s\n  duration: 0\n").is_err());

    // User without password
    let no_pass = "access:\n  hmac_secret: s\n  users:\n    - user: user1\n";
    assert!(Config::from_yaml_str(no_pass).is_err());

    // Duplicate users pass the schema but not the specific rules
    let duplicate = "access:\n  hmac_secret: s\n  users:\n    - user: a\n      pass: x\n    - user: a\n      pass: y\n";
    assert!(Config::from_yaml_str(duplicate).is_err());
}

#[test]
fn test_signing_secret_is_required() {
    let no_secret = "access:\n  users:\n    - user: admin\n      pass: s3cret\n";
    assert!(Config::from_yaml_str(no_secret).is_err());

    let no_access = "server:\n  port: 9090\n";
    assert!(Config::from_yaml_str(no_access).is_err());
    assert!(Config::from_yaml_str("{}").is_err());
}

#[test]
fn test_missing_secret_file_is_rejected() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");
    std::fs::write(
        &config_path,
        "access:\n  users:\n    - user: admin\n      pass: s3cret\n",
    )?;

    assert!(Config::from_file(&config_path).is_err());
    Ok(())
}

#[test]
fn test_default_secrets_are_generated() {
    let first = Config::default();
    let second = Config::default();

    assert!(!first.access.hmac_secret.is_empty());
    assert_ne!(first.access.hmac_secret, second.access.hmac_secret);

    // A token from one default authority is rejected by another
    let users = vec![User {
        user: "admin".to_string(),
        pass: "s3cret".to_string(),
    }];
    let mut first_access = first.access.clone();
    first_access.users = users.clone();
    let mut second_access = second.access.clone();
    second_access.users = users;

    let token = first_access
        .token_authority()
        .authenticate("admin", "s3cret")
        .unwrap();
    assert!(second_access.token_authority().refresh(&token).is_err());
}

#[test]
fn test_invalid_file_writes_sample() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");
    std::fs::write(&config_path, "server:\n  port: \"not a port\"\n")?;

    assert!(Config::from_file(&config_path).is_err());

    let sample_path = temp_dir.path().join("config.sample.yaml");
    assert!(sample_path.exists());
    let sample = Config::from_file(&sample_path)?;
    assert_eq!(sample.server.port, 8080);

    Ok(())
}

#[test]
fn test_apply_args() {
    let mut config = Config::default();
    config.apply_args(None, None, None, None);
    assert_eq!(config.server.port, 8080);

    config.apply_args(
        Some("0.0.0.0".to_string()),
        Some(9000),
        Some("override".to_string()),
        Some(30),
    );
    assert_eq!(config.server.address, "0.0.0.0");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.access.hmac_secret, "override");
    assert_eq!(config.token_authority().lifespan().num_seconds(), 30);
}
