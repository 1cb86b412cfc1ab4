use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_factcheck_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("FACTCHECK_PORT");
        env::remove_var("FACTCHECK_BIND_ADDR");
        env::remove_var("FACTCHECK_INDEX_PATH");
        env::remove_var("FACTCHECK_CORPUS_PATH");
        env::remove_var("FACTCHECK_MODEL_PATH");
        env::remove_var("FACTCHECK_LLM_URL");
        env::remove_var("FACTCHECK_LLM_MODEL");
        env::remove_var("FACTCHECK_LLM_TIMEOUT_SECS");
        env::remove_var("FACTCHECK_TOP_K");
        env::remove_var("FACTCHECK_THRESHOLD");
        env::remove_var("FACTCHECK_DISTANCE_SCALE");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.index_path, PathBuf::from("./.data/fact_index"));
    assert_eq!(config.corpus_path, PathBuf::from("./facts.txt"));
    assert!(config.model_path.is_none());
    assert_eq!(config.llm_url, "http://localhost:11434");
    assert_eq!(config.llm_model, "mistral");
    assert_eq!(config.llm_timeout, Duration::from_secs(60));
    assert_eq!(config.top_k, 3);
    assert_eq!(config.threshold, 0.3);
    assert_eq!(config.distance_scale, 10.0);
}

#[test]
fn test_socket_addr() {
    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_factcheck_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert_eq!(config.top_k, 3);
    assert!(config.model_path.is_none());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_factcheck_env();

    with_env_vars(
        &[
            ("FACTCHECK_PORT", "3000"),
            ("FACTCHECK_BIND_ADDR", "::1"),
            ("FACTCHECK_INDEX_PATH", "/tmp/idx/facts"),
            ("FACTCHECK_LLM_URL", "http://llm.internal:11434"),
            ("FACTCHECK_LLM_MODEL", "llama3"),
            ("FACTCHECK_LLM_TIMEOUT_SECS", "5"),
            ("FACTCHECK_TOP_K", "5"),
            ("FACTCHECK_THRESHOLD", "0.55"),
            ("FACTCHECK_DISTANCE_SCALE", "4"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.port, 3000);
            assert_eq!(
                config.bind_addr,
                IpAddr::V6(std::net::Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))
            );
            assert_eq!(config.index_path, PathBuf::from("/tmp/idx/facts"));
            assert_eq!(config.llm_url, "http://llm.internal:11434");
            assert_eq!(config.llm_model, "llama3");
            assert_eq!(config.llm_timeout, Duration::from_secs(5));
            assert_eq!(config.top_k, 5);
            assert_eq!(config.threshold, 0.55);
            assert_eq!(config.distance_scale, 4.0);
        },
    );
}

#[test]
#[serial]
fn test_from_env_port_zero_rejected() {
    clear_factcheck_env();

    with_env_vars(&[("FACTCHECK_PORT", "0")], || {
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
    });
}

#[test]
#[serial]
fn test_from_env_port_not_numeric() {
    clear_factcheck_env();

    with_env_vars(&[("FACTCHECK_PORT", "eighty")], || {
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::PortParseError { .. })));
    });
}

#[test]
#[serial]
fn test_from_env_invalid_bind_addr() {
    clear_factcheck_env();

    with_env_vars(&[("FACTCHECK_BIND_ADDR", "not-an-ip")], || {
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidBindAddr { .. })));
    });
}

#[test]
#[serial]
fn test_from_env_top_k_zero_rejected() {
    clear_factcheck_env();

    with_env_vars(&[("FACTCHECK_TOP_K", "0")], || {
        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                name: "FACTCHECK_TOP_K",
                ..
            })
        ));
    });
}

#[test]
#[serial]
fn test_from_env_threshold_out_of_range() {
    clear_factcheck_env();

    with_env_vars(&[("FACTCHECK_THRESHOLD", "1.5")], || {
        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                name: "FACTCHECK_THRESHOLD",
                ..
            })
        ));
    });
}

#[test]
#[serial]
fn test_from_env_threshold_garbage() {
    clear_factcheck_env();

    with_env_vars(&[("FACTCHECK_THRESHOLD", "high")], || {
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    });
}

#[test]
#[serial]
fn test_from_env_distance_scale_must_be_positive() {
    clear_factcheck_env();

    with_env_vars(&[("FACTCHECK_DISTANCE_SCALE", "-1")], || {
        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                name: "FACTCHECK_DISTANCE_SCALE",
                ..
            })
        ));
    });
}

#[test]
#[serial]
fn test_from_env_blank_model_path_is_none() {
    clear_factcheck_env();

    with_env_vars(&[("FACTCHECK_MODEL_PATH", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert!(config.model_path.is_none());
    });
}

#[test]
fn test_validate_defaults_ok() {
    let config = Config {
        index_path: std::env::temp_dir().join("fact_index"),
        corpus_path: std::env::temp_dir().join("nonexistent_facts.txt"),
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_missing_model_path() {
    let config = Config {
        model_path: Some(PathBuf::from("/nonexistent/minilm")),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_model_path_must_be_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("model.safetensors");
    std::fs::write(&file, b"x").unwrap();

    let config = Config {
        model_path: Some(file),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));
}

#[test]
fn test_validate_corpus_path_must_be_file() {
    let dir = tempfile::TempDir::new().unwrap();

    let config = Config {
        corpus_path: dir.path().to_path_buf(),
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::NotAFile { .. })));
}

#[test]
fn test_validate_index_parent_must_be_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("occupied");
    std::fs::write(&file, b"x").unwrap();

    let config = Config {
        index_path: file.join("fact_index"),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));
}

#[test]
fn test_derived_settings() {
    let config = Config {
        top_k: 7,
        threshold: 0.4,
        distance_scale: 2.5,
        llm_model: "llama3".to_string(),
        ..Default::default()
    };

    let options = config.check_options();
    assert_eq!(options.top_k, 7);
    assert_eq!(options.threshold, 0.4);

    assert_eq!(config.calibration().normalization(), 2.5);

    let completion = config.completion_config();
    assert_eq!(completion.model, "llama3");
    assert_eq!(completion.endpoint, "http://localhost:11434");
    assert_eq!(completion.timeout, Duration::from_secs(60));

    assert!(config.embedder_config().testing_stub);
}
