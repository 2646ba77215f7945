//! Integration tests for the settings module

use super::*;
use crate::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Guards tests that read or mutate the live process environment.
static ENV_GUARD: Mutex<()> = Mutex::new(());

fn snapshot(vars: &[(&str, &str)]) -> EnvSnapshot {
    vars.iter()
        .map(|(var, value)| (var.to_string(), value.to_string()))
        .collect()
}

/// Overrides whose directory side effects all land inside `tmp`.
fn sandboxed(tmp: &TempDir) -> SettingsOverrides {
    let model = ModelOverrides::default()
        .cache_dir(tmp.path().join("cache"))
        .apply()
        .unwrap();
    let training = TrainingOverrides::default()
        .output_dir(tmp.path().join("outputs"))
        .apply()
        .unwrap();
    let data = DataOverrides::default()
        .data_dir(tmp.path().join("data"))
        .apply()
        .unwrap();

    SettingsOverrides::default()
        .hub_home(tmp.path().join("hub"))
        .model(model)
        .training(training)
        .data(data)
}

fn restore_var(var: &str, saved: Option<String>) {
    match saved {
        Some(value) => std::env::set_var(var, value),
        None => std::env::remove_var(var),
    }
}

#[test]
fn test_training_settings_defaults_and_output_dir() {
    let tmp = TempDir::new().unwrap();
    let output_dir = tmp.path().join("runs").join("exp1");

    let training = TrainingOverrides::default()
        .output_dir(&output_dir)
        .apply()
        .unwrap();

    assert!(output_dir.is_dir());
    assert_eq!(training.learning_rate, 2e-5);
    assert_eq!(training.num_epochs, 3);
    assert_eq!(training.warmup_steps, 500);
    assert_eq!(training.weight_decay, 0.01);
    assert_eq!(training.logging_steps, 100);
    assert_eq!(training.save_steps, 1000);
    assert_eq!(training.eval_steps, 500);
}

#[test]
fn test_data_settings_defaults_and_data_dir() {
    let tmp = TempDir::new().unwrap();
    let data_dir = tmp.path().join("datasets");

    let data = DataOverrides::default().data_dir(&data_dir).apply().unwrap();

    assert!(data_dir.is_dir());
    assert_eq!(data.train_split, "train");
    assert_eq!(data.validation_split, "validation");
    assert_eq!(data.test_split, "test");
    assert!(data.dataset_name.is_none());
    assert!(data.max_samples.is_none());
}

#[test]
fn test_model_settings_overridden_cache_dir_taken_as_is() {
    let tmp = TempDir::new().unwrap();
    let cache_dir = tmp.path().join("never-created");

    let model = ModelOverrides::default()
        .cache_dir(&cache_dir)
        .device("cuda")
        .apply()
        .unwrap();

    // An explicit cache_dir is not created at construction.
    assert!(!cache_dir.exists());
    assert_eq!(model.cache_dir, cache_dir);
    assert_eq!(model.device, "cuda");
    assert_eq!(model.default_model, "meta-llama/Llama-2-7b-hf");
    assert_eq!(model.max_length, 512);
    assert_eq!(model.batch_size, 8);
    assert_eq!(model.precision, "float16");
}

#[test]
fn test_model_settings_default_cache_dir_exists() {
    let model = ModelSettings::new().unwrap();

    assert!(model.cache_dir.ends_with(".cache/huggingface"));
    assert!(model.cache_dir.is_dir());
}

#[test]
fn test_settings_defaults_from_empty_snapshot() {
    let tmp = TempDir::new().unwrap();
    let settings = sandboxed(&tmp).apply_with(&EnvSnapshot::empty()).unwrap();

    assert_eq!(settings.env, "development");
    assert!(!settings.debug);
    assert_eq!(settings.log_level, "INFO");
    assert!(settings.hub_token.is_none());
    assert_eq!(settings.api_host, "0.0.0.0");
    assert_eq!(settings.api_port, 8000);
    assert_eq!(settings.num_workers, 4);
    assert!(settings.hub_home.is_dir());
}

#[test]
fn test_debug_flag_parsing() {
    let tmp = TempDir::new().unwrap();
    for (raw, expected) in [
        ("true", true),
        ("TRUE", true),
        ("True", true),
        ("false", false),
        ("1", false),
        ("yes", false),
        ("", false),
    ] {
        let settings = sandboxed(&tmp)
            .apply_with(&snapshot(&[("DEBUG", raw)]))
            .unwrap();
        assert_eq!(settings.debug, expected, "DEBUG={raw:?}");
    }

    let settings = sandboxed(&tmp).apply_with(&EnvSnapshot::empty()).unwrap();
    assert!(!settings.debug);
}

#[test]
fn test_hub_token_resolved_from_snapshot() {
    let tmp = TempDir::new().unwrap();
    let settings = sandboxed(&tmp)
        .apply_with(&snapshot(&[("HF_TOKEN", "abc123")]))
        .unwrap();

    assert_eq!(settings.hub_token.as_deref(), Some("abc123"));

    let exports = settings.exports();
    assert_eq!(exports[0].0, "HF_HOME");
    assert_eq!(exports[1], ("HF_TOKEN", "abc123".to_string()));
}

#[test]
fn test_exports_without_token_is_hub_home_only() {
    let tmp = TempDir::new().unwrap();
    let settings = sandboxed(&tmp).apply_with(&EnvSnapshot::empty()).unwrap();

    let exports = settings.exports();
    assert_eq!(exports.len(), 1);
    assert_eq!(
        exports[0],
        ("HF_HOME", settings.hub_home.display().to_string())
    );
}

#[test]
fn test_hub_home_resolved_from_snapshot_and_created() {
    let tmp = TempDir::new().unwrap();
    let hub = tmp.path().join("hub-from-env");
    let hub_str = hub.display().to_string();

    // No hub_home override: the snapshot value wins and is created.
    let settings = SettingsOverrides::default()
        .model(
            ModelOverrides::default()
                .cache_dir(tmp.path().join("cache"))
                .apply()
                .unwrap(),
        )
        .training(
            TrainingOverrides::default()
                .output_dir(tmp.path().join("outputs"))
                .apply()
                .unwrap(),
        )
        .data(
            DataOverrides::default()
                .data_dir(tmp.path().join("data"))
                .apply()
                .unwrap(),
        )
        .apply_with(&snapshot(&[("HF_HOME", &hub_str)]))
        .unwrap();

    assert_eq!(settings.hub_home, hub);
    assert!(hub.is_dir());
}

#[test]
fn test_default_hub_home_under_home_cache() {
    let tmp = TempDir::new().unwrap();
    let overrides = SettingsOverrides::default()
        .model(
            ModelOverrides::default()
                .cache_dir(tmp.path().join("cache"))
                .apply()
                .unwrap(),
        )
        .training(
            TrainingOverrides::default()
                .output_dir(tmp.path().join("outputs"))
                .apply()
                .unwrap(),
        )
        .data(
            DataOverrides::default()
                .data_dir(tmp.path().join("data"))
                .apply()
                .unwrap(),
        );

    let settings = overrides.apply_with(&EnvSnapshot::empty()).unwrap();

    assert!(settings.hub_home.ends_with(".cache/huggingface"));
    assert!(settings.hub_home.is_dir());
}

#[test]
fn test_invalid_api_port_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let result = sandboxed(&tmp).apply_with(&snapshot(&[("API_PORT", "not-a-number")]));

    match result {
        Err(Error::InvalidEnvVar { var, value, .. }) => {
            assert_eq!(var, "API_PORT");
            assert_eq!(value, "not-a-number");
        }
        other => panic!("expected InvalidEnvVar, got {other:?}"),
    }
}

#[test]
fn test_invalid_num_workers_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let result = sandboxed(&tmp).apply_with(&snapshot(&[("NUM_WORKERS", "many")]));

    assert!(matches!(
        result,
        Err(Error::InvalidEnvVar {
            var: "NUM_WORKERS",
            ..
        })
    ));
}

#[test]
fn test_explicit_overrides_win_over_snapshot() {
    let tmp = TempDir::new().unwrap();
    let settings = sandboxed(&tmp)
        .env("production")
        .debug(true)
        .log_level("WARN")
        .api_host("127.0.0.1")
        .api_port(9000)
        .num_workers(2)
        .apply_with(&snapshot(&[
            ("ENVIRONMENT", "staging"),
            ("DEBUG", "false"),
            ("LOG_LEVEL", "DEBUG"),
            ("API_HOST", "10.0.0.1"),
            ("API_PORT", "not-even-parsed"),
            ("NUM_WORKERS", "junk"),
        ]))
        .unwrap();

    assert_eq!(settings.env, "production");
    assert!(settings.debug);
    assert_eq!(settings.log_level, "WARN");
    assert_eq!(settings.api_host, "127.0.0.1");
    assert_eq!(settings.api_port, 9000);
    assert_eq!(settings.num_workers, 2);
}

#[test]
fn test_export_to_process_env_writes_hub_values() {
    let _guard = ENV_GUARD.lock().unwrap_or_else(|e| e.into_inner());
    let saved_home = std::env::var("HF_HOME").ok();
    let saved_token = std::env::var("HF_TOKEN").ok();

    let tmp = TempDir::new().unwrap();
    let settings = sandboxed(&tmp)
        .hub_token("secret-token")
        .apply_with(&EnvSnapshot::empty())
        .unwrap();
    settings.export_to_process_env();

    assert_eq!(
        std::env::var("HF_HOME").unwrap(),
        settings.hub_home.display().to_string()
    );
    assert_eq!(std::env::var("HF_TOKEN").unwrap(), "secret-token");

    restore_var("HF_HOME", saved_home);
    restore_var("HF_TOKEN", saved_token);
}

#[test]
fn test_from_env_picks_up_token_and_propagates() {
    let _guard = ENV_GUARD.lock().unwrap_or_else(|e| e.into_inner());
    let saved_home = std::env::var("HF_HOME").ok();
    let saved_token = std::env::var("HF_TOKEN").ok();
    std::env::set_var("HF_TOKEN", "abc123");

    let tmp = TempDir::new().unwrap();
    let settings = Settings::from_env(sandboxed(&tmp)).unwrap();

    assert_eq!(settings.hub_token.as_deref(), Some("abc123"));
    assert_eq!(std::env::var("HF_TOKEN").unwrap(), "abc123");
    assert_eq!(
        std::env::var("HF_HOME").unwrap(),
        settings.hub_home.display().to_string()
    );

    restore_var("HF_HOME", saved_home);
    restore_var("HF_TOKEN", saved_token);
}

#[test]
fn test_provider_returns_identical_instance() {
    let _guard = ENV_GUARD.lock().unwrap_or_else(|e| e.into_inner());
    let saved_home = std::env::var("HF_HOME").ok();

    let provider = SettingsProvider::new();
    let first = provider.get().unwrap();
    let second = provider.get().unwrap();

    assert!(Arc::ptr_eq(&first, &second));

    restore_var("HF_HOME", saved_home);
}

#[test]
fn test_provider_reload_returns_new_instance() {
    let _guard = ENV_GUARD.lock().unwrap_or_else(|e| e.into_inner());
    let saved_home = std::env::var("HF_HOME").ok();

    let provider = SettingsProvider::new();
    let first = provider.get().unwrap();
    let reloaded = provider.reload().unwrap();
    let after = provider.get().unwrap();

    assert!(!Arc::ptr_eq(&first, &reloaded));
    assert!(Arc::ptr_eq(&reloaded, &after));

    restore_var("HF_HOME", saved_home);
}

#[test]
fn test_provider_failures_leave_slot_unchanged() {
    let _guard = ENV_GUARD.lock().unwrap_or_else(|e| e.into_inner());
    let saved_home = std::env::var("HF_HOME").ok();
    let saved_port = std::env::var("API_PORT").ok();

    let provider = SettingsProvider::new();

    // A failed first get leaves the slot empty.
    std::env::set_var("API_PORT", "not-a-number");
    assert!(provider.get().is_err());

    std::env::remove_var("API_PORT");
    let good = provider.get().unwrap();

    // A failed reload keeps the last good instance.
    std::env::set_var("API_PORT", "not-a-number");
    assert!(provider.reload().is_err());
    std::env::remove_var("API_PORT");

    let still_good = provider.get().unwrap();
    assert!(Arc::ptr_eq(&good, &still_good));

    restore_var("API_PORT", saved_port);
    restore_var("HF_HOME", saved_home);
}
