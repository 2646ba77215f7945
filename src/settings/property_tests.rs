//! Property tests for settings resolution

#[cfg(test)]
mod tests {
    use super::super::app::debug_enabled;
    use super::super::{
        DataOverrides, EnvSnapshot, ModelOverrides, SettingsOverrides, TrainingOverrides,
    };
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn snapshot(vars: &[(&str, String)]) -> EnvSnapshot {
        vars.iter()
            .map(|(var, value)| (var.to_string(), value.clone()))
            .collect()
    }

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

    proptest! {
        /// Only the exact text "true" (any casing) enables the debug flag.
        #[test]
        fn non_true_text_never_enables_debug(
            raw in "[a-zA-Z0-9 _-]{0,12}"
                .prop_filter("not a casing of true", |s| !s.eq_ignore_ascii_case("true"))
        ) {
            prop_assert!(!debug_enabled(&raw));
        }

        /// Every casing of "true" enables the debug flag.
        #[test]
        fn any_casing_of_true_enables_debug(mask in proptest::collection::vec(any::<bool>(), 4)) {
            let raw: String = "true"
                .chars()
                .zip(&mask)
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert!(debug_enabled(&raw));
        }

        /// Any in-range API_PORT value resolves to that port.
        #[test]
        fn api_port_env_value_resolves(port in any::<u16>()) {
            let tmp = TempDir::new().unwrap();
            let settings = sandboxed(&tmp)
                .apply_with(&snapshot(&[("API_PORT", port.to_string())]))
                .unwrap();
            prop_assert_eq!(settings.api_port, port);
        }

        /// An explicit port override suppresses even unparseable env text.
        #[test]
        fn api_port_override_wins_over_junk(port in any::<u16>(), junk in "[a-z]{1,8}") {
            let tmp = TempDir::new().unwrap();
            let settings = sandboxed(&tmp)
                .api_port(port)
                .apply_with(&snapshot(&[("API_PORT", junk)]))
                .unwrap();
            prop_assert_eq!(settings.api_port, port);
        }
    }
}
