/*
 * This module contains some quality of life structs. Most importantly, it contains the
 * `EvalConfig` struct, which implements the Default trait. This config can be passed to the
 * `evaluate_rows_conf` function to simplify its arguments.
*/
use std::borrow::Cow;
use std::fmt::Display;

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
/// Config struct used to simplify the inputs of parameters to the main functions of `chunkeval`.
/// The default configuration rounds the percentages to two decimal places and treats `"O"` as
/// the outside label.
pub struct EvalConfig {
    do_round: bool,
    outside_label: Cow<'static, str>,
}

impl EvalConfig {
    pub fn do_round(&self) -> bool {
        self.do_round
    }

    pub fn outside_label(&self) -> &str {
        &self.outside_label
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            do_round: true,
            outside_label: Cow::Borrowed("O"),
        }
    }
}

impl Display for EvalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let string = format!(
            "Rounding the percentages: {}\n Outside label: {}",
            self.do_round, self.outside_label
        );
        write!(f, "{}", string)
    }
}

/// This builder can be used to build and customize an `EvalConfig` structure.
#[derive(Clone, Debug, Default)]
pub struct EvalConfigBuilder {
    do_round: Option<bool>,
    outside_label: Option<Cow<'static, str>>,
}

impl EvalConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn do_round(mut self, do_round: bool) -> Self {
        self.do_round = Some(do_round);
        self
    }

    pub fn outside_label<S: Into<Cow<'static, str>>>(mut self, outside_label: S) -> Self {
        self.outside_label = Some(outside_label.into());
        self
    }

    pub fn build(self) -> EvalConfig {
        let defaults = EvalConfig::default();
        EvalConfig {
            do_round: self.do_round.unwrap_or(defaults.do_round),
            outside_label: self.outside_label.unwrap_or(defaults.outside_label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvalConfig::default();
        assert!(config.do_round());
        assert_eq!(config.outside_label(), "O");
    }

    #[test]
    fn test_builder_overrides() {
        let config = EvalConfigBuilder::new()
            .do_round(false)
            .outside_label("OUT")
            .build();
        assert!(!config.do_round());
        assert_eq!(config.outside_label(), "OUT");
    }

    #[test]
    fn test_builder_keeps_defaults() {
        let config = EvalConfigBuilder::new().build();
        assert_eq!(config, EvalConfig::default());
    }
}
