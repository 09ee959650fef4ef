//! On-disk run configuration, layered under CLI flags (C12, §3, §4.12).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::eigen::EigenMethod;
use crate::engine::{EngineSettings, SnapshotPolicy};
use crate::errors::InputError;
use crate::graph::formats::Format;

/// A `RunConfig` as deserialized from TOML, mirroring [`EngineSettings`]
/// plus the I/O concerns the CLI needs (§3 "Run configuration").
///
/// Every field is optional so a config file may set only the fields it
/// cares about; `deny_unknown_fields` turns a typo'd key into an
/// [`InputError`] rather than a silently ignored field (§4.12).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RunConfig {
    /// Path to the input graph file.
    pub input: Option<PathBuf>,
    /// The input file's format, if not inferred from its extension.
    pub format: Option<ConfigFormat>,
    /// Directory export writers place their output files in.
    pub output_dir: Option<PathBuf>,
    /// Mirrors [`EngineSettings::use_moving_vertex`].
    pub mvm: Option<bool>,
    /// Mirrors [`EngineSettings::use_global_moving_vertex`].
    pub gmvm: Option<bool>,
    /// Mirrors [`EngineSettings::eigen_method`].
    pub eigen: Option<ConfigEigenMethod>,
    /// Mirrors [`EngineSettings::export_dendrogram`].
    pub export_dendrogram: Option<bool>,
    /// Mirrors [`EngineSettings::export_indivisible_communities`].
    pub export_indivisible_communities: Option<bool>,
    /// Mirrors [`EngineSettings::export_subnetworks`].
    pub export_subnetworks: Option<bool>,
    /// Mirrors [`EngineSettings::color_communities`].
    pub color: Option<bool>,
    /// The `tracing` log level name (`"error"`, `"warn"`, `"info"`,
    /// `"debug"`, `"trace"`).
    pub log_level: Option<String>,
}

/// The TOML-facing mirror of [`Format`] (kept distinct so the wire format
/// of the config file does not have to track the internal enum's
/// representation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    /// See [`Format::Tsv`].
    Tsv,
    /// See [`Format::Gml`].
    Gml,
    /// See [`Format::Dot`].
    Dot,
    /// See [`Format::Net`].
    Net,
}

impl From<ConfigFormat> for Format {
    fn from(format: ConfigFormat) -> Self {
        match format {
            ConfigFormat::Tsv => Format::Tsv,
            ConfigFormat::Gml => Format::Gml,
            ConfigFormat::Dot => Format::Dot,
            ConfigFormat::Net => Format::Net,
        }
    }
}

/// The TOML-facing mirror of [`EigenMethod`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigEigenMethod {
    /// See [`EigenMethod::Power`].
    Power,
    /// See [`EigenMethod::FullEvd`].
    Full,
}

impl From<ConfigEigenMethod> for EigenMethod {
    fn from(method: ConfigEigenMethod) -> Self {
        match method {
            ConfigEigenMethod::Power => EigenMethod::Power,
            ConfigEigenMethod::Full => EigenMethod::FullEvd,
        }
    }
}

impl RunConfig {
    /// Loads a `RunConfig` from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Io`] if the file cannot be read, or
    /// [`InputError::ConfigSyntax`] if it cannot be parsed (including
    /// unknown keys, per `deny_unknown_fields`).
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| InputError::Io { path: path.to_path_buf(), source })?;
        toml::from_str(&content).map_err(|e| InputError::ConfigSyntax(e.to_string()))
    }

    /// Merges `self` (the file-loaded config, or the default if no file
    /// was given) with `overrides` (the CLI flags actually supplied by the
    /// user), field by field: a `Some` in `overrides` always wins (§3
    /// "defaults < file < flags").
    #[must_use]
    pub fn merged_with(mut self, overrides: &RunConfig) -> Self {
        macro_rules! take_override {
            ($field:ident) => {
                if overrides.$field.is_some() {
                    self.$field = overrides.$field.clone();
                }
            };
        }
        take_override!(input);
        take_override!(format);
        take_override!(output_dir);
        take_override!(mvm);
        take_override!(gmvm);
        take_override!(eigen);
        take_override!(export_dendrogram);
        take_override!(export_indivisible_communities);
        take_override!(export_subnetworks);
        take_override!(color);
        take_override!(log_level);
        self
    }

    /// Converts this config's engine-relevant fields into
    /// [`EngineSettings`], leaving absent fields at their engine default.
    #[must_use]
    pub fn to_engine_settings(&self) -> EngineSettings {
        let defaults = EngineSettings::default();
        EngineSettings {
            use_moving_vertex: self.mvm.unwrap_or(defaults.use_moving_vertex),
            use_global_moving_vertex: self.gmvm.unwrap_or(defaults.use_global_moving_vertex),
            eigen_method: self.eigen.map_or(defaults.eigen_method, Into::into),
            snapshot_policy: SnapshotPolicy::None,
            export_dendrogram: self.export_dendrogram.unwrap_or(defaults.export_dendrogram),
            export_indivisible_communities: self
                .export_indivisible_communities
                .unwrap_or(defaults.export_indivisible_communities),
            export_subnetworks: self.export_subnetworks.unwrap_or(defaults.export_subnetworks),
            color_communities: self.color.unwrap_or(defaults.color_communities),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RunConfig;

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<RunConfig, _> = toml::from_str("not_a_real_field = true");
        assert!(result.is_err());
    }

    #[test]
    fn cli_flags_override_exactly_the_fields_they_set() {
        let file_config: RunConfig = toml::from_str("mvm = true\ngmvm = true\n").unwrap();
        let cli_overrides = RunConfig { gmvm: Some(false), ..RunConfig::default() };
        let merged = file_config.clone().merged_with(&cli_overrides);

        assert_eq!(merged.mvm, file_config.mvm, "untouched field keeps the file's value");
        assert_eq!(merged.gmvm, Some(false), "overridden field takes the CLI value");
    }
}
