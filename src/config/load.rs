//! Configuration loading from files.
//!
//! A YAML file (optional unless named explicitly) is layered under
//! `DOCPOST_*` environment variables.

use std::path::Path;

use super::{ConfigError, DEFAULT_CONFIG_FILE, ENV_PREFIX, PublishConfig};

impl PublishConfig {
    /// Load the config from the command line argument, defaulting to
    /// `docpost.yaml` in the output directory.
    ///
    /// An explicitly named file must exist; the default one may be absent.
    pub fn load_from_arg(
        config_file: Option<&Path>,
        output_dir: &Path,
    ) -> Result<Self, ConfigError> {
        match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::load_from_file(path, true)
            }
            None => Self::load_from_file(&output_dir.join(DEFAULT_CONFIG_FILE), false),
        }
    }

    /// Load the config from a file path, with environment overrides on top.
    pub(crate) fn load_from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: PublishConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the pipeline misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.post.reading_speed == 0 {
            return Err(ConfigError::Validation(
                "invalid config: 'post.reading_speed' must be greater than zero".to_string(),
            ));
        }
        if self.index.marker.is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'index.marker' must not be empty".to_string(),
            ));
        }
        if self.converter.program.trim().is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'converter.program' must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
