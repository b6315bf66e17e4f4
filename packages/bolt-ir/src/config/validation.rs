//! Configuration validation
//!
//! Provides the validation trait shared by every configuration section.

use super::error::ConfigResult;

/// Trait for validatable configuration objects
///
/// # Example
/// ```rust,ignore
/// use bolt_ir::config::Validatable;
///
/// fn prepare<C: Validatable>(config: C) -> Result<C, ConfigError> {
///     config.validate()?;
///     Ok(config)
/// }
/// ```
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

#[cfg(test)]
mod tests {
    use super::super::compiler_config::{LaunchConfig, OutputConfig};
    use super::*;

    #[test]
    fn test_sections_validate_through_trait() {
        let bad = LaunchConfig {
            block_cap_1d: 0,
            ..LaunchConfig::default()
        };
        let sections: [&dyn Validatable; 2] = [&OutputConfig::default(), &bad];
        let failing: Vec<&str> = sections
            .iter()
            .filter(|s| s.validate().is_err())
            .map(|s| s.config_name())
            .collect();
        assert_eq!(failing, vec!["LaunchConfig"]);
    }

    #[test]
    fn test_config_names() {
        assert_eq!(LaunchConfig::default().config_name(), "LaunchConfig");
        assert_eq!(OutputConfig::default().config_name(), "OutputConfig");
    }
}
