//! Compiler configuration sections
//!
//! Each section has its own struct with validation:
//! - [`LaunchConfig`]: per-axis thread-block caps for kernel launches
//! - [`DeadCodePolicy`]: single-pass or fixpoint dead-code elimination
//! - [`OutputConfig`]: names of the generated units and the runtime header

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration versions this build understands
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

// ============================================================================
// Launch geometry
// ============================================================================

/// Thread-block geometry for kernel launches
///
/// Each offload axis gets `cap` threads per block; the grid on that axis is
/// `ceil(extent / cap)`. Caps shrink as dimensionality grows so the whole
/// block stays within `max_threads_per_block`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Hardware limit on threads per block (1..=4096)
    pub max_threads_per_block: u32,

    /// Threads per block for 1-D offload blocks
    pub block_cap_1d: u32,

    /// Threads per block axis for 2-D offload blocks
    pub block_cap_2d: u32,

    /// Threads per block axis for 3-D offload blocks
    pub block_cap_3d: u32,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            max_threads_per_block: 1024,
            block_cap_1d: 1024,
            block_cap_2d: 32,
            block_cap_3d: 8,
        }
    }
}

impl LaunchConfig {
    /// Per-axis cap for an offload block with `dimensions` axes (1..=3)
    pub fn cap_for(&self, dimensions: usize) -> Option<u32> {
        match dimensions {
            1 => Some(self.block_cap_1d),
            2 => Some(self.block_cap_2d),
            3 => Some(self.block_cap_3d),
            _ => None,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_threads_per_block == 0 || self.max_threads_per_block > 4096 {
            return Err(ConfigError::range_with_hint(
                "max_threads_per_block",
                self.max_threads_per_block,
                1,
                4096,
                "Current CUDA hardware allows at most 1024 threads per block",
            ));
        }

        let max = u64::from(self.max_threads_per_block);
        for (field, cap, power) in [
            ("block_cap_1d", self.block_cap_1d, 1u32),
            ("block_cap_2d", self.block_cap_2d, 2),
            ("block_cap_3d", self.block_cap_3d, 3),
        ] {
            let upper = integer_root(max, power);
            if cap == 0 || u64::from(cap) > upper {
                return Err(ConfigError::range_with_hint(
                    field,
                    cap,
                    1,
                    upper,
                    format!(
                        "{} raised to the power {} must not exceed max_threads_per_block",
                        field, power
                    ),
                ));
            }
        }

        Ok(())
    }
}

/// Largest `r` with `r^power <= value`
fn integer_root(value: u64, power: u32) -> u64 {
    let mut root = 0u64;
    while (root + 1).checked_pow(power).is_some_and(|p| p <= value) {
        root += 1;
    }
    root
}

// ============================================================================
// Dead-code elimination
// ============================================================================

/// How far dead-code elimination goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadCodePolicy {
    /// One pass over the liveness result; definitions that only become dead
    /// after another removal are kept
    #[default]
    SinglePass,

    /// Remove, re-run liveness on the spliced graph, repeat until stable
    Fixpoint,
}

// ============================================================================
// Output
// ============================================================================

/// Names of the generated artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Host compilation unit
    pub host_unit: String,

    /// Kernel unit, included by the host unit
    pub kernel_unit: String,

    /// Tensor runtime header included by both units
    pub runtime_header: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            host_unit: "a.cu".to_string(),
            kernel_unit: "kernels.h".to_string(),
            runtime_header: "tensor.h".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("output.host_unit", &self.host_unit),
            ("output.kernel_unit", &self.kernel_unit),
            ("output.runtime_header", &self.runtime_header),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Top level
// ============================================================================

/// Complete compiler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Schema version
    pub version: u32,

    pub launch: LaunchConfig,

    pub dead_code: DeadCodePolicy,

    pub output: OutputConfig,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            launch: LaunchConfig::default(),
            dead_code: DeadCodePolicy::default(),
            output: OutputConfig::default(),
        }
    }
}

impl CompilerConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let config: CompilerConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        serde_yaml::to_string(self).map_err(ConfigError::Yaml)
    }

    pub fn with_dead_code(mut self, policy: DeadCodePolicy) -> Self {
        self.dead_code = policy;
        self
    }

    pub fn with_launch(mut self, launch: LaunchConfig) -> Self {
        self.launch = launch;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !SUPPORTED_VERSIONS.contains(&self.version) {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }
        let sections: [&dyn Validatable; 2] = [&self.launch, &self.output];
        for section in sections {
            section.validate()?;
        }
        Ok(())
    }
}

impl Validatable for LaunchConfig {
    fn validate(&self) -> ConfigResult<()> {
        LaunchConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "LaunchConfig"
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> ConfigResult<()> {
        OutputConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "OutputConfig"
    }
}

impl Validatable for CompilerConfig {
    fn validate(&self) -> ConfigResult<()> {
        CompilerConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "CompilerConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CompilerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.launch.cap_for(1), Some(1024));
        assert_eq!(config.launch.cap_for(2), Some(32));
        assert_eq!(config.launch.cap_for(3), Some(8));
        assert_eq!(config.launch.cap_for(4), None);
        assert_eq!(config.dead_code, DeadCodePolicy::SinglePass);
    }

    #[test]
    fn test_integer_root() {
        assert_eq!(integer_root(1024, 1), 1024);
        assert_eq!(integer_root(1024, 2), 32);
        assert_eq!(integer_root(1024, 3), 10);
        assert_eq!(integer_root(1, 3), 1);
    }

    #[test]
    fn test_cap_exceeding_block_limit_is_rejected() {
        let launch = LaunchConfig {
            block_cap_2d: 64,
            ..LaunchConfig::default()
        };
        let err = launch.validate().unwrap_err();
        assert!(err.to_string().contains("block_cap_2d"));
    }

    #[test]
    fn test_zero_cap_is_rejected() {
        let launch = LaunchConfig {
            block_cap_3d: 0,
            ..LaunchConfig::default()
        };
        assert!(launch.validate().is_err());
    }

    #[test]
    fn test_yaml_partial_override() {
        let yaml = r#"
version: 1
dead_code: fixpoint
launch:
  block_cap_1d: 256
"#;
        let config = CompilerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.dead_code, DeadCodePolicy::Fixpoint);
        assert_eq!(config.launch.block_cap_1d, 256);
        assert_eq!(config.launch.block_cap_2d, 32);
        assert_eq!(config.output.kernel_unit, "kernels.h");
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let err = CompilerConfig::from_yaml_str("version: 7\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedVersion { found: 7, .. }));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = CompilerConfig::default().with_dead_code(DeadCodePolicy::Fixpoint);
        let yaml = config.to_yaml().unwrap();
        let back = CompilerConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_empty_output_name_is_rejected() {
        let mut config = CompilerConfig::default();
        config.output.host_unit = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyField { .. })
        ));
    }
}
