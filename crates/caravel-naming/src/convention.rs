//! Stage naming convention

use serde::{Deserialize, Serialize};

/// Prefix/suffix policy for making a base identifier stage-specific.
///
/// The default qualifies with a stage suffix separated by `-`,
/// e.g. `my-service` + `beta` -> `my-service-beta`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConvention {
    /// Prepend the stage name to the base identifier
    #[serde(default)]
    pub use_stage_prefix: bool,
    /// Append the stage name to the base identifier
    #[serde(default = "default_suffix")]
    pub use_stage_suffix: bool,
    /// Separator between stage and base
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_suffix() -> bool {
    true
}

fn default_separator() -> String {
    "-".to_string()
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            use_stage_prefix: false,
            use_stage_suffix: true,
            separator: default_separator(),
        }
    }
}

impl NamingConvention {
    /// Stage-qualify `base`.
    ///
    /// An empty stage returns `base` unchanged. Prefix and suffix may
    /// both apply, producing `stage-base-stage`-shaped names.
    pub fn apply(&self, base: &str, stage: &str) -> String {
        if stage.is_empty() {
            return base.to_string();
        }
        let mut name = base.to_string();
        if self.use_stage_prefix {
            name = format!("{}{}{}", stage, self.separator, name);
        }
        if self.use_stage_suffix {
            name = format!("{}{}{}", name, self.separator, stage);
        }
        name
    }

    /// Join two segments with this convention's separator
    pub fn join(&self, left: &str, right: &str) -> String {
        format!("{}{}{}", left, self.separator, right)
    }
}
