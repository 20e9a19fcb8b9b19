//! Generator configuration.
//!
//! The priority ceiling and stack base unit come from the build
//! invocation, not from the descriptor document, so the same descriptor
//! set can be compiled against different scheduler configurations.

use crate::error::Error;

/// Configuration constants the emitted artifacts are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    /// Number of distinct priority levels the scheduler supports
    /// (`configMAX_PRIORITIES`). Tiers occupy the top three levels.
    pub max_priorities: u32,
    /// Stack base unit (`configMINIMAL_STACK_SIZE`), in the scheduler's
    /// native stack units.
    pub minimal_stack_size: u32,
    /// C++ namespace both artifacts are placed in.
    pub namespace: String,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            max_priorities: 5,
            minimal_stack_size: 360,
            namespace: "firmware".into(),
        }
    }
}

impl GenConfig {
    /// Check the configuration is usable for emission.
    ///
    /// The three tiers sit at ceiling-1 through ceiling-3, and level 0 is
    /// reserved for the idle task, so the ceiling must be at least 4.
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_priorities < 4 {
            return Err(Error::InvalidConfig(format!(
                "priority ceiling {} is too small (need at least 4 levels)",
                self.max_priorities
            )));
        }
        if self.minimal_stack_size == 0 {
            return Err(Error::InvalidConfig(
                "stack base unit must be positive".into(),
            ));
        }
        if !is_cpp_identifier(&self.namespace) {
            return Err(Error::InvalidConfig(format!(
                "namespace '{}' is not a valid C++ identifier",
                self.namespace
            )));
        }
        Ok(())
    }
}

fn is_cpp_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
