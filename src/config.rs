//! Configuration for the allocation and redistribution passes.

/// Runtime knobs shared by the allocator and redistributor.
///
/// Both passes are deterministic; the configuration only controls
/// diagnostics, not placement behavior.
#[derive(Clone, Debug, Default)]
pub struct PlannerConfig {
    /// Diagnostic verbosity, 0 (silent) through 3 (debug).
    /// See [`crate::logging`] for the level meanings.
    pub verbosity: u8,
}

impl PlannerConfig {
    pub fn with_verbosity(verbosity: u8) -> Self {
        Self { verbosity }
    }
}
