//! Resolver configuration.

/// What to do when a mixin re-enters its own expansion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Skip the re-entered mixin. Resolution terminates, but the closure
    /// cached for the cyclic member may be incomplete.
    #[default]
    Skip,
    /// Fail with [`ResolveError::CyclicComposition`](crate::ResolveError::CyclicComposition).
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolverConfig {
    pub cycle_policy: CyclePolicy,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }
}
