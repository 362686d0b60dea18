//! One-time detection of the "show as action" menu affordance.
//!
//! An [`ActionCapability`] is created once at startup and shared by reference.
//! The probe runs on first use and its answer is kept for the rest of the
//! process; it is never re-run.

use std::sync::OnceLock;

/// Handle returned by a successful probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionAffordance {
    /// Colours the host can use to draw compact actions.
    pub colors: u16,
}

pub trait CapabilityProbe: Send + Sync {
    /// `None` means the platform cannot render compact actions.
    fn probe(&self) -> Option<ActionAffordance>;
}

/// Probe with a preset answer. Used for config overrides and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub Option<ActionAffordance>);

impl CapabilityProbe for FixedProbe {
    fn probe(&self) -> Option<ActionAffordance> {
        self.0
    }
}

pub struct ActionCapability {
    probe: Box<dyn CapabilityProbe>,
    resolved: OnceLock<Option<ActionAffordance>>,
}

impl ActionCapability {
    pub fn new(probe: Box<dyn CapabilityProbe>) -> Self {
        Self {
            probe,
            resolved: OnceLock::new(),
        }
    }

    pub fn fixed(supported: bool) -> Self {
        let affordance = supported.then_some(ActionAffordance { colors: 256 });
        Self::new(Box::new(FixedProbe(affordance)))
    }

    pub fn affordance(&self) -> Option<ActionAffordance> {
        *self.resolved.get_or_init(|| {
            let resolved = self.probe.probe();
            if resolved.is_none() {
                tracing::info!("show-as-action affordance not supported");
            }
            resolved
        })
    }

    pub fn is_supported(&self) -> bool {
        self.affordance().is_some()
    }
}

impl std::fmt::Debug for ActionCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionCapability")
            .field("resolved", &self.resolved.get())
            .finish_non_exhaustive()
    }
}
