use crate::capability::{ActionAffordance, ActionCapability, CapabilityProbe};
use crate::config::ShowAsAction;

/// Fewest colours needed to tell an action chip apart from plain menu text.
const MIN_ACTION_COLORS: u16 = 16;

/// Asks the terminal how many colours it can draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalColorProbe;

impl CapabilityProbe for TerminalColorProbe {
    fn probe(&self) -> Option<ActionAffordance> {
        let colors = crossterm::style::available_color_count();
        tracing::debug!(colors, "terminal colour count");
        affordance_for_colors(colors)
    }
}

fn affordance_for_colors(colors: u16) -> Option<ActionAffordance> {
    (colors >= MIN_ACTION_COLORS).then_some(ActionAffordance { colors })
}

pub fn capability_for(mode: ShowAsAction) -> ActionCapability {
    match mode {
        ShowAsAction::Auto => ActionCapability::new(Box::new(TerminalColorProbe)),
        ShowAsAction::Always => ActionCapability::fixed(true),
        ShowAsAction::Never => ActionCapability::fixed(false),
    }
}
