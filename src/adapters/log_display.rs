//! Console display adapter.
//!
//! Stands in for the TFT panel on the host: each [`DisplayDirective`] is
//! logged as the screen it would draw.  It also remembers the last
//! directive and whether the panel is inverted, which the simulator prints
//! in its summary.

use log::info;

use crate::app::ports::DisplayPort;
use crate::display::DisplayDirective;

/// [`DisplayPort`] that logs every redraw.
#[derive(Debug, Default)]
pub struct LogDisplay {
    last: Option<DisplayDirective>,
    inverted: bool,
    redraws: u32,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent directive rendered.
    pub fn last(&self) -> Option<&DisplayDirective> {
        self.last.as_ref()
    }

    /// Whether the panel colours are currently inverted.
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Number of directives rendered so far.
    pub fn redraws(&self) -> u32 {
        self.redraws
    }
}

impl DisplayPort for LogDisplay {
    fn render(&mut self, directive: &DisplayDirective) {
        match directive {
            DisplayDirective::RenderOffline => {
                self.inverted = false;
                info!("SCREEN | SYSTEM OFFLINE");
            }
            DisplayDirective::RenderIdle => {
                self.inverted = false;
                info!("SCREEN | SYSTEM ONLINE | press SELECT to arm");
            }
            DisplayDirective::RenderArmed => {
                self.inverted = false;
                info!("SCREEN | SYSTEM ARMED");
            }
            DisplayDirective::RenderAlarmEnter(timestamp) => {
                self.inverted = false;
                info!("SCREEN | ALARM TRIGGERED | {}", timestamp);
            }
            DisplayDirective::RenderAlarmFlash { invert } => {
                self.inverted = *invert;
                info!("SCREEN | invert={}", invert);
            }
        }
        self.last = Some(directive.clone());
        self.redraws += 1;
    }
}
