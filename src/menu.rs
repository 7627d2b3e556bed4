//! Keypad menu for runtime settings.
//!
//! Minimal page-based menu driven by the four letter keys:
//! `A` scroll up, `B` scroll down, `C` select, `D` back.  Threshold pages
//! edit a draft copy and commit it as a single
//! [`AppCommand::SetThresholds`]; the window page cycles a manual
//! override.  Digit keys are reserved for direct numeric entry and are
//! currently ignored.

use log::info;

use crate::app::commands::AppCommand;
use crate::config::Thresholds;
use crate::keypad::{KeyEdge, KeyEvent};
use crate::policy::WindowState;

/// Settings pages, in scroll order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    TempLow,
    TempHigh,
    HumidityTarget,
    HumidityTolerance,
    Window,
}

impl Page {
    const ORDER: [Page; 5] = [
        Page::TempLow,
        Page::TempHigh,
        Page::HumidityTarget,
        Page::HumidityTolerance,
        Page::Window,
    ];

    fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|&p| p == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|&p| p == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug)]
enum MenuState {
    Idle,
    Browsing(Page),
    Editing { page: Page, draft: Thresholds },
}

/// Keypad menu state machine.
pub struct Menu {
    state: MenuState,
    /// Local view of the manual override cycle: auto → open → closed.
    window_choice: Option<WindowState>,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    pub fn new() -> Self {
        Self {
            state: MenuState::Idle,
            window_choice: None,
        }
    }

    /// Feed one decoded key event.  Releases are ignored; presses walk the
    /// menu and may produce a command for the service to apply.
    pub fn handle_key(
        &mut self,
        event: &KeyEvent,
        current: &Thresholds,
        step: f32,
    ) -> Option<AppCommand> {
        if event.edge != KeyEdge::Press {
            return None;
        }

        match &mut self.state {
            MenuState::Idle => {
                if event.symbol == 'C' {
                    info!("menu: opened");
                    self.state = MenuState::Browsing(Page::TempLow);
                }
                None
            }

            MenuState::Browsing(page) => match event.symbol {
                'A' => {
                    *page = page.prev();
                    info!("menu: page {:?}", page);
                    None
                }
                'B' => {
                    *page = page.next();
                    info!("menu: page {:?}", page);
                    None
                }
                'C' => {
                    let page = *page;
                    if page == Page::Window {
                        return Some(self.cycle_window_choice());
                    }
                    info!("menu: editing {:?}", page);
                    self.state = MenuState::Editing {
                        page,
                        draft: *current,
                    };
                    None
                }
                'D' => {
                    info!("menu: closed");
                    self.state = MenuState::Idle;
                    None
                }
                _ => None, // digits reserved for numeric entry
            },

            MenuState::Editing { page, draft } => match event.symbol {
                'A' | 'B' => {
                    let delta = if event.symbol == 'A' { step } else { -step };
                    if let Some(field) = threshold_field(draft, *page) {
                        *field += delta;
                    }
                    None
                }
                'C' => {
                    let committed = *draft;
                    info!("menu: committing {:?}", page);
                    self.state = MenuState::Browsing(*page);
                    Some(AppCommand::SetThresholds(committed))
                }
                'D' => {
                    // Cancel — draft is dropped.
                    self.state = MenuState::Browsing(*page);
                    None
                }
                _ => None,
            },
        }
    }

    fn cycle_window_choice(&mut self) -> AppCommand {
        self.window_choice = match self.window_choice {
            None => Some(WindowState::Open),
            Some(WindowState::Open) => Some(WindowState::Closed),
            Some(WindowState::Closed) => None,
        };
        match self.window_choice {
            Some(state) => AppCommand::OverrideWindow(state),
            None => AppCommand::ReleaseOverride,
        }
    }
}

/// The threshold field edited on `page`; the window page has none.
fn threshold_field(draft: &mut Thresholds, page: Page) -> Option<&mut f32> {
    match page {
        Page::TempLow => Some(&mut draft.temp_low_c),
        Page::TempHigh => Some(&mut draft.temp_high_c),
        Page::HumidityTarget => Some(&mut draft.humidity_target_pct),
        Page::HumidityTolerance => Some(&mut draft.humidity_tolerance_pct),
        Page::Window => None,
    }
}
