//! Menu navigation
//!
//! The interactive session moves between a handful of screens. Key handling
//! is a pure function of the current screen and the raw input line; the
//! session performs the returned action.

use crate::reports::ReportPeriod;
use crate::services::LedgerView;

/// Screens of the interactive session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    MainMenu,
    Ledger,
    ReportMenu,
    VendorSearch,
    CustomSearch,
    /// Terminal state
    Exit,
}

/// Work requested by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Deposit,
    Payment,
    ShowLedger(LedgerView),
    ShowPeriod(ReportPeriod),
}

/// Outcome of a valid key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: MenuState,
    pub action: Option<Action>,
}

impl Transition {
    fn to(next: MenuState) -> Self {
        Self { next, action: None }
    }

    fn act(next: MenuState, action: Action) -> Self {
        Self {
            next,
            action: Some(action),
        }
    }
}

impl MenuState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exit)
    }

    /// Options text shown for a key-driven screen
    pub fn options(&self) -> &'static str {
        match self {
            Self::MainMenu => "D) Add Deposit\nP) Make Payment (Debit)\nL) Ledger\nX) Exit",
            Self::Ledger => "A) All\nD) Deposits\nP) Payments\nR) Reports\nH) Home",
            Self::ReportMenu => {
                "1) Month To Date\n2) Previous Month\n3) Year To Date\n4) Previous Year\n\
                 5) Search by Vendor\n6) Custom Search\n0) Back"
            }
            Self::VendorSearch | Self::CustomSearch => "Type 'back' for reports or 'home' for the main menu",
            Self::Exit => "",
        }
    }

    /// Handle one input line; `None` means the input is not valid here
    pub fn transition(self, input: &str) -> Option<Transition> {
        let key = input.trim().to_ascii_uppercase();

        match self {
            Self::MainMenu => match key.as_str() {
                "D" => Some(Transition::act(Self::MainMenu, Action::Deposit)),
                "P" => Some(Transition::act(Self::MainMenu, Action::Payment)),
                "L" => Some(Transition::to(Self::Ledger)),
                "X" => Some(Transition::to(Self::Exit)),
                _ => None,
            },
            Self::Ledger => {
                let view = |view| Some(Transition::act(Self::MainMenu, Action::ShowLedger(view)));
                match key.as_str() {
                    "A" => view(LedgerView::All),
                    "D" => view(LedgerView::Deposits),
                    "P" => view(LedgerView::Payments),
                    "R" => Some(Transition::to(Self::ReportMenu)),
                    "H" => Some(Transition::to(Self::MainMenu)),
                    _ => None,
                }
            }
            Self::ReportMenu => {
                let period = |period| Some(Transition::act(Self::ReportMenu, Action::ShowPeriod(period)));
                match key.as_str() {
                    "1" => period(ReportPeriod::MonthToDate),
                    "2" => period(ReportPeriod::PreviousMonth),
                    "3" => period(ReportPeriod::YearToDate),
                    "4" => period(ReportPeriod::PreviousYear),
                    "5" => Some(Transition::to(Self::VendorSearch)),
                    "6" => Some(Transition::to(Self::CustomSearch)),
                    "0" | "H" => Some(Transition::to(Self::MainMenu)),
                    _ => None,
                }
            }
            Self::VendorSearch | Self::CustomSearch => navigation(input).map(Transition::to),
            Self::Exit => None,
        }
    }
}

/// Explicit back/home input inside a search screen
pub fn navigation(input: &str) -> Option<MenuState> {
    match input.trim().to_ascii_lowercase().as_str() {
        "back" => Some(MenuState::ReportMenu),
        "home" => Some(MenuState::MainMenu),
        _ => None,
    }
}
