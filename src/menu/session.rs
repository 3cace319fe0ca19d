//! Interactive session
//!
//! Drives the menu screens over any reader/writer. The working set is
//! reloaded from disk every time the ledger screen is entered; reports and
//! searches run against that snapshot.

use chrono::{Local, NaiveDate, NaiveDateTime};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use crate::config::Settings;
use crate::display::{console, format_amount_owed, format_transaction_table};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction};
use crate::reports::{ReportPeriod, SearchCriterion, SearchField};
use crate::services::{
    ledger_view, ongoing_obligations, validate_payment, LedgerService, LedgerView, PaymentOutcome,
    VendorIndex,
};
use crate::storage::Storage;

use super::prompt::read_answer;
use super::state::{navigation, Action, MenuState};

/// An interactive menu session
pub struct Session<'a, R, W> {
    storage: &'a Storage,
    settings: &'a Settings,
    input: R,
    out: W,
    clock: Option<NaiveDateTime>,
    working_set: Vec<Transaction>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(storage: &'a Storage, settings: &'a Settings, input: R, out: W) -> Self {
        Self {
            storage,
            settings,
            input,
            out,
            clock: None,
            working_set: Vec::new(),
        }
    }

    /// Pin the clock used for new records and period reports
    pub fn with_clock(mut self, now: NaiveDateTime) -> Self {
        self.clock = Some(now);
        self
    }

    /// Run until the user exits or the input ends
    ///
    /// Failed actions are reported and the session returns to the main menu;
    /// only a failure to write output ends the session with an error.
    pub fn run(&mut self) -> LedgerResult<()> {
        console::information(&mut self.out, "Welcome to pocket-ledger")?;

        let mut state = MenuState::MainMenu;
        while !state.is_terminal() {
            state = match self.step(state) {
                Ok(next) => next,
                Err(e) => {
                    warn!(error = %e, ?state, "Menu action failed");
                    console::deny(&mut self.out, &e.to_string())?;
                    MenuState::MainMenu
                }
            };
        }

        console::success(&mut self.out, "Goodbye!")?;
        Ok(())
    }

    fn step(&mut self, state: MenuState) -> LedgerResult<MenuState> {
        match state {
            MenuState::VendorSearch => self.vendor_search(),
            MenuState::CustomSearch => self.custom_search(),
            MenuState::Exit => Ok(MenuState::Exit),
            MenuState::MainMenu | MenuState::Ledger | MenuState::ReportMenu => self.choose(state),
        }
    }

    fn choose(&mut self, state: MenuState) -> LedgerResult<MenuState> {
        writeln!(self.out, "\n{}", state.options())?;
        let Some(answer) = self.ask("Enter your choice: ") else {
            return Ok(MenuState::Exit);
        };

        let Some(transition) = state.transition(&answer) else {
            console::deny(&mut self.out, "Invalid option, please try again")?;
            return Ok(state);
        };

        if state == MenuState::MainMenu && transition.next == MenuState::Ledger {
            self.working_set = LedgerService::new(self.storage).load();
            debug!(records = self.working_set.len(), "Reloaded working set");
        }

        match transition.action {
            None => Ok(transition.next),
            Some(Action::Deposit) => self.deposit(),
            Some(Action::Payment) => self.payment(),
            Some(Action::ShowLedger(view)) => {
                self.show_ledger(view)?;
                Ok(transition.next)
            }
            Some(Action::ShowPeriod(period)) => {
                self.show_period(period)?;
                Ok(transition.next)
            }
        }
    }

    fn deposit(&mut self) -> LedgerResult<MenuState> {
        let vendor = loop {
            let Some(vendor) = self.ask("Vendor: ") else {
                return Ok(MenuState::Exit);
            };
            if !vendor.is_empty() {
                break vendor;
            }
            console::warning(&mut self.out, "Vendor name cannot be empty")?;
        };

        let Some(description) = self.ask("Description: ") else {
            return Ok(MenuState::Exit);
        };

        let amount = loop {
            let Some(raw) = self.ask("Amount: ") else {
                return Ok(MenuState::Exit);
            };
            match Money::parse(&raw) {
                Ok(amount) if amount.is_positive() => break amount,
                Ok(_) => console::warning(&mut self.out, "Deposit amount must be greater than zero")?,
                Err(_) => console::deny(&mut self.out, &LedgerError::parse("amount", raw).to_string())?,
            }
        };

        let txn = LedgerService::new(self.storage).deposit_at(self.now(), &vendor, &description, amount)?;
        console::success(
            &mut self.out,
            &format!(
                "Deposit of {} from {} recorded",
                txn.amount.format_with_symbol(&self.settings.currency_symbol),
                txn.vendor
            ),
        )?;
        Ok(MenuState::MainMenu)
    }

    fn payment(&mut self) -> LedgerResult<MenuState> {
        let service = LedgerService::new(self.storage);
        let records = match self.storage.ledger.load() {
            Ok(records) => records,
            Err(e) if e.is_storage_unavailable() => {
                warn!(error = %e, "Cannot make a payment without a ledger file");
                console::warning(&mut self.out, "No ledger file found, nothing is owed")?;
                return Ok(MenuState::MainMenu);
            }
            Err(e) => return Err(e),
        };

        if ongoing_obligations(&records).is_empty() {
            console::information(&mut self.out, "There are no outstanding payments")?;
            return Ok(MenuState::MainMenu);
        }
        console::information(&mut self.out, "Outstanding payments")?;
        let table = format_transaction_table(&ledger_view(&records, LedgerView::Payments), self.settings);
        write!(self.out, "{}", table)?;

        let (vendor, description, owed) = loop {
            let Some(vendor) = self.ask("Vendor (blank to cancel): ") else {
                return Ok(MenuState::Exit);
            };
            if vendor.is_empty() {
                console::information(&mut self.out, "Payment cancelled")?;
                return Ok(MenuState::MainMenu);
            }
            let Some(description) = self.ask("Description: ") else {
                return Ok(MenuState::Exit);
            };

            match service.amount_owed(&records, &vendor, &description) {
                Ok(owed) => break (vendor, description, owed),
                Err(e) if e.is_not_found() => {
                    console::warning(&mut self.out, &format!("{}, please try again", e))?
                }
                Err(e) => return Err(e),
            }
        };
        console::information(&mut self.out, &format_amount_owed(&vendor, owed, self.settings))?;

        let outcome = loop {
            let Some(raw) = self.ask("Payment amount: ") else {
                return Ok(MenuState::Exit);
            };
            let payment = match Money::parse(&raw) {
                Ok(payment) => payment,
                Err(_) => {
                    console::deny(&mut self.out, &LedgerError::parse("amount", raw).to_string())?;
                    continue;
                }
            };
            match validate_payment(owed, payment) {
                Ok(outcome) => break outcome,
                Err(e) if e.is_validation() => console::warning(&mut self.out, &e.to_string())?,
                Err(e) => return Err(e),
            }
        };

        service.record_payment_at(self.now(), &vendor, &description, &outcome)?;
        self.report_payment(&vendor, &outcome)?;
        Ok(MenuState::MainMenu)
    }

    fn report_payment(&mut self, vendor: &str, outcome: &PaymentOutcome) -> LedgerResult<()> {
        let symbol = &self.settings.currency_symbol;
        let message = if outcome.is_settled() {
            format!("Balance with {} is settled", vendor)
        } else {
            format!(
                "Payment of {} recorded, {} still owed to {}",
                outcome.payment.format_with_symbol(symbol),
                outcome.remaining.abs().format_with_symbol(symbol),
                vendor
            )
        };
        console::success(&mut self.out, &message)?;
        Ok(())
    }

    fn show_ledger(&mut self, view: LedgerView) -> LedgerResult<()> {
        console::information(&mut self.out, &format!("Ledger: {}", view))?;
        let table = format_transaction_table(&ledger_view(&self.working_set, view), self.settings);
        write!(self.out, "{}", table)?;
        Ok(())
    }

    fn show_period(&mut self, period: ReportPeriod) -> LedgerResult<()> {
        let today = self.today();
        console::information(&mut self.out, &format!("{} ({})", period, period.range(today)))?;
        let table = format_transaction_table(&period.filter(&self.working_set, today), self.settings);
        write!(self.out, "{}", table)?;
        Ok(())
    }

    fn vendor_search(&mut self) -> LedgerResult<MenuState> {
        console::information(&mut self.out, MenuState::VendorSearch.options())?;
        let index = VendorIndex::build(&self.working_set);

        loop {
            let Some(answer) = self.ask("Vendor name: ") else {
                return Ok(MenuState::Exit);
            };
            if let Some(next) = navigation(&answer) {
                return Ok(next);
            }
            if answer.is_empty() {
                console::warning(&mut self.out, "Please enter a vendor name")?;
                continue;
            }

            match index.lookup(&answer) {
                Ok(records) => {
                    let table = format_transaction_table(records, self.settings);
                    write!(self.out, "{}", table)?;
                    return Ok(MenuState::ReportMenu);
                }
                Err(e) if e.is_not_found() => {
                    console::warning(&mut self.out, &format!("{}, please try again", e))?
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn custom_search(&mut self) -> LedgerResult<MenuState> {
        console::information(&mut self.out, MenuState::CustomSearch.options())?;
        console::information(&mut self.out, "Leave a field blank to skip it")?;

        let mut remaining = self.working_set.clone();
        for field in SearchField::ORDER {
            let prompt = match field {
                SearchField::StartDate | SearchField::EndDate => {
                    format!("Enter {} (YYYY-MM-DD): ", field.label())
                }
                _ => format!("Enter {}: ", field.label()),
            };

            let criterion = loop {
                let Some(answer) = self.ask(&prompt) else {
                    return Ok(MenuState::Exit);
                };
                if let Some(next) = navigation(&answer) {
                    return Ok(next);
                }
                match SearchCriterion::parse(field, &answer) {
                    Ok(criterion) => break criterion,
                    Err(e) if e.is_parse() => console::deny(&mut self.out, &e.to_string())?,
                    Err(e) => return Err(e),
                }
            };

            if let Some(criterion) = criterion {
                remaining = criterion.apply(remaining);
            }
        }

        let table = format_transaction_table(&remaining, self.settings);
        write!(self.out, "{}", table)?;
        Ok(MenuState::ReportMenu)
    }

    // A read failure ends the session the same way end of input does.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        match read_answer(&mut self.input, &mut self.out, prompt) {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Failed to read input");
                None
            }
        }
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.unwrap_or_else(|| Local::now().naive_local())
    }

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerPaths;
    use chrono::NaiveTime;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, &Settings::default()).unwrap();
        (temp_dir, storage)
    }

    fn record(storage: &Storage, date: &str, description: &str, vendor: &str, amount: &str) {
        let txn = Transaction::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            description,
            vendor,
            Money::parse(amount).unwrap(),
        );
        storage.ledger.append(&txn).unwrap();
    }

    fn run(storage: &Storage, script: &str) -> String {
        let settings = Settings::default();
        let mut out = Vec::new();
        let clock = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        Session::new(storage, &settings, Cursor::new(script), &mut out)
            .with_clock(clock)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn ledger_contents(storage: &Storage) -> String {
        std::fs::read_to_string(storage.ledger.path()).unwrap()
    }

    #[test]
    fn test_exit_and_end_of_input() {
        let (_temp_dir, storage) = create_storage();

        let output = run(&storage, "x\n");
        assert!(output.contains("Welcome to pocket-ledger"));
        assert!(output.contains("Goodbye!"));

        let output = run(&storage, "Z\n");
        assert!(output.contains("Invalid option, please try again"));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_deposit_reprompts_until_valid() {
        let (_temp_dir, storage) = create_storage();

        let output = run(&storage, "D\n\nEmployer\nsalary\nabc\n-5\n3200\nX\n");

        assert!(output.contains("Vendor name cannot be empty"));
        assert!(output.contains("Invalid amount: 'abc'"));
        assert!(output.contains("Deposit amount must be greater than zero"));
        assert!(output.contains("Deposit of $3200.00 from Employer recorded"));
        assert!(ledger_contents(&storage).ends_with("2024-03-15|09:30:00|salary deposit|Employer|3200.00\n"));
    }

    #[test]
    fn test_payment_settles_balance() {
        let (_temp_dir, storage) = create_storage();
        record(&storage, "2024-01-05", "invoice payment", "Acme", "-50.00");

        let output = run(&storage, "P\nGlobex\ninvoice\nacme\ninvoice\nten\n60\n50\nX\n");

        assert!(output.contains("Outstanding payments"));
        assert!(output.contains("Balance not found: Globex / invoice, please try again"));
        assert!(output.contains("Total amount owed for acme: $50.00"));
        assert!(output.contains("Invalid amount: 'ten'"));
        assert!(output.contains("exceeds"));
        assert!(output.contains("Balance with acme is settled"));
        assert!(ledger_contents(&storage).ends_with("2024-03-15|09:30:00|invoice paid|acme|0.00\n"));
    }

    #[test]
    fn test_partial_payment_and_cancel() {
        let (_temp_dir, storage) = create_storage();
        record(&storage, "2024-01-05", "invoice payment", "Acme", "-50.00");

        let output = run(&storage, "P\nAcme\ninvoice\n20\nP\n\nX\n");

        assert!(output.contains("Payment of $20.00 recorded, $30.00 still owed to Acme"));
        assert!(output.contains("Payment cancelled"));
        assert!(ledger_contents(&storage).ends_with("|invoice payment|Acme|-30.00\n"));
    }

    #[test]
    fn test_payment_without_ledger() {
        let (_temp_dir, storage) = create_storage();

        let output = run(&storage, "P\nX\n");
        assert!(output.contains("No ledger file found, nothing is owed"));
        assert!(!storage.ledger.path().exists());
    }

    #[test]
    fn test_ledger_view_reloads_working_set() {
        let (_temp_dir, storage) = create_storage();
        record(&storage, "2024-01-05", "invoice payment", "Acme", "-50.00");

        let output = run(&storage, "D\nEmployer\nsalary\n100\nL\nA\nL\nD\nX\n");

        assert!(output.contains("Ledger: All"));
        assert!(output.contains("Ledger: Deposits"));
        assert!(output.contains("Employer"));
        assert!(output.contains("-$50.00"));
    }

    #[test]
    fn test_period_report() {
        let (_temp_dir, storage) = create_storage();
        record(&storage, "2024-03-02", "groceries payment", "Market", "-40.00");
        record(&storage, "2024-02-10", "rent payment", "Landlord", "-900.00");

        let output = run(&storage, "L\nR\n1\n0\nX\n");

        assert!(output.contains("Month To Date (2024-03-01 to 2024-03-15)"));
        assert!(output.contains("Market"));
        assert!(!output.contains("Landlord"));
    }

    #[test]
    fn test_vendor_search() {
        let (_temp_dir, storage) = create_storage();
        record(&storage, "2024-03-02", "invoice payment", "Acme", "-40.00");

        let output = run(&storage, "L\nR\n5\nnobody\n acme \n0\nX\n");

        assert!(output.contains("Vendor not found: NOBODY, please try again"));
        assert!(output.contains("-$40.00"));
    }

    #[test]
    fn test_custom_search_reprompts_bad_dates() {
        let (_temp_dir, storage) = create_storage();
        record(&storage, "2024-01-20", "invoice payment", "Acme", "-40.00");
        record(&storage, "2024-02-20", "invoice payment", "Acme", "-41.00");
        record(&storage, "2024-02-21", "salary deposit", "Employer", "100.00");

        let output = run(&storage, "L\nR\n6\n2024-13-01\n2024-02-01\n\n\nacme\n\n0\nX\n");

        assert!(output.contains("Invalid start date: '2024-13-01'"));
        assert!(output.contains("-$41.00"));
        assert!(!output.contains("-$40.00"));
        assert!(!output.contains("Employer"));
    }

    #[test]
    fn test_search_screens_go_back() {
        let (_temp_dir, storage) = create_storage();
        record(&storage, "2024-03-02", "invoice payment", "Acme", "-40.00");

        let output = run(&storage, "L\nR\n6\nback\n5\nhome\nX\n");
        assert!(output.contains("Goodbye!"));
        assert!(!output.contains("-$40.00"));
    }
}
