use crate::app::render::{self, Palette};
use crate::core::{operations, LoadOutcome, RecordDraft, StockRecord, Storage, Store};
use crate::utils::error::{Result, StockError};
use crate::utils::validation::parse_integer;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddRecord,
    ListAll,
    RestockLowest,
    SearchByCode,
    ValuePerItem,
    HighestQuantity,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::AddRecord),
            "2" => Some(MenuChoice::ListAll),
            "3" => Some(MenuChoice::RestockLowest),
            "4" => Some(MenuChoice::SearchByCode),
            "5" => Some(MenuChoice::ValuePerItem),
            "6" => Some(MenuChoice::HighestQuantity),
            "7" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    AwaitingConfirmation,
    Ready,
    Operation(MenuChoice),
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The user did not confirm; nothing was loaded or written.
    Declined,
    Completed { operations: usize },
}

/// The interactive session: confirm, load, then dispatch menu choices until exit.
///
/// Console I/O errors end the session; every store or input error is
/// reported on `output` and the session carries on.
pub struct StockApp<S: Storage, R: BufRead, W: Write> {
    store: Store<S>,
    input: R,
    output: W,
    palette: Palette,
    state: MenuState,
    loaded: bool,
}

impl<S: Storage, R: BufRead, W: Write> StockApp<S, R, W> {
    pub fn new(store: Store<S>, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
            palette: Palette::plain(),
            state: MenuState::AwaitingConfirmation,
            loaded: false,
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    pub fn into_parts(self) -> (Store<S>, W) {
        (self.store, self.output)
    }

    pub fn run(&mut self) -> Result<SessionOutcome> {
        let mut operations = 0;

        loop {
            match self.state {
                MenuState::AwaitingConfirmation => self.await_confirmation()?,
                MenuState::Ready => self.await_choice()?,
                MenuState::Operation(choice) => {
                    self.dispatch(choice)?;
                    operations += 1;
                    self.transition(MenuState::Ready);
                }
                MenuState::Exited => break,
            }
        }

        if self.loaded {
            Ok(SessionOutcome::Completed { operations })
        } else {
            Ok(SessionOutcome::Declined)
        }
    }

    fn transition(&mut self, next: MenuState) {
        tracing::debug!("Menu state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn await_confirmation(&mut self) -> Result<()> {
        writeln!(self.output, "\nWelcome to the Stock App!")?;
        writeln!(self.output, "\nWe will now upload your stock records.")?;

        let confirmed = self
            .prompt("\nType Y to proceed: ")?
            .is_some_and(|answer| is_affirmative(&answer));
        if !confirmed {
            writeln!(self.output, "\nGoodbye! Stock App closed.")?;
            self.transition(MenuState::Exited);
            return Ok(());
        }

        self.load_records()?;
        self.loaded = true;
        self.transition(MenuState::Ready);
        Ok(())
    }

    fn load_records(&mut self) -> Result<()> {
        match self.store.load() {
            Ok(LoadOutcome::Loaded { records, skipped }) => {
                writeln!(
                    self.output,
                    "\nStock records uploaded successfully! ({} records)",
                    records
                )?;
                if !skipped.is_empty() {
                    let lines: Vec<String> = skipped.iter().map(|l| l.to_string()).collect();
                    writeln!(
                        self.output,
                        "Skipped malformed lines: {}",
                        lines.join(", ")
                    )?;
                }
            }
            Ok(LoadOutcome::MissingFile) => {
                writeln!(
                    self.output,
                    "\nNo stock file found at '{}'. Please ensure file is saved correctly.",
                    self.store.storage().location()
                )?;
                writeln!(self.output, "Starting with an empty stock list.")?;
            }
            Err(e) => {
                self.recover(e)?;
                writeln!(
                    self.output,
                    "Continuing with the {} records read before the error.",
                    self.store.len()
                )?;
            }
        }
        Ok(())
    }

    fn await_choice(&mut self) -> Result<()> {
        writeln!(self.output, "\n{}", render::main_menu(&self.palette))?;

        let Some(input) = self.prompt("\nEnter a number (1-7): ")? else {
            self.transition(MenuState::Exited);
            return Ok(());
        };

        match MenuChoice::parse(&input) {
            Some(MenuChoice::Exit) => {
                writeln!(self.output, "\nYou have exited the Stock App. Goodbye!")?;
                self.transition(MenuState::Exited);
            }
            Some(choice) => self.transition(MenuState::Operation(choice)),
            None => {
                writeln!(
                    self.output,
                    "\nInvalid input. Please enter a number from 1 to 7."
                )?;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        tracing::debug!("Running {:?}", choice);
        match choice {
            MenuChoice::AddRecord => self.add_record(),
            MenuChoice::ListAll => self.list_all(),
            MenuChoice::RestockLowest => self.restock_lowest(),
            MenuChoice::SearchByCode => self.search_by_code(),
            MenuChoice::ValuePerItem => self.value_per_item(),
            MenuChoice::HighestQuantity => self.highest_quantity(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn add_record(&mut self) -> Result<()> {
        writeln!(self.output, "\nPlease enter your record below:")?;

        let Some(country) = self.prompt("\nWhich country is this stock for?\n")? else {
            return Ok(());
        };
        let Some(code) = self.prompt("Enter a unique product code:\n")? else {
            return Ok(());
        };
        if operations::code_exists(&self.store, &code) {
            return self.recover(StockError::DuplicateCode { code });
        }
        let Some(product) = self.prompt("Enter product name:\n")? else {
            return Ok(());
        };
        let Some(cost) = self.prompt("Enter unit cost:\n")? else {
            return Ok(());
        };
        let Some(quantity) = self.prompt("Enter stock quantity:\n")? else {
            return Ok(());
        };

        let draft = RecordDraft {
            country,
            code,
            product,
            cost,
            quantity,
        };
        let added = operations::add_record(&mut self.store, draft).map(|r| r.code.clone());
        match added {
            Ok(code) => writeln!(self.output, "\nNew record {} saved to inventory.", code)?,
            Err(e) => self.recover(e)?,
        }
        Ok(())
    }

    fn list_all(&mut self) -> Result<()> {
        let records = operations::list_all(&self.store);
        if records.is_empty() {
            writeln!(self.output, "\nNothing to display.")?;
        } else {
            writeln!(self.output, "\n{}", render::records_table(records))?;
        }
        Ok(())
    }

    fn restock_lowest(&mut self) -> Result<()> {
        loop {
            let lowest = match operations::lowest_stock(&self.store) {
                Ok((_, record)) => record.to_string(),
                Err(e) => return self.recover(e),
            };
            writeln!(self.output, "\nLowest stock:\n\n{}", lowest)?;

            let confirmed = self
                .prompt("\nType 'y' to restock or anything else to cancel: ")?
                .is_some_and(|answer| is_affirmative(&answer));
            if !confirmed {
                return Ok(());
            }

            let Some(amount) = self.prompt("\nHow many to add?: ")? else {
                return Ok(());
            };
            let amount = match parse_integer("restock amount", &amount) {
                Ok(amount) => amount,
                Err(e) => {
                    self.recover(e)?;
                    continue;
                }
            };

            let updated = operations::restock_lowest(&mut self.store, amount)
                .map(|r| (r.code.clone(), r.quantity));
            match updated {
                Ok((code, quantity)) => writeln!(
                    self.output,
                    "\nStock updated: {} now has {} items.",
                    code, quantity
                )?,
                Err(e) => self.recover(e)?,
            }
        }
    }

    fn search_by_code(&mut self) -> Result<()> {
        loop {
            let Some(target) = self.prompt("\nEnter product code or 'R' to return to menu:\n")?
            else {
                return Ok(());
            };
            if target.eq_ignore_ascii_case("r") {
                return Ok(());
            }

            let matches: Vec<StockRecord> = operations::find_by_code(&self.store, &target)
                .into_iter()
                .cloned()
                .collect();
            if matches.is_empty() {
                writeln!(self.output, "\nNo record found with code '{}'.", target)?;
            } else {
                writeln!(self.output, "{}", render::records_table(&matches))?;
            }
        }
    }

    fn value_per_item(&mut self) -> Result<()> {
        let items = operations::value_per_item(&self.store);
        if items.is_empty() {
            writeln!(self.output, "\nNothing to display.")?;
        } else {
            writeln!(self.output, "\n{}", render::value_table(&items))?;
        }
        Ok(())
    }

    fn highest_quantity(&mut self) -> Result<()> {
        let sentence = operations::highest_quantity(&self.store).map(|r| {
            format!(
                "\nThe {} in {} are on sale with a quantity of {}.",
                r.product, r.country, r.quantity
            )
        });
        match sentence {
            Ok(sentence) => writeln!(self.output, "{}", sentence)?,
            Err(e) => self.recover(e)?,
        }
        Ok(())
    }

    /// Reports a recoverable error to the user; anything else is returned.
    fn recover(&mut self, error: StockError) -> Result<()> {
        if !error.is_recoverable() {
            return Err(error);
        }
        tracing::warn!("{}", error);
        writeln!(self.output, "\n{}", error.user_friendly_message())?;
        writeln!(self.output, "{}.", error.recovery_suggestion())?;
        Ok(())
    }

    /// `None` when input is exhausted.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn is_affirmative(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
