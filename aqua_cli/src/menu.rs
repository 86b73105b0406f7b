//! Interactive menu loop.
//!
//! The loop owns the usage log. Handlers that change it take the log by
//! value and hand back the new one, so the current state is always the
//! local `log` in [`run`].

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use aqua_core::config::ChartConfig;
use aqua_core::{
    clear_data, export_log, find_by_date, format_records, parse_liters, record_entry, today,
    Announcer, CategoryTotals, ClearOutcome, Readings, Result, UsageLog,
};

use crate::chart;

/// Actions offered by the menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    View,
    Add,
    ViewByDate,
    Export,
    Clear,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(MenuChoice::View),
            "2" => Some(MenuChoice::Add),
            "3" => Some(MenuChoice::ViewByDate),
            "4" => Some(MenuChoice::Export),
            "5" => Some(MenuChoice::Clear),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// How the usage chart is shown
#[derive(Clone, Debug)]
pub enum ChartMode {
    /// Full-screen animated chart with mouse hover
    Interactive(ChartConfig),
    /// Plain text written to the menu output
    Text,
}

/// Fixed inputs of a menu session
pub struct Settings {
    pub data_file: PathBuf,
    pub chart: ChartMode,
}

struct Session<R, W, A> {
    input: R,
    output: W,
    announcer: A,
    settings: Settings,
}

/// Run the menu until the user exits or input ends
///
/// Returns the log as it stands at exit.
pub fn run<R, W, A>(
    log: UsageLog,
    settings: Settings,
    input: R,
    output: W,
    announcer: A,
) -> Result<UsageLog>
where
    R: BufRead,
    W: Write,
    A: Announcer,
{
    let mut session = Session {
        input,
        output,
        announcer,
        settings,
    };
    let mut log = log;

    loop {
        session.print_menu()?;
        let Some(choice) = session.read_response("Choose your action (1/2/3/4/5/6): ")? else {
            tracing::debug!("Input closed, leaving menu");
            break;
        };

        match MenuChoice::parse(&choice) {
            Some(MenuChoice::View) => session.view_usage(&log)?,
            Some(MenuChoice::Add) => log = session.add_entry(log)?,
            Some(MenuChoice::ViewByDate) => session.view_by_date(&log)?,
            Some(MenuChoice::Export) => session.export(&log)?,
            Some(MenuChoice::Clear) => log = session.clear()?,
            Some(MenuChoice::Exit) => {
                session.announcer.announce("Thank you! See you again.")?;
                break;
            }
            None => writeln!(session.output, "Invalid choice. Please choose between 1-6.")?,
        }
    }

    Ok(log)
}

impl<R: BufRead, W: Write, A: Announcer> Session<R, W, A> {
    fn print_menu(&mut self) -> Result<()> {
        let out = &mut self.output;
        writeln!(out)?;
        writeln!(out, "===== AquaTrack =====")?;
        writeln!(out, "╔══════════════════════════════╗")?;
        writeln!(out, "║ 1. View Water Usage          ║")?;
        writeln!(out, "║ 2. Add New Entry             ║")?;
        writeln!(out, "║ 3. View Entries By Date      ║")?;
        writeln!(out, "║ 4. Export Data To CSV        ║")?;
        writeln!(out, "║ 5. Clear All Data            ║")?;
        writeln!(out, "║ 6. Exit                      ║")?;
        writeln!(out, "╚══════════════════════════════╝")?;
        Ok(())
    }

    /// Print a prompt and read one line; `None` at end of input
    fn read_response(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn require_response(&mut self, prompt: &str) -> Result<String> {
        self.read_response(prompt)?.ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "input ended during prompt").into()
        })
    }

    fn read_liters(&mut self, prompt: &str) -> Result<u32> {
        let answer = self.require_response(prompt)?;
        parse_liters(&answer)
    }

    fn view_usage(&mut self, log: &UsageLog) -> Result<()> {
        if log.is_empty() {
            writeln!(self.output, "No data available.")?;
            return Ok(());
        }

        let totals = CategoryTotals::from_log(log);
        match &self.settings.chart {
            ChartMode::Interactive(config) => chart::terminal::show(totals, config)?,
            ChartMode::Text => write!(self.output, "{}", chart::text::render(&totals))?,
        }

        self.announcer.announce(&format!(
            "Today, you have used {} liters of water.",
            totals.grand_total()
        ))
    }

    fn add_entry(&mut self, log: UsageLog) -> Result<UsageLog> {
        let date = today();
        let readings = Readings {
            brushing: self.read_liters("Brushing (liters): ")?,
            bathing: self.read_liters("Bathing (liters): ")?,
            cooking: self.read_liters("Cooking (liters): ")?,
            other: self.read_liters("Other (liters): ")?,
        };

        let log = record_entry(log, &date, readings, &self.settings.data_file)?;
        writeln!(self.output, "Data successfully saved!")?;
        self.announcer.announce(&format!(
            "Your water usage data has been saved for {}.",
            date
        ))?;
        Ok(log)
    }

    fn view_by_date(&mut self, log: &UsageLog) -> Result<()> {
        let date = self.require_response("Which date's data do you want to view? (DD-MM-YYYY): ")?;
        let found = find_by_date(log, &date);
        if found.is_empty() {
            writeln!(self.output, "No data found for this date.")?;
        } else {
            write!(self.output, "{}", format_records(&found))?;
        }
        Ok(())
    }

    fn export(&mut self, log: &UsageLog) -> Result<()> {
        let file_name = self.require_response("Enter CSV file name (e.g., output.csv): ")?;
        export_log(log, &PathBuf::from(&file_name))?;
        writeln!(self.output, "Data has been exported to '{}'!", file_name)?;
        Ok(())
    }

    /// Remove the data file; the returned log replaces the current one
    fn clear(&mut self) -> Result<UsageLog> {
        match clear_data(&self.settings.data_file)? {
            ClearOutcome::Deleted => {
                writeln!(self.output, "All data has been deleted!")?;
                self.announcer.announce("All data has been deleted.")?;
            }
            ClearOutcome::NoFile => writeln!(self.output, "No data file found.")?,
        }
        Ok(UsageLog::new())
    }
}
