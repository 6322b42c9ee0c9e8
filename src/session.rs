//! Interactive prompt loop driving load → filter → aggregate → view.

use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Instant;

use anyhow::Result;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{DataError, InputError};
use crate::filter::filter;
use crate::loader::load;
use crate::output::{
    log_json, write_duration_stats, write_separator, write_station_stats, write_time_stats,
    write_user_stats,
};
use crate::selection::{Answer, City, DayFilter, MonthFilter, Selection};
use crate::stats::{duration_stats, station_stats, time_stats, user_stats};
use crate::viewer::RawRowViewer;

const CITY_PROMPT: &str = "Select a city to explore: Chicago, New York City or Washington";
const MONTH_PROMPT: &str = "Which month would you like to filter by: January, February, March, April, May, June? Enter 'All' to view all months";
const DAY_PROMPT: &str = "Would you like to filter by day: Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday? Enter 'All' to view all days";
const VIEW_PROMPT: &str = "Would you like to view the raw data in sets of {n} rows? Yes or No:";
const CONTINUE_PROMPT: &str = "Would you like to continue viewing the raw data? Yes or No:";
const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    PromptCity,
    PromptMonth(City),
    PromptDay(City, MonthFilter),
    RunPipeline(City, Selection),
    PromptViewRaw(City),
    PromptRestart,
    Done,
}

/// One interactive session over `input` and `output`.
pub struct Session<R, W> {
    config: Config,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: Config, input: R, output: W) -> Self {
        Self {
            config,
            input,
            output,
        }
    }

    /// Runs until the user declines to restart or input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        let mut state = State::PromptCity;
        while state != State::Done {
            state = self.step(state)?;
        }

        self.output.flush()?;
        Ok(())
    }

    /// Consumes the session and hands back its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn step(&mut self, state: State) -> Result<State> {
        let next = match state {
            State::PromptCity => match self.ask::<City>(CITY_PROMPT)? {
                Some(city) => State::PromptMonth(city),
                None => State::Done,
            },
            State::PromptMonth(city) => match self.ask::<MonthFilter>(MONTH_PROMPT)? {
                Some(month) => State::PromptDay(city, month),
                None => State::Done,
            },
            State::PromptDay(city, month) => match self.ask::<DayFilter>(DAY_PROMPT)? {
                Some(day) => State::RunPipeline(city, Selection { month, day }),
                None => State::Done,
            },
            State::RunPipeline(city, selection) => {
                writeln!(
                    self.output,
                    "Thank you! You have chosen to explore data for city: {}, month: {}, day: {}\n",
                    city, selection.month, selection.day
                )?;
                write_separator(&mut self.output)?;

                match self.run_pipeline(city, selection) {
                    Ok(()) => State::PromptViewRaw(city),
                    Err(e) => {
                        error!(error = %e, "Pipeline failed");
                        writeln!(self.output, "\nCould not analyze {city}: {e}")?;
                        State::PromptRestart
                    }
                }
            }
            State::PromptViewRaw(city) => {
                self.view_raw(city)?;
                State::PromptRestart
            }
            State::PromptRestart => match self.ask::<Answer>(RESTART_PROMPT)? {
                Some(Answer::Yes) => State::PromptCity,
                _ => State::Done,
            },
            State::Done => State::Done,
        };
        Ok(next)
    }

    #[tracing::instrument(
        skip_all,
        fields(city = %city, month = %selection.month, day = %selection.day)
    )]
    fn run_pipeline(&mut self, city: City, selection: Selection) -> Result<(), PipelineError> {
        let (full, summary) = load(&self.config.cities, city, self.config.bad_rows)?;
        if summary.skipped > 0 {
            writeln!(
                self.output,
                "Skipped {} unreadable rows in the {} data.",
                summary.skipped, city
            )?;
        }

        let table = filter(&full, selection);
        drop(full);
        info!(trips = table.len(), "Running aggregators");

        if table.is_empty() {
            writeln!(self.output, "\nNo trips matched the selected filters.")?;
        }

        let started = Instant::now();
        let stats = time_stats(&table);
        log_json("time", &stats);
        write_time_stats(&mut self.output, &stats)?;
        self.write_elapsed(started)?;

        let started = Instant::now();
        let stats = station_stats(&table);
        log_json("station", &stats);
        write_station_stats(&mut self.output, &stats)?;
        self.write_elapsed(started)?;

        let started = Instant::now();
        let stats = duration_stats(&table);
        log_json("duration", &stats);
        write_duration_stats(&mut self.output, &stats)?;
        self.write_elapsed(started)?;

        let started = Instant::now();
        let stats = user_stats(&table);
        log_json("user", &stats);
        write_user_stats(&mut self.output, &stats)?;
        self.write_elapsed(started)?;

        Ok(())
    }

    fn write_elapsed(&mut self, started: Instant) -> std::io::Result<()> {
        writeln!(
            self.output,
            "\nThis took {:.4} seconds.",
            started.elapsed().as_secs_f64()
        )?;
        write_separator(&mut self.output)
    }

    fn view_raw(&mut self, city: City) -> Result<()> {
        let n = self.config.batch_size.get();
        let first_prompt = VIEW_PROMPT.replace("{n}", &n.to_string());

        if self.ask::<Answer>(&first_prompt)? != Some(Answer::Yes) {
            return Ok(());
        }

        let Some(path) = self.config.cities.path(city) else {
            writeln!(self.output, "{}", DataError::Unconfigured(city.name()))?;
            return Ok(());
        };
        let mut viewer = match RawRowViewer::open(path) {
            Ok(v) => v,
            Err(e) => {
                error!(error = %e, "Raw viewer failed to open");
                writeln!(self.output, "{e}")?;
                return Ok(());
            }
        };

        loop {
            let batch = match viewer.next_batch(n) {
                Ok(batch) => batch,
                Err(e) => {
                    error!(error = %e, "Raw viewer read failed");
                    writeln!(self.output, "{e}")?;
                    return Ok(());
                }
            };
            for row in &batch.rows {
                writeln!(self.output, "{row}")?;
            }
            if batch.exhausted {
                writeln!(self.output, "\nEnd of the raw data.")?;
                return Ok(());
            }
            if self.ask::<Answer>(CONTINUE_PROMPT)? != Some(Answer::Yes) {
                return Ok(());
            }
        }
    }

    /// Prompts until the reply parses as `T`. `None` means input ended.
    fn ask<T>(&mut self, prompt: &str) -> Result<Option<T>>
    where
        T: FromStr<Err = InputError>,
    {
        loop {
            writeln!(self.output, "{prompt}")?;
            self.output.flush()?;

            // invalid UTF-8 falls through to the parse below and is re-prompted
            let mut buf = Vec::new();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                info!("Input closed, ending session");
                return Ok(None);
            }
            let line = String::from_utf8_lossy(&buf);
            match line.trim().parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.output, "{e}\n")?,
            }
        }
    }
}

/// Failure inside one pipeline run: bad data, or the output went away.
#[derive(Debug, thiserror::Error)]
enum PipelineError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
