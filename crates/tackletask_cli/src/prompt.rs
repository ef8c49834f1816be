//! Line-oriented prompting with validation and re-prompt.
//!
//! # Invariants
//! - Invalid input never leaves this module; the user is asked again.
//! - Closed input surfaces as `io::ErrorKind::UnexpectedEof`.

use chrono::NaiveDate;
use std::io::{self, BufRead, Write};
use tackletask_core::{validate_email, WorkStatus};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reads answers from `input` and writes prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Asks until `parse` accepts the answer.
    pub fn value<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> io::Result<T> {
        loop {
            let answer = self.read_answer(label)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(message) => self.warn(&message)?,
            }
        }
    }

    /// Like [`Prompter::value`], but an empty answer keeps `current` and
    /// returns `None`.
    pub fn edit<T>(
        &mut self,
        label: &str,
        current: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> io::Result<Option<T>> {
        let label = format!("{label} [{current}]");
        loop {
            let answer = self.read_answer(&label)?;
            if answer.is_empty() {
                return Ok(None);
            }
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(message) => self.warn(&message)?,
            }
        }
    }

    /// Numbered menu; returns the chosen number, `0` meaning back/exit.
    pub fn menu(&mut self, options: &[&str], zero_label: &str) -> io::Result<usize> {
        for (index, option) in options.iter().enumerate() {
            writeln!(self.output, "{}. {option}", index + 1)?;
        }
        writeln!(self.output, "0. {zero_label}")?;
        let max = options.len();
        self.value("\nEnter your choice", |answer| parse_choice(answer, max))
    }

    pub fn warn(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "\n⚠️\n {message}\n")
    }

    fn read_answer(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }
}

const CLEAR_MARKER: &str = "-";

pub fn parse_choice(answer: &str, max: usize) -> Result<usize, String> {
    match answer.parse::<usize>() {
        Ok(choice) if choice <= max => Ok(choice),
        _ => Err("Entry invalid! Please enter a valid option.".to_string()),
    }
}

pub fn parse_required(answer: &str) -> Result<String, String> {
    if answer.is_empty() {
        return Err("This field is required.".to_string());
    }
    Ok(answer.to_string())
}

/// Free text that may be empty. A lone `-` clears the field, which lets
/// [`Prompter::edit`] tell "clear" apart from "keep".
pub fn parse_optional(answer: &str) -> Result<String, String> {
    if answer == CLEAR_MARKER {
        return Ok(String::new());
    }
    Ok(answer.to_string())
}

pub fn parse_email(answer: &str) -> Result<String, String> {
    validate_email(answer)
        .map(|()| answer.to_string())
        .map_err(|_| "Invalid email format. Please try again.".to_string())
}

pub fn parse_date(answer: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(answer, DATE_FORMAT)
        .map_err(|_| "Invalid date. Use the YYYY-MM-DD format.".to_string())
}

pub fn parse_amount(answer: &str) -> Result<f64, String> {
    match answer.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err("Enter a non-negative number.".to_string()),
    }
}

pub fn parse_id(answer: &str) -> Result<i64, String> {
    match answer.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err("Enter a numeric ID.".to_string()),
    }
}

/// Accepts a status name or its position in `Pending, In Progress, Completed`.
pub fn parse_status(answer: &str) -> Result<WorkStatus, String> {
    if let Ok(position) = answer.parse::<usize>() {
        if let Some(status) = position
            .checked_sub(1)
            .and_then(|index| WorkStatus::ALL.get(index))
        {
            return Ok(*status);
        }
    }
    answer
        .parse()
        .map_err(|_| "Choose one of: Pending, In Progress, Completed.".to_string())
}
