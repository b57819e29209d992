//! Console command surface
//!
//! Recognises the firmware forms `M557 P<n> [X<f>] [Y<f>] [Z<f>]` and
//! `M1005 [S<n>]`, and the named forms `SET_PROBE_POINT INDEX=<n> [X=<f>]
//! [Y=<f>] [Z=<f>]` and `RUN_CALIBRATION_STEP [STEP=<n>]`. Matching is case
//! insensitive. `( ... )` spans and anything after `;` are comments; an
//! unclosed `(` runs to the end of the line.

use crate::parser::parse_number;
use crate::sequencer::FiveAxisCalibration;
use fiveaxis_core::{CalibrationError, Result};
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// A parsed calibration command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationCommand {
    /// Overwrite probe point `index`; omitted components are unset
    SetProbePoint {
        index: i64,
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
    },
    /// Run the numbered step
    RunStep(i64),
    /// Run whichever step comes next
    Advance,
}

impl CalibrationCommand {
    /// Parse one console line. Returns `None` for lines that are not
    /// calibration commands.
    pub fn parse(line: &str) -> Option<Self> {
        let line = remove_comments(line);
        let mut words = line.split_whitespace();
        let head = words.next()?.to_ascii_uppercase();

        match head.as_str() {
            "M557" => Some(Self::set_probe_point(words.filter_map(letter_word))),
            "M1005" => {
                let step = words
                    .filter_map(letter_word)
                    .find(|(letter, _)| *letter == 'S')
                    .map(|(_, value)| value);
                Some(Self::RunStep(step.map_or(0, truncate)))
            }
            "SET_PROBE_POINT" => Some(Self::set_probe_point(
                words.filter_map(named_parameter).map(|(name, value)| {
                    let letter = if name == "INDEX" {
                        'P'
                    } else {
                        name.chars().next().unwrap_or_default()
                    };
                    (letter, value)
                }),
            )),
            "RUN_CALIBRATION_STEP" => {
                let step = words
                    .filter_map(named_parameter)
                    .find(|(name, _)| name == "STEP")
                    .map(|(_, value)| value);
                Some(step.map_or(Self::Advance, |value| Self::RunStep(truncate(value))))
            }
            _ => None,
        }
    }

    fn set_probe_point(words: impl Iterator<Item = (char, f64)>) -> Self {
        let (mut index, mut x, mut y, mut z) = (0, None, None, None);
        for (letter, value) in words {
            match letter {
                'P' => index = truncate(value),
                'X' => x = Some(value),
                'Y' => y = Some(value),
                'Z' => z = Some(value),
                _ => {}
            }
        }
        Self::SetProbePoint { index, x, y, z }
    }
}

/// Blank out `( ... )` and `;` comments
fn remove_comments(line: &str) -> Cow<'_, str> {
    static COMMENT_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = COMMENT_REGEX.get_or_init(|| Regex::new(r"\([^)]*\)?|;.*").ok());
    match regex {
        Some(regex) => regex.replace_all(line, " "),
        None => Cow::Borrowed(line),
    }
}

/// Split `X12.5` into its upper-cased letter and value. A value that does not
/// parse reads as 0.
fn letter_word(word: &str) -> Option<(char, f64)> {
    let mut chars = word.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    Some((letter, parse_number(chars.as_str()).unwrap_or(0.0)))
}

/// Split `NAME=value` into the upper-cased name and value
fn named_parameter(word: &str) -> Option<(String, f64)> {
    let (name, value) = word.split_once('=')?;
    Some((
        name.to_ascii_uppercase(),
        parse_number(value).unwrap_or(0.0),
    ))
}

fn truncate(value: f64) -> i64 {
    // Saturating; NaN becomes 0
    value as i64
}

impl FiveAxisCalibration {
    /// Execute a parsed command
    pub fn handle_command(&mut self, command: CalibrationCommand) -> Result<()> {
        match command {
            CalibrationCommand::SetProbePoint { index, x, y, z } => {
                let stored = usize::try_from(index)
                    .map_err(|_| CalibrationError::PointIndexOutOfRange { index })
                    .and_then(|slot| self.probe_points_mut().set_point(slot, x, y, z));
                if let Err(e) = stored {
                    tracing::warn!("{}", e);
                    self.reporter.error(e.to_string());
                }
                Ok(())
            }
            CalibrationCommand::RunStep(step) => match u8::try_from(step) {
                Ok(step) => self.run_step_number(step),
                Err(_) => {
                    tracing::debug!("Unknown calibration step {}, ignoring", step);
                    Ok(())
                }
            },
            CalibrationCommand::Advance => self.advance().map(|_| ()),
        }
    }

    /// Parse and execute one console line.
    ///
    /// Returns `Ok(false)` when the line is not a calibration command.
    pub fn handle_line(&mut self, line: &str) -> Result<bool> {
        match CalibrationCommand::parse(line) {
            Some(command) => {
                self.handle_command(command)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
