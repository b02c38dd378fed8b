//! Line-oriented command scripts.
//!
//! One command per line; blank lines and text after `#` are ignored.
//!
//! ```text
//! select 1 1      # click a board cell
//! hover 2 1       # move the pointer, `hover none` leaves the board
//! bench 0         # click a bench slot
//! attack | skill  # pick from the action menu
//! cancel | wait | end
//! reroll | buy 0 | advance
//! tick 300        # advance time in milliseconds
//! settle          # run pending animations and the enemy phase to completion
//! show            # print the board
//! ```

use std::{num::ParseIntError, time::Duration};

use kitchen_tactics_core::{ActionKind, CellCoord, Command};
use thiserror::Error;

/// Single parsed script instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Command forwarded to the session unchanged.
    Submit(Command),
    /// Buys the card at this position of the current offer.
    Buy(usize),
    /// Runs deferred effects until input unfreezes.
    Settle,
    /// Prints the board.
    Show,
}

/// Instruction together with the line it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ScriptLine {
    pub(crate) line: usize,
    pub(crate) step: Step,
}

/// Failures reported while reading a script.
#[derive(Debug, Error)]
pub(crate) enum ScriptError {
    #[error("line {line}: unknown command `{word}`")]
    UnknownCommand { line: usize, word: String },
    #[error("line {line}: `{command}` expects {expected}")]
    MissingArgument {
        line: usize,
        command: &'static str,
        expected: &'static str,
    },
    #[error("line {line}: unexpected trailing input `{extra}`")]
    TrailingInput { line: usize, extra: String },
    #[error("line {line}: `{value}` is not a valid number")]
    InvalidNumber {
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Parses a whole script, stopping at the first malformed line.
pub(crate) fn parse(source: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }
        let step = parse_line(line, text)?;
        lines.push(ScriptLine { line, step });
    }
    Ok(lines)
}

fn parse_line(line: usize, text: &str) -> Result<Step, ScriptError> {
    let mut words = text.split_whitespace();
    let Some(word) = words.next() else {
        return Err(ScriptError::UnknownCommand {
            line,
            word: String::new(),
        });
    };

    let step = match word.to_ascii_lowercase().as_str() {
        "select" => Step::Submit(Command::SelectCell {
            cell: parse_cell(line, "select", &mut words)?,
        }),
        "hover" => {
            let cell = match words.clone().next() {
                Some("none") => {
                    let _ = words.next();
                    None
                }
                _ => Some(parse_cell(line, "hover", &mut words)?),
            };
            Step::Submit(Command::HoverCell { cell })
        }
        "bench" => Step::Submit(Command::ClickBenchSlot {
            index: parse_number(line, "bench", "a slot index", &mut words)?,
        }),
        "attack" => Step::Submit(Command::ChooseAction {
            action: ActionKind::Attack,
        }),
        "skill" => Step::Submit(Command::ChooseAction {
            action: ActionKind::Skill,
        }),
        "cancel" => Step::Submit(Command::Cancel),
        "wait" => Step::Submit(Command::Wait),
        "end" => Step::Submit(Command::EndTurn),
        "reroll" => Step::Submit(Command::RerollShop),
        "buy" => Step::Buy(parse_number(line, "buy", "an offer index", &mut words)?),
        "advance" => Step::Submit(Command::AdvanceBattle),
        "tick" => Step::Submit(Command::Tick {
            dt: Duration::from_millis(parse_number(line, "tick", "milliseconds", &mut words)?),
        }),
        "settle" => Step::Settle,
        "show" => Step::Show,
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                word: word.to_owned(),
            })
        }
    };

    let extra: Vec<&str> = words.collect();
    if !extra.is_empty() {
        return Err(ScriptError::TrailingInput {
            line,
            extra: extra.join(" "),
        });
    }
    Ok(step)
}

fn parse_cell<'a>(
    line: usize,
    command: &'static str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<CellCoord, ScriptError> {
    let column = parse_number(line, command, "a column and a row", words)?;
    let row = parse_number(line, command, "a column and a row", words)?;
    Ok(CellCoord::new(column, row))
}

fn parse_number<'a, T>(
    line: usize,
    command: &'static str,
    expected: &'static str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<T, ScriptError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    let value = words.next().ok_or(ScriptError::MissingArgument {
        line,
        command,
        expected,
    })?;
    value.parse().map_err(|source| ScriptError::InvalidNumber {
        line,
        value: value.to_owned(),
        source,
    })
}
