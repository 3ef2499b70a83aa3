use crate::commands::{CmdMessage, MessageLevel};
use crate::error::{FiledictError, Result};
use console::style;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

const MAX_ATTEMPTS: usize = 3;

/// One entry of a selection list. `value` is also accepted as a typed answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The questions the interactive layer can ask.
pub trait Prompter {
    /// Free text answer. Fails with `InputClosed` when input ends.
    fn input(&mut self, message: &str) -> Result<String>;

    /// Index into `choices`, or `None` if nothing valid was chosen.
    /// Fails with `InputClosed` when input ends.
    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<Option<usize>>;

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;

    fn notify(&mut self, message: &CmdMessage) -> Result<()>;
}

/// Line oriented prompter over any reader/writer pair.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, question: &str, hint: &str) -> Result<Option<String>> {
        write!(self.output, "{} {}{} ", style("?").green(), question, hint)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

fn parse_choice(answer: &str, choices: &[Choice]) -> Option<usize> {
    let answer = answer.trim();
    if let Ok(n) = answer.parse::<usize>() {
        if (1..=choices.len()).contains(&n) {
            return Some(n - 1);
        }
    }
    choices.iter().position(|c| c.value == answer)
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn input(&mut self, message: &str) -> Result<String> {
        self.ask(message, "")?.ok_or(FiledictError::InputClosed)
    }

    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<Option<usize>> {
        if choices.is_empty() {
            return Ok(None);
        }

        writeln!(self.output, "{} {}", style("?").green(), message)?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {}", style(i + 1).cyan(), choice.label)?;
        }

        for _ in 0..MAX_ATTEMPTS {
            let Some(answer) = self.ask("Choice", &format!(" [1-{}]", choices.len()))? else {
                return Err(FiledictError::InputClosed);
            };
            if let Some(index) = parse_choice(&answer, choices) {
                return Ok(Some(index));
            }
            writeln!(
                self.output,
                "{}",
                style(format!("Please enter a number between 1 and {}", choices.len())).red()
            )?;
        }
        Ok(None)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { " (Y/n)" } else { " (y/N)" };
        for _ in 0..MAX_ATTEMPTS {
            let Some(answer) = self.ask(message, hint)? else {
                return Ok(default);
            };
            match answer.trim().to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "{}", style("Please answer y or n").red())?,
            }
        }
        Ok(default)
    }

    fn notify(&mut self, message: &CmdMessage) -> Result<()> {
        let styled = match message.level {
            MessageLevel::Info => style(&message.content).dim(),
            MessageLevel::Success => style(&message.content).green(),
            MessageLevel::Warning => style(&message.content).yellow(),
            MessageLevel::Error => style(&message.content).red(),
        };
        writeln!(self.output, "{}", styled)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices() -> Vec<Choice> {
        vec![Choice::new("First (a)", "a"), Choice::new("Second (b)", "b")]
    }

    #[test]
    fn select_accepts_number_or_value() {
        let mut out = Vec::new();
        let mut p = TerminalPrompter::new("2\n".as_bytes(), &mut out);
        assert_eq!(p.select("Pick", &choices()).unwrap(), Some(1));

        let mut p = TerminalPrompter::new("a\n".as_bytes(), &mut out);
        assert_eq!(p.select("Pick", &choices()).unwrap(), Some(0));
    }

    #[test]
    fn select_lists_choices_in_order() {
        let mut out = Vec::new();
        TerminalPrompter::new("1\n".as_bytes(), &mut out)
            .select("Pick", &choices())
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let first = text.find("First (a)").unwrap();
        let second = text.find("Second (b)").unwrap();
        assert!(first < second);
    }

    #[test]
    fn select_retries_then_gives_up() {
        let mut out = Vec::new();
        let mut p = TerminalPrompter::new("9\n\nzzz\n1\n".as_bytes(), &mut out);
        assert_eq!(p.select("Pick", &choices()).unwrap(), None);

        let mut p = TerminalPrompter::new("9\nb\n".as_bytes(), &mut out);
        assert_eq!(p.select("Pick", &choices()).unwrap(), Some(1));
    }

    #[test]
    fn select_on_closed_input_fails_and_no_choices_is_none() {
        let mut out = Vec::new();
        let mut p = TerminalPrompter::new("".as_bytes(), &mut out);
        assert!(matches!(
            p.select("Pick", &choices()),
            Err(FiledictError::InputClosed)
        ));
        assert_eq!(p.select("Pick", &[]).unwrap(), None);
    }

    #[test]
    fn confirm_parses_answers_and_defaults() {
        let mut out = Vec::new();
        let mut p = TerminalPrompter::new("Y\nno\n\nhuh\nyes\n".as_bytes(), &mut out);
        assert!(p.confirm("Sure?", false).unwrap());
        assert!(!p.confirm("Sure?", true).unwrap());
        assert!(p.confirm("Sure?", true).unwrap());
        assert!(p.confirm("Sure?", false).unwrap());
        assert!(!p.confirm("Sure?", false).unwrap());
    }

    #[test]
    fn input_strips_line_ending_and_fails_on_eof() {
        let mut out = Vec::new();
        let mut p = TerminalPrompter::new("  name \r\n".as_bytes(), &mut out);
        assert_eq!(p.input("Name:").unwrap(), "  name ");
        assert!(matches!(p.input("Name:"), Err(FiledictError::InputClosed)));
    }
}
