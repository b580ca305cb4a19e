//! # Terminal Wizard
//!
//! Line-oriented adapter between a terminal and the core [`Navigator`].
//!
//! Each input line is one command. The adapter translates commands into
//! navigator calls and prints the resulting view: the visible step, the
//! progress bar, and finally the rendered assessment.
//!
//! ## Commands
//!
//! | Command | Effect |
//! |---------|--------|
//! | `next` | advance to the next step |
//! | `prev` | go back one step |
//! | `pick <field> <option...>` | select an option of a choice field |
//! | `toggle <field> [option...]` | flip a multi-select token or a consent box |
//! | `text <field> <value...>` | set a text field |
//! | `submit` | score the answers from the last input step |
//! | `show` | print the current step again |
//! | `help` | list commands |
//! | `quit` | leave without submitting |

use std::io::{BufRead, Write};
use vantage_core::{
    Advance, Assessment, AssessmentError, FULL_WIDTH_PPM, Field, FieldInput, FieldKind, FieldName,
    Navigator, Submission, Token, ViewModel,
};

/// Width of the text progress bar in characters.
const BAR_WIDTH: u32 = 20;

const HELP: &str = "\
Commands:
  next                      go to the next step
  prev                      go back one step
  pick <field> <option>     select an option
  toggle <field> [option]   flip a checkbox
  text <field> <value...>   enter text
  submit                    finish and see your results
  show                      show the current step again
  help                      show this help
  quit                      leave without submitting";

// =============================================================================
// COMMANDS
// =============================================================================

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Pick { field: FieldName, option: Token },
    Toggle { field: FieldName, token: Option<Token> },
    Text { field: FieldName, value: String },
    Submit,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parse an input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        // Everything after the field name is the value, so options and
        // text may contain spaces.
        let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let value = value.trim();

        let command = match verb.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "next" | "n" => Command::Next,
            "prev" | "p" | "back" => Command::Prev,
            "submit" => Command::Submit,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "pick" => {
                if field.is_empty() || value.is_empty() {
                    return Err("usage: pick <field> <option>".to_string());
                }
                Command::Pick {
                    field: FieldName::new(field),
                    option: Token::new(value),
                }
            }
            "toggle" => {
                if field.is_empty() {
                    return Err("usage: toggle <field> [option]".to_string());
                }
                Command::Toggle {
                    field: FieldName::new(field),
                    token: (!value.is_empty()).then(|| Token::new(value)),
                }
            }
            "text" => {
                if field.is_empty() {
                    return Err("usage: text <field> <value...>".to_string());
                }
                Command::Text {
                    field: FieldName::new(field),
                    value: value.to_string(),
                }
            }
            other => return Err(format!("unknown command '{}', try 'help'", other)),
        };
        Ok(Some(command))
    }
}

// =============================================================================
// WIZARD
// =============================================================================

/// Whether the session should keep reading input.
enum Flow {
    Continue,
    Finished(Assessment),
    Quit,
}

/// Drives a navigator from a line reader and prints to a writer.
pub struct Wizard<R, W> {
    navigator: Navigator,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Wizard<R, W> {
    /// Create a wizard over the given navigator and streams.
    pub fn new(navigator: Navigator, input: R, output: W) -> Self {
        Self {
            navigator,
            input,
            output,
        }
    }

    /// The navigator being driven.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Run until submission, `quit`, or end of input.
    ///
    /// Returns the assessment if the questionnaire was submitted.
    pub fn run(&mut self) -> Result<Option<Assessment>, AssessmentError> {
        let title = self.navigator.questionnaire().title.clone();
        self.say(&title)?;
        self.say("Type 'help' for commands.")?;
        self.print_step()?;

        let mut line = String::new();
        loop {
            self.prompt()?;
            line.clear();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|e| AssessmentError::IoError(format!("Cannot read input: {}", e)))?;
            if read == 0 {
                tracing::debug!("input closed before submission");
                return Ok(None);
            }

            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    self.say(&message)?;
                    continue;
                }
            };

            match self.execute(command)? {
                Flow::Continue => {}
                Flow::Finished(assessment) => return Ok(Some(assessment)),
                Flow::Quit => return Ok(None),
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<Flow, AssessmentError> {
        match command {
            Command::Next => match self.navigator.advance() {
                Advance::Moved(index) => {
                    tracing::debug!(step = index, "advanced");
                    self.print_step()?;
                }
                Advance::AtEnd => self.say("Already on the last step.")?,
                Advance::Blocked { offending, report } => {
                    self.report_blocked(offending, report)?;
                }
            },
            Command::Prev => {
                if self.navigator.retreat() {
                    tracing::debug!(step = self.navigator.current(), "retreated");
                    self.print_step()?;
                } else {
                    self.say("Already on the first step.")?;
                }
            }
            Command::Pick { field, option } => {
                let result = self
                    .editable(&field)
                    .and_then(|_| self.navigator.select(&field, option));
                self.acknowledge(result)?;
            }
            Command::Toggle { field, token } => {
                let result = self.toggle(&field, token);
                self.acknowledge(result)?;
            }
            Command::Text { field, value } => {
                let result = self
                    .editable(&field)
                    .and_then(|_| self.navigator.set_text(&field, value));
                self.acknowledge(result)?;
            }
            Command::Submit => match self.navigator.finalize() {
                Submission::Completed(assessment) => {
                    tracing::info!(
                        score = assessment.score,
                        category = %assessment.category,
                        "assessment submitted"
                    );
                    self.print_progress()?;
                    self.say("")?;
                    self.say(&assessment.to_plain_text())?;
                    return Ok(Flow::Finished(assessment));
                }
                Submission::Blocked { offending, report } => {
                    self.report_blocked(offending, report)?;
                }
                Submission::NotOnFinalStep { .. } => {
                    self.say("Answers can only be submitted from the last step.")?;
                }
            },
            Command::Show => self.print_step()?,
            Command::Help => self.say(HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Fields can only be edited while their step is showing.
    fn editable(&self, name: &FieldName) -> Result<(), AssessmentError> {
        if self
            .navigator
            .current_step()
            .fields
            .iter()
            .any(|field| &field.name == name)
        {
            Ok(())
        } else if self.navigator.questionnaire().field(name).is_some() {
            Err(AssessmentError::FieldNotOnStep(name.0.clone()))
        } else {
            Err(AssessmentError::UnknownField(name.0.clone()))
        }
    }

    fn toggle(&mut self, name: &FieldName, token: Option<Token>) -> Result<(), AssessmentError> {
        self.editable(name)?;
        let field = self
            .navigator
            .questionnaire()
            .field(name)
            .cloned()
            .ok_or_else(|| AssessmentError::UnknownField(name.0.clone()))?;

        match (&field.kind, token) {
            (FieldKind::BinaryConsent, None) => {
                let checked = matches!(
                    self.navigator.form().input(&field),
                    FieldInput::Checked(true)
                );
                self.navigator.set_checked(name, !checked)
            }
            (FieldKind::MultiSelect { .. }, Some(token)) => {
                self.navigator.toggle(name, token).map(|_| ())
            }
            (FieldKind::MultiSelect { .. }, None) => {
                Err(AssessmentError::MissingOption(name.0.clone()))
            }
            _ => Err(AssessmentError::FieldKindMismatch {
                field: name.0.clone(),
                expected: "checkbox",
            }),
        }
    }

    fn acknowledge(&mut self, result: Result<(), AssessmentError>) -> Result<(), AssessmentError> {
        match result {
            Ok(()) => self.print_step(),
            Err(e) => {
                tracing::debug!(error = %e, "input rejected");
                self.say(&format!("error: {}", e))
            }
        }
    }

    /// Point the user at the field to fix.
    fn report_blocked(
        &mut self,
        offending: Option<FieldName>,
        report: Option<FieldName>,
    ) -> Result<(), AssessmentError> {
        tracing::warn!(
            step = self.navigator.current(),
            offending = ?offending.as_ref().map(FieldName::as_str),
            report = ?report.as_ref().map(FieldName::as_str),
            "step incomplete"
        );
        match report.or(offending) {
            Some(field) => self.say(&format!("Please complete '{}' before continuing.", field)),
            None => self.say("Please complete this step before continuing."),
        }
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    fn print_step(&mut self) -> Result<(), AssessmentError> {
        self.print_progress()?;
        let step = self.navigator.current_step().clone();
        let number = self.navigator.current() + 1;
        let total = self.navigator.step_count();
        self.say(&format!("Step {} of {}: {}", number, total, step.title))?;

        for field in &step.fields {
            let line = describe_field(field, &self.navigator.form().input(field));
            self.say(&line)?;
        }
        if self.navigator.on_results() {
            self.say("(submit from the previous step to see your results)")?;
        }
        Ok(())
    }

    fn print_progress(&mut self) -> Result<(), AssessmentError> {
        let bar = progress_bar(self.navigator.view());
        self.say(&bar)
    }

    fn prompt(&mut self) -> Result<(), AssessmentError> {
        write!(self.output, "> ").map_err(io_error)?;
        self.output.flush().map_err(io_error)
    }

    fn say(&mut self, text: &str) -> Result<(), AssessmentError> {
        writeln!(self.output, "{}", text).map_err(io_error)
    }
}

fn io_error(e: std::io::Error) -> AssessmentError {
    AssessmentError::IoError(format!("Cannot write output: {}", e))
}

/// `[#####...............]  25%`
pub fn progress_bar(view: &ViewModel) -> String {
    let filled = (view.progress_ppm / (FULL_WIDTH_PPM / BAR_WIDTH)).min(BAR_WIDTH) as usize;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH as usize - filled),
        view.percent()
    )
}

/// One line per field: name, marker for required, current value, label.
fn describe_field(field: &Field, input: &FieldInput) -> String {
    let marker = if field.required { "*" } else { "" };
    let value = match (&field.kind, input) {
        (FieldKind::ExclusiveChoice { options }, FieldInput::Choice(selected)) => options
            .iter()
            .map(|option| {
                if selected.as_ref() == Some(option) {
                    format!("({})", option)
                } else {
                    option.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
        (FieldKind::MultiSelect { options }, FieldInput::Tokens(tokens)) => options
            .iter()
            .map(|option| {
                let mark = if tokens.contains(option) { "x" } else { " " };
                format!("[{}] {}", mark, option)
            })
            .collect::<Vec<_>>()
            .join("  "),
        (_, FieldInput::Checked(checked)) => (if *checked { "[x]" } else { "[ ]" }).to_string(),
        (_, FieldInput::Text(text)) => format!("\"{}\"", text),
        _ => String::new(),
    };

    if field.label.is_empty() {
        format!("  {}{}: {}", field.name, marker, value)
    } else {
        format!("  {}{}: {}\n      {}", field.name, marker, value, field.label)
    }
}

// =============================================================================
// TESTS
// =============================================================================
