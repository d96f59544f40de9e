//! Line-oriented presentation surface for the phone book.
//!
//! # Responsibility
//! - Translate typed lines into form edits and controller commands.
//! - Render the contact table, the form and error messages.
//! - Ask for delete confirmation on the same input stream.
//!
//! # Invariants
//! - Every controller error is printed as a `warning:` line; the loop goes on.
//! - Field values are taken verbatim from the rest of the line.

use phonebook_core::{
    Command, CommandOutcome, Contact, ContactField, ContactId, ContactRepository,
    EditController, EditMode,
};
use std::io::{self, BufRead, Write};

const PROMPT: &str = "phonebook> ";
const CONFIRM_PROMPT: &str = "Are you sure you want to delete this contact? [y/N] ";

const HELP_TEXT: &str = "\
commands:
  name|phone|email|address [text]   set a form field (no text clears it)
  add                               save the form as a new contact
  select <id>                       load a contact into the form for editing
  update                            save the form over the selected contact
  delete <id>                       delete a contact (asks for confirmation)
  clear                             empty the form and return to new mode
  list [--json]                     show all contacts
  show                              show the form and current mode
  help                              show this text
  quit                              leave the phone book";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Empty,
    SetField(ContactField, String),
    Run(Command),
    List { json: bool },
    Show,
    Help,
    Quit,
}

/// Parses one input line.
pub fn parse_line(line: &str) -> Result<ShellInput, String> {
    let line = line.trim_end_matches(['\n', '\r']).trim_start();
    if line.trim().is_empty() {
        return Ok(ShellInput::Empty);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest),
        None => (line, ""),
    };
    let keyword = keyword.to_ascii_lowercase();

    if let Some(field) = ContactField::parse(&keyword) {
        return Ok(ShellInput::SetField(field, rest.to_string()));
    }

    match keyword.as_str() {
        "add" | "create" => Ok(ShellInput::Run(Command::Create)),
        "update" => Ok(ShellInput::Run(Command::Update)),
        "select" | "edit" => Ok(ShellInput::Run(Command::Select(parse_selection(rest)?))),
        "delete" | "rm" => Ok(ShellInput::Run(Command::Delete(parse_selection(rest)?))),
        "clear" => Ok(ShellInput::Run(Command::Clear)),
        "list" | "ls" => match rest.trim() {
            "" => Ok(ShellInput::List { json: false }),
            "--json" => Ok(ShellInput::List { json: true }),
            other => Err(format!("unknown list option `{other}`")),
        },
        "show" => Ok(ShellInput::Show),
        "help" | "?" => Ok(ShellInput::Help),
        "quit" | "exit" => Ok(ShellInput::Quit),
        other => Err(format!("unknown command `{other}`; type `help`")),
    }
}

fn parse_selection(rest: &str) -> Result<Option<ContactId>, String> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(None);
    }
    rest.parse::<ContactId>()
        .map(Some)
        .map_err(|_| format!("invalid contact id `{rest}`"))
}

/// Interactive loop over an edit controller.
pub struct Shell<R: ContactRepository, I: BufRead, O: Write> {
    editor: EditController<R>,
    input: I,
    output: O,
}

impl<R: ContactRepository, I: BufRead, O: Write> Shell<R, I, O> {
    pub fn new(editor: EditController<R>, input: I, output: O) -> Self {
        Self {
            editor,
            input,
            output,
        }
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.print_listing()?;
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(());
            }

            match parse_line(&line) {
                Ok(ShellInput::Quit) => return Ok(()),
                Ok(input) => self.handle(input)?,
                Err(message) => writeln!(self.output, "warning: {message}")?,
            }
        }
    }

    fn handle(&mut self, input: ShellInput) -> io::Result<()> {
        match input {
            ShellInput::Empty | ShellInput::Quit => Ok(()),
            ShellInput::SetField(field, value) => {
                self.editor.set_field(field, value);
                Ok(())
            }
            ShellInput::Run(command) => self.run_command(command),
            ShellInput::List { json: false } => self.print_listing(),
            ShellInput::List { json: true } => self.print_json(),
            ShellInput::Show => self.print_form(),
            ShellInput::Help => writeln!(self.output, "{HELP_TEXT}"),
        }
    }

    fn run_command(&mut self, command: Command) -> io::Result<()> {
        let Self {
            editor,
            input,
            output,
        } = self;
        let mut prompt_error = None;
        let mut confirm = |_: ContactId| match ask_confirmation(&mut *input, &mut *output) {
            Ok(answer) => answer,
            Err(err) => {
                prompt_error = Some(err);
                false
            }
        };

        let result = editor.dispatch(command, &mut confirm);
        if let Some(err) = prompt_error {
            return Err(err);
        }

        match result {
            Ok(report) => {
                writeln!(output, "{}", describe(&report.outcome))?;
                match report.contacts {
                    Ok(_) if matches!(report.outcome, CommandOutcome::Selected(_)) => Ok(()),
                    Ok(contacts) => write_table(output, &contacts),
                    Err(err) => writeln!(output, "warning: contact list unavailable: {err}"),
                }
            }
            Err(err) => writeln!(output, "warning: {err}"),
        }
    }

    fn print_listing(&mut self) -> io::Result<()> {
        match self.editor.list_all() {
            Ok(contacts) => write_table(&mut self.output, &contacts),
            Err(err) => writeln!(self.output, "warning: {err}"),
        }
    }

    fn print_json(&mut self) -> io::Result<()> {
        let contacts = match self.editor.list_all() {
            Ok(contacts) => contacts,
            Err(err) => return writeln!(self.output, "warning: {err}"),
        };
        let json = serde_json::to_string_pretty(&contacts).map_err(io::Error::other)?;
        writeln!(self.output, "{json}")
    }

    fn print_form(&mut self) -> io::Result<()> {
        let mode = match self.editor.mode() {
            EditMode::New => "new".to_string(),
            EditMode::Editing(id) => format!("editing #{id}"),
        };
        let form = self.editor.form();
        writeln!(self.output, "mode:    {mode}")?;
        writeln!(self.output, "name:    {}", form.name)?;
        writeln!(self.output, "phone:   {}", form.phone)?;
        writeln!(self.output, "email:   {}", form.email)?;
        writeln!(self.output, "address: {}", form.address)
    }
}

fn ask_confirmation(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    write!(output, "{CONFIRM_PROMPT}")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn describe(outcome: &CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Created(contact) => format!("Contact added (#{}).", contact.id),
        CommandOutcome::Updated(contact) => format!("Contact #{} updated.", contact.id),
        CommandOutcome::Deleted(id) => format!("Contact #{id} deleted."),
        CommandOutcome::DeleteDeclined => "Delete cancelled.".to_string(),
        CommandOutcome::Selected(contact) => {
            format!("Editing #{} {}; use `update` to save.", contact.id, contact.name)
        }
        CommandOutcome::Cleared => "Form cleared.".to_string(),
    }
}

fn write_table(output: &mut impl Write, contacts: &[Contact]) -> io::Result<()> {
    if contacts.is_empty() {
        return writeln!(output, "(no contacts)");
    }
    writeln!(
        output,
        "{:>4}  {:<20}  {:<15}  {:<25}  {}",
        "ID", "Full Name", "Phone Number", "Email", "Address"
    )?;
    for contact in contacts {
        writeln!(
            output,
            "{:>4}  {:<20}  {:<15}  {:<25}  {}",
            contact.id,
            contact.name,
            contact.phone,
            contact.email.as_deref().unwrap_or(""),
            contact.address.as_deref().unwrap_or("")
        )?;
    }
    Ok(())
}
