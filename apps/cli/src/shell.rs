//! # Interactive Shell
//!
//! Line-oriented front end over the session.
//!
//! ## Shell Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   pricedesk> add Widget, 100, 10, 60                                   │
//! │        │                                                                │
//! │        ├── parse_line ──► ShellCommand::Add("Widget, 100, 10, 60")     │
//! │        ├── execute    ──► commands::product::add_product               │
//! │        └── print      ──► "Added row 0: Widget"                         │
//! │                                                                         │
//! │   Errors are printed and the loop continues.                           │
//! │   `quit` or end of input ends the session.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::commands::{export, options, product, upload};
use crate::error::CliError;
use crate::state::{AppConfig, Session};

const PROMPT: &str = "pricedesk> ";

/// Help text for the `help` command.
pub const HELP: &str = "\
Commands:
  add <name>, <retail>, <discount %>, <cost>[, <stock>]   add a product
  edit <row> <name>, <retail>, <discount %>, <cost>[, <stock>]
                                       change a product (empty fields are kept)
  upload <file.csv>                    append products from a CSV file
  delete <row> [<row> ...]             remove products by row number
  vat [on|off]                         show or set VAT (20%)
  show                                 show the product table
  entries                              show where and when each row was added
  summary                              show totals
  export [<file.csv>]                  save results as CSV
  clear                                remove every product
  help                                 show this help
  quit                                 leave

Upload columns: Product Name, Retail Price, Discount %, Cost Price[, Stock Qty]";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add(String),
    Edit { index: usize, fields: String },
    Upload(PathBuf),
    Delete(Vec<usize>),
    Vat(Option<String>),
    Show,
    Entries,
    Summary,
    Export(Option<PathBuf>),
    Clear,
    Help,
    Quit,
}

/// What the loop does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Reply(String),
    Quit,
}

/// Parses one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, CliError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "add" => ShellCommand::Add(rest.to_string()),
        "edit" => {
            // The row number ends at the first comma or space: `edit 0,,15`.
            let (row, fields) = rest
                .split_once(|c: char| c == ',' || c.is_whitespace())
                .unwrap_or((rest, ""));
            let fields = fields.trim();
            if fields.is_empty() {
                return Err(CliError::usage("usage: edit <row> <name>, <retail>, <discount %>, <cost>[, <stock>]"));
            }
            ShellCommand::Edit {
                index: parse_row(row)?,
                fields: fields.to_string(),
            }
        }
        "upload" => ShellCommand::Upload(required_path(rest, "upload <file.csv>")?),
        "delete" | "del" | "rm" => {
            let indices = rest
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(parse_row)
                .collect::<Result<Vec<_>, _>>()?;
            if indices.is_empty() {
                return Err(CliError::usage("usage: delete <row> [<row> ...]"));
            }
            ShellCommand::Delete(indices)
        }
        "vat" => ShellCommand::Vat((!rest.is_empty()).then(|| rest.to_string())),
        "show" | "list" | "ls" => ShellCommand::Show,
        "entries" => ShellCommand::Entries,
        "summary" | "totals" => ShellCommand::Summary,
        "export" | "save" => {
            ShellCommand::Export((!rest.is_empty()).then(|| PathBuf::from(unquote(rest))))
        }
        "clear" => ShellCommand::Clear,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => {
            return Err(CliError::usage(format!(
                "Unknown command '{}'. Type `help` for the list of commands.",
                other
            )))
        }
    };

    Ok(Some(command))
}

fn parse_row(raw: &str) -> Result<usize, CliError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| CliError::usage(format!("'{}' is not a row number", raw.trim())))
}

fn required_path(rest: &str, usage: &str) -> Result<PathBuf, CliError> {
    if rest.is_empty() {
        return Err(CliError::usage(format!("usage: {}", usage)));
    }
    Ok(PathBuf::from(unquote(rest)))
}

fn unquote(raw: &str) -> &str {
    raw.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw)
}

/// Runs one command against the session.
pub fn execute(
    command: ShellCommand,
    session: &mut Session,
    config: &AppConfig,
) -> Result<Flow, CliError> {
    let reply = match command {
        ShellCommand::Add(fields) => product::add_product(session, &fields)?,
        ShellCommand::Edit { index, fields } => product::edit_product(session, index, &fields)?,
        ShellCommand::Upload(path) => upload::upload_file(session, &path)?,
        ShellCommand::Delete(indices) => product::delete_products(session, &indices)?,
        ShellCommand::Vat(arg) => options::set_vat(session, arg.as_deref())?,
        ShellCommand::Show => product::show_products(session, config),
        ShellCommand::Entries => product::show_entries(session),
        ShellCommand::Summary => product::show_summary(session, config),
        ShellCommand::Export(path) => export::export_results(session, config, path.as_deref())?,
        ShellCommand::Clear => product::clear_products(session),
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Quit => return Ok(Flow::Quit),
    };
    Ok(Flow::Reply(reply))
}

/// Reads commands until `quit` or end of input.
pub fn run_shell<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    session: &mut Session,
    config: &AppConfig,
) -> io::Result<()> {
    writeln!(output, "PriceDesk discount calculator. Type `help` for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => {
                writeln!(output)?;
                break;
            }
        };

        let outcome = parse_line(&line)
            .and_then(|parsed| parsed.map(|cmd| execute(cmd, session, config)).transpose());

        match outcome {
            Ok(None) => {}
            Ok(Some(Flow::Reply(text))) => writeln!(output, "{}", text)?,
            Ok(Some(Flow::Quit)) => break,
            Err(err) => {
                debug!(code = ?err.code, message = %err.message, "command failed");
                writeln!(output, "error: {}", err)?;
            }
        }
    }

    debug!(products = session.list.len(), "shell closed");
    Ok(())
}
