//! Output formatting for directory query results

use crate::directory::{Column, DirectoryStats, RowIssue, SchoolRecord};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print search results, one school per line:
/// `udise_code:school_name  district, block`
pub fn print_search_results(
    records: &[&SchoolRecord],
    query: &str,
    choice: ColorChoice,
) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);

    for record in records {
        write_highlighted(&mut stdout, &record.udise_code, query, Color::Green)?;
        write!(stdout, ":")?;
        write_highlighted(&mut stdout, &record.school_name, query, Color::Magenta)?;
        write!(stdout, "  ")?;
        write_highlighted(&mut stdout, &record.district, query, Color::Cyan)?;
        writeln!(stdout, ", {}", record.block)?;
    }

    Ok(())
}

/// Print every column of a single record
pub fn print_record(record: &SchoolRecord, choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);

    for column in Column::ALL {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(stdout, "{:<12}", column.name())?;
        stdout.reset()?;
        writeln!(stdout, " {}", record.field(column))?;
    }

    Ok(())
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value).map_err(io::Error::other)?;
    writeln!(handle)
}

pub fn print_stats(stats: &DirectoryStats, choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);

    let mut row = |label: &str, value: usize| -> io::Result<()> {
        write!(stdout, "  {:<16}", label)?;
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(stdout, "{}", value)?;
        stdout.reset()
    };

    row("Schools:", stats.records)?;
    row("Distinct codes:", stats.distinct_codes)?;
    row("Districts:", stats.districts)?;
    row("Blocks:", stats.blocks)?;

    if !stats.by_management.is_empty() {
        writeln!(stdout, "  Management:")?;
        for (management, count) in &stats.by_management {
            let label = if management.is_empty() { "(none)" } else { management };
            writeln!(stdout, "    {:<24} {}", label, count)?;
        }
    }

    Ok(())
}

/// Print row problems to stderr
pub fn print_issues(issues: &[RowIssue], choice: ColorChoice) -> io::Result<()> {
    let mut stderr = StandardStream::stderr(choice);

    for issue in issues {
        stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(stderr, "line {}", issue.line)?;
        stderr.reset()?;
        writeln!(stderr, ": {}", issue.kind)?;
    }

    Ok(())
}

/// Print a non-fatal warning to stderr
pub fn print_warning(message: &str, choice: ColorChoice) -> io::Result<()> {
    let mut stderr = StandardStream::stderr(choice);
    stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
    write!(stderr, "Warning:")?;
    stderr.reset()?;
    writeln!(stderr, " {}", message)
}

/// Write `text` in `color`, with the first case-insensitive occurrence of
/// `query` highlighted
fn write_highlighted(
    stdout: &mut StandardStream,
    text: &str,
    query: &str,
    color: Color,
) -> io::Result<()> {
    let mut base = ColorSpec::new();
    base.set_fg(Some(color));

    match find_ignore_case(text, query) {
        Some((start, end)) => {
            stdout.set_color(&base)?;
            write!(stdout, "{}", &text[..start])?;
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(stdout, "{}", &text[start..end])?;
            stdout.set_color(&base)?;
            write!(stdout, "{}", &text[end..])?;
        }
        None => {
            stdout.set_color(&base)?;
            write!(stdout, "{}", text)?;
        }
    }

    stdout.reset()
}

/// Byte range of the first case-insensitive match of `needle` in `text`.
///
/// Lower-casing can change byte lengths outside ASCII; the range is only
/// returned when it maps back onto char boundaries of the original text.
pub fn find_ignore_case(text: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }

    let lower_text = text.to_lowercase();
    if lower_text.len() != text.len() {
        return None;
    }

    let start = lower_text.find(&needle.to_lowercase())?;
    let end = start + needle.to_lowercase().len();

    if text.is_char_boundary(start) && text.is_char_boundary(end) {
        Some((start, end))
    } else {
        None
    }
}
