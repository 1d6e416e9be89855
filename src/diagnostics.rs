use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and how to fix it,
/// aimed at the textbook author rather than at us.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::DuplicateWidgetId { id } => render_duplicate_widget_id(id),
        Error::InvalidRangeBound { filename, value } => render_invalid_range_bound(filename, *value),
        Error::InvalidWidgetId { id } => render_invalid_widget_id(id),
        Error::WidgetParse { chapter, line, reason } => {
            render_widget_parse(&chapter.display().to_string(), *line, reason)
        },
        _ => render_generic(e),
    }
}

fn render_duplicate_widget_id(id: &str) -> String {
    format!(
        "\
# Error: Duplicate Widget Id

Widget id `{id}` is used more than once.

## Fix

Ids double as HTML element ids and must be unique across the whole book.
Rename one of the widgets.
"
    )
}

fn render_generic(e: &Error) -> String {
    match e {
        Error::EmptySkeleton { widget } => format!("\
# Error: Empty Skeleton

Widget `{widget}` declares no source files.

## Fix

Add at least one entry under `skeleton:` with a `filename`.
"),

        Error::MissingCheckFilename { test, widget } => format!("\
# Error: File Check Without Filename

Widget `{widget}`, test `{test}` checks a file's content but names no file.

## Fix

Add a `filename:` to the check, or switch its `output` to stdout/stderr.
"),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
        Error::TomlDe(e) => format!("\
# Error: Invalid codebook.toml

{e}
"),
        Error::YamlDe(e) => format!("\
# Error: Invalid YAML

{e}
"),
        // Already handled in render_error, but need exhaustive match.
        _ => format!("\
# Error

{e}
"),
    }
}

fn render_invalid_range_bound(filename: &str, value: i64) -> String {
    format!(
        "\
# Error: Invalid Read-Only Bound

`{value}` is not a valid line index in the readonly spec for `{filename}`.

## Fix

Line indices are 1-based: positive values count from the start of the
file, negative values from the end (`-1` is the last line). Zero, and
negative values reaching past the first line, are invalid.
"
    )
}

fn render_invalid_widget_id(id: &str) -> String {
    format!(
        "\
# Error: Invalid Widget Id

`{id}` is not a valid widget id.

## Fix

Ids may only contain letters, digits, hyphens, and underscores.
"
    )
}

fn render_widget_parse(chapter: &str, line: u32, reason: &str) -> String {
    format!(
        "\
# Error: Widget Block

Could not read the widget at `{chapter}` line {line}:

    {reason}

## Fix

The block between the ```icode fences must be valid YAML with the fields
`id`, `title`, `prompt`, `skeleton`, and `tests`.
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_bound_diagnostic_names_the_file() {
        let e = Error::InvalidRangeBound { filename: "main.c".to_string(), value: 0 };
        let md = render_error(&e);
        assert!(md.contains("main.c"));
        assert!(md.contains("1-based"));
    }

    #[test]
    fn widget_parse_diagnostic_carries_location() {
        let e = Error::WidgetParse {
            chapter: "ch1.md".into(),
            line: 12,
            reason: "missing field `id`".to_string(),
        };
        let md = render_error(&e);
        assert!(md.contains("ch1.md"));
        assert!(md.contains("line 12"));
    }
}
