//! HTML fragment generation for one widget.
//!
//! The fragment is a self-contained card: header, prompt, tabbed source
//! files, run controls, per-test feedback accordions, and a footer naming
//! the widget id. Everything the client-side runner needs travels in
//! `data-` attributes.

use std::fmt::Write as _;

use pulldown_cmark::{Options, Parser, html};

use crate::encode;
use crate::error::Error;
use crate::readonly;
use crate::widget::Widget;

/// Render the tabbed source-file area, one textarea per skeleton file.
///
/// Hidden files are shipped as panes without a tab link. The first
/// visible file's tab starts active.
///
/// # Errors
///
/// Returns `Error::InvalidRangeBound` when a file's readonly spec cannot
/// be resolved against its contents.
fn activity(out: &mut String, widget: &Widget) -> Result<(), Error> {
    out.push_str("<div class=\"p-0 m-0 card-body icode-srcfiles\">");

    out.push_str("<ul class=\"nav nav-tabs\" data-bs-tabs=\"tabs\">");
    let mut first_visible = true;
    for (index, file) in widget.skeleton.iter().enumerate() {
        if file.hidden {
            continue;
        }
        let link_class = if first_visible { "nav-link active" } else { "nav-link" };
        first_visible = false;
        let _ = write!(
            out,
            "<li class=\"nav-item\"><a class=\"{link_class}\" data-bs-toggle=\"tab\" \
             data-bs-target=\"#{}-f{index}\" type=\"button\" role=\"tab\">{}</a></li>",
            attr_escape(&widget.id),
            text_escape(&file.filename),
        );
    }
    out.push_str("</ul>");

    out.push_str("<div class=\"tab-content\">");
    let mut first_visible = true;
    for (index, file) in widget.skeleton.iter().enumerate() {
        let pane_class = if !file.hidden && first_visible { "tab-pane active" } else { "tab-pane" };
        if !file.hidden {
            first_visible = false;
        }
        let _ = write!(
            out,
            "<div id=\"{}-f{index}\" class=\"{pane_class}\">",
            attr_escape(&widget.id)
        );
        let _ = write!(
            out,
            "<textarea class=\"icode-srcfile\" data-filename=\"{}\"",
            attr_escape(&file.filename)
        );
        if let Some(spec) = &file.readonly {
            let max_line = readonly::line_count(&file.data);
            let resolved = readonly::resolve(&file.filename, spec, max_line)?;
            if let Some(value) = encode::readonly_attr(&resolved) {
                let _ = write!(out, " data-readonly=\"{value}\"");
            }
        }
        let _ = write!(out, ">{}</textarea></div>", text_escape(&file.data));
    }
    out.push_str("</div></div>");

    return Ok(());
}

/// Escape a string for a double-quoted attribute value.
fn attr_escape(raw: &str) -> String {
    return html_escape::encode_double_quoted_attribute(raw).into_owned();
}

/// Render the run button and the feedback toggle.
fn controls(out: &mut String, widget: &Widget) {
    out.push_str("<hr class=\"m-0\"><div class=\"m-0 card-body icode-controls\">");
    out.push_str("<button class=\"btn btn-primary icode-run\">Run</button>");
    let _ = write!(
        out,
        "<button class=\"icode-tests-toggle collapsed\" type=\"button\" \
         data-bs-toggle=\"collapse\" data-bs-target=\"#{}-fb\"></button>",
        attr_escape(&widget.id)
    );
    out.push_str("</div>");
}

/// Render the title and the markdown prompt.
fn description(out: &mut String, widget: &Widget) {
    out.push_str("<div class=\"card-body\">");
    let _ = write!(out, "<h5 class=\"card-title\">{}</h5>", text_escape(&widget.title));
    let _ = write!(
        out,
        "<div class=\"card-text icode-prompt\">{}</div>",
        markdown_to_html(&widget.prompt)
    );
    out.push_str("</div>");
}

/// Render the collapsed feedback area: one accordion item per test, each
/// carrying its parameters for the client-side runner.
fn feedback(out: &mut String, widget: &Widget) {
    let id = attr_escape(&widget.id);
    let _ = write!(
        out,
        "<div class=\"collapse\" id=\"{id}-fb\"><div class=\"p-0 card-body icode-feedback\">\
         <hr class=\"m-0\"><div class=\"accordion accordion-flush\">"
    );

    for (index, test) in widget.tests.iter().enumerate() {
        let _ = write!(
            out,
            "<div class=\"accordion-item icode-test\" data-params=\"{}\">",
            encode::attr(test)
        );
        let _ = write!(
            out,
            "<h2 class=\"accordion-header\" id=\"{id}-h{index}\">\
             <button class=\"accordion-button collapsed\" type=\"button\" disabled \
             data-bs-toggle=\"collapse\" data-bs-target=\"#{id}-t{index}\" \
             aria-expanded=\"false\" aria-controls=\"{id}-t{index}\">\
             <span>{}</span></button></h2>",
            text_escape(&test.name)
        );
        let _ = write!(
            out,
            "<div class=\"accordion-collapse collapse\" id=\"{id}-t{index}\" \
             aria-labelledby=\"{id}-h{index}\">\
             <div class=\"accordion-body\" id=\"{id}-t{index}-fb\"></div></div></div>"
        );
    }

    out.push_str("</div></div></div>");
}

/// Render the footer naming the widget id.
fn footer(out: &mut String, widget: &Widget) {
    let _ = write!(
        out,
        "<div class=\"card-footer\"><div class=\"text-end text-secondary small\">{}</div></div>",
        text_escape(&widget.id)
    );
}

/// Render the small activity label in the card header.
fn header(out: &mut String) {
    out.push_str(
        "<div class=\"card-header\"><div class=\"text-secondary small\">Code exercise</div></div>",
    );
}

/// Convert a markdown prompt to HTML.
fn markdown_to_html(markdown: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(markdown, Options::empty()));
    return out;
}

/// Render one widget into a self-contained HTML fragment.
///
/// # Errors
///
/// Returns `Error::InvalidRangeBound` when a skeleton file carries an
/// unresolvable read-only specification.
pub fn widget(widget: &Widget) -> Result<String, Error> {
    let mut out = String::new();
    let _ = write!(
        out,
        "<div id=\"{}\" class=\"card my-3 icode-container\">",
        attr_escape(&widget.id)
    );
    header(&mut out);
    description(&mut out, widget);
    activity(&mut out, widget)?;
    controls(&mut out, widget);
    feedback(&mut out, widget);
    footer(&mut out, widget);
    out.push_str("</div>");
    return Ok(out);
}

/// Escape a string for HTML text content.
fn text_escape(raw: &str) -> String {
    return html_escape::encode_text(raw).into_owned();
}
