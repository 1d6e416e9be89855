//! Chapter compilation: markdown with embedded widget blocks to HTML.

use std::path::Path;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};

use crate::error::Error;
use crate::registry::IdRegistry;
use crate::render;
use crate::widget::Widget;

/// Fence language tag marking a widget block.
const WIDGET_TAG: &str = "icode";

/// Compile one markdown chapter to an HTML fragment.
///
/// Fenced code blocks tagged `icode` hold widget YAML; each one is
/// parsed, validated against the registry, and replaced by its rendered
/// fragment. All other markdown converts to HTML untouched.
///
/// # Errors
///
/// Returns `Error::WidgetParse` with the chapter path and the 1-based
/// line of the opening fence when a block's YAML is malformed, and
/// propagates validation and range-resolution errors.
pub fn compile(
    chapter: &Path,
    content: &str,
    registry: &mut IdRegistry,
) -> Result<String, Error> {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;

    let mut events: Vec<Event<'_>> = Vec::new();
    // While inside a widget block: the fence line and the YAML so far.
    let mut pending: Option<(u32, String)> = None;

    for (event, span) in Parser::new_ext(content, options).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref lang)))
                if is_widget_lang(lang) =>
            {
                pending = Some((line_of_offset(content, span.start), String::new()));
            },
            Event::Text(ref text) if pending.is_some() => {
                if let Some((_, yaml)) = pending.as_mut() {
                    yaml.push_str(text);
                }
            },
            Event::End(TagEnd::CodeBlock) if pending.is_some() => {
                let Some((line, yaml)) = pending.take() else {
                    continue;
                };
                let fragment = compile_widget(chapter, line, &yaml, registry)?;
                events.push(Event::Html(fragment.into()));
            },
            _ => events.push(event),
        }
    }

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    return Ok(out);
}

/// Parse, validate, and render one widget block.
fn compile_widget(
    chapter: &Path,
    line: u32,
    yaml: &str,
    registry: &mut IdRegistry,
) -> Result<String, Error> {
    let widget = Widget::parse(yaml).map_err(|e| {
        return Error::WidgetParse {
            chapter: chapter.to_path_buf(),
            line,
            reason: e.to_string(),
        };
    })?;
    widget.validate(registry)?;
    return render::widget(&widget);
}

/// A fence info string opens a widget block when its first word is the
/// widget tag (authors may append attributes after it).
fn is_widget_lang(lang: &str) -> bool {
    return lang.split_whitespace().next() == Some(WIDGET_TAG);
}

/// One-based line number of a byte offset.
fn line_of_offset(content: &str, offset: usize) -> u32 {
    let newlines = content
        .get(..offset)
        .map_or(0, |prefix| return prefix.matches('\n').count());
    return u32::try_from(newlines).unwrap_or(u32::MAX).saturating_add(1);
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use std::path::Path;

    use super::*;

    const WIDGET_BLOCK: &str = "\
```icode
id: ex-1
title: Example
prompt: p
skeleton:
  - filename: main.c
tests: []
```
";

    #[test]
    fn prose_passes_through() {
        let mut registry = IdRegistry::new();
        let html =
            compile(Path::new("ch.md"), "# Title\n\nSome *prose*.\n", &mut registry).unwrap();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>prose</em>"));
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn widget_block_is_replaced_by_fragment() {
        let mut registry = IdRegistry::new();
        let content = format!("intro\n\n{WIDGET_BLOCK}\nafter\n");
        let html = compile(Path::new("ch.md"), &content, &mut registry).unwrap();
        assert!(html.contains("id=\"ex-1\""));
        assert!(!html.contains("<code"), "{html}");
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn ordinary_code_blocks_are_untouched() {
        let mut registry = IdRegistry::new();
        let content = "```c\nint x;\n```\n";
        let html = compile(Path::new("ch.md"), content, &mut registry).unwrap();
        assert!(html.contains("<code"));
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn yaml_error_reports_fence_line() {
        let mut registry = IdRegistry::new();
        let content = "line one\n\n```icode\n: not yaml {{{\n```\n";
        let err = compile(Path::new("ch.md"), content, &mut registry).unwrap_err();
        let Error::WidgetParse { line, chapter, .. } = err else {
            panic!("expected WidgetParse, got {err}");
        };
        assert_eq!(line, 3);
        assert_eq!(chapter, Path::new("ch.md"));
    }

    #[test]
    fn duplicate_ids_across_blocks_fail() {
        let mut registry = IdRegistry::new();
        let content = format!("{WIDGET_BLOCK}\n{WIDGET_BLOCK}");
        let err = compile(Path::new("ch.md"), &content, &mut registry).unwrap_err();
        assert!(matches!(err, Error::DuplicateWidgetId { .. }));
    }
}
