//! Widget model: the YAML description of one interactive code exercise.
//!
//! Field shapes, defaults, and required fields mirror what authors write
//! inside an `icode` fenced block. Unknown fields are rejected so typos
//! fail the build instead of silently disappearing.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::registry::IdRegistry;
use crate::types::RawRangeSpec;

/// How a check's expected `content` is compared against the output.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    /// Exact text comparison.
    #[default]
    Exact,
    /// `content` is a regular expression.
    Regex,
}

/// Which output a check inspects.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// A file produced by the test commands.
    File,
    /// Standard error of the test commands.
    Stderr,
    /// Standard output of the test commands.
    Stdout,
}

/// One source file of the exercise skeleton.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceFile {
    /// Initial file contents shown to the student.
    #[serde(default)]
    pub data: String,
    /// Tab label, also the name the test commands see.
    pub filename: String,
    /// Hidden files are shipped with the widget but get no tab.
    #[serde(default)]
    pub hidden: bool,
    /// Reference solution. Defaults to `data` when omitted.
    #[serde(default)]
    pub key: Option<String>,
    /// Which lines the editor must keep read-only.
    #[serde(default)]
    pub readonly: Option<RawRangeSpec>,
}

impl SourceFile {
    /// The reference solution, falling back to the initial contents.
    pub fn key(&self) -> &str {
        return self.key.as_deref().unwrap_or(&self.data);
    }
}

/// One grading test: shell commands plus checks on their output.
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TestCase {
    /// Output checks applied after the commands run.
    #[serde(default)]
    pub checks: Vec<TestCheck>,
    /// Commands whose output is checked.
    pub cmds: Vec<String>,
    /// A failing fatal test stops the remaining tests.
    #[serde(default)]
    pub fatal: bool,
    /// Display name in the feedback accordion.
    pub name: String,
    /// Cleanup commands run after `cmds`, output ignored.
    #[serde(default)]
    pub postcmds: Vec<String>,
    /// Setup commands run before `cmds`, output ignored.
    #[serde(default)]
    pub precmds: Vec<String>,
}

/// One expectation on a test's output.
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TestCheck {
    /// Expected content, exact text or a regular expression.
    pub content: String,
    /// File to inspect when `output` is `file`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// How `content` is compared.
    #[serde(default, rename = "type")]
    pub kind: CheckKind,
    /// Which output stream or file the check inspects.
    pub output: OutputKind,
}

/// One interactive code exercise parsed from an `icode` fenced block.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Widget {
    /// Unique id, `[A-Za-z0-9_-]+`, used as the HTML element id.
    pub id: String,
    /// Prompt shown above the editor, written in markdown.
    pub prompt: String,
    /// Source files presented in the editor. At least one.
    pub skeleton: Vec<SourceFile>,
    /// Grading tests run against the student's code.
    pub tests: Vec<TestCase>,
    /// Title shown in the card body.
    pub title: String,
}

impl Widget {
    /// Parse a widget description from YAML.
    ///
    /// # Errors
    ///
    /// Returns `Error::YamlDe` when the YAML is malformed, has the wrong
    /// shape, or carries unknown fields.
    pub fn parse(yaml: &str) -> Result<Self, Error> {
        return Ok(serde_yaml::from_str(yaml)?);
    }

    /// Enforce the invariants serde cannot express, and claim the id.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidWidgetId` or `Error::DuplicateWidgetId`
    /// from the registry, `Error::EmptySkeleton` when no source files are
    /// declared, or `Error::MissingCheckFilename` for a file-output check
    /// without a filename.
    pub fn validate(&self, registry: &mut IdRegistry) -> Result<(), Error> {
        registry.claim(&self.id)?;

        if self.skeleton.is_empty() {
            return Err(Error::EmptySkeleton { widget: self.id.clone() });
        }

        for test in &self.tests {
            for check in &test.checks {
                if matches!(check.output, OutputKind::File) && check.filename.is_none() {
                    return Err(Error::MissingCheckFilename {
                        test: test.name.clone(),
                        widget: self.id.clone(),
                    });
                }
            }
        }

        return Ok(());
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::types::{RawRangeItem, RawRangeSpec};

    const MINIMAL: &str = "\
id: ex-1
title: Example
prompt: Edit the file.
skeleton:
  - filename: main.c
tests: []
";

    #[test]
    fn parses_minimal_widget_with_defaults() {
        let widget = Widget::parse(MINIMAL).unwrap();
        assert_eq!(widget.id, "ex-1");
        let file = &widget.skeleton[0];
        assert_eq!(file.data, "");
        assert!(!file.hidden);
        assert!(file.readonly.is_none());
        assert_eq!(file.key(), "");
    }

    #[test]
    fn key_defaults_to_data() {
        let yaml = "\
id: ex-1
title: Example
prompt: p
skeleton:
  - filename: main.c
    data: \"int x;\\n\"
tests: []
";
        let widget = Widget::parse(yaml).unwrap();
        assert_eq!(widget.skeleton[0].key(), "int x;\n");
    }

    #[test]
    fn readonly_accepts_mixed_items() {
        let yaml = "\
id: ex-1
title: Example
prompt: p
skeleton:
  - filename: main.c
    readonly:
      - 1
      - from: 3
        to: -1
tests: []
";
        let widget = Widget::parse(yaml).unwrap();
        let Some(RawRangeSpec::ItemList(items)) = &widget.skeleton[0].readonly else {
            panic!("expected item list");
        };
        assert_eq!(items[0], RawRangeItem::Line(1));
        assert_eq!(items[1].bounds(), (3, -1));
    }

    #[test]
    fn readonly_span_defaults_cover_whole_file() {
        let yaml = "\
id: ex-1
title: Example
prompt: p
skeleton:
  - filename: main.c
    readonly:
      - from: 2
tests: []
";
        let widget = Widget::parse(yaml).unwrap();
        let Some(RawRangeSpec::ItemList(items)) = &widget.skeleton[0].readonly else {
            panic!("expected item list");
        };
        // Omitted `to` defaults to the last line.
        assert_eq!(items[0].bounds(), (2, -1));
    }

    #[test]
    fn readonly_accepts_except_wrapper() {
        let yaml = "\
id: ex-1
title: Example
prompt: p
skeleton:
  - filename: main.c
    readonly:
      except:
        - from: 2
          to: 4
tests: []
";
        let widget = Widget::parse(yaml).unwrap();
        assert!(matches!(
            widget.skeleton[0].readonly,
            Some(RawRangeSpec::Negated(_))
        ));
    }

    #[test]
    fn readonly_accepts_boolean() {
        let yaml = "\
id: ex-1
title: Example
prompt: p
skeleton:
  - filename: main.c
    readonly: true
tests: []
";
        let widget = Widget::parse(yaml).unwrap();
        assert_eq!(
            widget.skeleton[0].readonly,
            Some(RawRangeSpec::AllOrNothing(true))
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let yaml = "\
id: ex-1
title: Example
prompt: p
skeleton:
  - filename: main.c
    readonly_lines: [1]
tests: []
";
        assert!(Widget::parse(yaml).is_err());
    }

    #[test]
    fn empty_skeleton_fails_validation() {
        let yaml = "\
id: ex-1
title: Example
prompt: p
skeleton: []
tests: []
";
        let widget = Widget::parse(yaml).unwrap();
        let mut registry = IdRegistry::new();
        let err = widget.validate(&mut registry).unwrap_err();
        assert!(matches!(err, Error::EmptySkeleton { .. }));
    }

    #[test]
    fn file_check_requires_filename() {
        let yaml = "\
id: ex-1
title: Example
prompt: p
skeleton:
  - filename: main.c
tests:
  - name: writes output
    cmds: [\"./run\"]
    checks:
      - output: file
        content: done
";
        let widget = Widget::parse(yaml).unwrap();
        let mut registry = IdRegistry::new();
        let err = widget.validate(&mut registry).unwrap_err();
        assert!(matches!(err, Error::MissingCheckFilename { .. }));
    }

    #[test]
    fn check_kind_defaults_to_exact() {
        let yaml = "\
id: ex-1
title: Example
prompt: p
skeleton:
  - filename: main.c
tests:
  - name: says hi
    cmds: [\"./run\"]
    checks:
      - output: stdout
        content: hi
";
        let widget = Widget::parse(yaml).unwrap();
        assert_eq!(widget.tests[0].checks[0].kind, CheckKind::Exact);
    }
}
