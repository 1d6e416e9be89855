use std::path::{Path, PathBuf};

use crate::error::Error;

/// Book configuration loaded from `codebook.toml`.
/// Include/exclude patterns are path prefixes applied to chapter files.
pub struct Config {
    exclude: Vec<String>,
    include: Vec<String>,
    out: PathBuf,
}

/// Raw TOML structure for `codebook.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct CodebookToml {
    #[serde(default)]
    exclude: Vec<String>,
    #[serde(default)]
    include: Vec<String>,
    #[serde(default = "default_out")]
    out: PathBuf,
}

fn default_out() -> PathBuf {
    return PathBuf::from("_book");
}

impl Config {
    /// Load config from `codebook.toml` in the given book root.
    /// Returns defaults if the file doesn't exist. Returns an error if
    /// the file exists but is malformed — never silently falls back to
    /// defaults when the author wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join("codebook.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::defaults()),
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: CodebookToml = toml::from_str(&content)?;
        return Ok(Self {
            exclude: raw.exclude,
            include: raw.include,
            out: raw.out,
        });
    }

    /// Default config: every markdown file is a chapter, output to `_book`.
    fn defaults() -> Self {
        return Self {
            exclude: Vec::new(),
            include: Vec::new(),
            out: default_out(),
        };
    }

    /// Check whether a markdown file path is a chapter.
    ///
    /// A path is included if no include patterns are set, or if it starts
    /// with at least one include pattern. An included path is then
    /// excluded if it starts with any exclude pattern or sits inside the
    /// output directory.
    pub fn is_chapter(&self, relative_path: &str) -> bool {
        if Path::new(relative_path).starts_with(&self.out) {
            return false;
        }

        let included = self.include.is_empty()
            || self.include.iter().any(|p| return relative_path.starts_with(p.as_str()));
        if !included {
            return false;
        }

        return !self.exclude.iter().any(|p| return relative_path.starts_with(p.as_str()));
    }

    /// The output directory, relative to the book root.
    pub fn out_dir(&self) -> &Path {
        return &self.out;
    }
}
