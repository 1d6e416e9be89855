/// Crate-level error types for codebook diagnostics.
use std::path::PathBuf;

/// All errors in codebook carry enough context to produce a useful
/// diagnostic without a debugger. Each variant names the chapter, widget,
/// or file the author has to fix.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two widgets claimed the same id within one build.
    #[error("duplicate widget id: `{id}`")]
    DuplicateWidgetId {
        /// The id that was claimed twice.
        id: String,
    },

    /// A widget declared no skeleton files.
    #[error("widget `{widget}` has an empty skeleton")]
    EmptySkeleton {
        /// Id of the offending widget.
        widget: String,
    },

    /// A read-only bound of 0, or one resolving below the first line.
    #[error("invalid read-only bound {value} in `{filename}`")]
    InvalidRangeBound {
        /// Skeleton file whose readonly spec is invalid.
        filename: String,
        /// The raw bound as written by the author.
        value: i64,
    },

    /// A widget id with characters outside `[A-Za-z0-9_-]`.
    #[error("invalid widget id: `{id}`")]
    InvalidWidgetId {
        /// The rejected id.
        id: String,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// A check on file output did not name the file to inspect.
    #[error("widget `{widget}`, test `{test}`: file check needs a filename")]
    MissingCheckFilename {
        /// Name of the test containing the check.
        test: String,
        /// Id of the offending widget.
        widget: String,
    },

    /// TOML deserialization of the config file failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// Widget YAML failed to parse, with chapter and block-line context.
    #[error("{}:{line}: widget block: {reason}", chapter.display())]
    WidgetParse {
        /// Chapter containing the broken widget block.
        chapter: PathBuf,
        /// One-based line of the opening fence.
        line: u32,
        /// Description of the YAML failure.
        reason: String,
    },

    /// YAML deserialization failed.
    #[error("yaml deserialize: {0}")]
    YamlDe(
        /// The wrapped YAML deserialization error.
        #[from]
        serde_yaml::Error,
    ),
}
