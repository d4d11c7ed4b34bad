//! Supported target languages
//!
//! Each language the code-generation endpoint can emit is described by a
//! [`LanguageProfile`]: its canonical identifier, short aliases, the default
//! file name a reference is saved to, and the comment dialect the generator
//! wraps the `Options:` header in.

/// How a language wraps the metadata header of a generated reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentDialect {
    /// Block comment, e.g. `/* Options: ... */`. The header ends at the line
    /// that is exactly `close`.
    Block {
        close: &'static str,
        disabled: &'static str,
    },
    /// Quoted block, e.g. Python's `""" Options: ... """`. The header ends at
    /// the line that is exactly `quote`.
    QuotedBlock {
        quote: &'static str,
        disabled: &'static str,
    },
    /// Every header line carries `prefix`, e.g. VB.NET's `'` or Zig's `///`.
    /// The header ends at the line that is exactly `close`, or at the first
    /// blank line when there is no closing line.
    LinePrefix {
        prefix: &'static str,
        close: Option<&'static str>,
        disabled: &'static str,
    },
}

impl CommentDialect {
    /// Marker that comments out an option the user has not overridden
    pub fn disabled_marker(&self) -> &'static str {
        match self {
            CommentDialect::Block { disabled, .. }
            | CommentDialect::QuotedBlock { disabled, .. }
            | CommentDialect::LinePrefix { disabled, .. } => disabled,
        }
    }
}

const C_STYLE: CommentDialect = CommentDialect::Block {
    close: "*/",
    disabled: "//",
};

/// Static description of one target language
#[derive(Debug, PartialEq, Eq)]
pub struct LanguageProfile {
    /// Canonical identifier, used in `/types/<id>` URLs
    pub id: &'static str,
    pub aliases: &'static [&'static str],
    /// File name a new reference is saved to
    pub default_file: &'static str,
    /// File extension including the leading dot
    pub extension: &'static str,
    pub dialect: CommentDialect,
}

pub static LANGUAGES: &[LanguageProfile] = &[
    LanguageProfile {
        id: "csharp",
        aliases: &["cs"],
        default_file: "dtos.cs",
        extension: ".cs",
        dialect: C_STYLE,
    },
    LanguageProfile {
        id: "typescript",
        aliases: &["ts"],
        default_file: "dtos.ts",
        extension: ".ts",
        dialect: C_STYLE,
    },
    LanguageProfile {
        id: "typescript.d",
        aliases: &["tsd"],
        default_file: "dtos.d.ts",
        extension: ".d.ts",
        dialect: C_STYLE,
    },
    LanguageProfile {
        id: "javascript",
        aliases: &["js", "mjs"],
        default_file: "dtos.mjs",
        extension: ".mjs",
        dialect: C_STYLE,
    },
    LanguageProfile {
        id: "python",
        aliases: &["py"],
        default_file: "dtos.py",
        extension: ".py",
        dialect: CommentDialect::QuotedBlock {
            quote: "\"\"\"",
            disabled: "#",
        },
    },
    LanguageProfile {
        id: "dart",
        aliases: &["da"],
        default_file: "dtos.dart",
        extension: ".dart",
        dialect: C_STYLE,
    },
    LanguageProfile {
        id: "php",
        aliases: &[],
        default_file: "dtos.php",
        extension: ".php",
        dialect: C_STYLE,
    },
    LanguageProfile {
        id: "java",
        aliases: &["ja"],
        default_file: "dtos.java",
        extension: ".java",
        dialect: C_STYLE,
    },
    LanguageProfile {
        id: "kotlin",
        aliases: &["kt"],
        default_file: "dtos.kt",
        extension: ".kt",
        dialect: C_STYLE,
    },
    LanguageProfile {
        id: "swift",
        aliases: &["sw"],
        default_file: "dtos.swift",
        extension: ".swift",
        dialect: C_STYLE,
    },
    LanguageProfile {
        id: "fsharp",
        aliases: &["fs"],
        default_file: "dtos.fs",
        extension: ".fs",
        dialect: CommentDialect::Block {
            close: "*)",
            disabled: "//",
        },
    },
    LanguageProfile {
        id: "vbnet",
        aliases: &["vb"],
        default_file: "dtos.vb",
        extension: ".vb",
        dialect: CommentDialect::LinePrefix {
            prefix: "'",
            close: None,
            disabled: "'",
        },
    },
    LanguageProfile {
        id: "go",
        aliases: &[],
        default_file: "dtos.go",
        extension: ".go",
        dialect: C_STYLE,
    },
    LanguageProfile {
        id: "rust",
        aliases: &["rs"],
        default_file: "dtos.rs",
        extension: ".rs",
        dialect: C_STYLE,
    },
    LanguageProfile {
        id: "ruby",
        aliases: &["rb"],
        default_file: "dtos.rb",
        extension: ".rb",
        dialect: CommentDialect::Block {
            close: "=end",
            disabled: "#",
        },
    },
    LanguageProfile {
        id: "zig",
        aliases: &[],
        default_file: "dtos.zig",
        extension: ".zig",
        dialect: CommentDialect::LinePrefix {
            prefix: "///",
            close: Some("///"),
            disabled: "//",
        },
    },
];

/// Look up a language by canonical identifier only
pub fn find(id: &str) -> Option<&'static LanguageProfile> {
    LANGUAGES.iter().find(|lang| lang.id == id)
}

/// Look up a language by canonical identifier or alias
pub fn from_keyword(keyword: &str) -> Option<&'static LanguageProfile> {
    find(keyword).or_else(|| {
        LANGUAGES
            .iter()
            .find(|lang| lang.aliases.iter().any(|alias| *alias == keyword))
    })
}

/// Find the language whose extension ends `path`
///
/// Longer extensions are tried first so `dtos.d.ts` resolves to
/// `typescript.d` rather than `typescript`.
pub fn from_file_name(path: &str) -> Option<&'static LanguageProfile> {
    let mut candidates: Vec<&'static LanguageProfile> = LANGUAGES
        .iter()
        .filter(|lang| path.ends_with(lang.extension))
        .collect();
    candidates.sort_by_key(|lang| std::cmp::Reverse(lang.extension.len()));
    candidates.into_iter().next()
}
