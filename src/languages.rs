//! Supported editor languages
//!
//! A static registry of every language that has its own editor view. Each
//! entry carries the metadata the rest of the crate needs: route path, the
//! mode the editing widget should use, the download mapping and the sample
//! program shown on a first visit.

/// Metadata for a language with its own editor view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageDef {
    /// Identifier used in routes, storage keys and service requests
    pub id: &'static str,
    /// Human-readable name
    pub display_name: &'static str,
    /// Mode the editing widget highlights with (mongodb edits as javascript)
    pub editor_mode: &'static str,
    /// MIME type used when downloading the buffer
    pub mime_type: &'static str,
    /// File extension (without dot) used when downloading the buffer
    pub extension: &'static str,
    /// Sample program seeded into a fresh session
    pub sample: &'static str,
}

impl LanguageDef {
    /// Route path for this language's editor (e.g. `/python`)
    pub fn path(&self) -> String {
        format!("/{}", self.id)
    }
}

/// Static registry of all supported languages
pub static LANGUAGES: &[LanguageDef] = &[
    LanguageDef {
        id: "python",
        display_name: "Python",
        editor_mode: "python",
        mime_type: "text/x-python",
        extension: "py",
        sample: include_str!("../samples/languages/python.py"),
    },
    LanguageDef {
        id: "javascript",
        display_name: "JavaScript",
        editor_mode: "javascript",
        mime_type: "application/javascript",
        extension: "js",
        sample: include_str!("../samples/languages/javascript.js"),
    },
    LanguageDef {
        id: "c",
        display_name: "C",
        editor_mode: "c",
        mime_type: "text/x-c",
        extension: "c",
        sample: include_str!("../samples/languages/c.c"),
    },
    LanguageDef {
        id: "cpp",
        display_name: "C++",
        editor_mode: "cpp",
        mime_type: "text/x-c++src",
        extension: "cpp",
        sample: include_str!("../samples/languages/cpp.cpp"),
    },
    LanguageDef {
        id: "java",
        display_name: "Java",
        editor_mode: "java",
        mime_type: "text/x-java",
        extension: "java",
        sample: include_str!("../samples/languages/java.java"),
    },
    LanguageDef {
        id: "csharp",
        display_name: "C#",
        editor_mode: "csharp",
        mime_type: "application/x-csharp",
        extension: "cs",
        sample: include_str!("../samples/languages/csharp.cs"),
    },
    LanguageDef {
        id: "go",
        display_name: "Go",
        editor_mode: "go",
        mime_type: "text/x-go",
        extension: "go",
        sample: include_str!("../samples/languages/go.go"),
    },
    LanguageDef {
        id: "rust",
        display_name: "Rust",
        editor_mode: "rust",
        mime_type: "text/x-rust",
        extension: "rs",
        sample: include_str!("../samples/languages/rust.rs"),
    },
    LanguageDef {
        id: "shell",
        display_name: "Shell",
        editor_mode: "shell",
        mime_type: "application/x-sh",
        extension: "sh",
        sample: include_str!("../samples/languages/shell.sh"),
    },
    LanguageDef {
        id: "sql",
        display_name: "SQL",
        editor_mode: "sql",
        mime_type: "application/sql",
        extension: "sql",
        sample: include_str!("../samples/languages/sql.sql"),
    },
    LanguageDef {
        id: "mongodb",
        display_name: "MongoDB",
        editor_mode: "javascript",
        mime_type: "application/javascript",
        extension: "js",
        sample: include_str!("../samples/languages/mongodb.js"),
    },
    LanguageDef {
        id: "swift",
        display_name: "Swift",
        editor_mode: "swift",
        mime_type: "application/x-swift",
        extension: "swift",
        sample: include_str!("../samples/languages/swift.swift"),
    },
    LanguageDef {
        id: "ruby",
        display_name: "Ruby",
        editor_mode: "ruby",
        mime_type: "text/x-ruby",
        extension: "rb",
        sample: include_str!("../samples/languages/ruby.rb"),
    },
    LanguageDef {
        id: "typescript",
        display_name: "TypeScript",
        editor_mode: "typescript",
        mime_type: "application/typescript",
        extension: "ts",
        sample: include_str!("../samples/languages/typescript.ts"),
    },
    LanguageDef {
        id: "dart",
        display_name: "Dart",
        editor_mode: "dart",
        mime_type: "application/dart",
        extension: "dart",
        sample: include_str!("../samples/languages/dart.dart"),
    },
    LanguageDef {
        id: "kotlin",
        display_name: "Kotlin",
        editor_mode: "kotlin",
        mime_type: "application/x-java",
        extension: "kt",
        sample: include_str!("../samples/languages/kotlin.kt"),
    },
    LanguageDef {
        id: "perl",
        display_name: "Perl",
        editor_mode: "perl",
        mime_type: "application/x-perl",
        extension: "pl",
        sample: include_str!("../samples/languages/perl.pl"),
    },
    LanguageDef {
        id: "scala",
        display_name: "Scala",
        editor_mode: "scala",
        mime_type: "application/scala",
        extension: "scala",
        sample: include_str!("../samples/languages/scala.scala"),
    },
    LanguageDef {
        id: "julia",
        display_name: "Julia",
        editor_mode: "julia",
        mime_type: "application/x-julia",
        extension: "jl",
        sample: include_str!("../samples/languages/julia.jl"),
    },
];

/// Look up a language by identifier (exact match)
pub fn find_language(id: &str) -> Option<&'static LanguageDef> {
    LANGUAGES.iter().find(|lang| lang.id == id)
}

/// Sample program for a language, empty for unknown identifiers
pub fn default_sample(id: &str) -> &'static str {
    find_language(id).map(|lang| lang.sample).unwrap_or("")
}

/// Mode the editing widget should use for a language
pub fn editor_mode(id: &str) -> &str {
    find_language(id).map(|lang| lang.editor_mode).unwrap_or(id)
}

/// Window title for a language's editor view (e.g. "Python Editor - Online IDE")
pub fn editor_title(id: &str) -> String {
    let mut chars = id.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("{} Editor - Online IDE", capitalized)
}
