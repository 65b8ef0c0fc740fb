//! Static per-language highlighting profiles and filename matching.

use crate::SyntaxFlags;

/// Read-only description of one supported language: filename patterns,
/// keyword sets in two priority classes, comment markers, and feature
/// flags. Selected once per open document; never mutated.
#[derive(Debug)]
pub struct SyntaxProfile {
    pub file_type: &'static str,
    /// Patterns starting with `.` match the file extension; anything else
    /// matches as a substring of the file name.
    pub file_match: &'static [&'static str],
    pub keywords_primary: &'static [&'static str],
    pub keywords_secondary: &'static [&'static str],
    pub singleline_comment: Option<&'static str>,
    pub multiline_comment: Option<(&'static str, &'static str)>,
    pub flags: SyntaxFlags,
}

pub static PROFILES: &[SyntaxProfile] = &[
    SyntaxProfile {
        file_type: "c",
        file_match: &[".c", ".h", ".cpp"],
        keywords_primary: &[
            "switch", "if", "while", "for", "break", "continue", "return", "else", "struct",
            "union", "typedef", "static", "enum", "class", "case",
        ],
        keywords_secondary: &[
            "int", "long", "double", "float", "char", "unsigned", "signed", "void",
        ],
        singleline_comment: Some("//"),
        multiline_comment: Some(("/*", "*/")),
        flags: SyntaxFlags::NUMBERS.union(SyntaxFlags::STRINGS),
    },
    SyntaxProfile {
        file_type: "rust",
        file_match: &[".rs"],
        keywords_primary: &[
            "fn", "let", "mut", "if", "else", "match", "while", "for", "loop", "return",
            "struct", "enum", "impl", "trait", "use", "mod", "pub", "const", "static", "break",
            "continue", "ref", "where", "unsafe", "in", "as",
        ],
        keywords_secondary: &[
            "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "f32", "f64", "usize",
            "isize", "bool", "char", "str",
        ],
        singleline_comment: Some("//"),
        multiline_comment: Some(("/*", "*/")),
        flags: SyntaxFlags::NUMBERS.union(SyntaxFlags::STRINGS),
    },
];

/// Pick the profile for a file name, or `None` when no pattern matches
/// (the highlighter then classifies everything `Normal`).
pub fn select(file_name: &str) -> Option<&'static SyntaxProfile> {
    let extension = file_name.rfind('.').map(|dot| &file_name[dot..]);
    PROFILES.iter().find(|profile| {
        profile.file_match.iter().any(|pattern| {
            if pattern.starts_with('.') {
                extension == Some(*pattern)
            } else {
                file_name.contains(pattern)
            }
        })
    })
}
