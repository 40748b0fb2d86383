//! Static character sets and word list used by the text generators.

/// Lowercase ASCII letters (charset key `l`).
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Uppercase ASCII letters (charset key `u`).
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Decimal digits (charset key `n`).
pub const NUMBERS: &str = "0123456789";

/// Punctuation and symbols (charset key `s`).
pub const SPECIAL: &str = "!@#$%^&*()-_=+[]{};:,.<>/?~";

/// Characters for one charset key, empty for unknown keys.
pub fn charset(key: char) -> &'static str {
    match key {
        'l' => LOWERCASE,
        'u' => UPPERCASE,
        'n' => NUMBERS,
        's' => SPECIAL,
        _ => "",
    }
}

/// Lorem ipsum vocabulary. Every entry is lowercase ASCII and at least two
/// characters long.
pub const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in", "reprehenderit",
    "voluptate", "velit", "esse", "cillum", "eu", "fugiat", "nulla", "pariatur", "excepteur",
    "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui", "officia",
    "deserunt", "mollit", "anim", "id", "est", "laborum", "curabitur", "pretium", "tincidunt",
    "lacus", "gravida", "orci", "mauris", "finibus", "vitae", "sapien", "vestibulum", "ante",
    "primis", "faucibus", "luctus", "ultrices", "posuere", "cubilia", "nunc", "pellentesque",
    "habitant", "morbi", "tristique", "senectus", "netus", "malesuada", "fames", "turpis",
    "egestas", "integer", "feugiat", "scelerisque", "varius", "viverra", "accumsan", "lectus",
];
