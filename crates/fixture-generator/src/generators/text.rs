//! Text generators: random strings, words and paragraphs.

use crate::data::{charset, WORDS};
use crate::generators::numeric::generate_int_range;
use crate::source::RandomSource;
use fixture_core::{Producer, Value};
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::Deserialize;

/// Options for [`RandomSource::string`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StringOptions {
    /// Charset keys: `l` lowercase, `u` uppercase, `n` digits, `s` specials
    pub charset: String,
    /// Extra characters added to the pool
    pub chars: String,
    /// Characters per string
    pub length: usize,
    pub prefix: String,
    pub postfix: String,
    /// Number of strings joined with `separator`
    pub multiply: usize,
    pub separator: String,
}

impl Default for StringOptions {
    fn default() -> Self {
        Self {
            charset: "ln".to_string(),
            chars: String::new(),
            length: 5,
            prefix: String::new(),
            postfix: String::new(),
            multiply: 1,
            separator: " ".to_string(),
        }
    }
}

/// Options for [`RandomSource::word`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WordOptions {
    pub uppercase: bool,
    pub capitalize: bool,
    pub prefix: String,
    pub postfix: String,
    pub multiply: usize,
    pub separator: String,
}

impl Default for WordOptions {
    fn default() -> Self {
        Self {
            uppercase: false,
            capitalize: false,
            prefix: String::new(),
            postfix: String::new(),
            multiply: 1,
            separator: " ".to_string(),
        }
    }
}

/// Options for [`RandomSource::paragraph`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParagraphOptions {
    pub sentences_min: i64,
    pub sentences_max: i64,
    pub words_min: i64,
    pub words_max: i64,
    /// Number of paragraphs joined with `separator`
    pub multiply: usize,
    pub separator: String,
}

impl Default for ParagraphOptions {
    fn default() -> Self {
        Self {
            sentences_min: 5,
            sentences_max: 20,
            words_min: 5,
            words_max: 20,
            multiply: 1,
            separator: "\n\n".to_string(),
        }
    }
}

/// Uppercase the first character of `word`.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn repeat_join(count: usize, separator: &str, mut piece: impl FnMut() -> String) -> String {
    (0..count).map(|_| piece()).collect::<Vec<_>>().join(separator)
}

fn choose_word(rng: &mut dyn RngCore) -> &'static str {
    WORDS.choose(rng).copied().unwrap_or("lorem")
}

fn generate_sentence(rng: &mut dyn RngCore, words_min: i64, words_max: i64) -> String {
    let count = generate_int_range(rng, words_min, words_max).max(0) as usize;
    let words = repeat_join(count, " ", || choose_word(rng).to_string());
    capitalize(&format!("{words}."))
}

fn generate_paragraph(rng: &mut dyn RngCore, opts: &ParagraphOptions) -> String {
    let count = generate_int_range(rng, opts.sentences_min, opts.sentences_max).max(0) as usize;
    repeat_join(count, " ", || {
        generate_sentence(rng, opts.words_min, opts.words_max)
    })
}

impl RandomSource {
    /// Random strings drawn from a character pool.
    pub fn string(&self, opts: StringOptions) -> Producer {
        let pool: Vec<char> = opts
            .charset
            .chars()
            .flat_map(|key| charset(key).chars())
            .chain(opts.chars.chars())
            .collect();
        let source = self.clone();

        Producer::new(move || {
            let value = source.with_rng(|rng| {
                repeat_join(opts.multiply, &opts.separator, || {
                    let body: String = (0..opts.length)
                        .filter_map(|_| pool.choose(rng).copied())
                        .collect();
                    format!("{}{}{}", opts.prefix, body, opts.postfix)
                })
            });
            Value::String(value)
        })
    }

    /// Random lorem ipsum words.
    pub fn word(&self, opts: WordOptions) -> Producer {
        let source = self.clone();

        Producer::new(move || {
            let value = source.with_rng(|rng| {
                repeat_join(opts.multiply, &opts.separator, || {
                    let mut word = choose_word(rng).to_string();
                    if opts.uppercase {
                        word = word.to_uppercase();
                    }
                    if opts.capitalize {
                        word = capitalize(&word);
                    }
                    format!("{}{}{}", opts.prefix, word, opts.postfix)
                })
            });
            Value::String(value)
        })
    }

    /// Random paragraphs of capitalised, full-stop terminated sentences.
    pub fn paragraph(&self, opts: ParagraphOptions) -> Producer {
        let source = self.clone();

        Producer::new(move || {
            let value = source.with_rng(|rng| {
                repeat_join(opts.multiply, &opts.separator, || {
                    generate_paragraph(rng, &opts)
                })
            });
            Value::String(value)
        })
    }
}
