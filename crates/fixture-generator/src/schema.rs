//! YAML template files.
//!
//! A template file holds one root template plus optional named overrides.
//! Untagged YAML becomes literals, arrays and nested objects; YAML tags pick
//! a generator:
//!
//! ```yaml
//! version: 1
//! seed: 42
//! template:
//!   id: !sequence
//!   email: !pattern "user_{index}@example.com"
//!   name: !word { capitalize: true }
//!   age: !int { min: 18, max: 80 }
//!   joined: !date { time_ago: 30d }
//!   role: !one_of [admin, member]
//!   tags: !array_of { value: !word, count: 3 }
//! overrides:
//!   admin:
//!     role: admin
//! ```

use crate::duration::{parse_duration, DurationError};
use crate::generators::helpers::{array_of, saturating_i64, sequence_with};
use crate::generators::pattern::{render_pattern, validate_pattern};
use crate::generators::timestamp::parse_timestamp;
use crate::generators::{
    BooleanOptions, DateOptions, FloatOptions, IntOptions, ParagraphOptions, StringOptions,
    WordOptions,
};
use crate::source::RandomSource;
use chrono::Utc;
use fixture_core::{build, BuildError, Builder, Producer, Template, TemplateMap, Value};
use serde::Deserialize;
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value as YamlValue};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Template file format version understood by this crate.
pub const CURRENT_VERSION: u32 = 1;

/// Tags accepted in template files.
pub const GENERATOR_TAGS: &[&str] = &[
    "string", "word", "paragraph", "int", "float", "boolean", "date", "uuid", "sequence",
    "pattern", "one_of", "array_of",
];

// ============================================================================
// Error Types
// ============================================================================

/// Error type for template file operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading template file
    #[error("Failed to read template file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// File declares a version this crate does not understand
    #[error("Unsupported template file version: {0}")]
    UnsupportedVersion(u32),

    /// Tag does not name a generator
    #[error("Unknown generator: !{0}")]
    UnknownGenerator(String),

    /// Tag body could not be turned into generator options
    #[error("Invalid options for !{tag}: {message}")]
    InvalidGenerator { tag: String, message: String },

    /// Mapping key is not a string
    #[error("Object keys must be strings, got {0}")]
    InvalidKey(String),

    /// `!datetime` literal could not be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Duration option could not be parsed
    #[error(transparent)]
    InvalidDuration(#[from] DurationError),

    /// Named override not present in the file
    #[error("Override not found: {0}")]
    OverrideNotFound(String),

    /// Compiled template rejected by the builder
    #[error(transparent)]
    Build(#[from] BuildError),
}

// ============================================================================
// Generator Configuration
// ============================================================================

/// Generator configuration carried by a YAML tag.
///
/// The tag name becomes the `type` discriminant and the tag body supplies the
/// remaining fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorConfig {
    /// Random characters
    String(StringOptions),

    /// Random lorem ipsum words
    Word(WordOptions),

    /// Random paragraphs
    Paragraph(ParagraphOptions),

    /// Random integers in a range
    Int(IntOptions),

    /// Random floats in a range
    Float(FloatOptions),

    /// Random booleans
    Boolean(BooleanOptions),

    /// Random timestamps around the time the file is compiled
    Date {
        /// Window start before now (seconds or "30d"-style string)
        #[serde(default)]
        time_ago: Option<YamlValue>,
        /// Window end after now; may be negative
        #[serde(default)]
        from_now: Option<YamlValue>,
    },

    /// Random UUIDs (v4)
    Uuid,

    /// Sequential integers, or a formatted string per step
    Sequence {
        /// First value
        #[serde(default = "default_start")]
        start: u64,
        /// Optional pattern; `{index}` receives the sequence value
        #[serde(default)]
        format: Option<String>,
    },

    /// Pattern strings with placeholders
    Pattern {
        /// Pattern string (supports {index}, {uuid}, {rand:N})
        pattern: String,
    },

    /// Random selection from a list of templates
    #[serde(skip_deserializing)]
    OneOf {
        /// Candidate templates
        values: Vec<YamlValue>,
    },

    /// Repeated template in an array
    #[serde(skip_deserializing)]
    ArrayOf {
        /// Element template
        value: YamlValue,
        /// Number of elements
        count: usize,
    },
}

fn default_start() -> u64 {
    1
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

impl GeneratorConfig {
    /// Parse a tagged YAML node into a generator configuration.
    pub fn from_tagged(tagged: &TaggedValue) -> Result<Self, SchemaError> {
        let tag = tag_name(tagged);
        match tag.as_str() {
            // Bodies hold nested templates, which may carry their own tags
            "one_of" => return one_of_config(&tagged.value),
            "array_of" => return array_of_config(&tagged.value),
            t if !GENERATOR_TAGS.contains(&t) => return Err(SchemaError::UnknownGenerator(tag)),
            _ => {}
        }

        let body = generator_body(&tag, &tagged.value)?;
        serde_yaml::from_value(YamlValue::Mapping(body))
            .map_err(|e| invalid_generator(&tag, e.to_string()))
    }

    /// Turn this configuration into a producer drawing from `source`.
    pub fn into_producer(self, source: &RandomSource) -> Result<Producer, SchemaError> {
        let producer = match self {
            Self::String(opts) => source.string(opts),
            Self::Word(opts) => source.word(opts),
            Self::Paragraph(opts) => source.paragraph(opts),
            Self::Int(opts) => source.int(opts),
            Self::Float(opts) => {
                opts.validate().map_err(|message| invalid_generator("float", message))?;
                source.float(opts)
            }
            Self::Boolean(opts) => source.boolean(opts),
            Self::Date { time_ago, from_now } => {
                let defaults = DateOptions::default();
                let opts = DateOptions {
                    time_ago: duration_option(time_ago.as_ref())?.unwrap_or(defaults.time_ago),
                    from_now: duration_option(from_now.as_ref())?.unwrap_or(defaults.from_now),
                };
                if opts.window(Utc::now()).is_none() {
                    let shown = |v: &Option<YamlValue>| v.as_ref().map(describe).unwrap_or_default();
                    return Err(DurationError {
                        input: format!(
                            "time_ago: {}, from_now: {}",
                            shown(&time_ago),
                            shown(&from_now)
                        ),
                        reason: "date window is out of range".to_string(),
                    }
                    .into());
                }
                source.date(opts)
            }
            Self::Uuid => source.uuid(),
            Self::Sequence { start, format } => {
                if i64::try_from(start).is_err() {
                    return Err(invalid_generator(
                        "sequence",
                        format!("start must be at most {}, got {start}", i64::MAX),
                    ));
                }
                // Counter values begin at 1
                let value_at = move |i: u64| start.saturating_add(i - 1);
                match format {
                    Some(format) => {
                        validate_pattern(&format)
                            .map_err(|message| invalid_generator("sequence", message))?;
                        let source = source.clone();
                        sequence_with(move |i| {
                            Value::String(
                                source.with_rng(|rng| render_pattern(&format, rng, value_at(i))),
                            )
                        })
                    }
                    None => sequence_with(move |i| Value::Int(saturating_i64(value_at(i)))),
                }
            }
            Self::Pattern { pattern } => {
                validate_pattern(&pattern)
                    .map_err(|message| invalid_generator("pattern", message))?;
                source.pattern(pattern)
            }
            Self::OneOf { values } => {
                let candidates = values
                    .iter()
                    .map(|v| compile_template(v, source))
                    .collect::<Result<Vec<_>, _>>()?;
                source.one_of(candidates)
            }
            Self::ArrayOf { value, count } => array_of(compile_template(&value, source)?, count),
        };

        Ok(producer)
    }
}

fn invalid_generator(tag: &str, message: impl Into<String>) -> SchemaError {
    SchemaError::InvalidGenerator {
        tag: tag.to_string(),
        message: message.into(),
    }
}

fn tag_name(tagged: &TaggedValue) -> String {
    tagged.tag.to_string().trim_start_matches('!').to_string()
}

/// Normalise a tag body into the option mapping for `tag`.
fn generator_body(tag: &str, body: &YamlValue) -> Result<Mapping, SchemaError> {
    let mut mapping = match (tag, body) {
        (_, YamlValue::Mapping(m)) => m.clone(),
        (_, YamlValue::Null) => Mapping::new(),
        (_, YamlValue::String(s)) if s.is_empty() => Mapping::new(),
        ("pattern", YamlValue::String(s)) => {
            let mut m = Mapping::new();
            m.insert("pattern".into(), YamlValue::String(s.clone()));
            m
        }
        ("sequence", YamlValue::String(s)) => {
            let mut m = Mapping::new();
            m.insert("format".into(), YamlValue::String(s.clone()));
            m
        }
        (_, other) => {
            return Err(SchemaError::InvalidGenerator {
                tag: tag.to_string(),
                message: format!("unexpected body {}", describe(other)),
            });
        }
    };

    mapping.insert("type".into(), YamlValue::String(tag.to_string()));
    Ok(mapping)
}

fn one_of_config(body: &YamlValue) -> Result<GeneratorConfig, SchemaError> {
    let values = match body {
        YamlValue::Sequence(values) => Some(values),
        YamlValue::Mapping(m) => m.get("values").and_then(YamlValue::as_sequence),
        _ => None,
    };

    values
        .map(|values| GeneratorConfig::OneOf {
            values: values.clone(),
        })
        .ok_or_else(|| SchemaError::InvalidGenerator {
            tag: "one_of".to_string(),
            message: "expected a list of values".to_string(),
        })
}

fn array_of_config(body: &YamlValue) -> Result<GeneratorConfig, SchemaError> {
    let invalid = |message: &str| SchemaError::InvalidGenerator {
        tag: "array_of".to_string(),
        message: message.to_string(),
    };

    let mapping = body
        .as_mapping()
        .ok_or_else(|| invalid("expected a mapping with `value` and `count`"))?;
    let value = mapping
        .get("value")
        .cloned()
        .ok_or_else(|| invalid("missing field `value`"))?;
    let count = match mapping.get("count") {
        None => 1,
        Some(count) => count
            .as_u64()
            .and_then(|c| usize::try_from(c).ok())
            .ok_or_else(|| invalid("`count` must be a non-negative integer"))?,
    };

    Ok(GeneratorConfig::ArrayOf { value, count })
}

fn duration_option(
    value: Option<&YamlValue>,
) -> Result<Option<chrono::Duration>, SchemaError> {
    let Some(value) = value else {
        return Ok(None);
    };

    let text = match value {
        YamlValue::Number(n) => n.to_string(),
        YamlValue::String(s) => s.clone(),
        other => describe(other),
    };
    Ok(Some(parse_duration(&text)?))
}

fn describe(value: &YamlValue) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|_| format!("{value:?}"))
}

// ============================================================================
// Template Compilation
// ============================================================================

/// Compile a YAML node into a template, wiring generators to `source`.
pub fn compile_template(yaml: &YamlValue, source: &RandomSource) -> Result<Template, SchemaError> {
    match yaml {
        YamlValue::Null => Ok(Template::Literal(Value::Null)),
        YamlValue::Bool(b) => Ok(Template::from(*b)),
        YamlValue::Number(n) => Ok(Template::Literal(if let Some(i) = n.as_i64() {
            Value::Int(i)
        } else if let Some(f) = n.as_f64() {
            Value::Float(f)
        } else {
            Value::String(n.to_string())
        })),
        YamlValue::String(s) => Ok(Template::from(s.as_str())),
        YamlValue::Sequence(items) => items
            .iter()
            .map(|item| compile_template(item, source))
            .collect::<Result<Vec<_>, _>>()
            .map(Template::Array),
        YamlValue::Mapping(map) => compile_mapping(map, source).map(Template::Object),
        YamlValue::Tagged(tagged) if tag_name(tagged) == "datetime" => {
            let text = tagged.value.as_str().unwrap_or_default();
            parse_timestamp(text)
                .map(|dt| Template::Literal(Value::DateTime(dt)))
                .ok_or_else(|| SchemaError::InvalidTimestamp(describe(&tagged.value)))
        }
        YamlValue::Tagged(tagged) => {
            let config = GeneratorConfig::from_tagged(tagged)?;
            config.into_producer(source).map(Template::Producer)
        }
    }
}

fn compile_mapping(map: &Mapping, source: &RandomSource) -> Result<TemplateMap, SchemaError> {
    map.iter()
        .map(|(k, v)| {
            let key = k
                .as_str()
                .ok_or_else(|| SchemaError::InvalidKey(describe(k)))?;
            Ok((key.to_string(), compile_template(v, source)?))
        })
        .collect()
}

// ============================================================================
// Template File
// ============================================================================

/// A parsed template file.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateFile {
    /// Format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Seed for deterministic generation
    #[serde(default)]
    pub seed: Option<u64>,

    /// Root template (must be a mapping)
    pub template: YamlValue,

    /// Named override templates
    #[serde(default)]
    pub overrides: BTreeMap<String, YamlValue>,
}

impl TemplateFile {
    /// Parse a template file from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let file: Self = serde_yaml::from_str(yaml)?;
        if file.version != CURRENT_VERSION {
            return Err(SchemaError::UnsupportedVersion(file.version));
        }
        Ok(file)
    }

    /// Load a template file from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Random source for this file; `seed` takes precedence over the file's seed.
    pub fn random_source(&self, seed: Option<u64>) -> RandomSource {
        RandomSource::from_seed(seed.or(self.seed))
    }

    /// Compile the root template.
    pub fn compile(&self, source: &RandomSource) -> Result<Template, SchemaError> {
        compile_template(&self.template, source)
    }

    /// Compile one named override.
    pub fn compile_override(
        &self,
        name: &str,
        source: &RandomSource,
    ) -> Result<Template, SchemaError> {
        let yaml = self
            .overrides
            .get(name)
            .ok_or_else(|| SchemaError::OverrideNotFound(name.to_string()))?;
        compile_template(yaml, source)
    }

    /// Compile the root template and validate it as a builder.
    pub fn builder(&self, source: &RandomSource) -> Result<Builder, SchemaError> {
        let builder = build(self.compile(source)?)?;
        tracing::debug!(
            fields = builder.template().len(),
            overrides = self.overrides.len(),
            seeded = source.is_seeded(),
            "compiled template file"
        );
        Ok(builder)
    }

    /// Names of all overrides, sorted.
    pub fn override_names(&self) -> Vec<&str> {
        self.overrides.keys().map(String::as_str).collect()
    }
}
