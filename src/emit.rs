//! JSON output for produced instances.

use fixture_core::{BuildError, Builder, Template, Value};
use std::io::{BufWriter, Write};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Default buffer size for output writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Errors that can occur while emitting instances.
#[derive(Error, Debug)]
pub enum EmitError {
    /// Producing an instance failed.
    #[error("Failed to produce instance {index}: {source}")]
    Build {
        index: u64,
        #[source]
        source: BuildError,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How instances are laid out in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One compact JSON document per line.
    #[default]
    JsonLines,
    /// Indented JSON documents separated by newlines.
    Pretty,
}

/// Metrics from an emit run.
#[derive(Debug, Clone, Default)]
pub struct EmitMetrics {
    /// Number of instances written.
    pub instances_written: u64,
    /// Bytes written to the output.
    pub bytes_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent producing instances.
    pub generation_duration: Duration,
    /// Time spent serializing and writing.
    pub write_duration: Duration,
}

impl EmitMetrics {
    /// Calculate instances per second.
    pub fn instances_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.instances_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Counts bytes passing through to the inner writer.
struct CountingWriter<W> {
    inner: W,
    bytes: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Writes produced instances as JSON.
pub struct InstanceEmitter {
    builder: Builder,
    override_template: Option<Template>,
    format: OutputFormat,
}

impl InstanceEmitter {
    /// Create an emitter for `builder`.
    pub fn new(builder: Builder) -> Self {
        Self {
            builder,
            override_template: None,
            format: OutputFormat::default(),
        }
    }

    /// Apply `template` as an override to every instance.
    pub fn with_override(mut self, template: Template) -> Self {
        self.override_template = Some(template);
        self
    }

    /// Set the output layout.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Produce `count` instances and write them to `output`.
    pub fn emit<W: Write>(&self, output: W, count: u64) -> Result<EmitMetrics, EmitError> {
        let start_time = Instant::now();
        let mut metrics = EmitMetrics::default();

        info!(
            "Generating {} instances ({:?}, override: {})",
            count,
            self.format,
            self.override_template.is_some()
        );

        let mut writer = CountingWriter {
            inner: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, output),
            bytes: 0,
        };

        let mut generation_time = Duration::ZERO;
        let mut write_time = Duration::ZERO;

        for index in 0..count {
            let gen_start = Instant::now();
            let instance = self
                .builder
                .produce_opt(self.override_template.clone())
                .map_err(|source| EmitError::Build { index, source })?;
            generation_time += gen_start.elapsed();

            let write_start = Instant::now();
            let json = serde_json::Value::from(Value::Object(instance));
            match self.format {
                OutputFormat::JsonLines => serde_json::to_writer(&mut writer, &json)?,
                OutputFormat::Pretty => serde_json::to_writer_pretty(&mut writer, &json)?,
            }
            writeln!(writer)?;
            write_time += write_start.elapsed();

            metrics.instances_written += 1;

            if metrics.instances_written % 10000 == 0 {
                debug!("Written {} instances", metrics.instances_written);
            }
        }

        writer.flush()?;

        metrics.bytes_written = writer.bytes;
        metrics.total_duration = start_time.elapsed();
        metrics.generation_duration = generation_time;
        metrics.write_duration = write_time;

        info!(
            "Generation complete: {} instances, {} bytes in {:?} ({:.2} instances/sec)",
            metrics.instances_written,
            metrics.bytes_written,
            metrics.total_duration,
            metrics.instances_per_second()
        );

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixture_core::{build, fields, Producer, ProducerError, Shape};
    use fixture_generator::sequence;
    use serde_json::json;

    fn lines(buf: &[u8]) -> Vec<serde_json::Value> {
        std::str::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_emit_json_lines() {
        let builder = build(fields! { "id" => sequence(), "kind" => "user" }).unwrap();
        let mut buf = Vec::new();

        let metrics = InstanceEmitter::new(builder).emit(&mut buf, 3).unwrap();

        assert_eq!(metrics.instances_written, 3);
        assert_eq!(metrics.bytes_written, buf.len() as u64);
        assert_eq!(
            lines(&buf),
            vec![
                json!({"id": 1, "kind": "user"}),
                json!({"id": 2, "kind": "user"}),
                json!({"id": 3, "kind": "user"}),
            ]
        );
    }

    #[test]
    fn test_emit_with_override() {
        let builder = build(fields! { "id" => sequence(), "kind" => "user" }).unwrap();
        let mut buf = Vec::new();

        InstanceEmitter::new(builder)
            .with_override(fields! { "kind" => "admin" })
            .emit(&mut buf, 2)
            .unwrap();

        assert_eq!(
            lines(&buf),
            vec![
                json!({"id": 1, "kind": "admin"}),
                json!({"id": 2, "kind": "admin"}),
            ]
        );
    }

    #[test]
    fn test_emit_pretty() {
        let builder = build(fields! { "a" => 1, "b" => vec![true] }).unwrap();
        let mut buf = Vec::new();

        InstanceEmitter::new(builder)
            .with_format(OutputFormat::Pretty)
            .emit(&mut buf, 1)
            .unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\n  \"a\": 1"));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, json!({"a": 1, "b": [true]}));
    }

    #[test]
    fn test_emit_zero_instances() {
        let builder = build(fields! { "a" => 1 }).unwrap();
        let mut buf = Vec::new();

        let metrics = InstanceEmitter::new(builder).emit(&mut buf, 0).unwrap();
        assert_eq!(metrics.instances_written, 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_emit_reports_failing_instance() {
        let calls = std::sync::atomic::AtomicU64::new(0);
        let flaky = Producer::try_new(move || {
            if calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst) == 1 {
                Err(ProducerError::from("backend unavailable"))
            } else {
                Ok(Value::Int(0))
            }
        });
        let builder = build(fields! { "n" => flaky }).unwrap();
        let mut buf = Vec::new();

        let err = InstanceEmitter::new(builder).emit(&mut buf, 3).unwrap_err();
        assert!(matches!(
            err,
            EmitError::Build {
                index: 1,
                source: BuildError::Producer(_)
            }
        ));
    }

    #[test]
    fn test_emit_rejects_non_object_override() {
        let builder = build(fields! { "a" => 1 }).unwrap();
        let mut buf = Vec::new();

        let err = InstanceEmitter::new(builder)
            .with_override(Template::from(vec![1, 2]))
            .emit(&mut buf, 1)
            .unwrap_err();
        assert!(matches!(
            err,
            EmitError::Build {
                source: BuildError::InvalidOverride { found: Shape::Array },
                ..
            }
        ));
    }
}
