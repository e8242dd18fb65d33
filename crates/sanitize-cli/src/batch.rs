//! Batch sanitization of JSON records against one model declaration.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use sanitize_model::MapRecord;
use sanitize_transform::{
    ModelConfig, ModelDeclaration, PipelineStage, SanitizationReport, TransformRegistry,
    run_sanitization,
};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::logging::redact_value;

/// A record whose pipeline run failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    /// Position in the input array.
    pub index: usize,
    pub stage: PipelineStage,
    pub message: String,
}

/// Result of sanitizing a batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub model: String,
    /// Every input record, in input order. Failed records keep whatever was
    /// written before the failure.
    pub records: Vec<MapRecord>,
    pub reports: Vec<SanitizationReport>,
    pub failures: Vec<RecordFailure>,
}

impl BatchOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn changed_records(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.changed_count() > 0)
            .count()
    }
}

/// Load a declaration file and build its configuration.
///
/// Only built-in transforms are available; a declaration naming anything
/// else fails here.
pub fn load_config(path: &Path) -> Result<ModelConfig<MapRecord>> {
    let declaration = ModelDeclaration::from_path(path)
        .with_context(|| format!("load declaration {}", path.display()))?;
    let registry = TransformRegistry::new();
    let config = ModelConfig::from_declaration(&declaration, &registry)
        .with_context(|| format!("configure model {}", declaration.model))?;
    debug!(
        model = %declaration.model,
        attributes = config.attributes().len(),
        "Loaded declaration"
    );
    Ok(config)
}

/// Read a JSON array of flat objects.
pub fn load_records(path: &Path) -> Result<Vec<MapRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read records {}", path.display()))?;
    parse_records(&text).with_context(|| format!("parse records {}", path.display()))
}

pub fn parse_records(text: &str) -> Result<Vec<MapRecord>> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_array() {
        bail!("expected a JSON array of records");
    }
    Ok(serde_json::from_value(value)?)
}

/// Run the pipeline on every record, collecting failures instead of
/// stopping at the first one.
pub fn sanitize_batch(config: &ModelConfig<MapRecord>, records: Vec<MapRecord>) -> BatchOutcome {
    let mut outcome = BatchOutcome {
        model: config.model_name().to_string(),
        ..BatchOutcome::default()
    };
    for (index, mut record) in records.into_iter().enumerate() {
        match run_sanitization(&mut record, config) {
            Ok(report) => {
                trace!(index, record = %redact_value(&render(&record)), "Sanitized record");
                outcome.reports.push(report);
            }
            Err(error) => {
                warn!(index, stage = %error.stage(), %error, "Sanitization failed");
                outcome.failures.push(RecordFailure {
                    index,
                    stage: error.stage(),
                    message: error.to_string(),
                });
            }
        }
        outcome.records.push(record);
    }
    info!(
        model = %outcome.model,
        records = outcome.records.len(),
        changed = outcome.changed_records(),
        failed = outcome.failures.len(),
        "Sanitized batch"
    );
    outcome
}

/// Write records as pretty JSON to `output`, or stdout when `None`.
pub fn write_records(records: &[MapRecord], output: Option<&Path>) -> Result<()> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("write records {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn render(record: &MapRecord) -> String {
    serde_json::to_string(record).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanitize_model::{ModelSchema, TransformOption, Value};

    #[test]
    fn parse_rejects_non_arrays() {
        let err = parse_records(r#"{ "name": "x" }"#).unwrap_err();
        assert_eq!(err.to_string(), "expected a JSON array of records");
        assert_eq!(parse_records("[]").unwrap().len(), 0);
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let mut config = ModelConfig::new(ModelSchema::new("person").with_attribute("name"));
        config
            .configure(
                &TransformRegistry::new(),
                "name",
                [("case", TransformOption::from("upcase"))],
            )
            .unwrap();
        let records = vec![
            MapRecord::new().with("name", "ann"),
            MapRecord::new().with("name", 7i64),
            MapRecord::new().with("name", "bo"),
        ];
        let outcome = sanitize_batch(&config, records);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].index, 1);
        assert_eq!(outcome.failures[0].stage, PipelineStage::RunningAttributes);
        assert_eq!(outcome.records[2].get("name"), Some(&Value::from("BO")));
        assert_eq!(outcome.changed_records(), 2);
    }
}
