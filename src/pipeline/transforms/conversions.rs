use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::args::StepArgs;
use crate::data_model::Table;
use crate::error::{PipelineError, Result};
use crate::executor::PipelineStep;
use crate::pipeline::{require_column, require_input};

const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct DatetimeParams {
    date_column: String,
    #[serde(default)]
    format: Option<String>,
}

/// Rewrites a text column as naive timestamps (`%Y-%m-%d %H:%M:%S`).
///
/// With an explicit `format` only that pattern is tried; otherwise RFC 3339
/// (offset dropped) and a handful of common layouts are attempted in turn.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConvertStrToDatetime;

impl ConvertStrToDatetime {
    fn parse(raw: &str, format: Option<&str>) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if let Some(format) = format {
            return NaiveDateTime::parse_from_str(raw, format)
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(raw, format)
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                });
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_local());
        }
        DATETIME_FORMATS
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
            .or_else(|| {
                DATE_FORMATS
                    .iter()
                    .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }
}

impl PipelineStep for ConvertStrToDatetime {
    fn name(&self) -> &str {
        "ConvertStrToDatetime"
    }

    fn process(&self, data: Option<Table>, args: &StepArgs) -> Result<Table> {
        let params: DatetimeParams = args.parse(self.name())?;
        let mut table = require_input(self.name(), data)?;
        let idx = require_column(self.name(), &table, &params.date_column)?;

        for row in table.rows.iter_mut() {
            let converted = match &row[idx] {
                Value::Null => continue,
                Value::String(raw) => Self::parse(raw, params.format.as_deref())
                    .ok_or_else(|| {
                        PipelineError::data(
                            self.name(),
                            format!("cannot parse '{}' as a datetime", raw),
                        )
                    })?,
                other => {
                    return Err(PipelineError::data(
                        self.name(),
                        format!("expected a string date, got {}", other),
                    ))
                }
            };
            row[idx] = Value::String(converted.format(OUTPUT_FORMAT).to_string());
        }

        debug!(column = %params.date_column, "Converted column to datetime");
        Ok(table)
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct FloatToStrParams {
    str_column: String,
}

/// Turns every non-null cell of a column into its text form.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConvertFloatToStr;

impl PipelineStep for ConvertFloatToStr {
    fn name(&self) -> &str {
        "ConvertFloatToStr"
    }

    fn process(&self, data: Option<Table>, args: &StepArgs) -> Result<Table> {
        let params: FloatToStrParams = args.parse(self.name())?;
        let mut table = require_input(self.name(), data)?;
        let idx = require_column(self.name(), &table, &params.str_column)?;

        for row in table.rows.iter_mut() {
            match &mut row[idx] {
                Value::Null | Value::String(_) => {}
                other => {
                    let text = other.to_string();
                    *other = Value::String(text);
                }
            }
        }
        Ok(table)
    }
}
