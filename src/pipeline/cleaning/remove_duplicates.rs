use std::collections::HashSet;

use tracing::debug;

use crate::args::StepArgs;
use crate::data_model::Table;
use crate::error::Result;
use crate::executor::PipelineStep;
use crate::pipeline::{require_input, NoParams};

/// Drops repeated rows, keeping the first occurrence of each.
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoveDuplicates;

impl PipelineStep for RemoveDuplicates {
    fn name(&self) -> &str {
        "RemoveDuplicates"
    }

    fn process(&self, data: Option<Table>, args: &StepArgs) -> Result<Table> {
        let _: NoParams = args.parse(self.name())?;
        let mut table = require_input(self.name(), data)?;

        let before = table.num_rows();
        let mut seen = HashSet::new();
        table.retain_rows(|row| seen.insert(row_key(row)));
        debug!(removed = before - table.num_rows(), "Removed duplicate rows");
        Ok(table)
    }
}

/// JSON values are not `Hash`; their compact serialization is.
pub(crate) fn row_key(row: &[serde_json::Value]) -> String {
    serde_json::Value::Array(row.to_vec()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keeps_first_occurrence() {
        let table = Table::from_rows(
            vec!["id".into(), "v".into()],
            vec![
                vec![json!(1), json!("a")],
                vec![json!(2), json!("b")],
                vec![json!(1), json!("a")],
                vec![json!(1), json!("c")],
            ],
        )
        .unwrap();

        let out = RemoveDuplicates.execute(Some(table), &StepArgs::new()).unwrap();
        assert_eq!(
            out.rows,
            vec![
                vec![json!(1), json!("a")],
                vec![json!(2), json!("b")],
                vec![json!(1), json!("c")],
            ]
        );
    }

    #[test]
    fn test_int_and_float_are_distinct() {
        let table = Table::from_rows(vec!["x".into()], vec![vec![json!(1)], vec![json!(1.0)]])
            .unwrap();
        let out = RemoveDuplicates.execute(Some(table), &StepArgs::new()).unwrap();
        assert_eq!(out.num_rows(), 2);
    }
}
