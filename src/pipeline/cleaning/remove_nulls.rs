use tracing::debug;

use crate::args::StepArgs;
use crate::data_model::Table;
use crate::error::Result;
use crate::executor::PipelineStep;
use crate::pipeline::{require_input, NoParams};

/// Drops every row that has at least one null cell.
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoveNulls;

impl PipelineStep for RemoveNulls {
    fn name(&self) -> &str {
        "RemoveNulls"
    }

    fn process(&self, data: Option<Table>, args: &StepArgs) -> Result<Table> {
        let _: NoParams = args.parse(self.name())?;
        let mut table = require_input(self.name(), data)?;

        let before = table.num_rows();
        table.retain_rows(|row| row.iter().all(|cell| !cell.is_null()));
        debug!(removed = before - table.num_rows(), "Removed rows with nulls");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use serde_json::{json, Value};

    #[test]
    fn test_rows_with_nulls_are_dropped() {
        let table = Table::from_rows(
            vec!["a".into(), "b".into()],
            vec![
                vec![json!(1), json!("x")],
                vec![Value::Null, json!("y")],
                vec![json!(3), Value::Null],
                vec![json!(4), json!("z")],
            ],
        )
        .unwrap();

        let out = RemoveNulls.execute(Some(table), &StepArgs::new()).unwrap();
        assert_eq!(out.rows, vec![vec![json!(1), json!("x")], vec![json!(4), json!("z")]]);
    }

    #[test]
    fn test_rejects_arguments() {
        let args = StepArgs::new().with("subset", "a");
        assert!(matches!(
            RemoveNulls.execute(Some(Table::default()), &args),
            Err(PipelineError::ArgumentError { .. })
        ));
    }

    #[test]
    fn test_needs_input() {
        assert!(matches!(
            RemoveNulls.execute(None, &StepArgs::new()),
            Err(PipelineError::MissingInput { .. })
        ));
    }
}
