use super::error::FilterError;
use super::types::{FilterField, FilterOp, FilterWhereInfo, SqlParam};

pub struct FilterWhere;

impl FilterWhere {
    /// Build the optional predicate from the raw `filter_by` / `filter_pred` / `filter_value` triple.
    ///
    /// `filter_by` absent (or empty) means no filter at all; the other two are then ignored.
    /// Once a field is named, both predicate and value are required.
    pub fn parse(
        filter_by: Option<&str>,
        filter_pred: Option<&str>,
        filter_value: Option<&str>,
    ) -> Result<Option<FilterWhereInfo>, FilterError> {
        let field = match filter_by.filter(|s| !s.is_empty()) {
            Some(name) => name.parse::<FilterField>()?,
            None => return Ok(None),
        };

        let operator = filter_pred
            .filter(|s| !s.is_empty())
            .ok_or_else(|| FilterError::MissingPredicate(field.to_string()))?
            .parse::<FilterOp>()?;

        let raw = filter_value.ok_or_else(|| FilterError::MissingValue(field.to_string()))?;
        let data = field.parse_value(raw)?;

        Ok(Some(FilterWhereInfo { field, operator, data }))
    }

    /// Render a predicate as `"column" OP ?` plus its bound parameter.
    pub fn generate(condition: Option<&FilterWhereInfo>) -> (String, Vec<SqlParam>) {
        match condition {
            Some(c) => (
                format!("\"{}\" {} ?", c.field.column(), c.operator.to_sql()),
                vec![c.data.clone()],
            ),
            None => (String::new(), vec![]),
        }
    }
}
