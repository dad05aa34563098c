use super::error::FilterError;
use super::types::{FilterField, FilterOrderInfo, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// Parse `order_by` / `order_dir`. Defaults to `id ASC`; any other column gets
    /// `id ASC` appended so rows with equal keys keep a stable position across pages.
    pub fn parse(
        order_by: Option<&str>,
        order_dir: Option<&str>,
    ) -> Result<Vec<FilterOrderInfo>, FilterError> {
        let field = match order_by.filter(|s| !s.is_empty()) {
            Some(name) => name.parse::<FilterField>()?,
            None => FilterField::Id,
        };

        let sort = match order_dir.filter(|s| !s.is_empty()) {
            None => SortDirection::Asc,
            Some(dir) if dir.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(other) => return Err(FilterError::InvalidSortDirection(other.to_string())),
        };

        let mut out = vec![FilterOrderInfo { field, sort }];
        if !field.is_unique() {
            out.push(FilterOrderInfo { field: FilterField::Id, sort: SortDirection::Asc });
        }
        Ok(out)
    }

    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        if infos.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = infos
            .iter()
            .map(|i| format!("\"{}\" {}", i.field.column(), i.sort.to_sql()))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}
