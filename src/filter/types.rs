use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::FilterError;

/// Client-facing field names accepted by `order_by` and `filter_by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    Id,
    Firstname,
    Secondname,
    Age,
    Lon,
    Lat,
}

/// Storage type of a column, used to coerce filter literals before binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    Real,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Id,
        FilterField::Firstname,
        FilterField::Secondname,
        FilterField::Age,
        FilterField::Lon,
        FilterField::Lat,
    ];

    /// Name as it appears in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Id => "id",
            FilterField::Firstname => "firstname",
            FilterField::Secondname => "secondname",
            FilterField::Age => "age",
            FilterField::Lon => "lon",
            FilterField::Lat => "lat",
        }
    }

    /// Column in the `users` table. The coordinate pair is stored as `x` (lat) and `y` (lon);
    /// these aliases must follow any rename of those columns in `database::schema`.
    pub fn column(&self) -> &'static str {
        match self {
            FilterField::Id => "id",
            FilterField::Firstname => "firstname",
            FilterField::Secondname => "secondname",
            FilterField::Age => "age",
            FilterField::Lon => "y",
            FilterField::Lat => "x",
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            FilterField::Id | FilterField::Firstname | FilterField::Secondname => FieldType::Text,
            FilterField::Age => FieldType::Integer,
            FilterField::Lon | FilterField::Lat => FieldType::Real,
        }
    }

    /// Whether ordering on this column alone yields a total order
    pub fn is_unique(&self) -> bool {
        matches!(self, FilterField::Id)
    }

    /// Parse a raw literal into a bindable parameter of this field's type
    pub fn parse_value(&self, raw: &str) -> Result<SqlParam, FilterError> {
        let invalid = |expected| FilterError::InvalidValue {
            field: self.as_str().to_string(),
            value: raw.to_string(),
            expected,
        };

        match self.field_type() {
            FieldType::Text => Ok(SqlParam::Text(raw.to_string())),
            FieldType::Integer => raw
                .trim()
                .parse::<i64>()
                .map(SqlParam::Integer)
                .map_err(|_| invalid("an integer")),
            FieldType::Real => match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(SqlParam::Real(v)),
                _ => Err(invalid("a finite number")),
            },
        }
    }
}

impl FromStr for FilterField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| FilterError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operators accepted by `filter_pred`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    #[serde(rename = "g")]
    Gt,
    #[serde(rename = "l")]
    Lt,
    #[serde(rename = "ge")]
    Gte,
    #[serde(rename = "le")]
    Lte,
    #[serde(rename = "e")]
    Eq,
    #[serde(rename = "ne")]
    Ne,
}

impl FilterOp {
    pub fn to_sql(&self) -> &'static str {
        match self {
            FilterOp::Gt => ">",
            FilterOp::Lt => "<",
            FilterOp::Gte => ">=",
            FilterOp::Lte => "<=",
            FilterOp::Eq => "=",
            FilterOp::Ne => "<>",
        }
    }
}

impl FromStr for FilterOp {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "g" => FilterOp::Gt,
            "l" => FilterOp::Lt,
            "ge" => FilterOp::Gte,
            "le" => FilterOp::Lte,
            "e" => FilterOp::Eq,
            "ne" => FilterOp::Ne,
            other => return Err(FilterError::UnsupportedOperator(other.to_string())),
        })
    }
}

/// Raw listing query as received on `GET /users`. Every value stays a string
/// so parse failures surface as our own 400s instead of extractor rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub order_by: Option<String>,
    pub order_dir: Option<String>,
    pub filter_by: Option<String>,
    pub filter_pred: Option<String>,
    pub filter_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterWhereInfo {
    pub field: FilterField,
    pub operator: FilterOp,
    pub data: SqlParam,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOrderInfo {
    pub field: FilterField,
    pub sort: SortDirection,
}

/// A value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Integer(i64),
    Real(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}
