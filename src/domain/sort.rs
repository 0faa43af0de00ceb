use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Product attribute the result ordering is keyed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    Price,
    Rating,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Result ordering encoded on the wire as `field.DIRECTION`, e.g.
/// `name.ASC` or `price.DESC`. Only the three fields and two directions
/// form valid encodings; everything else is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl Default for SortSpec {
    /// Ordering applied before the user picks one: name, ascending.
    fn default() -> Self {
        Self::new(SortField::Name, SortDirection::Asc)
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortField::Name => write!(f, "name"),
            SortField::Price => write!(f, "price"),
            SortField::Rating => write!(f, "rating"),
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

impl Display for SortSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.field, self.direction)
    }
}

impl FromStr for SortSpec {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .split_once('.')
            .ok_or_else(|| TypeConstraintError::InvalidValue(s.to_string()))?;

        let field = match field {
            "name" => SortField::Name,
            "price" => SortField::Price,
            "rating" => SortField::Rating,
            _ => return Err(TypeConstraintError::InvalidValue(s.to_string())),
        };

        let direction = match direction {
            "ASC" => SortDirection::Asc,
            "DESC" => SortDirection::Desc,
            _ => return Err(TypeConstraintError::InvalidValue(s.to_string())),
        };

        Ok(Self { field, direction })
    }
}

impl TryFrom<String> for SortSpec {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for SortSpec {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortSpec> for String {
    fn from(value: SortSpec) -> Self {
        value.to_string()
    }
}
