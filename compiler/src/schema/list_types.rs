use crate::errors::{msg, Error, Result};

use super::ColumnType;

/// Scalar types which have a list counterpart, paired with that counterpart.
const LIST_TYPE_MAPPINGS: &[(ColumnType, ColumnType)] = &[
    (ColumnType::String, ColumnType::StringList),
    (ColumnType::Integer, ColumnType::IntegerList),
    (ColumnType::Boolean, ColumnType::BooleanList),
    (ColumnType::Date, ColumnType::DateList),
    (ColumnType::EntityId, ColumnType::EntityIdList),
    (ColumnType::UserId, ColumnType::UserIdList),
];

impl ColumnType {
    pub fn is_list(&self) -> bool {
        LIST_TYPE_MAPPINGS.iter().any(|(_, list)| list == self)
    }

    /// The list counterpart of a scalar type.
    pub fn list_type(&self) -> Result<ColumnType> {
        LIST_TYPE_MAPPINGS
            .iter()
            .find(|(scalar, _)| scalar == self)
            .map(|(_, list)| *list)
            .ok_or_else(|| Error::invalid_argument(msg::no_list_type(*self)))
    }

    /// The scalar type held by a list type.
    pub fn non_list_type(&self) -> Result<ColumnType> {
        LIST_TYPE_MAPPINGS
            .iter()
            .find(|(_, list)| list == self)
            .map(|(scalar, _)| *scalar)
            .ok_or_else(|| Error::invalid_argument(msg::not_a_list_type(*self)))
    }
}
