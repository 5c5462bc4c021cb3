use bson::oid::ObjectId;

use crate::util::error::ServiceError;

/// Returns true when `value` is a 24 character hexadecimal ObjectId.
pub fn is_valid_object_id(value: &str) -> bool {
    value.len() == 24 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parse a path identifier, failing with a BadRequest that names the entity.
pub fn parse_object_id(value: &str, entity: &str) -> Result<ObjectId, ServiceError> {
    if !is_valid_object_id(value) {
        return Err(ServiceError::invalid_input(
            format!("Invalid {} ID format", entity),
            "ID must be a valid ObjectId",
        ));
    }
    ObjectId::parse_str(value).map_err(|_| {
        ServiceError::invalid_input(
            format!("Invalid {} ID format", entity),
            "ID must be a valid ObjectId",
        )
    })
}

/// Parse a reference field such as `categoryId` or `adminId`.
pub fn parse_reference(value: &str, field: &str, entity: &str) -> Result<ObjectId, ServiceError> {
    ObjectId::parse_str(value.trim()).map_err(|_| {
        ServiceError::invalid_input(
            format!("Invalid {} ID format", entity),
            format!("{} must be a valid ObjectId", field),
        )
    })
}
