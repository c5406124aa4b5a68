//! Portal result entity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{NO_DATA_MESSAGE, NO_DATA_STATUS};

/// Outcome of one portal interaction.
///
/// `success` mirrors `status`: a result is successful exactly when its status
/// is in the 2xx range. The constructors below keep the two consistent.
/// Results have no setters; once built they are only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PortalResult {
    success: bool,
    status: u16,
    /// Message string or structured curriculum/course data
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    data: Value,
}

impl PortalResult {
    /// Create a result from its raw parts
    pub fn new(success: bool, status: u16, data: impl Into<Value>) -> Self {
        Self {
            success,
            status,
            data: data.into(),
        }
    }

    /// Successful result with status 200
    pub fn ok(data: impl Into<Value>) -> Self {
        Self::new(true, 200, data)
    }

    /// Failed result carrying a message
    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self::new(false, status, Value::String(message.into()))
    }

    /// Sentinel for a year/semester selector that matched nothing
    pub fn no_data() -> Self {
        Self::failure(NO_DATA_STATUS, NO_DATA_MESSAGE)
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Consume the result, keeping only its payload
    pub fn into_data(self) -> Value {
        self.data
    }
}
