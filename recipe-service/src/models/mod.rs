pub mod recipe_schema;

use serde::{Deserialize, Serialize};

pub use recipe_schema::recipe_list_schema;

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
