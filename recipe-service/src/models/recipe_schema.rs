//! Structured-output schema handed to Gemini.
//!
//! Uses Gemini's OpenAPI subset (upper-case type names, `propertyOrdering`).
//! The shape is fixed; nothing in a request influences it.

use serde_json::{json, Value};

/// Properties every generated recipe carries, in output order.
pub const RECIPE_FIELDS: [&str; 8] = [
    "title",
    "description",
    "yield",
    "prepTime",
    "cookTime",
    "ingredients",
    "instructions",
    "dishType",
];

/// Properties of one ingredient line.
pub const INGREDIENT_FIELDS: [&str; 3] = ["name", "quantity", "unit"];

/// Schema for the array of recipes Gemini must return.
pub fn recipe_list_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": {
                    "type": "STRING",
                    "description": "Name of the dish."
                },
                "description": {
                    "type": "STRING",
                    "description": "One or two sentences describing the dish."
                },
                "yield": {
                    "type": "STRING",
                    "description": "How many servings the recipe makes, e.g. \"4 servings\"."
                },
                "prepTime": {
                    "type": "STRING",
                    "description": "Hands-on preparation time, e.g. \"15 minutes\"."
                },
                "cookTime": {
                    "type": "STRING",
                    "description": "Cooking time, e.g. \"20 minutes\" or \"0 minutes\"."
                },
                "ingredients": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": { "type": "STRING" },
                            "quantity": { "type": "STRING" },
                            "unit": { "type": "STRING" }
                        },
                        "required": INGREDIENT_FIELDS,
                        "propertyOrdering": INGREDIENT_FIELDS
                    }
                },
                "instructions": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                },
                "dishType": {
                    "type": "STRING",
                    "description": "One of: salad, cooked dish, dip or side."
                }
            },
            "required": RECIPE_FIELDS,
            "propertyOrdering": RECIPE_FIELDS
        }
    })
}
