use crate::models::recipe_list_schema;
use serde_json::Value;

/// Number of recipes requested per call.
pub const RECIPE_COUNT: usize = 3;

pub const SYSTEM_INSTRUCTION: &str = "You are a creative home-cooking assistant. \
You write practical recipes that a home cook can follow with ordinary kitchen equipment. \
Use the ingredients the user has on hand as the backbone of every dish; you may assume \
common pantry staples such as salt, pepper, oil, vinegar and dried herbs. \
Give quantities and units for every ingredient and write instructions as short, ordered steps. \
Respond only with JSON that matches the provided schema, without commentary or markdown.";

/// Everything the upstream model needs for one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredPrompt {
    pub system_instruction: String,
    pub user_prompt: String,
    pub response_schema: Value,
}

impl StructuredPrompt {
    /// Build the recipe request for the caller's ingredient list.
    ///
    /// The ingredients are interpolated as-is; JSON encoding of the outbound
    /// body is the only escaping applied.
    pub fn for_ingredients(ingredients: &str) -> Self {
        Self {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            user_prompt: user_prompt(ingredients),
            response_schema: recipe_list_schema(),
        }
    }
}

fn user_prompt(ingredients: &str) -> String {
    format!(
        "I have the following ingredients: {ingredients}\n\n\
         Create exactly {RECIPE_COUNT} distinct recipes that make good use of them:\n\
         1. one salad,\n\
         2. one cooked dish,\n\
         3. one dip or side.\n\n\
         Return a JSON array of exactly {RECIPE_COUNT} recipe objects. For each recipe give a title, \
         a short description, the yield, the prep time, the cook time, the list of ingredients \
         with name, quantity and unit, the ordered instructions, and the dish type."
    )
}
