pub mod metrics;
pub mod prompt;
pub mod providers;
pub mod sanitize;

pub use prompt::StructuredPrompt;
pub use providers::{ProviderError, TextProvider};
pub use sanitize::strip_code_fence;
