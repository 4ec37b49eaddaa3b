mod core;
pub use self::core::{GeminiClient, generate_content, response_text};
