pub mod generate;
pub mod json;

pub use generate::{GenerateOptions, GenerateRequest, GenerateResponse, GenerateUsage};
pub use json::first_json_object;
