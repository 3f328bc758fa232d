// AI flows: recommendations from reading history and natural-language book
// search. Both are schema-validated wrappers over the shared LLM client.

pub mod handlers;
pub mod prompts;
pub mod recommend;
pub mod search;
