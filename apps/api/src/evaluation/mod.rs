// Resume evaluation: prompt building, model call orchestration, reply parsing.
// All model calls go through llm_client; text extraction lives in extraction.

pub mod evaluator;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
