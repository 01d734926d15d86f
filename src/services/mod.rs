pub mod extraction;
pub mod openai_client;
pub mod prompt;
