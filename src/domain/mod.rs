pub mod catalog;
pub mod error;
pub mod evaluation;
pub mod llm_config;
pub mod response;
pub mod session;
pub mod skill;
pub mod study;
pub mod test_content;
