pub mod llm_service;
pub mod pdf_service;

pub use llm_service::LlmService;
pub use pdf_service::{extract_lines, extract_notes_text};
