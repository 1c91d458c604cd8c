pub mod types;
mod http;
pub mod prompt;
pub mod parser;
pub mod ollama;
pub mod openai;
pub mod rater;

pub use types::*;
pub use prompt::*;
pub use parser::*;
pub use ollama::*;
pub use openai::*;
pub use rater::*;
