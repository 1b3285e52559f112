// Internal modules
pub mod config;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::{tokenize, LexerError, LexicalAnalyzer, TokenSink};
pub use output::{OutputFormat, TokenWriter};
pub use pipeline::{PipelineError, PipelineResult};
pub use tokens::{Token, TokenStream, TokenType};
