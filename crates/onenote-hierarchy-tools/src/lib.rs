use clap::ValueEnum;

pub mod commands;
pub mod summary;
pub mod utils;

// Re-export the parser for external use
pub use onenote_hierarchy;

use onenote_hierarchy::Strategy;

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Which parser reads the input file.
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum ParserStrategy {
    /// Materialize the document, then walk it
    #[default]
    Tree,
    /// Single forward pass
    Stream,
}

impl From<ParserStrategy> for Strategy {
    fn from(value: ParserStrategy) -> Self {
        match value {
            ParserStrategy::Tree => Strategy::Tree,
            ParserStrategy::Stream => Strategy::Stream,
        }
    }
}
