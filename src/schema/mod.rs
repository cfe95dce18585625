pub mod options;
pub mod scheme;
pub mod sonnet;
pub mod vocabulary;
