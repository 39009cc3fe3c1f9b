//! Query model and parsing.

pub mod parser;

pub use self::parser::{Query, QueryParser};
