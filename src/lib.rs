#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod content;
pub mod crawl;
pub mod error;
pub mod logging;
pub mod parser;
pub mod report;
pub mod tree;
pub mod validate;

pub use content::{Body, Content, State};
pub use error::ParseError;
pub use parser::parse_markdown;
pub use tree::{Chapter, Course, Courses, Page, Stats};
