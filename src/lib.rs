pub mod batch;
pub mod cache;
pub mod calendar;
pub mod error;
pub mod fetch;
pub mod parser;
pub mod report;
pub mod settings;

pub use error::ParseError;
pub use parser::parse;
pub use report::Report;
