pub mod config;
pub mod logging;

pub mod generate;
pub mod http;
pub mod name;
pub mod page;
pub mod pipeline;
pub mod select;
pub mod similarity;
