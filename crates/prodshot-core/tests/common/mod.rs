pub mod page_server;
pub mod fakes;
