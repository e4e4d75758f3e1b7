pub mod chrome;
pub mod driver;
pub mod page;
