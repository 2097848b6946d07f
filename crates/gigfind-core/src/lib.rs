pub mod catalog;
pub mod engine;
pub mod models;
pub mod session;
