pub mod book;
pub mod cart;
pub mod library;
pub mod order;
pub mod progress;
pub mod user;
