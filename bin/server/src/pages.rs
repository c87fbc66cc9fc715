//! Page components for the application.

pub mod chat;

pub use chat::ChatPage;
