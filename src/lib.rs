pub mod chat;
pub mod commands;
pub mod http;
pub mod runtime;
