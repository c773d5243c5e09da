//! Request handlers

pub mod health;
pub mod hooks;
pub mod jenkins;
pub mod openapi;
