pub mod auth;
pub mod content;
pub mod form;
pub mod health;
pub mod register;
pub mod token;
