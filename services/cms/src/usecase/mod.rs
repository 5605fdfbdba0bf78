pub mod content;
pub mod register;
pub mod token;
