pub mod discovery;
pub mod keys;
pub mod parser;
pub mod providers;
