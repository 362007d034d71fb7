//! Domain model types

pub mod category;
pub mod identifier;

pub use category::Category;
pub use identifier::{Identifier, NumberRange, MAX_NUMBER, MIN_NUMBER};
