pub mod classify;
pub mod source;
pub mod tokenize;
pub mod types;

pub use source::CharSource;
pub use tokenize::{Tokenizer, split, split_str};
pub use types::{Construct, Position};
