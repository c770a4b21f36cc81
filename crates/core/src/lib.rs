pub mod chunk;
pub mod config;
pub mod error;
pub mod text;

pub use chunk::{SplitResult, CUSTOM_SPLIT_SIGN};
pub use config::SplitConfig;
pub use error::SplitError;
pub use text::clean_text;
