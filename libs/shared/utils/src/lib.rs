pub mod extractor;
pub mod formatter;
pub mod jwt;
pub mod normalizer;
pub mod strings;
pub mod supplements;
pub mod test_utils;
pub mod time_description;

pub use formatter::{FormatStyle, Formatter};
pub use strings::Strings;
