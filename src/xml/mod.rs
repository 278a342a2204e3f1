mod element;
mod reader;
mod writer;

// Re-export public API
pub use element::Element;
pub use reader::{parse_document, read_document};
pub use writer::{to_bytes, write_document, write_file};
