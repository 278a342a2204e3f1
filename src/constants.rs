// EPrints output vocabulary
pub const EPRINTS_ROOT: &str = "eprints";
pub const EPRINT_TAG: &str = "eprint";
pub const EPRINTS_NAMESPACE: &str = "http://eprints.org/ep2/data/2.0";

// Container item tags
pub const ITEM_TAG: &str = "item";
pub const DOCUMENT_TAG: &str = "document";
pub const FILE_TAG: &str = "file";

// Field names with a dedicated mapping
pub const DOCUMENTS_FIELD: &str = "documents";
pub const FILES_FIELD: &str = "files";
pub const NAME_FIELD: &str = "name";

// Text written for a null field value
pub const NULL_TEXT: &str = "None";

// Output files
pub const OUTPUT_EXTENSION: &str = "xml";
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_BASE_FILE_NAME: &str = "eprints-data-";

// Tag filter defaults
pub const DEFAULT_STRIP_INPUT: &str = "input-data.xml";
pub const DEFAULT_STRIP_OUTPUT: &str = "output-data.xml";

// Search-index hit wrapper holding the actual record
pub const SOURCE_FIELD: &str = "_source";
