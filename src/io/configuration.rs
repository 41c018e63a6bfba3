//! Constants and runtime configuration defaults

// Command-line defaults
/// Default traversal block size code (block size minus one)
pub const DEFAULT_BLOCK_CODE: u8 = 0;
/// Default alignment code (center)
pub const DEFAULT_ALIGN_CODE: i8 = 0;

// Output settings
/// Suffix of the temporary file written before the final rename
pub const TEMP_SUFFIX: &str = ".part";

// Catalogue settings
/// Directory under the home directory holding the pool catalogue
pub const CATALOGUE_DIR_NAME: &str = ".allrgb";
/// File name of the pool catalogue
pub const CATALOGUE_FILE_NAME: &str = "pool.catalogue";
/// Leading bytes identifying a pool catalogue file
pub const CATALOGUE_MAGIC: &[u8; 8] = b"ALLRGBC1";

// Progress bar display settings
/// Width of the progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
