pub mod language;
pub mod memory_key;
pub mod path;
pub mod pattern;

pub use language::{validate_language_support, Language};
pub use memory_key::{validate_memory_key, ContextType, MemoryKey};
pub use path::{validate_file_path, PathRequirements};
pub use pattern::{validate_json_string_pattern, validate_string_pattern};
