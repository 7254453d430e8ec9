pub mod env;
pub mod loader;
pub mod path;
pub mod store;

pub use env::{EnvStore, MemoryEnv, ProcessEnv};
pub use loader::{load_env_file, parse_env_file};
pub use path::{expand_home, resolve_path};
pub use store::{get_config, ConfigStore};
