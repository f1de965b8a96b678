mod dirs;
mod settings;
mod validation;

pub use dirs::Directories;
pub use settings::{Config, GridConfig, SearchConfig, ShortcutConfig};
pub use validation::warn_unknown_fields;
