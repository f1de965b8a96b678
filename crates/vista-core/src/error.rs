use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Form field {field} has an error: {message}")]
    Submit { field: String, message: String },

    #[error("No active view")]
    NoActiveView,

    #[error("Action index out of range: {0}")]
    NoSuchAction(usize),

    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Submenu not built: {0}")]
    UnknownSubmenu(String),

    #[error("Invalid shortcut: {0}")]
    InvalidShortcut(String),
}

pub type Result<T> = std::result::Result<T, Error>;
