pub mod path_validator;
pub mod toml_utils;

pub use path_validator::PathValidator;
pub use toml_utils::TomlUtils;
