pub mod environment;
pub mod paths;

pub use environment::{CONFIG_ENV_VAR, get_config_path};
pub use paths::{TABLE_EXTENSION, file_name_of, format_path_with_tilde, table_file_name};
