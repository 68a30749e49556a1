//! User configuration stored in `~/.transitmap/config.ini`.
//!
//! ```ini
//! [feed]
//! url = https://ctb-siri.s3.eu-south-2.amazonaws.com/bizkaibus-vehicle-positions.xml
//! format = auto
//!
//! [refresh]
//! interval_ms = 15000
//! ```
//!
//! Missing keys fall back to defaults; invalid values are rejected with
//! [`ConfigFileError::InvalidValue`].

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    DEFAULT_CENTER_LAT, DEFAULT_CENTER_LON, DEFAULT_LOG_FILE_NAME, DEFAULT_ZOOM,
    MIN_REFRESH_INTERVAL_MS,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use parser::parse_ini;
pub use settings::{ConfigFile, FeedSettings, LoggingSettings, MapSettings, RefreshSettings};
pub use writer::to_config_string;
