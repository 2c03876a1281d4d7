use std::env;
use std::path::PathBuf;

use wordgraph_core::io::normalize_folder;

/// Server settings, read from the environment.
///
/// | variable          | default     |
/// |-------------------|-------------|
/// | `WORDGRAPH_HOST`  | `127.0.0.1` |
/// | `WORDGRAPH_PORT`  | `5000`      |
/// | `WORDGRAPH_DATA`  | `./data`    |
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	/// Folder holding the collection files of the `FileStore`.
	pub data_dir: PathBuf,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_owned(),
			port: 5000,
			data_dir: PathBuf::from("./data"),
		}
	}
}

impl ServerConfig {
	/// Reads the configuration from the process environment.
	///
	/// # Errors
	/// Returns an error if `WORDGRAPH_PORT` is not a valid port number.
	pub fn from_env() -> Result<Self, String> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	/// Builds the configuration from any key lookup, falling back to defaults.
	fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, String> {
		let mut config = Self::default();

		if let Some(host) = lookup("WORDGRAPH_HOST").filter(|s| !s.trim().is_empty()) {
			config.host = host.trim().to_owned();
		}
		if let Some(port) = lookup("WORDGRAPH_PORT") {
			config.port = port
				.trim()
				.parse()
				.map_err(|_| format!("WORDGRAPH_PORT must be a port number, got '{port}'"))?;
		}
		if let Some(data) = lookup("WORDGRAPH_DATA").filter(|s| !s.trim().is_empty()) {
			config.data_dir = normalize_folder(data.trim());
		}

		Ok(config)
	}
}
