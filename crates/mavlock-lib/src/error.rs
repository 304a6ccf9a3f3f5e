//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

use crate::repository::FetchError;

#[derive(Debug, Error)]
pub enum Error {
	/// A descriptor fetch or payload download failed, the whole run is abandoned.
	#[error("could not fetch {coordinate}: {source}")]
	Fetch {
		coordinate: String,
		#[source]
		source: FetchError,
	},
	#[error("invalid coordinate: {0}")]
	InvalidCoordinate(String),
	#[error("dependency {dependency} of {parent} has no version")]
	MissingVersion {
		parent: String,
		dependency: String,
	},
	#[error("unknown scope \"{scope}\" on {coordinate}")]
	UnknownScope {
		coordinate: String,
		scope: String,
	},
	#[error("reqwest error: {0}")]
	Reqwest(#[from] reqwest::Error),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("parsing error: {0}")]
	Parse(String),
}

impl Error {
	pub(crate) fn fetch(coordinate: impl ToString, source: FetchError) -> Self {
		Error::Fetch { coordinate: coordinate.to_string(), source }
	}

	/// Multi-line report suitable for showing to a user before aborting.
	///
	/// Aggregate fetch failures are expanded so every repository that was tried is listed.
	pub fn diagnostic(&self) -> String {
		match self {
			Error::Fetch { coordinate, source } => {
				let mut out = String::new();
				fetch_diagnostic(&mut out, coordinate, source);
				out
			},
			e => format!("ERROR: {}", e),
		}
	}
}

fn fetch_diagnostic(out: &mut String, coordinate: &str, status: &FetchError) {
	use std::fmt::Write;

	/* `write!` into a `String` can't fail */
	let _ = match status {
		FetchError::NotFound => writeln!(out, "ERROR: No artifact found for: {}", coordinate),
		FetchError::Transport { repository, response_code, message } => writeln!(out,
			"ERROR: Could not fetch: {}\nRepository: {}\nResponse code: {}\nMessage: {}",
			coordinate,
			repository,
			response_code.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string()),
			message
		),
		FetchError::InvalidHash => writeln!(out, "ERROR: Hash validation failed for: {}", coordinate),
		FetchError::Aggregate(errors) => {
			for (_, e) in errors {
				fetch_diagnostic(out, coordinate, e);
			}
			Ok(())
		},
	};
}
