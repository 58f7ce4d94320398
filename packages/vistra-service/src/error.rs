pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid search request: {message}")]
	InvalidRequest { message: String },
	#[error("contact store failure: {message}")]
	Store { message: String },
	#[error("device detection failure: {message}")]
	Device { message: String },
}

impl From<vistra_store::Error> for Error {
	fn from(err: vistra_store::Error) -> Self {
		match err {
			vistra_store::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			other => Self::Store { message: other.to_string() },
		}
	}
}

impl From<vistra_devices::Error> for Error {
	fn from(err: vistra_devices::Error) -> Self {
		Self::Device { message: err.to_string() }
	}
}
