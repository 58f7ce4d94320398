pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Http(#[from] reqwest::Error),
	#[error("Failed to decode store response: {message}")]
	Decode { message: String },
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
}
