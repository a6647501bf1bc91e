/// Errors surfaced by the structured and unstructured paths.
///
/// Engine errors map into this taxonomy: text-length violations mean the
/// dataset's alphabet cannot cover the requested domain, and construction
/// failures (bad key sizes, malformed alphabets) surface as malformed
/// input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("character {0:?} is not in the alphabet or the passthrough set")]
    InvalidCharacter(char),
    #[error("format template does not match the output string")]
    FormatMismatch,
    #[error("tweak length {len} outside the permitted range {min}..={max}")]
    TweakLength { len: usize, min: usize, max: usize },
    #[error("output alphabet too small: {0}")]
    AlphabetTooSmall(String),
    #[error("unsupported encryption algorithm {0:?}")]
    Unsupported(String),
    #[error("no data key cached for key number {0}")]
    KeyUnavailable(usize),
    #[error("search needs every historical key, but the cache holds only the current one")]
    SearchRequiresAllKeys,
    #[error("authentication tag mismatch")]
    AuthFailed,
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<ffx::Error> for Error {
    fn from(e: ffx::Error) -> Self {
        use ffx::Error as Engine;
        match e {
            Engine::InvalidCharacter(c) => Error::InvalidCharacter(c),
            Engine::TweakLength { len, min, max } => {
                Error::TweakLength { len, min, max }
            }
            Engine::TextLength { .. } | Engine::Radix(_) => {
                Error::AlphabetTooSmall(e.to_string())
            }
            Engine::DuplicateCharacter(_)
            | Engine::DigitRange(..)
            | Engine::Overflow(_)
            | Engine::KeyLength(_) => Error::MalformedInput(e.to_string()),
        }
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error::MalformedInput(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::MalformedInput(e.to_string())
    }
}

impl From<rsa::errors::Error> for Error {
    fn from(e: rsa::errors::Error) -> Self {
        Error::MalformedInput(e.to_string())
    }
}

impl From<rsa::pkcs8::Error> for Error {
    fn from(e: rsa::pkcs8::Error) -> Self {
        Error::MalformedInput(e.to_string())
    }
}
