use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop the tool before the roster is traversed
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Unknown roster name: {input}")]
    UnknownName { input: String },

    #[error("Failed to create avatars directory {path}: {source}")]
    AvatarsDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Download or decode failure for a single image
#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Anything that goes wrong between a decoded image and a written avatar
#[derive(Debug, Error)]
pub(crate) enum ProcessError {
    #[error("model unavailable at {path}: {message}")]
    Model { path: PathBuf, message: String },

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("failed to encode avatar: {0}")]
    Encode(#[from] image::ImageError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Failure while rewriting a persona record
#[derive(Debug, Error)]
pub(crate) enum RecordError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("\"identity\" in {path} is not an object")]
    IdentityNotObject { path: PathBuf },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_display_unknown_name() {
        let e = AppError::UnknownName {
            input: "Nobody".to_string(),
        };
        assert_eq!(e.to_string(), "Unknown roster name: Nobody");
    }

    #[test]
    fn process_error_model_display() {
        let e = ProcessError::Model {
            path: PathBuf::from("/models/u2net.onnx"),
            message: "No such file".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "model unavailable at /models/u2net.onnx: No such file"
        );
    }

    #[test]
    fn record_error_identity_display() {
        let e = RecordError::IdentityNotObject {
            path: PathBuf::from("personas/lex-fridman.json"),
        };
        assert_eq!(
            e.to_string(),
            r#""identity" in personas/lex-fridman.json is not an object"#
        );
    }

    #[test]
    fn process_error_inference_display() {
        let e = ProcessError::Inference("empty output".to_string());
        assert_eq!(e.to_string(), "inference failed: empty output");
    }
}
