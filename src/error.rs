use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value, json};
use thiserror::Error;

/// Failure inside a single cinema's extraction run.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    #[error("extractor panicked: {0}")]
    Panic(String),
}

/// Everything a program request can end in besides a listing.
#[derive(Error, Debug)]
pub enum ProgramError {
    #[error("{message}")]
    InvalidInput {
        message: String,
        date: Option<String>,
    },

    #[error("cinema `{cinema}` is not supported")]
    UnsupportedSite {
        cinema: String,
        supported: Vec<&'static str>,
    },

    #[error("upstream unavailable (status {status:?})")]
    UpstreamUnavailable {
        status: Option<u16>,
        snippet: String,
    },

    #[error("extraction failed for `{cinema}`: {source}")]
    Extraction {
        cinema: String,
        #[source]
        source: ExtractError,
    },
}

pub type Result<T> = std::result::Result<T, ProgramError>;

impl ProgramError {
    pub fn missing_params() -> Self {
        ProgramError::InvalidInput {
            message: "chybí cinema nebo date".to_string(),
            date: None,
        }
    }

    pub fn invalid_date(date: &str) -> Self {
        ProgramError::InvalidInput {
            message: "neplatné datum".to_string(),
            date: Some(date.to_string()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ProgramError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ProgramError::UnsupportedSite { .. } => StatusCode::NOT_IMPLEMENTED,
            ProgramError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            ProgramError::Extraction { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The `{ "error": ..., ...context }` envelope sent to clients.
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        match self {
            ProgramError::InvalidInput { message, date } => {
                body.insert("error".into(), json!(message));
                if let Some(date) = date {
                    body.insert("date".into(), json!(date));
                }
            }
            ProgramError::UnsupportedSite { cinema, supported } => {
                body.insert("error".into(), json!("kino zatím není podporováno"));
                body.insert("cinema".into(), json!(cinema));
                body.insert("supported".into(), json!(supported));
            }
            ProgramError::UpstreamUnavailable { status, snippet } => {
                body.insert("error".into(), json!("nešlo načíst stránku kina"));
                body.insert("status".into(), json!(status));
                body.insert("snippet".into(), json!(snippet));
            }
            ProgramError::Extraction { cinema, source } => {
                body.insert("error".into(), json!("server error"));
                body.insert("cinema".into(), json!(cinema));
                body.insert("detail".into(), json!(source.to_string()));
            }
        }
        Value::Object(body)
    }
}

impl IntoResponse for ProgramError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        assert_eq!(ProgramError::missing_params().status_code(), StatusCode::BAD_REQUEST);
        let unsupported = ProgramError::UnsupportedSite {
            cinema: "x".into(),
            supported: vec!["atlas"],
        };
        assert_eq!(unsupported.status_code(), StatusCode::NOT_IMPLEMENTED);
        let upstream = ProgramError::UpstreamUnavailable {
            status: Some(503),
            snippet: "busy".into(),
        };
        assert_eq!(upstream.status_code(), StatusCode::BAD_GATEWAY);
        let extraction = ProgramError::Extraction {
            cinema: "atlas".into(),
            source: ExtractError::Panic("boom".into()),
        };
        assert_eq!(extraction.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_body_echoes_status_and_snippet() {
        let err = ProgramError::UpstreamUnavailable {
            status: None,
            snippet: "connection refused".into(),
        };
        assert_eq!(
            err.body(),
            json!({
                "error": "nešlo načíst stránku kina",
                "status": null,
                "snippet": "connection refused"
            })
        );
    }

    #[test]
    fn extraction_body_carries_detail() {
        let err = ProgramError::Extraction {
            cinema: "aero".into(),
            source: ExtractError::Selector {
                selector: "div[".into(),
                message: "unexpected end".into(),
            },
        };
        let body = err.body();
        assert_eq!(body["error"], "server error");
        assert!(body["detail"].as_str().unwrap().contains("div["));
    }
}
