use derive_more::Display;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred, try again later";

#[derive(Debug, Display)]
pub struct UnknownError(BoxedError);

impl std::error::Error for UnknownError {}

impl UnknownError {
    pub fn new(err: BoxedError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Display)]
struct StrError(pub Box<str>);

impl std::error::Error for StrError {}

impl<'a> From<&'a str> for UnknownError {
    fn from(err: &'a str) -> Self {
        UnknownError(Box::new(StrError(Box::from(err))))
    }
}

impl From<sqlx::error::Error> for UnknownError {
    fn from(err: sqlx::error::Error) -> Self {
        Self::new(err.into())
    }
}

pub mod app {
    use derive_more::Display;
    use salvo::{prelude::StatusError, writer::Json, Piece};

    use super::{
        http::ErrorResponse,
        persistence::PersistenceError,
        resource::{NotFoundError, ValidationError},
        UNEXPECTED_ERROR_MESSAGE,
    };

    #[derive(Debug, Display)]
    pub enum ApplicationError {
        Validation(ValidationError),
        NotFound(NotFoundError),
        Persistence(PersistenceError),
    }

    impl std::error::Error for ApplicationError {}

    impl From<ValidationError> for ApplicationError {
        fn from(err: ValidationError) -> Self {
            Self::Validation(err)
        }
    }

    impl From<NotFoundError> for ApplicationError {
        fn from(err: NotFoundError) -> Self {
            Self::NotFound(err)
        }
    }

    impl From<PersistenceError> for ApplicationError {
        fn from(err: PersistenceError) -> Self {
            Self::Persistence(err)
        }
    }

    /// Fallback translation of application errors.
    ///
    /// Not found is rendered as a bad request here; controllers that address
    /// a resource by id map it to `404 Not Found` before reaching this point.
    impl Piece for ApplicationError {
        fn render(self, res: &mut salvo::Response) {
            let (status, body) = match self {
                ApplicationError::Validation(err) => {
                    let status = StatusError::bad_request();
                    let body = ErrorResponse::new(&status, "Validation Failed", err.to_string())
                        .with_fields(err.field_messages());
                    (status, body)
                }
                ApplicationError::NotFound(err) => {
                    let status = StatusError::bad_request();
                    let body = ErrorResponse::new(&status, "Invalid Argument", err.to_string());
                    (status, body)
                }
                ApplicationError::Persistence(err) => {
                    tracing::error!("persistence failure: {err}");
                    let status = StatusError::internal_server_error();
                    let body = ErrorResponse::from_status_error(&status, UNEXPECTED_ERROR_MESSAGE);
                    (status, body)
                }
            };
            res.render(Json(body));
            res.set_status_error(status);
        }
    }
}

pub mod service {
    use derive_more::Display;

    use crate::error::UnknownError;

    #[derive(Debug, Display)]
    pub enum DispatchError {
        #[display(fmt = "Dispatched operation timed out in {_0:?}")]
        Timeout(Option<std::time::Duration>),
        #[display(fmt = "IO error dispatching {_0}")]
        IO(std::io::Error),
        #[display(fmt = "Unknown dispatch error {_0}")]
        Unknown(UnknownError),
    }

    impl std::error::Error for DispatchError {}
}

pub mod persistence {
    use std::io;

    use derive_more::Display;

    use super::{service::DispatchError, UnknownError};

    pub type SqlState = String;

    #[derive(Debug, Display)]
    pub enum PersistenceError {
        #[display(fmt = "database persistence error: SQLSTATE {_0:?}")]
        Database(Option<SqlState>),
        #[display(fmt = "persistence layer connection error: {_0}")]
        Connection(DispatchError),
        #[display(fmt = "PersistenceError data not found")]
        NotFound,
        #[display(fmt = "PersistenceError decoding data")]
        DecodeData,
        #[display(fmt = "PersistenceError data migration")]
        DataMigration,
        #[display(fmt = "unknown persistence error: {_0}")]
        Unknown(UnknownError),
    }

    impl std::error::Error for PersistenceError {}

    type SqlxError = sqlx::error::Error;

    impl From<SqlxError> for PersistenceError {
        fn from(err: SqlxError) -> Self {
            match err {
                SqlxError::Configuration(_) => {
                    Self::Connection(DispatchError::IO(io::ErrorKind::InvalidInput.into()))
                }
                SqlxError::Database(db) => Self::Database(db.code().map(|code| code.into())),
                SqlxError::Io(io) => Self::Connection(DispatchError::IO(io)),
                SqlxError::Tls(_) => {
                    Self::Connection(DispatchError::IO(io::ErrorKind::ConnectionRefused.into()))
                }
                SqlxError::Protocol(msg) => Self::Connection(DispatchError::IO(io::Error::new(
                    io::ErrorKind::InvalidData,
                    msg,
                ))),
                SqlxError::RowNotFound => Self::NotFound,
                SqlxError::TypeNotFound { .. } => Self::DecodeData,
                SqlxError::ColumnIndexOutOfBounds { .. } => Self::DecodeData,
                SqlxError::ColumnNotFound(_) => Self::DecodeData,
                SqlxError::ColumnDecode { .. } => Self::DecodeData,
                SqlxError::Decode(_) => Self::DecodeData,
                SqlxError::PoolTimedOut => Self::Connection(DispatchError::Timeout(None)),
                SqlxError::PoolClosed => {
                    Self::Connection(DispatchError::IO(io::ErrorKind::NotConnected.into()))
                }
                SqlxError::WorkerCrashed => {
                    tracing::error!("sqlx background worker crashed");
                    Self::Connection(DispatchError::Unknown("sqlx worker crashed".into()))
                }
                SqlxError::Migrate(_) => Self::DataMigration,
                _ => PersistenceError::Unknown(err.into()),
            }
        }
    }
}

pub mod resource {
    use std::collections::BTreeMap;

    use derive_more::{Display, Error};
    use serde::{Deserialize, Serialize};

    use crate::base::ResourceID;

    #[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum ValidationErrorKind {
        /// When a required property is missing or blank.
        #[display(fmt = "is required")]
        Required,
        /// Maximum inclusive string length.
        #[display(fmt = "must have at most {_0} characters")]
        MaxLength(u64),
        /// Inclusive lower bound exceeded.
        #[display(fmt = "must be at least {_0}")]
        Minimum(i64),
        /// Inclusive higher bound exceeded.
        #[display(fmt = "must be at most {_0}")]
        Maximum(i64),
    }

    impl std::error::Error for ValidationErrorKind {}

    #[derive(Debug, Error, Clone, PartialEq, Eq, Hash)]
    pub struct ValidationError {
        /// Name of the resource
        pub resource_type: &'static str,
        /// Invalid resource fields
        pub fields: Vec<ValidationFieldError>,
    }

    impl ValidationError {
        pub fn from_resource<R>(fields: Vec<ValidationFieldError>) -> Self
        where
            R: ResourceID,
        {
            Self {
                resource_type: R::resource_id(),
                fields,
            }
        }

        /// Field path to message mapping, as rendered in error responses.
        pub fn field_messages(&self) -> BTreeMap<String, String> {
            self.fields
                .iter()
                .map(|field| (field.path.clone(), field.message()))
                .collect()
        }
    }

    impl std::fmt::Display for ValidationError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_fmt(format_args!("Invalid resource {}", self.resource_type))
        }
    }

    #[derive(Debug, Display, Error, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[display(fmt = "{path}: {kinds:?}")]
    pub struct ValidationFieldError {
        /// Resource field path with invalid value
        pub path: String,
        /// Kinds of validation errors
        pub kinds: Vec<ValidationErrorKind>,
    }

    impl ValidationFieldError {
        pub fn new(path: impl Into<String>, kinds: Vec<ValidationErrorKind>) -> Self {
            Self {
                path: path.into(),
                kinds,
            }
        }

        pub fn message(&self) -> String {
            self.kinds
                .iter()
                .map(|kind| format!("{} {kind}", self.path))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    #[derive(Debug, Display, Clone, Error, PartialEq, Eq, Hash)]
    #[display(fmt = "{resource_type} with id {resource_id} not found")]
    pub struct NotFoundError {
        /// Resource id
        pub resource_id: i64,
        /// Name of the resource
        pub resource_type: &'static str,
    }

    impl NotFoundError {
        pub fn from_resource<R>(resource_id: i64) -> Self
        where
            R: ResourceID,
        {
            Self {
                resource_id,
                resource_type: R::resource_id(),
            }
        }
    }
}

pub mod http {
    use std::collections::BTreeMap;

    use chrono::{DateTime, Utc};
    use derive_more::{Display, Error};
    use salvo::{http::ParseError, prelude::StatusError, writer::Json, Piece, Response};
    use serde::{Deserialize, Serialize};

    use super::resource::NotFoundError;

    #[derive(Debug, Display, Clone, Error)]
    pub enum BadRequest {
        #[display(fmt = "request body is not a valid JSON resource")]
        InvalidContent,
        #[display(fmt = "missing query parameter {_0}")]
        MissingParameter(#[error(not(source))] &'static str),
    }

    impl From<ParseError> for BadRequest {
        fn from(_: ParseError) -> Self {
            BadRequest::InvalidContent
        }
    }

    impl Piece for BadRequest {
        fn render(self, res: &mut Response) {
            let status = StatusError::bad_request();
            res.render(Json(ErrorResponse::new(
                &status,
                "Bad Request",
                self.to_string(),
            )));
            res.set_status_error(status);
        }
    }

    /// Absence of an addressed resource.
    #[derive(Debug, Display, Clone, Error)]
    pub enum NotFound {
        #[display(fmt = "{_0}")]
        Resource(NotFoundError),
        #[display(fmt = "{_0} not found")]
        Query(#[error(not(source))] &'static str),
        #[display(fmt = "path {_0} not found")]
        Route(#[error(not(source))] String),
    }

    impl From<NotFoundError> for NotFound {
        fn from(err: NotFoundError) -> Self {
            Self::Resource(err)
        }
    }

    impl Piece for NotFound {
        fn render(self, res: &mut Response) {
            let status = StatusError::not_found();
            res.render(Json(ErrorResponse::new(&status, "Not Found", self.to_string())));
            res.set_status_error(status);
        }
    }

    /// Uniform error body rendered for every failed request.
    #[derive(Debug, Display, Clone, Error, Serialize, Deserialize)]
    #[display(fmt = "Response error: {status} {error}, {message}")]
    pub struct ErrorResponse {
        pub timestamp: DateTime<Utc>,
        pub status: u16,
        pub error: String,
        pub message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub fields: Option<BTreeMap<String, String>>,
    }

    impl ErrorResponse {
        pub fn new(status: &StatusError, label: &str, message: String) -> Self {
            Self {
                timestamp: Utc::now(),
                status: status.code.as_u16(),
                error: label.into(),
                message,
                fields: None,
            }
        }

        pub fn from_status_error(status: &StatusError, message: &str) -> Self {
            Self::new(status, &status.name, message.into())
        }

        pub fn with_fields(mut self, fields: BTreeMap<String, String>) -> Self {
            self.fields = Some(fields);
            self
        }
    }
}
