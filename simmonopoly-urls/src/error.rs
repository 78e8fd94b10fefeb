//! Error types for pattern parsing and routing

/// A route pattern that cannot be parsed
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern must start with '/': {pattern}")]
    MissingLeadingSlash { pattern: String },

    #[error("unterminated parameter in pattern: {pattern}")]
    Unterminated { pattern: String },

    #[error("unexpected '>' in pattern: {pattern}")]
    UnexpectedClose { pattern: String },

    #[error("invalid parameter name '{name}' in pattern: {pattern}")]
    InvalidName { pattern: String, name: String },

    #[error("unknown converter '{converter}' in pattern: {pattern}")]
    UnknownConverter { pattern: String, converter: String },

    #[error("parameter '{name}' appears twice in pattern: {pattern}")]
    DuplicateParam { pattern: String, name: String },
}

/// Failure to route a request or reverse a route name
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("no route matches path: {path}")]
    NotFound { path: String },

    #[error("login required for {path}, redirecting to {redirect}")]
    Unauthorized { path: String, redirect: String },

    #[error("no route named '{name}' accepts the given parameters")]
    NoReverseMatch { name: String },
}

impl RouteError {
    /// HTTP status the surrounding server should answer with
    pub fn status(&self) -> u16 {
        match self {
            RouteError::NotFound { .. } => 404,
            RouteError::Unauthorized { .. } => 302,
            RouteError::NoReverseMatch { .. } => 500,
        }
    }
}
