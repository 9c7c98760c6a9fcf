//! Severity and decoration classification for requests.
//!
//! Method and status are classified independently. The status result wins
//! whenever one exists, since it reflects the outcome rather than the intent.

use crate::Level;
use http::Method;

/// Decoration class of the request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodClass {
    /// `POST` and `PUT`.
    Write,
    /// `DELETE`.
    Delete,
    /// `GET` and every other method.
    Read,
}

/// Decoration class of the response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// 500 and above.
    ServerError,
    /// 400 to 499.
    ClientError,
    /// 100 to 399.
    Success,
}

/// Result of classifying one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Effective level of the record.
    pub level: Level,
    /// Method decoration class.
    pub method: MethodClass,
    /// Status decoration class, absent for statuses below 100.
    pub status: Option<StatusClass>,
}

/// Classifies a request method.
#[must_use]
pub fn classify_method(method: &Method) -> (Level, MethodClass) {
    if *method == Method::POST || *method == Method::PUT {
        (Level::Info, MethodClass::Write)
    } else if *method == Method::DELETE {
        (Level::Warning, MethodClass::Delete)
    } else {
        (Level::Info, MethodClass::Read)
    }
}

/// Classifies a response status code.
///
/// Returns `None` below 100, which leaves the method level in effect.
#[must_use]
pub const fn classify_status(status: u16) -> Option<(Level, StatusClass)> {
    if status >= 500 {
        Some((Level::Error, StatusClass::ServerError))
    } else if status >= 400 {
        Some((Level::Warning, StatusClass::ClientError))
    } else if status >= 100 {
        Some((Level::Info, StatusClass::Success))
    } else {
        None
    }
}

/// Classifies a request by method and, when known, final status.
#[must_use]
pub fn classify(method: &Method, status: Option<u16>) -> Classification {
    let (method_level, method_class) = classify_method(method);
    match status.and_then(classify_status) {
        Some((level, status_class)) => Classification {
            level,
            method: method_class,
            status: Some(status_class),
        },
        None => Classification {
            level: method_level,
            method: method_class,
            status: None,
        },
    }
}
