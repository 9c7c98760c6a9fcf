//! Presentation of method and status tokens.

use crate::{MethodClass, StatusClass};

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[39m";

/// Renders method and status tokens according to their class.
pub trait Decorator: Send + Sync {
    /// Renders the request method.
    fn method(&self, token: &str, class: MethodClass) -> String;

    /// Renders the response status.
    fn status(&self, token: &str, class: StatusClass) -> String;
}

/// Leaves tokens untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainDecorator;

impl Decorator for PlainDecorator {
    fn method(&self, token: &str, _class: MethodClass) -> String {
        token.to_string()
    }

    fn status(&self, token: &str, _class: StatusClass) -> String {
        token.to_string()
    }
}

/// Wraps tokens in ANSI foreground colors.
///
/// Writes are yellow, deletes red, everything else green; server errors are
/// red, client errors yellow, the rest green.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiDecorator;

impl AnsiDecorator {
    fn paint(color: &str, token: &str) -> String {
        format!("{color}{token}{RESET}")
    }
}

impl Decorator for AnsiDecorator {
    fn method(&self, token: &str, class: MethodClass) -> String {
        let color = match class {
            MethodClass::Write => YELLOW,
            MethodClass::Delete => RED,
            MethodClass::Read => GREEN,
        };
        Self::paint(color, token)
    }

    fn status(&self, token: &str, class: StatusClass) -> String {
        let color = match class {
            StatusClass::ServerError => RED,
            StatusClass::ClientError => YELLOW,
            StatusClass::Success => GREEN,
        };
        Self::paint(color, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_is_identity() {
        let d = PlainDecorator;
        assert_eq!(d.method("DELETE", MethodClass::Delete), "DELETE");
        assert_eq!(d.status("500", StatusClass::ServerError), "500");
    }

    #[test]
    fn test_ansi_method_colors() {
        let d = AnsiDecorator;
        assert_eq!(d.method("POST", MethodClass::Write), "\x1b[33mPOST\x1b[39m");
        assert_eq!(d.method("DELETE", MethodClass::Delete), "\x1b[31mDELETE\x1b[39m");
        assert_eq!(d.method("GET", MethodClass::Read), "\x1b[32mGET\x1b[39m");
    }

    #[test]
    fn test_ansi_status_colors() {
        let d = AnsiDecorator;
        assert_eq!(d.status("503", StatusClass::ServerError), "\x1b[31m503\x1b[39m");
        assert_eq!(d.status("404", StatusClass::ClientError), "\x1b[33m404\x1b[39m");
        assert_eq!(d.status("200", StatusClass::Success), "\x1b[32m200\x1b[39m");
    }
}
