//! Request routing.
//!
//! Routes are a fixed, ordered table of `(method, pattern) -> handler`.
//! The first entry whose method and pattern both match wins; anything left
//! over is answered with 404. The only wildcard is a prefix capture: the
//! rest of the path after a literal prefix, slashes included, is handed to
//! the handler verbatim.
//!
//! | Method | Pattern          | Handler     |
//! |--------|------------------|-------------|
//! | GET    | `/` (exact)      | `Root`      |
//! | GET    | `/echo/` prefix  | `Echo`      |
//! | GET    | `/user-agent` prefix | `UserAgent` |
//! | GET    | `/files/` prefix | `ReadFile`  |
//! | POST   | `/files/` prefix | `WriteFile` |

pub mod files;

use std::path::PathBuf;

use crate::config::Config;
use crate::http::headers::Headers;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};

pub use files::FileStore;

/// How a route matches the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Exact(&'static str),
    Prefix(&'static str),
}

impl Pattern {
    /// Returns the captured remainder if `path` matches.
    ///
    /// An exact match captures the empty string.
    pub fn capture<'a>(&self, path: &'a str) -> Option<&'a str> {
        match self {
            Pattern::Exact(p) => (path == *p).then_some(""),
            Pattern::Prefix(p) => path.strip_prefix(p),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Root,
    Echo,
    UserAgent,
    ReadFile,
    WriteFile,
}

#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub method: Method,
    pub pattern: Pattern,
    pub handler: Handler,
}

pub const ROUTES: &[Route] = &[
    Route {
        method: Method::GET,
        pattern: Pattern::Exact("/"),
        handler: Handler::Root,
    },
    Route {
        method: Method::GET,
        pattern: Pattern::Prefix("/echo/"),
        handler: Handler::Echo,
    },
    Route {
        method: Method::GET,
        pattern: Pattern::Prefix("/user-agent"),
        handler: Handler::UserAgent,
    },
    Route {
        method: Method::GET,
        pattern: Pattern::Prefix("/files/"),
        handler: Handler::ReadFile,
    },
    Route {
        method: Method::POST,
        pattern: Pattern::Prefix("/files/"),
        handler: Handler::WriteFile,
    },
];

/// Finds the route for `request` along with the captured path remainder.
pub fn match_route(request: &Request) -> Option<(Handler, &str)> {
    let method = request.method?;

    ROUTES
        .iter()
        .filter(|route| route.method == method)
        .find_map(|route| {
            route
                .pattern
                .capture(&request.path)
                .map(|rest| (route.handler, rest))
        })
}

/// Dispatches parsed requests to their handlers.
///
/// Holds no mutable state; one instance is shared by every connection.
#[derive(Debug, Clone, Default)]
pub struct Router {
    files: FileStore,
}

impl Router {
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self {
            files: FileStore::new(directory),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.directory.clone())
    }

    pub fn files(&self) -> &FileStore {
        &self.files
    }

    /// Produces the (not yet encoded) response for `request`.
    ///
    /// An inbound `User-Agent` is echoed as the first response header;
    /// headers set by the handler come after it.
    pub async fn dispatch(&self, request: &Request) -> Response {
        let mut response = match match_route(request) {
            Some((handler, rest)) => self.handle(handler, rest, request).await,
            None => {
                tracing::debug!(
                    method = ?request.method,
                    path = %request.path,
                    "No route matched"
                );
                Response::not_found()
            }
        };

        if let Some(user_agent) = request.header("User-Agent") {
            let mut headers = Headers::new();
            headers.insert("User-Agent", user_agent);
            for (k, v) in response.headers.iter() {
                headers.insert(k, v);
            }
            response.headers = headers;
        }

        response
    }

    async fn handle(&self, handler: Handler, rest: &str, request: &Request) -> Response {
        match handler {
            Handler::Root => Response::empty(StatusCode::Ok),
            Handler::Echo => Response::text(rest),
            Handler::UserAgent => Response::text(request.header("User-Agent").unwrap_or_default()),
            Handler::ReadFile => self.read_file(rest).await,
            Handler::WriteFile => self.write_file(rest, request).await,
        }
    }

    async fn read_file(&self, name: &str) -> Response {
        match self.files.read(name).await {
            Ok(contents) => Response::octets(contents),
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "Failed to read file");
                Response::not_found()
            }
        }
    }

    async fn write_file(&self, name: &str, request: &Request) -> Response {
        let Some(length) = request.declared_length() else {
            tracing::debug!(
                file = %name,
                content_length = ?request.header("Content-Length"),
                "Rejecting upload without a positive Content-Length"
            );
            return Response::bad_request();
        };

        let Some(contents) = request.body.get(..length) else {
            tracing::debug!(
                file = %name,
                declared = length,
                received = request.body.len(),
                "Upload body shorter than Content-Length"
            );
            return Response::bad_request();
        };

        match self.files.write(name, contents).await {
            Ok(()) => {
                tracing::info!(file = %name, bytes = length, "Stored upload");
                Response::created()
            }
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "Failed to write file");
                Response::not_found()
            }
        }
    }
}
