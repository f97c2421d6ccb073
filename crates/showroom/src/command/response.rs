//! Command responses and the pages they lead to.

use serde::Serialize;

use crate::car::Car;

/// Pages a command can send the caller to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PagePath {
    /// Catalogue listing.
    Cars,
    /// A single car.
    Car,
    /// Outcome of an operation.
    Result,
    /// Something went wrong.
    Error,
}

impl PagePath {
    /// The page's path.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Cars => "/pages/cars",
            Self::Car => "/pages/car",
            Self::Result => "/pages/result",
            Self::Error => "/pages/error",
        }
    }
}

impl std::fmt::Display for PagePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// How the caller should reach the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// Render the page as the answer to this request.
    Forward,
    /// Send the caller to the page with a fresh request.
    Redirect,
}

/// Data a command hands to the page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Model {
    /// Nothing to show.
    #[default]
    Empty,
    /// A single car.
    Car(Car),
    /// A list of cars.
    Cars(Vec<Car>),
    /// Outcome of a delete.
    Deleted {
        /// The id that was asked for.
        id: i64,
        /// Whether a row was actually removed.
        removed: bool,
    },
    /// An informational message.
    Message(String),
    /// A failure description for the error page.
    Failure(String),
}

/// What a command answers with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResponse {
    kind: ResponseKind,
    page: PagePath,
    model: Model,
}

impl CommandResponse {
    /// Forward to `page`.
    #[must_use]
    pub fn forward(page: PagePath) -> Self {
        Self {
            kind: ResponseKind::Forward,
            page,
            model: Model::Empty,
        }
    }

    /// Redirect to `page`.
    #[must_use]
    pub fn redirect(page: PagePath) -> Self {
        Self {
            kind: ResponseKind::Redirect,
            page,
            model: Model::Empty,
        }
    }

    /// Attach data for the page.
    #[must_use]
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Forward or redirect.
    #[must_use]
    pub fn kind(&self) -> ResponseKind {
        self.kind
    }

    /// Target page.
    #[must_use]
    pub fn page(&self) -> PagePath {
        self.page
    }

    /// Data for the page.
    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Whether this response leads to the error page.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.page == PagePath::Error
    }
}
