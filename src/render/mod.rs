//! Landing page rendering: a project snapshot in, a standalone HTML document out.
//!
//! Rendering is pure. The same project and [`RenderOptions`] always produce the
//! same bytes, nothing is fetched, and the project is only borrowed.

pub mod classic;
pub mod escape;
pub mod modern;
pub mod page;
pub mod policy;
pub mod registry;
pub mod tracking;

use std::sync::LazyLock;
use std::time::Duration;

use chrono::{Datelike, Utc};
use regex::Regex;

pub use page::Page;
pub use registry::{TemplateInfo, TemplateRegistry};

use policy::Field;

/// Inputs to rendering that do not come from the project itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Show a full-screen loader and wait this long before navigating away.
    pub redirect_delay: Option<Duration>,
    pub copyright_year: i32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            redirect_delay: None,
            copyright_year: Utc::now().year(),
        }
    }
}

/// Per-variant colours used by the shared head partials.
pub struct Theme {
    pub color: &'static str,
    pub loader_background: &'static str,
}

/// A visual variant of the landing page.
pub trait LandingTemplate: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn preview(&self) -> &str;
    fn render(&self, page: &Page) -> Result<String, RenderError>;
}

#[derive(Debug)]
pub enum RenderError {
    TemplateNotFound(String),
    Policy(Field),
    Template(askama::Error),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::TemplateNotFound(id) => write!(f, "Template not found: {id}"),
            RenderError::Policy(field) => write!(f, "Field {field:?} cannot be inserted verbatim"),
            RenderError::Template(err) => write!(f, "Template error: {err}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<askama::Error> for RenderError {
    fn from(err: askama::Error) -> Self {
        RenderError::Template(err)
    }
}

static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Download name for a rendered page: `"Acme Store!"` -> `acme_store_index.html`.
pub fn download_file_name(website_name: &str) -> String {
    let lowered = website_name.to_lowercase();
    let stem = NON_ALNUM_RE.replace_all(&lowered, "_");
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "site_index.html".to_string()
    } else {
        format!("{stem}_index.html")
    }
}
