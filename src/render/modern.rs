use askama::Template;

use super::{LandingTemplate, Page, RenderError, Theme};

/// Tailwind layout: gradient hero, featured photo with a grid of the rest.
pub struct ModernTemplate;

const THEME: Theme = Theme {
    color: "#667eea",
    loader_background: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
};

#[derive(Template)]
#[template(path = "landing/modern.html")]
struct ModernPage<'a> {
    page: &'a Page,
    theme: &'a Theme,
}

impl LandingTemplate for ModernTemplate {
    fn id(&self) -> &str {
        "modern"
    }

    fn name(&self) -> &str {
        "Modern (Tailwind)"
    }

    fn preview(&self) -> &str {
        "Modern design with gradient hero, navigation, features section, and enhanced layout"
    }

    fn render(&self, page: &Page) -> Result<String, RenderError> {
        Ok(ModernPage { page, theme: &THEME }.render()?)
    }
}
