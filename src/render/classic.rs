use askama::Template;

use super::{LandingTemplate, Page, RenderError, Theme};

/// Bootstrap 5 layout: split hero with the first photo, card gallery for the rest.
pub struct ClassicTemplate;

const THEME: Theme = Theme {
    color: "#007bff",
    loader_background: "linear-gradient(135deg, #007bff 0%, #6f42c1 100%)",
};

#[derive(Template)]
#[template(path = "landing/classic.html")]
struct ClassicPage<'a> {
    page: &'a Page,
    theme: &'a Theme,
}

impl LandingTemplate for ClassicTemplate {
    fn id(&self) -> &str {
        "classic"
    }

    fn name(&self) -> &str {
        "Classic (Bootstrap)"
    }

    fn preview(&self) -> &str {
        "Classic design with Bootstrap styling, cards, gallery, and professional layout"
    }

    fn render(&self, page: &Page) -> Result<String, RenderError> {
        Ok(ClassicPage { page, theme: &THEME }.render()?)
    }
}
