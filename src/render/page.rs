use serde_json::json;

use super::escape::{js_string, offer_price, query_value, script_json};
use super::policy::{Field, Markup};
use super::tracking::{Conversion, CtaScript};
use super::{RenderError, RenderOptions};
use crate::models::Project;

/// Placeholder target when the project has no main website.
pub const NO_DESTINATION: &str = "#";

/// Everything a landing template needs, derived once from a project snapshot.
///
/// Plain `String` fields are escaped by the template engine. Fields holding
/// [`Markup`] or pre-quoted script text are inserted verbatim.
#[derive(Debug, Clone)]
pub struct Page {
    pub website_name: String,
    pub product_title: String,
    pub short_description: String,
    pub price: String,
    pub buy_button_text: String,
    pub main_website_url: Option<String>,
    pub destination: String,
    pub logo: Option<String>,
    pub hero_photo: Option<String>,
    pub gallery_photos: Vec<String>,
    pub full_description: Markup,
    pub ads_script: Option<Markup>,
    pub analytics: Option<Analytics>,
    pub structured_data: String,
    pub cta_script: String,
    pub show_loader: bool,
    pub copyright_year: i32,
}

/// gtag.js bootstrap parameters.
#[derive(Debug, Clone)]
pub struct Analytics {
    /// Percent-encoded for the gtag.js URL.
    pub id_query: String,
    pub id_js: String,
}

impl Page {
    pub fn build(project: &Project, options: &RenderOptions) -> Result<Page, RenderError> {
        let main_website_url = project
            .main_website_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_owned);
        let destination = main_website_url
            .clone()
            .unwrap_or_else(|| NO_DESTINATION.to_string());

        let hero_photo = project.product_photos.first().cloned();
        let gallery_photos = project.product_photos.iter().skip(1).cloned().collect();

        let conversion = Conversion::from_parts(
            project.google_conversion_id.as_deref(),
            project.google_conversion_label.as_deref(),
        );
        let cta_script = CtaScript::new(&destination, conversion, options.redirect_delay).to_html()?;

        let analytics = project
            .google_tag_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| Analytics {
                id_query: query_value(id),
                id_js: js_string(id),
            });

        let full_description = Markup::from_field(Field::FullDescription, &project.full_description)
            .ok_or(RenderError::Policy(Field::FullDescription))?;
        let ads_script = match project.google_ads_script.as_deref() {
            Some(script) if !script.trim().is_empty() => Some(
                Markup::from_field(Field::GoogleAdsScript, script)
                    .ok_or(RenderError::Policy(Field::GoogleAdsScript))?,
            ),
            _ => None,
        };

        Ok(Page {
            structured_data: structured_data(project, &destination, hero_photo.as_deref()),
            website_name: project.website_name.clone(),
            product_title: project.product_title.clone(),
            short_description: project.short_description.clone(),
            price: project.price.clone(),
            buy_button_text: project.buy_button_text.clone(),
            main_website_url,
            destination,
            logo: project.logo.clone().filter(|logo| !logo.trim().is_empty()),
            hero_photo,
            gallery_photos,
            full_description,
            ads_script,
            analytics,
            cta_script,
            show_loader: options.redirect_delay.is_some(),
            copyright_year: options.copyright_year,
        })
    }

    pub fn has_photos(&self) -> bool {
        self.hero_photo.is_some()
    }

    pub fn has_gallery(&self) -> bool {
        !self.gallery_photos.is_empty()
    }
}

/// schema.org `Product` description for search engines.
fn structured_data(project: &Project, destination: &str, image: Option<&str>) -> String {
    let mut product = json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": project.product_title,
        "description": project.short_description,
        "brand": {
            "@type": "Brand",
            "name": project.website_name,
        },
        "url": destination,
        "offers": {
            "@type": "Offer",
            "priceCurrency": "USD",
            "price": offer_price(&project.price),
            "availability": "https://schema.org/InStock",
            "url": destination,
        },
    });
    if let Some(image) = image {
        product["image"] = json!(image);
    }
    script_json(&product)
}
