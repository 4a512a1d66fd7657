use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A landing page description, persisted under the `admin_projects` key.
///
/// Field names are camelCase on disk and over the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub website_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub product_photos: Vec<String>,
    pub product_title: String,
    pub short_description: String,
    pub full_description: String,
    #[serde(deserialize_with = "price_text")]
    pub price: String,
    pub buy_button_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_ads_script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_tag_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_conversion_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_conversion_label: Option<String>,
    pub template: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra_fields: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable part of a [`Project`]; what the API and the editor form submit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectInput {
    pub website_name: String,
    pub logo: Option<String>,
    pub product_photos: Vec<String>,
    pub product_title: String,
    pub short_description: String,
    pub full_description: String,
    #[serde(deserialize_with = "price_text")]
    pub price: String,
    pub buy_button_text: String,
    pub main_website_url: Option<String>,
    pub google_ads_script: Option<String>,
    pub google_tag_id: Option<String>,
    pub google_conversion_id: Option<String>,
    pub google_conversion_label: Option<String>,
    pub template: String,
    pub extra_fields: Map<String, Value>,
}

impl Project {
    /// Build a fresh record with a new id. Timestamps are overwritten by the store on upsert.
    pub fn create(input: ProjectInput) -> Self {
        let now = Utc::now();
        let mut project = Project {
            id: Uuid::now_v7().to_string(),
            website_name: String::new(),
            logo: None,
            product_photos: Vec::new(),
            product_title: String::new(),
            short_description: String::new(),
            full_description: String::new(),
            price: String::new(),
            buy_button_text: String::new(),
            main_website_url: None,
            google_ads_script: None,
            google_tag_id: None,
            google_conversion_id: None,
            google_conversion_label: None,
            template: String::new(),
            extra_fields: Map::new(),
            created_at: now,
            updated_at: now,
        };
        project.apply(input);
        project
    }

    /// Replace every editable field. `id` and timestamps are left alone.
    pub fn apply(&mut self, input: ProjectInput) {
        self.website_name = input.website_name;
        self.logo = input.logo;
        self.product_photos = input.product_photos;
        self.product_title = input.product_title;
        self.short_description = input.short_description;
        self.full_description = input.full_description;
        self.price = input.price;
        self.buy_button_text = input.buy_button_text;
        self.main_website_url = input.main_website_url;
        self.google_ads_script = input.google_ads_script;
        self.google_tag_id = input.google_tag_id;
        self.google_conversion_id = input.google_conversion_id;
        self.google_conversion_label = input.google_conversion_label;
        self.template = input.template;
        self.extra_fields = input.extra_fields;
    }

    /// The editable fields of this record, e.g. to prefill the editor.
    pub fn to_input(&self) -> ProjectInput {
        ProjectInput {
            website_name: self.website_name.clone(),
            logo: self.logo.clone(),
            product_photos: self.product_photos.clone(),
            product_title: self.product_title.clone(),
            short_description: self.short_description.clone(),
            full_description: self.full_description.clone(),
            price: self.price.clone(),
            buy_button_text: self.buy_button_text.clone(),
            main_website_url: self.main_website_url.clone(),
            google_ads_script: self.google_ads_script.clone(),
            google_tag_id: self.google_tag_id.clone(),
            google_conversion_id: self.google_conversion_id.clone(),
            google_conversion_label: self.google_conversion_label.clone(),
            template: self.template.clone(),
            extra_fields: self.extra_fields.clone(),
        }
    }
}

impl ProjectInput {
    /// Trim identifiers and URLs, drop blank photos, and turn blank optionals into `None`.
    ///
    /// Display text and the two markup fields are kept as typed.
    pub fn normalize(mut self) -> Self {
        self.template = self.template.trim().to_string();
        self.product_photos = self
            .product_photos
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        self.logo = non_blank(self.logo, true);
        self.main_website_url = non_blank(self.main_website_url, true);
        self.google_tag_id = non_blank(self.google_tag_id, true);
        self.google_conversion_id = non_blank(self.google_conversion_id, true);
        self.google_conversion_label = non_blank(self.google_conversion_label, true);
        self.google_ads_script = non_blank(self.google_ads_script, false);
        self
    }

    /// Names of required display fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("websiteName", &self.website_name),
            ("productTitle", &self.product_title),
            ("shortDescription", &self.short_description),
            ("fullDescription", &self.full_description),
            ("price", &self.price),
            ("buyButtonText", &self.buy_button_text),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

fn non_blank(value: Option<String>, trim: bool) -> Option<String> {
    value.and_then(|v| {
        if v.trim().is_empty() {
            None
        } else if trim {
            Some(v.trim().to_string())
        } else {
            Some(v)
        }
    })
}

/// Older records stored `price` as a JSON number; accept both and keep it as text.
fn price_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Price::deserialize(deserializer)? {
        Price::Text(s) => s,
        Price::Number(n) => n.to_string(),
    })
}
