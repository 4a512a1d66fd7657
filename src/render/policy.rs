//! Substitution policy for every project field that reaches a rendered page.
//!
//! Only two fields are ever inserted without escaping. Everything else is
//! escaped for the context it lands in (HTML text, attribute, JS string,
//! JSON-LD string).

use std::fmt;

/// Project fields that are substituted into a landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    WebsiteName,
    ProductTitle,
    ShortDescription,
    FullDescription,
    Price,
    BuyButtonText,
    MainWebsiteUrl,
    Logo,
    ProductPhoto,
    GoogleAdsScript,
    GoogleTagId,
    GoogleConversionId,
    GoogleConversionLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Escaped for whatever context the value is placed in.
    Escaped,
    /// Pre-formatted HTML authored by the operator, inserted as-is.
    TrustedMarkup,
    /// Raw `<head>` fragment (tracking tags), inserted as-is.
    RawScript,
}

impl Field {
    pub const fn policy(self) -> Policy {
        match self {
            Field::FullDescription => Policy::TrustedMarkup,
            Field::GoogleAdsScript => Policy::RawScript,
            Field::WebsiteName
            | Field::ProductTitle
            | Field::ShortDescription
            | Field::Price
            | Field::BuyButtonText
            | Field::MainWebsiteUrl
            | Field::Logo
            | Field::ProductPhoto
            | Field::GoogleTagId
            | Field::GoogleConversionId
            | Field::GoogleConversionLabel => Policy::Escaped,
        }
    }
}

/// A field value cleared for verbatim insertion.
///
/// The only way to build one is [`Markup::from_field`], so an escaped field
/// cannot end up unescaped in a template.
#[derive(Debug, Clone, PartialEq)]
pub struct Markup(String);

impl Markup {
    pub fn from_field(field: Field, value: &str) -> Option<Markup> {
        match field.policy() {
            Policy::TrustedMarkup | Policy::RawScript => Some(Markup(value.to_owned())),
            Policy::Escaped => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
