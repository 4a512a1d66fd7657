//! Client-side call-to-action behaviour shared by every landing template.
//!
//! `trackAndRedirect()` reports a conversion (when configured) and then
//! navigates; `redirectToMain()` only navigates. Both end up in the same
//! `navigateToMain()`, so the variants cannot disagree on where a click goes.

use std::time::Duration;

use askama::Template;

use super::escape::js_string;
use super::RenderError;

/// Google Ads conversion target, `send_to: "<id>/<label>"`.
#[derive(Debug, Clone, Copy)]
pub struct Conversion<'a> {
    pub id: &'a str,
    pub label: &'a str,
}

impl<'a> Conversion<'a> {
    /// Both parts are needed; one without the other disables tracking.
    pub fn from_parts(id: Option<&'a str>, label: Option<&'a str>) -> Option<Self> {
        match (id, label) {
            (Some(id), Some(label)) if !id.is_empty() && !label.is_empty() => {
                Some(Conversion { id, label })
            }
            _ => None,
        }
    }
}

#[derive(Template)]
#[template(path = "landing/cta_script.html")]
pub struct CtaScript {
    destination: String,
    send_to: Option<String>,
    delay_ms: Option<u128>,
}

impl CtaScript {
    pub fn new(destination: &str, conversion: Option<Conversion<'_>>, delay: Option<Duration>) -> Self {
        CtaScript {
            destination: js_string(destination),
            send_to: conversion.map(|c| js_string(&format!("{}/{}", c.id, c.label))),
            delay_ms: delay.map(|d| d.as_millis()),
        }
    }

    pub fn to_html(&self) -> Result<String, RenderError> {
        Ok(self.render()?)
    }
}
