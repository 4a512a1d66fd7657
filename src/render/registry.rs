use std::sync::Arc;

use serde::Serialize;

use super::classic::ClassicTemplate;
use super::modern::ModernTemplate;
use super::{LandingTemplate, Page, RenderError, RenderOptions};
use crate::models::Project;

/// Descriptor shown to the operator when picking a template.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    pub preview: String,
}

/// Ordered lookup from template id to renderer.
pub struct TemplateRegistry {
    templates: Vec<Arc<dyn LandingTemplate>>,
    options: RenderOptions,
}

impl TemplateRegistry {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            templates: Vec::new(),
            options,
        }
    }

    /// Registry holding the built-in variants, modern first.
    pub fn builtin(options: RenderOptions) -> Self {
        let mut registry = Self::new(options);
        registry.register(Arc::new(ModernTemplate));
        registry.register(Arc::new(ClassicTemplate));
        registry
    }

    /// Add a template. A template with the same id is replaced in place.
    pub fn register(&mut self, template: Arc<dyn LandingTemplate>) {
        match self.templates.iter().position(|t| t.id() == template.id()) {
            Some(index) => self.templates[index] = template,
            None => self.templates.push(template),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn LandingTemplate>> {
        self.templates.iter().find(|t| t.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn list(&self) -> Vec<TemplateInfo> {
        self.templates
            .iter()
            .map(|t| TemplateInfo {
                id: t.id().to_string(),
                name: t.name().to_string(),
                preview: t.preview().to_string(),
            })
            .collect()
    }

    /// Render with the template the project selects.
    pub fn render(&self, project: &Project) -> Result<String, RenderError> {
        self.render_as(project, &project.template)
    }

    /// Render with an explicit template id, ignoring `project.template`.
    pub fn render_as(&self, project: &Project, template_id: &str) -> Result<String, RenderError> {
        let template = self
            .get(template_id)
            .ok_or_else(|| RenderError::TemplateNotFound(template_id.to_string()))?;
        let page = Page::build(project, &self.options)?;
        template.render(&page)
    }
}
