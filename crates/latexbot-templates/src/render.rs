use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

use latexbot_utils::error::TemplateError;

/// `<<name>>` with a lowercase snake-case name. Anything else, such as TikZ
/// `<<->>` arrows, is plain text.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<<([a-z_]+)>>").expect("placeholder pattern is valid"));

/// Values substituted into an asset, labelled with the template they belong to.
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    template: String,
    values: BTreeMap<String, String>,
}

impl TemplateVars {
    #[must_use]
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }
}

/// Substitute every `<<name>>` in `text`.
///
/// Fails on the first placeholder with no matching variable.
pub fn render_template(text: &str, vars: &TemplateVars) -> Result<String, TemplateError> {
    if let Some(missing) = PLACEHOLDER
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .find(|name| vars.get(name).is_none())
    {
        return Err(TemplateError::UnknownPlaceholder {
            template: vars.template.clone(),
            name: missing,
        });
    }

    Ok(PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| {
            vars.get(&caps[1]).unwrap_or_default().to_string()
        })
        .into_owned())
}
