//! Template rendering for the generated version files.
//!
//! Templates use `{{ name }}` placeholders. Only flat substitution is
//! supported; unknown names render as an empty string.

use log::{debug, warn};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::VersionTuple;
use crate::error::{Result, VerstampError};

const PLACEHOLDER_PATTERN: &str = r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}";

/// Extensions whose output is markup and gets HTML-escaped values
const AUTOESCAPE_EXTENSIONS: [&str; 3] = ["html", "htm", "xml"];

/// One file to generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateJob {
    /// Template path relative to the template root
    pub template: PathBuf,
    /// Where the rendered text is written
    pub output: PathBuf,
}

impl TemplateJob {
    pub fn new(template: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        TemplateJob {
            template: template.into(),
            output: output.into(),
        }
    }

    /// Build the job list from configuration, resolving outputs against
    /// `repo_root`
    pub fn from_config(config: &Config, repo_root: &Path) -> Vec<TemplateJob> {
        config
            .templates
            .iter()
            .map(|entry| {
                let output = entry.output.as_ref().unwrap_or(&entry.path);
                TemplateJob::new(&entry.path, repo_root.join(output))
            })
            .collect()
    }

    /// Whether substituted values are HTML-escaped for this template
    pub fn autoescape(&self) -> bool {
        self.template
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                AUTOESCAPE_EXTENSIONS
                    .iter()
                    .any(|candidate| ext.eq_ignore_ascii_case(candidate))
            })
            .unwrap_or(false)
    }
}

/// Variables available to templates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    vars: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) {
        self.vars.insert(name.into(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

impl From<&VersionTuple> for TemplateContext {
    fn from(version: &VersionTuple) -> Self {
        let mut context = TemplateContext::new();
        context.insert("ver_major", version.major);
        context.insert("ver_minor", version.minor);
        context.insert("ver_patch", version.patch);
        context.insert("ver_build", version.build);
        context.insert("tag", &version.tag);
        context.insert("semver", version.semver());
        context.insert("is_release", version.is_release);
        context
    }
}

/// Loads templates from a root directory and renders them
pub struct TemplateRenderer {
    root: PathBuf,
    placeholder: Regex,
}

impl TemplateRenderer {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let placeholder = Regex::new(PLACEHOLDER_PATTERN)
            .map_err(|e| VerstampError::config(format!("Invalid placeholder pattern: {}", e)))?;

        Ok(TemplateRenderer {
            root: root.into(),
            placeholder,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read a template relative to the root
    pub fn load(&self, template: &Path) -> Result<String> {
        let path = self.root.join(template);
        debug!("Loading template {}", path.display());

        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => VerstampError::TemplateNotFound(path),
            _ => VerstampError::Io(e),
        })
    }

    /// Substitute placeholders in `source`
    pub fn render_str(&self, source: &str, context: &TemplateContext, escape: bool) -> String {
        self.placeholder
            .replace_all(source, |caps: &Captures| {
                let name = &caps[1];
                match context.get(name) {
                    Some(value) if escape => escape_html(value),
                    Some(value) => value.to_string(),
                    None => {
                        warn!("Template variable '{}' is undefined", name);
                        String::new()
                    }
                }
            })
            .into_owned()
    }

    /// Load and render the template of `job`
    ///
    /// A single trailing newline of the template is dropped.
    pub fn render(&self, job: &TemplateJob, context: &TemplateContext) -> Result<String> {
        let source = self.load(&job.template)?;
        let source = strip_trailing_newline(&source);
        Ok(self.render_str(source, context, job.autoescape()))
    }
}

/// Write rendered text to the job's output, replacing any existing content
///
/// Parent directories are not created.
pub fn write_output(job: &TemplateJob, content: &str) -> Result<()> {
    fs::write(&job.output, content).map_err(|source| VerstampError::Write {
        path: job.output.clone(),
        source,
    })
}

fn strip_trailing_newline(source: &str) -> &str {
    source
        .strip_suffix("\r\n")
        .or_else(|| source.strip_suffix('\n'))
        .unwrap_or(source)
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
