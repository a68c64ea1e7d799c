//! Template catalog: predefined syllabus trees grouped by category.
//!
//! Every selection builds a brand-new tree, so two selections of the same
//! template never share structure.

mod data;

use serde::Serialize;

use crate::syllabus::{Paper, ReplaceOrigin, Syllabus};

/// Identifies one template and knows how to build it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    #[serde(skip)]
    build: fn() -> Vec<Paper>,
}

impl TemplateInfo {
    /// A fresh, fully independent copy of the tree: every topic not started,
    /// every paper and subject expanded.
    pub fn instantiate(&self) -> Vec<Paper> {
        let mut syllabus = Syllabus::new();
        syllabus.replace((self.build)(), ReplaceOrigin::Fresh);
        syllabus.papers().to_vec()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateCategory {
    pub name: &'static str,
    pub templates: Vec<TemplateInfo>,
}

const TEMPLATES: &[TemplateInfo] = &[
    TemplateInfo {
        id: "upsc",
        name: "UPSC Civil Services",
        category: "Competitive Exams",
        build: data::upsc,
    },
    TemplateInfo {
        id: "gate",
        name: "GATE Computer Science",
        category: "Competitive Exams",
        build: data::gate,
    },
    TemplateInfo {
        id: "it-jobs",
        name: "IT Jobs Placement",
        category: "Career & Placement",
        build: data::it_jobs,
    },
    TemplateInfo {
        id: "python",
        name: "Python",
        category: "Programming",
        build: data::python,
    },
    TemplateInfo {
        id: "web-dev",
        name: "Web Development",
        category: "Programming",
        build: data::web_dev,
    },
];

/// The template the app starts with before the user picks one.
pub const DEFAULT_TEMPLATE_ID: &str = "upsc";

/// Read-only registry of built-in templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCatalog;

impl TemplateCatalog {
    pub fn templates(&self) -> &'static [TemplateInfo] {
        TEMPLATES
    }

    pub fn get(&self, id: &str) -> Option<&'static TemplateInfo> {
        TEMPLATES.iter().find(|t| t.id == id)
    }

    /// Templates grouped by category, in catalog order.
    pub fn categories(&self) -> Vec<TemplateCategory> {
        let mut out: Vec<TemplateCategory> = Vec::new();
        for t in TEMPLATES {
            match out.iter_mut().find(|c| c.name == t.category) {
                Some(c) => c.templates.push(*t),
                None => out.push(TemplateCategory {
                    name: t.category,
                    templates: vec![*t],
                }),
            }
        }
        out
    }

    /// Build the named template, or `None` for an unknown id.
    pub fn select(&self, id: &str) -> Option<Vec<Paper>> {
        self.get(id).map(TemplateInfo::instantiate)
    }
}
