//! Option catalogs for the dependent dropdowns
//!
//! Departments drive both the manager list and the skill list; relations feed
//! the emergency-contact dropdown. The engine only reads these tables. The
//! host page may replace the built-in tables with JSON of the same shape.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::schema::MIN_SKILLS;

/// A manager selectable on step 2; the record stores the `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
    pub id: String,
    pub name: String,
}

/// One department with its dependent option lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    pub managers: Vec<Manager>,
    pub skills: Vec<String>,
}

/// Value/label pair in the shape the select components consume
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsCatalog {
    pub departments: Vec<Department>,
    pub relations: Vec<String>,
}

impl OptionsCatalog {
    /// Parse a catalog from JSON and check it can back a completable form
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a department appears twice,
    /// a department has no managers or fewer skills than step 3 requires, or
    /// the relation list is empty.
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        let catalog: OptionsCatalog =
            serde_json::from_str(s).context("Failed to parse options catalog JSON")?;
        catalog.check().context("Options catalog is incomplete")?;
        Ok(catalog)
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.departments.is_empty() {
            bail!("no departments defined");
        }
        for (i, dept) in self.departments.iter().enumerate() {
            if dept.name.trim().is_empty() {
                bail!("department #{} has an empty name", i + 1);
            }
            if self.departments[..i].iter().any(|d| d.name == dept.name) {
                bail!("department {:?} is defined twice", dept.name);
            }
            if dept.managers.is_empty() {
                bail!("department {:?} has no managers", dept.name);
            }
            if dept.skills.len() < MIN_SKILLS {
                bail!(
                    "department {:?} offers {} skills, at least {} are required",
                    dept.name,
                    dept.skills.len(),
                    MIN_SKILLS
                );
            }
        }
        if self.relations.is_empty() {
            bail!("no relations defined");
        }
        Ok(())
    }

    pub fn department(&self, name: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.name == name)
    }

    pub fn department_names(&self) -> Vec<String> {
        self.departments.iter().map(|d| d.name.clone()).collect()
    }

    /// Managers of `department`; empty when no department is chosen
    pub fn managers_for(&self, department: &str) -> &[Manager] {
        self.department(department)
            .map(|d| d.managers.as_slice())
            .unwrap_or(&[])
    }

    pub fn manager_options(&self, department: &str) -> Vec<SelectOption> {
        self.managers_for(department)
            .iter()
            .map(|m| SelectOption {
                value: m.id.clone(),
                label: m.name.clone(),
            })
            .collect()
    }

    pub fn skills_for(&self, department: &str) -> &[String] {
        self.department(department)
            .map(|d| d.skills.as_slice())
            .unwrap_or(&[])
    }

    pub fn manager_in_department(&self, department: &str, manager_id: &str) -> bool {
        self.managers_for(department).iter().any(|m| m.id == manager_id)
    }

    pub fn skill_in_department(&self, department: &str, skill: &str) -> bool {
        self.skills_for(department).iter().any(|s| s == skill)
    }

    /// Display name for a manager id, if the id is known anywhere
    pub fn manager_name(&self, manager_id: &str) -> Option<&str> {
        self.departments
            .iter()
            .flat_map(|d| d.managers.iter())
            .find(|m| m.id == manager_id)
            .map(|m| m.name.as_str())
    }
}

fn department(name: &str, managers: &[(&str, &str)], skills: &[&str]) -> Department {
    Department {
        name: name.to_string(),
        managers: managers
            .iter()
            .map(|(id, name)| Manager {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

impl Default for OptionsCatalog {
    fn default() -> Self {
        Self {
            departments: vec![
                department(
                    "Engineering",
                    &[
                        ("eng-1", "Alice Johnson"),
                        ("eng-2", "Rahim Uddin"),
                        ("eng-3", "Priya Natarajan"),
                    ],
                    &[
                        "JavaScript",
                        "TypeScript",
                        "React",
                        "Node.js",
                        "Rust",
                        "Python",
                        "SQL",
                        "Docker",
                    ],
                ),
                department(
                    "Marketing",
                    &[("mkt-1", "Carol White"), ("mkt-2", "Diego Ramos")],
                    &[
                        "SEO",
                        "Content Writing",
                        "Social Media",
                        "Google Analytics",
                        "Email Campaigns",
                        "Branding",
                    ],
                ),
                department(
                    "Sales",
                    &[("sales-1", "Bob Smith"), ("sales-2", "Fatima Khan")],
                    &[
                        "Negotiation",
                        "CRM",
                        "Lead Generation",
                        "Cold Calling",
                        "Account Management",
                        "Presentation",
                    ],
                ),
                department(
                    "HR",
                    &[("hr-1", "Dana Lee"), ("hr-2", "Tanvir Hasan")],
                    &[
                        "Recruitment",
                        "Onboarding",
                        "Payroll",
                        "Employee Relations",
                        "Compliance",
                        "Training",
                    ],
                ),
                department(
                    "Finance",
                    &[("fin-1", "Evan Brooks"), ("fin-2", "Mei Chen")],
                    &[
                        "Accounting",
                        "Budgeting",
                        "Financial Analysis",
                        "Excel",
                        "Auditing",
                        "Forecasting",
                    ],
                ),
            ],
            relations: ["Parent", "Sibling", "Spouse", "Friend", "Relative", "Other"]
                .iter()
                .map(|r| r.to_string())
                .collect(),
        }
    }
}
