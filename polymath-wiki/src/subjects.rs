use std::fmt;

use polymath_common::{PolymathError, Result};
use polymath_config::SubjectSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubjectId(pub u32);

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A scientist the user can pick from the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
}

/// Fixed set of subjects, ordered by id. Built once at startup.
#[derive(Debug, Clone)]
pub struct SubjectRegistry {
    subjects: Vec<Subject>,
}

impl SubjectRegistry {
    /// Validate and order `specs`: ids must be positive and unique, names
    /// non-blank, and at least one subject must exist.
    pub fn from_specs(specs: &[SubjectSpec]) -> Result<Self> {
        if specs.is_empty() {
            return Err(PolymathError::Config("no subjects configured".into()));
        }

        let mut subjects: Vec<Subject> = Vec::with_capacity(specs.len());
        for spec in specs {
            if spec.id == 0 {
                return Err(PolymathError::Config(format!(
                    "subject `{}` has id 0; ids start at 1",
                    spec.name
                )));
            }
            let name = spec.name.trim();
            if name.is_empty() {
                return Err(PolymathError::Config(format!(
                    "subject {} has a blank name",
                    spec.id
                )));
            }
            if subjects.iter().any(|s| s.id.0 == spec.id) {
                return Err(PolymathError::Config(format!(
                    "subject id {} is used more than once",
                    spec.id
                )));
            }
            subjects.push(Subject {
                id: SubjectId(spec.id),
                name: name.to_string(),
            });
        }
        subjects.sort_by_key(|s| s.id);

        Ok(Self { subjects })
    }

    pub fn get(&self, id: SubjectId) -> Result<&Subject> {
        self.subjects
            .iter()
            .find(|s| s.id == id)
            .ok_or(PolymathError::UnknownSubject(id.0))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter()
    }
}
