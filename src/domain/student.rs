use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    store::{Entity, RecordError, RecordResult, RecordView},
    validation::{self, EMPTY_UPDATE_MESSAGE, GRADE_COUNT},
};

/// Mean at or above which a student passes.
pub const PASS_THRESHOLD: f64 = 6.0;
/// Mean at or above which a student is distinguished.
pub const DISTINCTION_THRESHOLD: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    pub name: String,
    pub grades: [f64; GRADE_COUNT],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub grades: Option<[f64; GRADE_COUNT]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeStatus {
    Failed,
    Passed,
    Distinguished,
}

impl GradeStatus {
    /// Classify an unrounded mean.
    pub fn from_mean(mean: f64) -> Self {
        if mean >= DISTINCTION_THRESHOLD {
            Self::Distinguished
        } else if mean >= PASS_THRESHOLD {
            Self::Passed
        } else {
            Self::Failed
        }
    }

    pub fn parse(raw: &str) -> RecordResult<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "failed" => Ok(Self::Failed),
            "passed" => Ok(Self::Passed),
            "distinguished" => Ok(Self::Distinguished),
            _ => Err(RecordError::validation(
                "status must be one of: failed, passed, distinguished",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeSummary {
    /// Mean rounded to two decimals, for display only.
    pub average: f64,
    pub status: GradeStatus,
}

impl Student {
    pub fn mean(&self) -> f64 {
        self.grades.iter().sum::<f64>() / GRADE_COUNT as f64
    }
}

impl Entity for Student {
    type Patch = StudentPatch;
    type Derived = GradeSummary;
    const LABEL: &'static str = "student";

    fn unique_name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn apply(&mut self, patch: StudentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(grades) = patch.grades {
            self.grades = grades;
        }
    }

    fn derive(&self) -> GradeSummary {
        let mean = self.mean();
        GradeSummary {
            average: round_two(mean),
            status: GradeStatus::from_mean(mean),
        }
    }
}

fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct StudentPayload {
    pub name: Option<Value>,
    pub grades: Option<Value>,
}

impl From<Map<String, Value>> for StudentPayload {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            name: body.remove("name"),
            grades: body.remove("grades"),
        }
    }
}

impl StudentPayload {
    pub fn into_student(self) -> RecordResult<Student> {
        Ok(Student {
            name: validation::required_name(self.name.as_ref(), "name")?,
            grades: validation::grade_triplet(self.grades.as_ref(), "grades")?,
        })
    }

    pub fn into_patch(self) -> RecordResult<StudentPatch> {
        let patch = StudentPatch {
            name: self
                .name
                .as_ref()
                .map(|value| validation::required_name(Some(value), "name"))
                .transpose()?,
            grades: self
                .grades
                .as_ref()
                .map(|value| validation::grade_triplet(Some(value), "grades"))
                .transpose()?,
        };

        if patch == StudentPatch::default() {
            return Err(RecordError::validation(EMPTY_UPDATE_MESSAGE));
        }
        Ok(patch)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StudentQuery {
    pub status: Option<String>,
    pub name: Option<String>,
}

impl StudentQuery {
    pub fn into_filter(self) -> RecordResult<impl Fn(&RecordView<Student>) -> bool> {
        let status = self.status.as_deref().map(GradeStatus::parse).transpose()?;
        let name = self.name.filter(|name| !name.trim().is_empty());

        Ok(move |view: &RecordView<Student>| {
            status.is_none_or(|status| view.derived.status == status)
                && name
                    .as_deref()
                    .is_none_or(|needle| validation::name_contains(&view.fields().name, needle))
        })
    }
}
