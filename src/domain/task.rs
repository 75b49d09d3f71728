use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    store::{Entity, RecordError, RecordResult, RecordView},
    validation::{self, EMPTY_UPDATE_MESSAGE},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub name: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch touching only the completion flag.
    pub fn completion(completed: bool) -> Self {
        Self {
            name: None,
            completed: Some(completed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Completed,
    Pending,
}

impl TaskState {
    pub fn parse(raw: &str) -> RecordResult<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            _ => Err(RecordError::validation(
                "state must be one of: completed, pending",
            )),
        }
    }
}

impl From<bool> for TaskState {
    fn from(completed: bool) -> Self {
        if completed {
            Self::Completed
        } else {
            Self::Pending
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskProgress {
    pub state: TaskState,
}

impl Entity for Task {
    type Patch = TaskPatch;
    type Derived = TaskProgress;
    const LABEL: &'static str = "task";

    fn unique_name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn apply(&mut self, patch: TaskPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }

    fn derive(&self) -> TaskProgress {
        TaskProgress {
            state: self.completed.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct TaskPayload {
    pub name: Option<Value>,
    pub completed: Option<Value>,
}

impl From<Map<String, Value>> for TaskPayload {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            name: body.remove("name"),
            completed: body.remove("completed"),
        }
    }
}

impl TaskPayload {
    /// New tasks start pending unless `completed` says otherwise.
    pub fn into_task(self) -> RecordResult<Task> {
        let name = validation::required_name(self.name.as_ref(), "name")?;
        let completed = match self.completed {
            None | Some(Value::Null) => false,
            Some(value) => validation::flag(Some(&value), "completed")?,
        };
        Ok(Task { name, completed })
    }

    pub fn into_patch(self) -> RecordResult<TaskPatch> {
        let patch = TaskPatch {
            name: self
                .name
                .as_ref()
                .map(|value| validation::required_name(Some(value), "name"))
                .transpose()?,
            completed: self
                .completed
                .as_ref()
                .map(|value| validation::flag(Some(value), "completed"))
                .transpose()?,
        };

        if patch == TaskPatch::default() {
            return Err(RecordError::validation(EMPTY_UPDATE_MESSAGE));
        }
        Ok(patch)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskQuery {
    pub completed: Option<String>,
    pub state: Option<String>,
    pub name: Option<String>,
}

impl TaskQuery {
    pub fn into_filter(self) -> RecordResult<impl Fn(&RecordView<Task>) -> bool> {
        let completed = self
            .completed
            .as_deref()
            .map(|raw| validation::query_flag(raw, "completed"))
            .transpose()?;
        let state = self.state.as_deref().map(TaskState::parse).transpose()?;
        let name = self.name.filter(|name| !name.trim().is_empty());

        Ok(move |view: &RecordView<Task>| {
            completed.is_none_or(|completed| view.fields().completed == completed)
                && state.is_none_or(|state| view.derived.state == state)
                && name
                    .as_deref()
                    .is_none_or(|needle| validation::name_contains(&view.fields().name, needle))
        })
    }
}
