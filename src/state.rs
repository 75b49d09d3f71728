use std::sync::Arc;

use crate::{
    domain::{Rectangle, Student, Task},
    store::RecordStore,
};

#[derive(Clone, Default)]
pub struct AppState {
    pub rectangles: Arc<RecordStore<Rectangle>>,
    pub students: Arc<RecordStore<Student>>,
    pub tasks: Arc<RecordStore<Task>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
