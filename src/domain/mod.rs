//! Entity kinds served by the API.
//!
//! Each module pairs a stored field set with its raw payload (parsed and
//! validated into fields or a patch), its read-time derived values and the
//! list filter built from query parameters.

pub mod rectangle;
pub mod student;
pub mod task;

pub use rectangle::{Rectangle, RectanglePayload, RectangleQuery, ShapeKind};
pub use student::{GradeStatus, Student, StudentPayload, StudentQuery};
pub use task::{Task, TaskPatch, TaskPayload, TaskQuery, TaskState};
