use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    store::{Entity, RecordError, RecordResult, RecordView},
    validation::{self, EMPTY_UPDATE_MESSAGE},
};

pub const OVERFLOW_MESSAGE: &str = "width and height are too large to compute area and perimeter";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rectangle {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RectanglePatch {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Square,
    Rectangle,
}

impl ShapeKind {
    pub fn parse(raw: &str) -> RecordResult<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(Self::Square),
            "rectangle" => Ok(Self::Rectangle),
            _ => Err(RecordError::validation(
                "shape must be one of: square, rectangle",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectangleMetrics {
    pub perimeter: f64,
    pub area: f64,
    pub shape: ShapeKind,
}

impl Entity for Rectangle {
    type Patch = RectanglePatch;
    type Derived = RectangleMetrics;
    const LABEL: &'static str = "rectangle";

    /// Each side may be finite on its own while the area or perimeter is not.
    fn validate(&self) -> RecordResult<()> {
        let metrics = self.derive();
        if !metrics.area.is_finite() || !metrics.perimeter.is_finite() {
            return Err(RecordError::validation(OVERFLOW_MESSAGE));
        }
        Ok(())
    }

    fn apply(&mut self, patch: RectanglePatch) {
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
    }

    fn derive(&self) -> RectangleMetrics {
        RectangleMetrics {
            perimeter: 2.0 * (self.width + self.height),
            area: self.width * self.height,
            shape: if self.width == self.height {
                ShapeKind::Square
            } else {
                ShapeKind::Rectangle
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RectanglePayload {
    pub width: Option<Value>,
    pub height: Option<Value>,
}

impl From<Map<String, Value>> for RectanglePayload {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            width: body.remove("width"),
            height: body.remove("height"),
        }
    }
}

impl RectanglePayload {
    pub fn into_rectangle(self) -> RecordResult<Rectangle> {
        Ok(Rectangle {
            width: validation::positive_number(self.width.as_ref(), "width")?,
            height: validation::positive_number(self.height.as_ref(), "height")?,
        })
    }

    pub fn into_patch(self) -> RecordResult<RectanglePatch> {
        let patch = RectanglePatch {
            width: self
                .width
                .as_ref()
                .map(|value| validation::positive_number(Some(value), "width"))
                .transpose()?,
            height: self
                .height
                .as_ref()
                .map(|value| validation::positive_number(Some(value), "height"))
                .transpose()?,
        };

        if patch == RectanglePatch::default() {
            return Err(RecordError::validation(EMPTY_UPDATE_MESSAGE));
        }
        Ok(patch)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RectangleQuery {
    pub shape: Option<String>,
}

impl RectangleQuery {
    pub fn into_filter(self) -> RecordResult<impl Fn(&RecordView<Rectangle>) -> bool> {
        let shape = self.shape.as_deref().map(ShapeKind::parse).transpose()?;
        Ok(move |view: &RecordView<Rectangle>| {
            shape.is_none_or(|shape| view.derived.shape == shape)
        })
    }
}
