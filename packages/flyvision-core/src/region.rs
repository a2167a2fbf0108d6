/// Axis-aligned rectangle in normalized image coordinates.
///
/// All four values are fractions of the image dimensions. Bounds are not
/// enforced; a box only takes part in resolution when it has positive area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// True when both dimensions are strictly positive.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: NormalizedPoint) -> bool {
        self.left <= point.u
            && point.u <= self.left + self.width
            && self.top <= point.v
            && point.v <= self.top + self.height
    }

    /// Squared Euclidean distance from `point` to the box center.
    pub fn center_distance_squared(&self, point: NormalizedPoint) -> f64 {
        let (cx, cy) = self.center();
        (point.u - cx).powi(2) + (point.v - cy).powi(2)
    }
}

/// One localized occurrence of a label.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub bounding_box: BoundingBox,
    /// Falls back to the owning label's confidence when absent.
    pub confidence: Option<f64>,
}

impl Instance {
    pub fn new(bounding_box: BoundingBox, confidence: Option<f64>) -> Self {
        Self {
            bounding_box,
            confidence,
        }
    }
}

/// A named object class reported by the labeling service.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRecord {
    pub name: String,
    pub confidence: f64,
    pub instances: Vec<Instance>,
}

impl LabelRecord {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
            instances: Vec::new(),
        }
    }

    pub fn with_instance(mut self, bounding_box: BoundingBox, confidence: Option<f64>) -> Self {
        self.instances.push(Instance::new(bounding_box, confidence));
        self
    }

    /// Confidence of `instance`, inheriting this label's value when unset.
    pub fn instance_confidence(&self, instance: &Instance) -> f64 {
        instance.confidence.unwrap_or(self.confidence)
    }
}

/// Touch point in the same unit-square frame as [`BoundingBox`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalizedPoint {
    pub u: f64,
    pub v: f64,
}

impl NormalizedPoint {
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}
