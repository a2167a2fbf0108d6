//! Picks the single label a touch point most likely refers to.
//!
//! Selection order:
//! 1. Among instance boxes containing the point: smallest area, then highest
//!    confidence, then nearest center. Earlier instances win exact ties.
//! 2. Otherwise the non-containing instance with the highest
//!    `-dist² + confidence / 1000`, first seen on ties.
//! 3. Otherwise the label with the highest top-level confidence, first seen on ties.
//!
//! Boxes without positive area are skipped. The function is total: any input
//! yields a name or `None`, never an error.

use std::cmp::Ordering;

use crate::region::{LabelRecord, NormalizedPoint};

/// Weight of confidence against squared distance for boxes that miss the point.
const CONFIDENCE_WEIGHT: f64 = 1.0 / 1000.0;

struct Containing<'a> {
    area: f64,
    confidence: f64,
    dist2: f64,
    name: &'a str,
}

impl Containing<'_> {
    fn rank(&self, other: &Self) -> Ordering {
        cmp_f64(self.area, other.area)
            .then_with(|| cmp_f64(other.confidence, self.confidence))
            .then_with(|| cmp_f64(self.dist2, other.dist2))
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Resolves `point` against `labels`, returning the chosen label name.
pub fn resolve_label(labels: &[LabelRecord], point: NormalizedPoint) -> Option<String> {
    let mut containing: Vec<Containing<'_>> = Vec::new();
    // (score, name) of the best box that does not contain the point
    let mut nearest: Option<(f64, &str)> = None;

    for label in labels {
        for instance in &label.instances {
            let bbox = &instance.bounding_box;
            if !bbox.has_area() {
                continue;
            }
            let confidence = label.instance_confidence(instance);
            let dist2 = bbox.center_distance_squared(point);

            if bbox.contains(point) {
                containing.push(Containing {
                    area: bbox.area(),
                    confidence,
                    dist2,
                    name: &label.name,
                });
            } else {
                let score = -dist2 + confidence * CONFIDENCE_WEIGHT;
                match nearest {
                    Some((best, _)) if !(score > best) => {}
                    _ => nearest = Some((score, &label.name)),
                }
            }
        }
    }

    // min_by keeps the first of equal elements, same as a stable sort
    if let Some(best) = containing.iter().min_by(|a, b| a.rank(b)) {
        return Some(best.name.to_string());
    }

    if let Some((_, name)) = nearest {
        return Some(name.to_string());
    }

    labels
        .iter()
        .fold(None::<&LabelRecord>, |best, label| match best {
            Some(b) if !(label.confidence > b.confidence) => Some(b),
            _ => Some(label),
        })
        .map(|label| label.name.clone())
}
