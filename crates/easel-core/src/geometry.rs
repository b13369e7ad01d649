//! The bounds rectangle attribute grammar.
//!
//! A `bounds` element positions its parent using one of two mutually
//! exclusive attribute forms: edges (`left`, `top`, `right`, `bottom`) or
//! origin and size (`x`, `y`, `width`, `height`). Omitted attributes
//! default to the unit square. Placeholder values defer evaluation, so a
//! resolved rectangle may have unknown components.

use crate::event::Attributes;
use crate::numeric;
use thiserror::Error;

/// Edge attributes of the first coordinate form.
const EDGE_ATTRS: [&str; 4] = ["left", "top", "right", "bottom"];

/// Origin/size attributes of the second coordinate form.
const ORIGIN_SIZE_ATTRS: [&str; 4] = ["x", "y", "width", "height"];

/// A resolved bounds rectangle.
///
/// Components are `None` when the source value was a deferred placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
}

/// A violation of the bounds attribute grammar.
///
/// Several violations can occur on a single element; all are reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundsIssue {
    #[error("attribute `{attr}` \"{value}\" is not a floating point number")]
    BadFloat { attr: &'static str, value: String },

    #[error("attribute `left` \"{left}\" is greater than attribute `right` \"{right}\"")]
    LeftGreaterThanRight { left: String, right: String },

    #[error("attribute `top` \"{top}\" is greater than attribute `bottom` \"{bottom}\"")]
    TopGreaterThanBottom { top: String, bottom: String },

    #[error("attribute `width` \"{value}\" is negative")]
    NegativeWidth { value: String },

    #[error("attribute `height` \"{value}\" is negative")]
    NegativeHeight { value: String },

    #[error("has neither attribute `left` nor attribute `x`")]
    MissingAnchor,

    #[error("has both left/top/right/bottom and origin/size attributes")]
    MixedForms,
}

/// Validate a `bounds` attribute set and resolve the rectangle.
///
/// Returns the resolved rectangle along with every grammar violation
/// found. Comparisons involving a deferred or unparseable value are
/// skipped, matching the recoverable-error policy: a bad float is
/// reported once and treated as unknown afterwards.
pub fn check(attrs: &Attributes) -> (Rect, Vec<BoundsIssue>) {
    let mut issues = Vec::new();

    let mut component = |attr: &'static str, default: f64| -> Option<f64> {
        match attrs.get(attr) {
            None => Some(default),
            Some(raw) => match numeric::float(raw) {
                Ok(parsed) => parsed,
                Err(_) => {
                    issues.push(BoundsIssue::BadFloat {
                        attr,
                        value: raw.to_string(),
                    });
                    None
                }
            },
        }
    };

    let left = component("left", 0.0);
    let top = component("top", 0.0);
    let right = component("right", 1.0);
    let bottom = component("bottom", 1.0);
    let x = component("x", 0.0);
    let y = component("y", 0.0);
    let width = component("width", 1.0);
    let height = component("height", 1.0);

    if let (Some(left_val), Some(right_val)) = (left, right) {
        if left_val > right_val {
            issues.push(BoundsIssue::LeftGreaterThanRight {
                left: attrs.get("left").unwrap_or("0.0").to_string(),
                right: attrs.get("right").unwrap_or("1.0").to_string(),
            });
        }
    }
    if let (Some(top_val), Some(bottom_val)) = (top, bottom) {
        if top_val > bottom_val {
            issues.push(BoundsIssue::TopGreaterThanBottom {
                top: attrs.get("top").unwrap_or("0.0").to_string(),
                bottom: attrs.get("bottom").unwrap_or("1.0").to_string(),
            });
        }
    }
    if width.is_some_and(|val| val < 0.0) {
        issues.push(BoundsIssue::NegativeWidth {
            value: attrs.get("width").unwrap_or_default().to_string(),
        });
    }
    if height.is_some_and(|val| val < 0.0) {
        issues.push(BoundsIssue::NegativeHeight {
            value: attrs.get("height").unwrap_or_default().to_string(),
        });
    }
    if !attrs.contains("left") && !attrs.contains("x") {
        issues.push(BoundsIssue::MissingAnchor);
    }

    let has_edges = EDGE_ATTRS.iter().any(|attr| attrs.contains(attr));
    let has_origin_size = ORIGIN_SIZE_ATTRS.iter().any(|attr| attrs.contains(attr));
    if has_edges && has_origin_size {
        issues.push(BoundsIssue::MixedForms);
    }

    let rect = if has_origin_size && !has_edges {
        Rect {
            left: x,
            top: y,
            right: add(x, width),
            bottom: add(y, height),
        }
    } else {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    };

    (rect, issues)
}

fn add(base: Option<f64>, extent: Option<f64>) -> Option<f64> {
    Some(base? + extent?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_defaults_form_unit_square() {
        let (rect, issues) = check(&attrs(&[("left", "0")]));

        assert!(issues.is_empty());
        assert!(approx_eq!(f64, rect.left.unwrap(), 0.0));
        assert!(approx_eq!(f64, rect.top.unwrap(), 0.0));
        assert!(approx_eq!(f64, rect.right.unwrap(), 1.0));
        assert!(approx_eq!(f64, rect.bottom.unwrap(), 1.0));
    }

    #[test]
    fn test_origin_size_resolves_edges() {
        let (rect, issues) = check(&attrs(&[("x", "2"), ("y", "3"), ("width", "4")]));

        assert!(issues.is_empty());
        assert!(approx_eq!(f64, rect.left.unwrap(), 2.0));
        assert!(approx_eq!(f64, rect.top.unwrap(), 3.0));
        assert!(approx_eq!(f64, rect.right.unwrap(), 6.0));
        assert!(approx_eq!(f64, rect.bottom.unwrap(), 4.0));
    }

    #[test]
    fn test_mixed_forms_is_single_issue() {
        let (_, issues) = check(&attrs(&[("left", "0"), ("x", "0")]));

        assert_eq!(issues, vec![BoundsIssue::MixedForms]);
    }

    #[test]
    fn test_left_greater_than_right() {
        let (_, issues) = check(&attrs(&[("left", "10"), ("right", "5")]));

        assert_eq!(
            issues,
            vec![BoundsIssue::LeftGreaterThanRight {
                left: "10".into(),
                right: "5".into(),
            }]
        );
    }

    #[test]
    fn test_ordered_edges_pass() {
        let (_, issues) = check(&attrs(&[("left", "0"), ("right", "10")]));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_top_greater_than_bottom_with_default() {
        // `bottom` defaults to 1.0, so top=2 inverts the rectangle.
        let (_, issues) = check(&attrs(&[("left", "0"), ("top", "2")]));

        assert_eq!(
            issues,
            vec![BoundsIssue::TopGreaterThanBottom {
                top: "2".into(),
                bottom: "1.0".into(),
            }]
        );
    }

    #[test]
    fn test_negative_size() {
        let (_, issues) = check(&attrs(&[("x", "0"), ("width", "-1"), ("height", "-2")]));

        assert_eq!(
            issues,
            vec![
                BoundsIssue::NegativeWidth { value: "-1".into() },
                BoundsIssue::NegativeHeight { value: "-2".into() },
            ]
        );
    }

    #[test]
    fn test_missing_anchor() {
        let (_, issues) = check(&attrs(&[("width", "5")]));
        assert_eq!(issues, vec![BoundsIssue::MissingAnchor]);
    }

    #[test]
    fn test_placeholder_skips_comparisons() {
        let (rect, issues) = check(&attrs(&[("left", "~col~"), ("right", "0")]));

        assert!(issues.is_empty());
        assert_eq!(rect.left, None);
    }

    #[test]
    fn test_bad_float_reported_then_ignored() {
        let (_, issues) = check(&attrs(&[("left", "wide"), ("right", "0")]));

        assert_eq!(
            issues,
            vec![BoundsIssue::BadFloat {
                attr: "left",
                value: "wide".into(),
            }]
        );
    }
}
