//! Root margin: the signed offsets applied around the viewport before
//! visibility is computed. Parsed from and rendered to CSS shorthand so the
//! same string can be handed straight to a browser observer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RevealError, Result};
use crate::geometry::Rect;

/// One side of a root margin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarginLength {
    Px(f64),
    /// Percentage of the root's width (left/right) or height (top/bottom).
    Percent(f64),
}

impl MarginLength {
    pub const ZERO: MarginLength = MarginLength::Px(0.0);

    fn parse(token: &str, input: &str) -> Result<Self> {
        let invalid = |reason: &str| RevealError::InvalidRootMargin {
            input: input.to_string(),
            reason: reason.to_string(),
        };
        let (number, ctor): (&str, fn(f64) -> MarginLength) =
            if let Some(n) = token.strip_suffix("px") {
                (n, MarginLength::Px)
            } else if let Some(n) = token.strip_suffix('%') {
                (n, MarginLength::Percent)
            } else if token == "0" {
                return Ok(MarginLength::ZERO);
            } else {
                return Err(invalid(&format!("'{token}' must use px or %")));
            };
        let value: f64 = number
            .parse()
            .map_err(|_| invalid(&format!("'{token}' is not a number")))?;
        if !value.is_finite() {
            return Err(invalid(&format!("'{token}' is not finite")));
        }
        Ok(ctor(value))
    }

    /// Resolve to pixels against the root extent along this side's axis.
    #[inline]
    pub fn to_px(self, extent: f64) -> f64 {
        match self {
            MarginLength::Px(px) => px,
            MarginLength::Percent(p) => extent * p / 100.0,
        }
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginLength::Px(v) => write!(f, "{v}px"),
            MarginLength::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Offsets on each side of the root, in CSS order (top, right, bottom, left).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: MarginLength,
    pub right: MarginLength,
    pub bottom: MarginLength,
    pub left: MarginLength,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::uniform(MarginLength::ZERO)
    }
}

impl RootMargin {
    pub fn uniform(len: MarginLength) -> Self {
        Self {
            top: len,
            right: len,
            bottom: len,
            left: len,
        }
    }

    /// Parse CSS margin shorthand with one to four lengths.
    pub fn parse(input: &str) -> Result<Self> {
        let tokens = input
            .split_whitespace()
            .map(|t| MarginLength::parse(t, input))
            .collect::<Result<Vec<_>>>()?;
        let (top, right, bottom, left) = match tokens.as_slice() {
            [] => return Ok(Self::default()),
            [all] => (*all, *all, *all, *all),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => {
                return Err(RevealError::InvalidRootMargin {
                    input: input.to_string(),
                    reason: format!("expected 1 to 4 lengths, got {}", tokens.len()),
                })
            }
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }

    pub fn is_zero(&self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|m| m.to_px(1.0) == 0.0)
    }

    /// Grow (or shrink, for negative lengths) a root rectangle by this margin.
    pub fn apply(&self, root: Rect) -> Rect {
        let top = self.top.to_px(root.height());
        let bottom = self.bottom.to_px(root.height());
        let left = self.left.to_px(root.width());
        let right = self.right.to_px(root.width());
        Rect {
            top: root.top - top,
            left: root.left - left,
            bottom: root.bottom + bottom,
            right: root.right + right,
        }
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl FromStr for RootMargin {
    type Err = RevealError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RootMargin {
    type Error = RevealError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RootMargin> for String {
    fn from(value: RootMargin) -> Self {
        value.to_string()
    }
}
