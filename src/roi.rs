//! Region-of-interest gate.
//!
//! The gate decides whether a tracked target's center position qualifies for
//! event emission. It never suppresses tracking itself; the tracker keeps
//! following targets outside the region.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// Rectangular notification region in frame-pixel coordinates.
///
/// The all-zero region is the "unrestricted" sentinel: every center
/// qualifies. Any other geometry is taken at face value, including regions
/// lying wholly outside the frame, which simply never match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionOfInterest {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RegionOfInterest {
    /// The all-zero sentinel. Every center qualifies.
    pub const UNRESTRICTED: RegionOfInterest = RegionOfInterest {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.x == 0 && self.y == 0 && self.width == 0 && self.height == 0
    }

    /// True when the center `(cx, cy)` lies inside the region, inclusive on
    /// all four edges. Arithmetic is widened to u64 so `x + width` cannot
    /// wrap.
    pub fn admits(&self, cx: u32, cy: u32) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        let (cx, cy) = (u64::from(cx), u64::from(cy));
        let left = u64::from(self.x);
        let top = u64::from(self.y);
        let right = left + u64::from(self.width);
        let bottom = top + u64::from(self.height);
        cx >= left && cx <= right && cy >= top && cy <= bottom
    }
}

impl std::str::FromStr for RegionOfInterest {
    type Err = anyhow::Error;

    /// Parses `"x,y,width,height"`. Whitespace around a field is ignored;
    /// stray or doubled commas are not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(anyhow!(
                "expected four comma-separated integers (x,y,width,height), got {:?}",
                s
            ));
        }
        let mut parsed = [0u32; 4];
        for (slot, field) in parsed.iter_mut().zip(&fields) {
            *slot = field
                .parse()
                .map_err(|_| anyhow!("{:?} is not an unsigned integer", field))?;
        }
        Ok(Self::new(parsed[0], parsed[1], parsed[2], parsed[3]))
    }
}
