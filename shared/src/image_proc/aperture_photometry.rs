//! Aperture photometry for astronomical sources.
//!
//! Sums pixel flux inside circular, elliptical and rectangular apertures and
//! their annuli. Pixel `(row, col)` is centered on `(x = col, y = row)` and
//! covers the unit square around that point.
//!
//! Three evaluation methods are supported:
//! - **center**: a pixel counts fully if its center falls inside the shape
//! - **subpixel**: each pixel is split into `k x k` sub-pixels and weighted by
//!   the fraction of sub-pixel centers inside the shape
//! - **exact**: each pixel is weighted by its exact geometric overlap with the
//!   shape (curved shapes only)

use std::f64::consts::PI;
use std::fmt;

use ndarray::ArrayView2;
use thiserror::Error;

/// Errors from aperture construction and photometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhotometryError {
    /// Aperture dimensions or positions are unusable.
    #[error("invalid aperture geometry: {0}")]
    InvalidGeometry(String),

    /// The evaluation method is not defined for this aperture shape.
    #[error("method '{method}' is not supported for {shape}")]
    UnsupportedMethod {
        /// Requested evaluation method.
        method: EvaluationMethod,
        /// Display name of the aperture shape.
        shape: &'static str,
    },

    /// Subpixel sampling needs at least one sample per axis.
    #[error("subpixel factor must be at least 1, got {0}")]
    InvalidSubpixels(u32),
}

/// How pixel membership in an aperture is weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvaluationMethod {
    /// Exact geometric overlap between pixel and aperture.
    Exact,
    /// Whole pixel if its center lies inside the aperture.
    Center,
    /// Fraction of `subpixels x subpixels` sample points inside the aperture.
    Subpixel { subpixels: u32 },
}

impl fmt::Display for EvaluationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationMethod::Exact => write!(f, "exact"),
            EvaluationMethod::Center => write!(f, "center"),
            EvaluationMethod::Subpixel { subpixels } => write!(f, "subpixel-{subpixels}"),
        }
    }
}

/// Aperture geometry. Angles are in radians, counter-clockwise from +x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApertureShape {
    Circle {
        r: f64,
    },
    CircularAnnulus {
        r_in: f64,
        r_out: f64,
    },
    Ellipse {
        a: f64,
        b: f64,
        theta: f64,
    },
    /// Inner minor axis is `b_out * a_in / a_out`.
    EllipticalAnnulus {
        a_in: f64,
        a_out: f64,
        b_out: f64,
        theta: f64,
    },
    Rectangle {
        w: f64,
        h: f64,
        theta: f64,
    },
    /// Inner height is `h_out * w_in / w_out`.
    RectangularAnnulus {
        w_in: f64,
        w_out: f64,
        h_out: f64,
        theta: f64,
    },
}

impl ApertureShape {
    /// Display name of the shape.
    pub fn name(&self) -> &'static str {
        match self {
            ApertureShape::Circle { .. } => "CircularAperture",
            ApertureShape::CircularAnnulus { .. } => "CircularAnnulus",
            ApertureShape::Ellipse { .. } => "EllipticalAperture",
            ApertureShape::EllipticalAnnulus { .. } => "EllipticalAnnulus",
            ApertureShape::Rectangle { .. } => "RectangularAperture",
            ApertureShape::RectangularAnnulus { .. } => "RectangularAnnulus",
        }
    }

    /// Whether the shape boundary is curved (and so supports exact overlap).
    pub fn is_curved(&self) -> bool {
        !matches!(
            self,
            ApertureShape::Rectangle { .. } | ApertureShape::RectangularAnnulus { .. }
        )
    }

    fn validate(&self) -> Result<(), PhotometryError> {
        let positive = |label: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(PhotometryError::InvalidGeometry(format!(
                    "{label} must be finite and positive, got {v}"
                )))
            }
        };
        let angle = |v: f64| {
            if v.is_finite() {
                Ok(())
            } else {
                Err(PhotometryError::InvalidGeometry(format!(
                    "theta must be finite, got {v}"
                )))
            }
        };
        let nested = |inner: f64, outer: f64| {
            if outer > inner {
                Ok(())
            } else {
                Err(PhotometryError::InvalidGeometry(format!(
                    "outer size {outer} must exceed inner size {inner}"
                )))
            }
        };

        match *self {
            ApertureShape::Circle { r } => positive("r", r),
            ApertureShape::CircularAnnulus { r_in, r_out } => {
                positive("r_in", r_in)?;
                positive("r_out", r_out)?;
                nested(r_in, r_out)
            }
            ApertureShape::Ellipse { a, b, theta } => {
                positive("a", a)?;
                positive("b", b)?;
                angle(theta)
            }
            ApertureShape::EllipticalAnnulus {
                a_in,
                a_out,
                b_out,
                theta,
            } => {
                positive("a_in", a_in)?;
                positive("a_out", a_out)?;
                positive("b_out", b_out)?;
                nested(a_in, a_out)?;
                angle(theta)
            }
            ApertureShape::Rectangle { w, h, theta } => {
                positive("w", w)?;
                positive("h", h)?;
                angle(theta)
            }
            ApertureShape::RectangularAnnulus {
                w_in,
                w_out,
                h_out,
                theta,
            } => {
                positive("w_in", w_in)?;
                positive("w_out", w_out)?;
                positive("h_out", h_out)?;
                nested(w_in, w_out)?;
                angle(theta)
            }
        }
    }

    /// Split into the outer region and an optional hole.
    fn regions(&self) -> (Region, Option<Region>) {
        match *self {
            ApertureShape::Circle { r } => (Region::ellipse(r, r, 0.0), None),
            ApertureShape::CircularAnnulus { r_in, r_out } => (
                Region::ellipse(r_out, r_out, 0.0),
                Some(Region::ellipse(r_in, r_in, 0.0)),
            ),
            ApertureShape::Ellipse { a, b, theta } => (Region::ellipse(a, b, theta), None),
            ApertureShape::EllipticalAnnulus {
                a_in,
                a_out,
                b_out,
                theta,
            } => {
                let b_in = b_out * a_in / a_out;
                (
                    Region::ellipse(a_out, b_out, theta),
                    Some(Region::ellipse(a_in, b_in, theta)),
                )
            }
            ApertureShape::Rectangle { w, h, theta } => (Region::rectangle(w, h, theta), None),
            ApertureShape::RectangularAnnulus {
                w_in,
                w_out,
                h_out,
                theta,
            } => {
                let h_in = h_out * w_in / w_out;
                (
                    Region::rectangle(w_out, h_out, theta),
                    Some(Region::rectangle(w_in, h_in, theta)),
                )
            }
        }
    }
}

/// A shape placed at one or more positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Aperture {
    positions: Vec<(f64, f64)>,
    shape: ApertureShape,
}

impl Aperture {
    /// Build an aperture, validating its geometry and positions.
    pub fn new(positions: Vec<(f64, f64)>, shape: ApertureShape) -> Result<Self, PhotometryError> {
        shape.validate()?;
        if positions.is_empty() {
            return Err(PhotometryError::InvalidGeometry(
                "aperture needs at least one position".to_string(),
            ));
        }
        if let Some(&(x, y)) = positions
            .iter()
            .find(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(PhotometryError::InvalidGeometry(format!(
                "position ({x}, {y}) is not finite"
            )));
        }
        Ok(Self { positions, shape })
    }

    pub fn positions(&self) -> &[(f64, f64)] {
        &self.positions
    }

    pub fn shape(&self) -> ApertureShape {
        self.shape
    }

    /// Geometric area of one aperture in square pixels.
    pub fn area(&self) -> f64 {
        let (outer, inner) = self.shape.regions();
        outer.area() - inner.map_or(0.0, |r| r.area())
    }
}

/// Sum image flux inside every position of an aperture.
///
/// Returns one sum per position, in the order the positions were given.
/// Pixels that fall outside the image contribute nothing.
///
/// # Errors
///
/// - [`PhotometryError::UnsupportedMethod`] for `Exact` on rectangular shapes
/// - [`PhotometryError::InvalidSubpixels`] for a zero subpixel factor
pub fn aperture_photometry(
    image: &ArrayView2<f64>,
    aperture: &Aperture,
    method: EvaluationMethod,
) -> Result<Vec<f64>, PhotometryError> {
    match method {
        EvaluationMethod::Exact if !aperture.shape.is_curved() => {
            return Err(PhotometryError::UnsupportedMethod {
                method,
                shape: aperture.shape.name(),
            });
        }
        EvaluationMethod::Subpixel { subpixels: 0 } => {
            return Err(PhotometryError::InvalidSubpixels(0));
        }
        _ => {}
    }

    let (outer, inner) = aperture.shape.regions();
    let sums = aperture
        .positions
        .iter()
        .map(|&center| {
            let total = weighted_sum(image, &outer, center, method);
            match &inner {
                Some(hole) => total - weighted_sum(image, hole, center, method),
                None => total,
            }
        })
        .collect();

    Ok(sums)
}

/// A single convex region centered on the origin.
#[derive(Debug, Clone, Copy)]
enum Region {
    Ellipse { a: f64, b: f64, cos: f64, sin: f64 },
    Rectangle { half_w: f64, half_h: f64, cos: f64, sin: f64 },
}

impl Region {
    fn ellipse(a: f64, b: f64, theta: f64) -> Self {
        Region::Ellipse {
            a,
            b,
            cos: theta.cos(),
            sin: theta.sin(),
        }
    }

    fn rectangle(w: f64, h: f64, theta: f64) -> Self {
        Region::Rectangle {
            half_w: w / 2.0,
            half_h: h / 2.0,
            cos: theta.cos(),
            sin: theta.sin(),
        }
    }

    fn area(&self) -> f64 {
        match *self {
            Region::Ellipse { a, b, .. } => PI * a * b,
            Region::Rectangle { half_w, half_h, .. } => 4.0 * half_w * half_h,
        }
    }

    /// Rotate an offset into the region's own axes.
    fn to_local(cos: f64, sin: f64, dx: f64, dy: f64) -> (f64, f64) {
        (dx * cos + dy * sin, -dx * sin + dy * cos)
    }

    fn contains(&self, dx: f64, dy: f64) -> bool {
        match *self {
            Region::Ellipse { a, b, cos, sin } => {
                let (u, v) = Self::to_local(cos, sin, dx, dy);
                (u / a).powi(2) + (v / b).powi(2) <= 1.0
            }
            Region::Rectangle {
                half_w,
                half_h,
                cos,
                sin,
            } => {
                let (u, v) = Self::to_local(cos, sin, dx, dy);
                u.abs() <= half_w && v.abs() <= half_h
            }
        }
    }

    /// Half-widths of the axis-aligned bounding box.
    fn half_extent(&self) -> (f64, f64) {
        match *self {
            Region::Ellipse { a, b, cos, sin } => (
                ((a * cos).powi(2) + (b * sin).powi(2)).sqrt(),
                ((a * sin).powi(2) + (b * cos).powi(2)).sqrt(),
            ),
            Region::Rectangle {
                half_w,
                half_h,
                cos,
                sin,
            } => (
                half_w * cos.abs() + half_h * sin.abs(),
                half_w * sin.abs() + half_h * cos.abs(),
            ),
        }
    }

    /// Row and column ranges of pixels touching the region, clipped to the image.
    fn pixel_bounds(
        &self,
        (height, width): (usize, usize),
        (xc, yc): (f64, f64),
    ) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
        let (hx, hy) = self.half_extent();
        let span = |center: f64, half: f64, len: usize| {
            let lo = (center - half - 0.5).ceil().max(0.0);
            let hi = ((center + half + 0.5).floor() + 1.0).min(len as f64);
            (lo < hi).then(|| lo as usize..hi as usize)
        };
        Some((span(yc, hy, height)?, span(xc, hx, width)?))
    }

    /// Overlap area between the region and the box `[x0, x1] x [y0, y1]`
    /// given relative to the region center. Ellipses only.
    fn exact_overlap(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
        let Region::Ellipse { a, b, cos, sin } = *self else {
            return 0.0;
        };

        // Map the box corners into the frame where the ellipse is the unit circle.
        let corners = [(x0, y0), (x1, y0), (x1, y1), (x0, y1)].map(|(x, y)| {
            let (u, v) = Self::to_local(cos, sin, x, y);
            (u / a, v / b)
        });

        if corners.iter().all(|&(u, v)| u * u + v * v <= 1.0) {
            return (x1 - x0) * (y1 - y0);
        }

        let unit_area: f64 = (0..4)
            .map(|i| unit_circle_wedge_area(corners[i], corners[(i + 1) % 4]))
            .sum();
        unit_area.abs() * a * b
    }
}

/// Signed area of the intersection between the unit circle and the triangle
/// formed by the origin, `p` and `q`.
fn unit_circle_wedge_area(p: (f64, f64), q: (f64, f64)) -> f64 {
    let d = (q.0 - p.0, q.1 - p.1);
    let qa = d.0 * d.0 + d.1 * d.1;
    if qa == 0.0 {
        return 0.0;
    }
    let qb = p.0 * d.0 + p.1 * d.1;
    let qc = p.0 * p.0 + p.1 * p.1 - 1.0;

    // Break the segment where it crosses the circle.
    let mut breaks = [0.0, 1.0, 1.0, 1.0];
    let mut count = 1;
    let disc = qb * qb - qa * qc;
    if disc > 0.0 {
        let root = disc.sqrt();
        for t in [(-qb - root) / qa, (-qb + root) / qa] {
            if t > 0.0 && t < 1.0 {
                breaks[count] = t;
                count += 1;
            }
        }
    }
    breaks[count] = 1.0;

    let at = |t: f64| (p.0 + t * d.0, p.1 + t * d.1);
    (0..count)
        .map(|i| {
            let (ta, tb) = (breaks[i], breaks[i + 1]);
            let (pa, pb) = (at(ta), at(tb));
            let cross = pa.0 * pb.1 - pa.1 * pb.0;
            let mid = at(0.5 * (ta + tb));
            if mid.0 * mid.0 + mid.1 * mid.1 <= 1.0 {
                0.5 * cross
            } else {
                let dot = pa.0 * pb.0 + pa.1 * pb.1;
                0.5 * cross.atan2(dot)
            }
        })
        .sum()
}

fn weighted_sum(
    image: &ArrayView2<f64>,
    region: &Region,
    (xc, yc): (f64, f64),
    method: EvaluationMethod,
) -> f64 {
    let Some((rows, cols)) = region.pixel_bounds(image.dim(), (xc, yc)) else {
        log::trace!("aperture at ({xc:.2}, {yc:.2}) lies entirely outside the image");
        return 0.0;
    };

    let mut total = 0.0;
    for y in rows {
        let dy = y as f64 - yc;
        for x in cols.clone() {
            let dx = x as f64 - xc;
            let weight = match method {
                EvaluationMethod::Center => {
                    if region.contains(dx, dy) {
                        1.0
                    } else {
                        0.0
                    }
                }
                EvaluationMethod::Subpixel { subpixels } => {
                    subpixel_fraction(region, dx, dy, subpixels)
                }
                EvaluationMethod::Exact => {
                    region.exact_overlap(dx - 0.5, dy - 0.5, dx + 0.5, dy + 0.5)
                }
            };
            if weight > 0.0 {
                total += weight * image[[y, x]];
            }
        }
    }
    total
}

fn subpixel_fraction(region: &Region, dx: f64, dy: f64, subpixels: u32) -> f64 {
    let k = f64::from(subpixels);
    let offset = |s: u32| (f64::from(s) + 0.5) / k - 0.5;

    let inside = (0..subpixels)
        .flat_map(|sy| (0..subpixels).map(move |sx| (sx, sy)))
        .filter(|&(sx, sy)| region.contains(dx + offset(sx), dy + offset(sy)))
        .count();
    inside as f64 / (k * k)
}
