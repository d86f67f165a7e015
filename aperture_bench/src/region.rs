//! Region specifications: a shape kind, its ordered geometry parameters and
//! the positions it is placed at.

use std::fmt;

use shared::image_proc::{Aperture, ApertureShape};

use crate::error::BenchError;

/// The six aperture shapes the benchmarks sweep over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    CircularAnnulus,
    Ellipse,
    EllipticalAnnulus,
    Rectangle,
    RectangularAnnulus,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Circle,
        ShapeKind::CircularAnnulus,
        ShapeKind::Ellipse,
        ShapeKind::EllipticalAnnulus,
        ShapeKind::Rectangle,
        ShapeKind::RectangularAnnulus,
    ];

    /// Number of geometry parameters the shape takes.
    ///
    /// | kind | parameters |
    /// |---|---|
    /// | Circle | `r` |
    /// | CircularAnnulus | `r_in, r_out` |
    /// | Ellipse | `a, b, theta` |
    /// | EllipticalAnnulus | `a_in, a_out, b_out, theta` |
    /// | Rectangle | `w, h, theta` |
    /// | RectangularAnnulus | `w_in, w_out, h_out, theta` |
    pub fn arity(self) -> usize {
        match self {
            ShapeKind::Circle => 1,
            ShapeKind::CircularAnnulus => 2,
            ShapeKind::Ellipse | ShapeKind::Rectangle => 3,
            ShapeKind::EllipticalAnnulus | ShapeKind::RectangularAnnulus => 4,
        }
    }

    pub fn is_rectangular(self) -> bool {
        matches!(self, ShapeKind::Rectangle | ShapeKind::RectangularAnnulus)
    }

    /// Name written to the `aperture` column of result tables.
    pub fn aperture_name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "CircularAperture",
            ShapeKind::CircularAnnulus => "CircularAnnulus",
            ShapeKind::Ellipse => "EllipticalAperture",
            ShapeKind::EllipticalAnnulus => "EllipticalAnnulus",
            ShapeKind::Rectangle => "RectangularAperture",
            ShapeKind::RectangularAnnulus => "RectangularAnnulus",
        }
    }

    fn shape(self, p: &[f64]) -> ApertureShape {
        match self {
            ShapeKind::Circle => ApertureShape::Circle { r: p[0] },
            ShapeKind::CircularAnnulus => ApertureShape::CircularAnnulus {
                r_in: p[0],
                r_out: p[1],
            },
            ShapeKind::Ellipse => ApertureShape::Ellipse {
                a: p[0],
                b: p[1],
                theta: p[2],
            },
            ShapeKind::EllipticalAnnulus => ApertureShape::EllipticalAnnulus {
                a_in: p[0],
                a_out: p[1],
                b_out: p[2],
                theta: p[3],
            },
            ShapeKind::Rectangle => ApertureShape::Rectangle {
                w: p[0],
                h: p[1],
                theta: p[2],
            },
            ShapeKind::RectangularAnnulus => ApertureShape::RectangularAnnulus {
                w_in: p[0],
                w_out: p[1],
                h_out: p[2],
                theta: p[3],
            },
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.aperture_name())
    }
}

/// One set of identical regions placed at one or more positions.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSpec {
    kind: ShapeKind,
    params: Vec<f64>,
    positions: Vec<(f64, f64)>,
}

impl RegionSpec {
    /// Build a region spec, checking the parameter count against the kind.
    pub fn new(
        kind: ShapeKind,
        params: Vec<f64>,
        positions: Vec<(f64, f64)>,
    ) -> Result<Self, BenchError> {
        if params.len() != kind.arity() {
            return Err(BenchError::ArityMismatch {
                kind,
                expected: kind.arity(),
                got: params.len(),
            });
        }
        Ok(Self {
            kind,
            params,
            positions,
        })
    }

    /// Build the aperture object consumed by the photometry operation.
    ///
    /// Geometry that the operation rejects (non-positive sizes, inverted
    /// annuli, no positions) surfaces as [`BenchError::Execution`].
    pub fn to_aperture(&self) -> Result<Aperture, BenchError> {
        let shape = self.kind.shape(&self.params);
        Ok(Aperture::new(self.positions.clone(), shape)?)
    }
}
