//! Parameter space enumeration for benchmark sweeps.
//!
//! A sweep is the cross product of its axes, walked in declaration order:
//! region count (outermost), size, evaluation method, shape (innermost).
//! Combinations the photometry operation does not define are dropped
//! silently; see [`is_supported`].

use shared::image_proc::EvaluationMethod;
use shared::range_arg::SweepRange;

use crate::error::BenchError;
use crate::region::ShapeKind;

/// Whether the photometry operation defines `method` for `kind`.
///
/// Exact overlap is only defined for curved boundaries, so rectangles and
/// rectangular annuli are unsupported with [`EvaluationMethod::Exact`].
/// Every other pairing is supported.
pub fn is_supported(kind: ShapeKind, method: EvaluationMethod) -> bool {
    !(method == EvaluationMethod::Exact && kind.is_rectangular())
}

/// How a shape's geometry parameters are obtained for each point.
#[derive(Debug, Clone)]
pub enum Geometry {
    /// The same parameters at every point.
    Fixed(Vec<f64>),
    /// Parameters derived from the current value of the size axis.
    Sized(fn(f64) -> Vec<f64>),
}

/// One entry of the shape axis.
#[derive(Debug, Clone)]
pub struct ShapeAxis {
    pub kind: ShapeKind,
    pub geometry: Geometry,
}

impl ShapeAxis {
    pub fn fixed(kind: ShapeKind, params: Vec<f64>) -> Self {
        Self {
            kind,
            geometry: Geometry::Fixed(params),
        }
    }

    pub fn sized(kind: ShapeKind, geometry: fn(f64) -> Vec<f64>) -> Self {
        Self {
            kind,
            geometry: Geometry::Sized(geometry),
        }
    }

    fn params_for(&self, size: Option<f64>) -> Option<Vec<f64>> {
        match (&self.geometry, size) {
            (Geometry::Fixed(params), _) => Some(params.clone()),
            (Geometry::Sized(geometry), Some(size)) => Some(geometry(size)),
            (Geometry::Sized(_), None) => None,
        }
    }
}

/// Declared sweep axes.
#[derive(Debug, Clone)]
pub struct SweepAxes {
    pub counts: Vec<usize>,
    pub sizes: Option<Vec<f64>>,
    pub methods: Vec<EvaluationMethod>,
    pub shapes: Vec<ShapeAxis>,
}

impl SweepAxes {
    /// Expand an inclusive range into the size axis.
    pub fn with_size_range(mut self, range: SweepRange) -> Result<Self, BenchError> {
        self.sizes = Some(range.values()?);
        Ok(self)
    }
}

/// One combination of swept values.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterPoint {
    count: usize,
    size: Option<f64>,
    method: EvaluationMethod,
    kind: ShapeKind,
    params: Vec<f64>,
}

impl ParameterPoint {
    /// Number of regions placed.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Value of the size axis, if the sweep has one.
    pub fn size(&self) -> Option<f64> {
        self.size
    }

    pub fn method(&self) -> EvaluationMethod {
        self.method
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn params(&self) -> &[f64] {
        &self.params
    }
}

/// Enumerates the retained points of a sweep.
#[derive(Debug, Clone)]
pub struct ParameterSpaceBuilder {
    axes: SweepAxes,
    size_slots: Vec<Option<f64>>,
}

impl ParameterSpaceBuilder {
    /// # Errors
    ///
    /// [`BenchError::MissingSizeAxis`] if a shape derives its geometry from a
    /// size but the axes declare no sizes.
    pub fn new(axes: SweepAxes) -> Result<Self, BenchError> {
        let size_slots = match &axes.sizes {
            Some(sizes) => sizes.iter().copied().map(Some).collect(),
            None => {
                if let Some(shape) = axes
                    .shapes
                    .iter()
                    .find(|s| matches!(s.geometry, Geometry::Sized(_)))
                {
                    return Err(BenchError::MissingSizeAxis { kind: shape.kind });
                }
                vec![None]
            }
        };
        Ok(Self { axes, size_slots })
    }

    /// Lazily walk every supported combination in declaration order.
    pub fn points(&self) -> impl Iterator<Item = ParameterPoint> + '_ {
        self.axes.counts.iter().flat_map(move |&count| {
            self.size_slots.iter().flat_map(move |&size| {
                self.axes.methods.iter().flat_map(move |&method| {
                    self.axes
                        .shapes
                        .iter()
                        .filter(move |shape| is_supported(shape.kind, method))
                        .filter_map(move |shape| {
                            Some(ParameterPoint {
                                count,
                                size,
                                method,
                                kind: shape.kind,
                                params: shape.params_for(size)?,
                            })
                        })
                })
            })
        })
    }

    /// Number of retained points.
    pub fn len(&self) -> usize {
        let shapes_per_method: usize = self
            .axes
            .methods
            .iter()
            .map(|&m| {
                self.axes
                    .shapes
                    .iter()
                    .filter(|s| is_supported(s.kind, m))
                    .count()
            })
            .sum();
        self.axes.counts.len() * self.size_slots.len() * shapes_per_method
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBPIXEL_5: EvaluationMethod = EvaluationMethod::Subpixel { subpixels: 5 };

    fn all_shapes() -> Vec<ShapeAxis> {
        vec![
            ShapeAxis::fixed(ShapeKind::Circle, vec![3.0]),
            ShapeAxis::fixed(ShapeKind::CircularAnnulus, vec![3.0, 5.0]),
            ShapeAxis::fixed(ShapeKind::Ellipse, vec![3.0, 3.0, 0.0]),
            ShapeAxis::fixed(ShapeKind::EllipticalAnnulus, vec![3.0, 5.0, 4.0, 0.0]),
            ShapeAxis::fixed(ShapeKind::Rectangle, vec![3.0, 5.0, 0.0]),
            ShapeAxis::fixed(ShapeKind::RectangularAnnulus, vec![3.0, 5.0, 4.0, 0.0]),
        ]
    }

    fn combined_axes() -> SweepAxes {
        SweepAxes {
            counts: vec![1, 10, 50, 100],
            sizes: None,
            methods: vec![EvaluationMethod::Exact, EvaluationMethod::Center, SUBPIXEL_5],
            shapes: all_shapes(),
        }
    }

    #[test]
    fn test_is_supported() {
        for kind in ShapeKind::ALL {
            assert!(is_supported(kind, EvaluationMethod::Center));
            assert!(is_supported(kind, SUBPIXEL_5));
            assert_eq!(
                is_supported(kind, EvaluationMethod::Exact),
                !kind.is_rectangular()
            );
        }
    }

    #[test]
    fn test_exact_rectangles_excluded() {
        let builder = ParameterSpaceBuilder::new(combined_axes()).unwrap();
        let points: Vec<_> = builder.points().collect();

        assert!(points
            .iter()
            .all(|p| !(p.method() == EvaluationMethod::Exact && p.kind().is_rectangular())));
        // 4 counts x (4 exact + 6 center + 6 subpixel)
        assert_eq!(points.len(), 4 * 16);
        assert_eq!(builder.len(), points.len());
    }

    #[test]
    fn test_every_other_combination_once() {
        let builder = ParameterSpaceBuilder::new(combined_axes()).unwrap();
        let points: Vec<_> = builder.points().collect();

        for count in [1, 10, 50, 100] {
            for method in [EvaluationMethod::Exact, EvaluationMethod::Center, SUBPIXEL_5] {
                for kind in ShapeKind::ALL {
                    let hits = points
                        .iter()
                        .filter(|p| p.count() == count && p.method() == method && p.kind() == kind)
                        .count();
                    let expected = usize::from(is_supported(kind, method));
                    assert_eq!(hits, expected, "{count} {method} {kind}");
                }
            }
        }
    }

    #[test]
    fn test_declaration_order() {
        let builder = ParameterSpaceBuilder::new(combined_axes()).unwrap();
        let first: Vec<(usize, EvaluationMethod, ShapeKind)> = builder
            .points()
            .take(6)
            .map(|p| (p.count(), p.method(), p.kind()))
            .collect();
        assert_eq!(
            first,
            vec![
                (1, EvaluationMethod::Exact, ShapeKind::Circle),
                (1, EvaluationMethod::Exact, ShapeKind::CircularAnnulus),
                (1, EvaluationMethod::Exact, ShapeKind::Ellipse),
                (1, EvaluationMethod::Exact, ShapeKind::EllipticalAnnulus),
                (1, EvaluationMethod::Center, ShapeKind::Circle),
                (1, EvaluationMethod::Center, ShapeKind::CircularAnnulus),
            ]
        );
        let last = builder.points().last().unwrap();
        assert_eq!(last.count(), 100);
        assert_eq!(last.method(), SUBPIXEL_5);
        assert_eq!(last.kind(), ShapeKind::RectangularAnnulus);
    }

    #[test]
    fn test_degenerate_values_retained() {
        let axes = SweepAxes {
            counts: vec![1],
            sizes: None,
            methods: vec![EvaluationMethod::Center],
            shapes: vec![ShapeAxis::fixed(ShapeKind::Rectangle, vec![3.0, 5.0, 0.0])],
        };
        let points: Vec<_> = ParameterSpaceBuilder::new(axes).unwrap().points().collect();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].params(), &[3.0, 5.0, 0.0]);
        assert_eq!(points[0].size(), None);
    }

    #[test]
    fn test_size_axis_drives_geometry() {
        let axes = SweepAxes {
            counts: vec![1],
            sizes: None,
            methods: vec![EvaluationMethod::Exact],
            shapes: vec![ShapeAxis::sized(ShapeKind::Ellipse, |r| vec![r, r, 20.0])],
        }
        .with_size_range(SweepRange::new(1.0, 11.0, 5.0))
        .unwrap();

        let points: Vec<_> = ParameterSpaceBuilder::new(axes).unwrap().points().collect();
        let sizes: Vec<Option<f64>> = points.iter().map(|p| p.size()).collect();
        assert_eq!(sizes, vec![Some(1.0), Some(6.0), Some(11.0)]);
        assert_eq!(points[1].params(), &[6.0, 6.0, 20.0]);
    }

    #[test]
    fn test_sized_shape_without_sizes_rejected() {
        let axes = SweepAxes {
            counts: vec![1],
            sizes: None,
            methods: vec![EvaluationMethod::Exact],
            shapes: vec![ShapeAxis::sized(ShapeKind::Circle, |r| vec![r])],
        };
        assert!(matches!(
            ParameterSpaceBuilder::new(axes),
            Err(BenchError::MissingSizeAxis {
                kind: ShapeKind::Circle
            })
        ));
    }

    #[test]
    fn test_empty_axis_yields_nothing() {
        let mut axes = combined_axes();
        axes.counts.clear();
        let builder = ParameterSpaceBuilder::new(axes).unwrap();
        assert!(builder.is_empty());
        assert_eq!(builder.points().count(), 0);
    }
}
