//! Compiled-in benchmark definitions, one per result table.

use shared::image_proc::EvaluationMethod;
use shared::range_arg::SweepRange;

use crate::error::BenchError;
use crate::params::{ShapeAxis, SweepAxes};
use crate::region::ShapeKind;
use crate::runner::{BenchmarkVariant, Placement};
use crate::table::TableSchema;

/// Region counts for the count sweeps.
pub const COUNT_SWEEP: [usize; 9] = [1, 10, 50, 100, 200, 400, 500, 1000, 2000];

/// Radius sweep for the size benchmarks, inclusive.
pub const RADIUS_SWEEP: SweepRange = SweepRange::new(1.0, 200.0, 5.0);

const FIELD_CENTER: Placement = Placement::Repeated { x: 255.0, y: 255.0 };
const PIXEL_CORNER_CENTER: Placement = Placement::Repeated { x: 255.5, y: 255.5 };

/// Every shape at a small fixed size.
pub fn all_shapes() -> Vec<ShapeAxis> {
    vec![
        ShapeAxis::fixed(ShapeKind::Circle, vec![3.0]),
        ShapeAxis::fixed(ShapeKind::CircularAnnulus, vec![3.0, 5.0]),
        ShapeAxis::fixed(ShapeKind::Ellipse, vec![3.0, 3.0, 0.0]),
        ShapeAxis::fixed(ShapeKind::EllipticalAnnulus, vec![3.0, 5.0, 4.0, 0.0]),
        ShapeAxis::fixed(ShapeKind::Rectangle, vec![3.0, 5.0, 0.0]),
        ShapeAxis::fixed(ShapeKind::RectangularAnnulus, vec![3.0, 5.0, 4.0, 0.0]),
    ]
}

/// Every shape x every method x a handful of counts, all at the field center.
pub fn apertures() -> BenchmarkVariant {
    BenchmarkVariant::new(
        "apertures",
        "apertures.csv",
        TableSchema::Combined,
        SweepAxes {
            counts: vec![1, 10, 50, 100],
            sizes: None,
            methods: vec![
                EvaluationMethod::Exact,
                EvaluationMethod::Center,
                EvaluationMethod::Subpixel { subpixels: 5 },
            ],
            shapes: all_shapes(),
        },
        FIELD_CENTER,
    )
    .with_repetitions(1)
}

/// Many identical small circles stacked on the field center.
pub fn circle_apertures() -> BenchmarkVariant {
    BenchmarkVariant::new(
        "circle_apertures",
        "circle_apertures.csv",
        TableSchema::CountSweep,
        SweepAxes {
            counts: COUNT_SWEEP.to_vec(),
            sizes: None,
            methods: vec![EvaluationMethod::Exact],
            shapes: vec![ShapeAxis::fixed(ShapeKind::Circle, vec![3.0])],
        },
        FIELD_CENTER,
    )
    .with_repetitions(1)
}

/// Circles of radius 10 scattered uniformly over the field.
pub fn num_apertures() -> BenchmarkVariant {
    BenchmarkVariant::new(
        "num_apertures",
        "num_apertures.csv",
        TableSchema::CountSweep,
        SweepAxes {
            counts: COUNT_SWEEP.to_vec(),
            sizes: None,
            methods: vec![EvaluationMethod::Exact],
            shapes: vec![ShapeAxis::fixed(ShapeKind::Circle, vec![10.0])],
        },
        Placement::Uniform,
    )
    .with_repetitions(1)
}

fn size_sweep(
    name: &str,
    output_file: &str,
    shape: ShapeAxis,
) -> Result<BenchmarkVariant, BenchError> {
    let axes = SweepAxes {
        counts: vec![1],
        sizes: None,
        methods: vec![EvaluationMethod::Exact],
        shapes: vec![shape],
    }
    .with_size_range(RADIUS_SWEEP)?;

    Ok(BenchmarkVariant::new(
        name,
        output_file,
        TableSchema::SizeSweep,
        axes,
        PIXEL_CORNER_CENTER,
    ))
}

/// A single circle of growing radius.
pub fn aperture_size_circle() -> Result<BenchmarkVariant, BenchError> {
    size_sweep(
        "aperture_size",
        "aperture_size.csv",
        ShapeAxis::sized(ShapeKind::Circle, |r| vec![r]),
    )
}

/// A single rotated ellipse of growing (equal) semi-axes.
pub fn aperture_size_ellipse() -> Result<BenchmarkVariant, BenchError> {
    size_sweep(
        "aperture_size-ellipse",
        "aperture_size-ellipse.csv",
        ShapeAxis::sized(ShapeKind::Ellipse, |r| vec![r, r, 20.0]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterSpaceBuilder;

    fn point_count(variant: &BenchmarkVariant) -> usize {
        ParameterSpaceBuilder::new(variant.axes.clone())
            .unwrap()
            .points()
            .count()
    }

    #[test]
    fn test_apertures_variant() {
        let variant = apertures();
        assert_eq!(variant.repetitions, 1);
        assert_eq!(variant.schema, TableSchema::Combined);
        // 4 counts x (4 + 6 + 6)
        assert_eq!(point_count(&variant), 64);
    }

    #[test]
    fn test_count_variants() {
        for variant in [circle_apertures(), num_apertures()] {
            assert_eq!(variant.repetitions, 1);
            assert_eq!(variant.schema, TableSchema::CountSweep);
            assert_eq!(point_count(&variant), COUNT_SWEEP.len());
        }
        assert_eq!(num_apertures().placement, Placement::Uniform);
    }

    #[test]
    fn test_size_variants() {
        for variant in [
            aperture_size_circle().unwrap(),
            aperture_size_ellipse().unwrap(),
        ] {
            assert_eq!(variant.repetitions, 5);
            assert_eq!(variant.schema, TableSchema::SizeSweep);
            assert_eq!(point_count(&variant), 40);
        }
    }

    #[test]
    fn test_output_files_distinct() {
        let mut files: Vec<String> = [
            apertures(),
            circle_apertures(),
            num_apertures(),
            aperture_size_circle().unwrap(),
            aperture_size_ellipse().unwrap(),
        ]
        .into_iter()
        .map(|v| v.output_file)
        .collect();
        files.sort();
        files.dedup();
        assert_eq!(files.len(), 5);
    }
}
