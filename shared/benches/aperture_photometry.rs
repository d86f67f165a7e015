use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::image_proc::aperture_photometry::{
    aperture_photometry, Aperture, ApertureShape, EvaluationMethod,
};
use shared::image_proc::noise::offset_standard_normal;

fn make_field() -> ndarray::Array2<f64> {
    let mut rng = StdRng::seed_from_u64(11256);
    offset_standard_normal(&mut rng, (512, 512), 10.0).expect("valid field parameters")
}

fn bench_methods(c: &mut Criterion) {
    let field = make_field();
    let aperture = Aperture::new(
        vec![(255.0, 255.0); 100],
        ApertureShape::Ellipse {
            a: 3.0,
            b: 3.0,
            theta: 0.0,
        },
    )
    .expect("valid aperture");

    let mut group = c.benchmark_group("ellipse_100");
    for method in [
        EvaluationMethod::Exact,
        EvaluationMethod::Center,
        EvaluationMethod::Subpixel { subpixels: 5 },
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(method),
            &method,
            |b, &method| {
                b.iter(|| aperture_photometry(&field.view(), black_box(&aperture), method))
            },
        );
    }
    group.finish();
}

fn bench_circle_radius(c: &mut Criterion) {
    let field = make_field();

    let mut group = c.benchmark_group("circle_exact_radius");
    for r in [1.0, 16.0, 64.0] {
        let aperture = Aperture::new(vec![(255.5, 255.5)], ApertureShape::Circle { r })
            .expect("valid aperture");
        group.bench_with_input(BenchmarkId::from_parameter(r), &aperture, |b, aperture| {
            b.iter(|| {
                aperture_photometry(&field.view(), black_box(aperture), EvaluationMethod::Exact)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_methods, bench_circle_radius);
criterion_main!(benches);
