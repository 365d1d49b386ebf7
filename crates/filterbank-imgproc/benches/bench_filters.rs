use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use filterbank_image::Image;
use filterbank_imgproc::bank::FilterBank;
use filterbank_imgproc::features::apply_filter_bank;

fn bench_filter_bank(c: &mut Criterion) {
    let mut group = c.benchmark_group("FilterBank");

    group.bench_function("build_standard_bank", |b| {
        b.iter(|| black_box(FilterBank::standard().unwrap()))
    });

    let bank = FilterBank::standard().unwrap();

    for (width, height) in [(32, 32), (64, 64), (128, 128)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_data = (0..width * height * 3)
            .map(|i| (i % 256) as f32)
            .collect::<Vec<_>>();
        let image = Image::<f32, 3>::new([*width, *height].into(), image_data).unwrap();

        group.bench_with_input(
            BenchmarkId::new("apply_filter_bank", &parameter_string),
            &image,
            |b, i| b.iter(|| black_box(apply_filter_bank(i, &bank, 1).unwrap())),
        );

        group.bench_with_input(
            BenchmarkId::new("apply_filter_bank_window3", &parameter_string),
            &image,
            |b, i| b.iter(|| black_box(apply_filter_bank(i, &bank, 3).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_filter_bank);
criterion_main!(benches);
