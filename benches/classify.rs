use criterion::{black_box, criterion_group, criterion_main, Criterion};

use genoslice::classify::classify;
use genoslice::models::{Annotation, FeatureKind, Strand};

fn classify_bench(c: &mut Criterion) {
    let mut ann = Annotation::new();
    let coord = ann.new_coordinate("chr1", 0, 1_000_000);
    let locus = ann.new_super_locus(None);
    let tx = ann.new_transcript(locus, None);
    let piece = ann.new_piece(tx);
    let mut features = Vec::new();
    for i in 0..1000 {
        let start = i * 997;
        features.push(ann.new_feature(
            piece,
            FeatureKind::SpliceDonor,
            "chr1",
            start,
            start + 450,
            Strand::Plus,
            coord,
            None,
        ));
    }
    let window = ann.new_coordinate("chr1", 400_000, 420_000);

    c.bench_function("classify_1000_features", |b| {
        b.iter(|| {
            for &f in &features {
                let position =
                    classify(ann.feature(f), ann.coordinate(window), black_box(Strand::Plus))
                        .unwrap();
                black_box(position);
            }
        })
    });
}

criterion_group!(classify_group, classify_bench);
criterion_main!(classify_group);
