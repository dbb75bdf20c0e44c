use criterion::{criterion_group, criterion_main, Criterion};
use stegano_dct::{Carrier, Plane};

fn cover() -> Carrier {
    let mut rng = fastrand::Rng::with_seed(42);
    let mut plane = || Plane::from_fn(256, 256, |_, _| rng.u8(48..208) as f64);
    Carrier::from_planes(plane(), plane(), plane()).expect("Cover image is not valid.")
}

pub fn image_embedding(c: &mut Criterion) {
    c.bench_function("DCT Embedding", |b| {
        let plain_image = cover();

        b.iter(|| {
            stegano_dct::embed(&plain_image, "SuperSecret42", "Hello World!")
                .expect("Cannot hide secret message")
        })
    });
}

pub fn image_extraction(c: &mut Criterion) {
    c.bench_function("DCT Extraction", |b| {
        let img = stegano_dct::embed(&cover(), "SuperSecret42", "Hello World!")
            .expect("Cannot hide secret message");

        b.iter(|| stegano_dct::extract(&img, "SuperSecret42"))
    });
}

criterion_group!(benches, image_embedding, image_extraction);
criterion_main!(benches);
