use criterion::{criterion_group, criterion_main, Criterion};
use cohesix_ramdev::{DevConfig, OpenMode, RamDev};
use std::io::SeekFrom;

fn bench_write_read(c: &mut Criterion) {
    let dev = RamDev::new(DevConfig::default()).expect("allocate");
    let chunk = vec![0xA5u8; 4096];
    c.bench_function("write_read_4k", |b| {
        b.iter(|| {
            let mut s = dev.open(OpenMode::READ | OpenMode::WRITE);
            dev.write(&mut s, &chunk).expect("write");
            dev.seek(&mut s, SeekFrom::Start(0));
            let mut buf = vec![0u8; 4096];
            dev.read(&mut s, &mut buf);
            dev.close(s);
        });
    });
}

fn bench_sparse_write(c: &mut Criterion) {
    c.bench_function("sparse_write_64k_gap", |b| {
        b.iter(|| {
            let dev = RamDev::new(DevConfig {
                name: "bench".into(),
                capacity: 128 * 1024,
            })
            .expect("allocate");
            let mut s = dev.open(OpenMode::WRITE);
            dev.seek(&mut s, SeekFrom::Start(64 * 1024));
            dev.write(&mut s, b"end").expect("write");
        });
    });
}

criterion_group!(benches, bench_write_read, bench_sparse_write);
criterion_main!(benches);
