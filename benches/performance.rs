use construct::{Buffer, Context, FieldType};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const TYPES: [FieldType; 3] = [FieldType::UInt32, FieldType::Float32, FieldType::UChar];

fn filled(size: usize) -> Buffer {
    let mut buffer = Buffer::with_types(size, &TYPES).unwrap();
    for i in 0..size {
        // Scrambled keys so sorting has work to do
        let key = (i as u32).wrapping_mul(2_654_435_761) % 10_007;
        buffer.set(i, 0, key).unwrap();
        buffer.set(i, 1, i as f32).unwrap();
    }
    buffer
}

fn bench_field_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_access");

    for size in [100, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("set_get", size), size, |b, &size| {
            let mut buffer = filled(size);
            b.iter(|| {
                for i in 0..size {
                    buffer.set(i, 2, black_box(i as u8)).unwrap();
                    black_box(buffer.get::<u32>(i, 0).unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_bound_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("bound_iteration");

    for size in [100, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("iterate", size), size, |b, &size| {
            let mut ctx = Context::new();
            let id = ctx.adopt(filled(size)).unwrap();
            b.iter(|| {
                let mut total = 0u64;
                while ctx.iterate(id).unwrap() {
                    total += u64::from(ctx.get_u32(0).unwrap());
                }
                black_box(total)
            });
        });

        group.bench_with_input(BenchmarkId::new("rows", size), size, |b, &size| {
            let buffer = filled(size);
            b.iter(|| {
                let total: u64 = buffer
                    .rows()
                    .map(|row| u64::from(row.get::<u32>(0).unwrap()))
                    .sum();
                black_box(total)
            });
        });
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_by_field");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("unsorted", size), size, |b, &size| {
            let source = filled(size);
            b.iter(|| {
                let mut buffer = source.clone();
                buffer.sort_by_field(true, 0, FieldType::UInt32).unwrap();
                black_box(buffer.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("presorted", size), size, |b, &size| {
            let mut sorted = filled(size);
            sorted.sort_by_field(true, 0, FieldType::UInt32).unwrap();
            b.iter(|| {
                sorted.sort_by_field(true, 0, FieldType::UInt32).unwrap();
                black_box(sorted.len())
            });
        });
    }
    group.finish();
}

fn bench_structural(c: &mut Criterion) {
    let mut group = c.benchmark_group("structural");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("append_row", size), size, |b, &size| {
            let source = filled(1);
            b.iter(|| {
                let mut buffer = source.recreate();
                for _ in 0..size {
                    buffer.append_row(&source, 0).unwrap();
                }
                black_box(buffer.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("remove_front", size), size, |b, &size| {
            let source = filled(size);
            b.iter(|| {
                let mut buffer = source.clone();
                while !buffer.is_empty() {
                    buffer.remove(0).unwrap();
                }
                black_box(buffer.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("reverse", size), size, |b, &size| {
            let mut buffer = filled(size);
            b.iter(|| {
                buffer.reverse();
                black_box(buffer.len())
            });
        });
    }
    group.finish();
}

fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer");

    for size in [1000, 100000].iter() {
        let source = filled(*size);
        group.throughput(Throughput::Bytes(source.byte_len() as u64));
        group.bench_with_input(BenchmarkId::new("dump_load", size), size, |b, _| {
            let mut target = source.recreate();
            b.iter(|| {
                target.load(black_box(&source.dump())).unwrap();
                black_box(target.len())
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_field_access,
    bench_bound_iteration,
    bench_sort,
    bench_structural,
    bench_transfer
);
criterion_main!(benches);
