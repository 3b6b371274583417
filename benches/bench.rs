use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use matfft::{dft, fft_batch, fft_with_opts, options::Options, planner::Direction};
use num_traits::Float;
use rand::{distributions::Standard, prelude::Distribution, thread_rng, Rng};
use utilities::rustfft::num_complex::Complex;
use utilities::rustfft::FftPlanner;

// The base case is a dense matmul, so sizes stay well below what a butterfly-only FFT handles
const LENGTHS: &[usize] = &[4, 5, 6, 7, 8, 9, 10, 11, 12];

const BATCH: usize = 16;

fn generate_numbers<T: Float>(n: usize) -> (Vec<T>, Vec<T>)
where
    Standard: Distribution<T>,
{
    let mut rng = thread_rng();

    let samples: Vec<T> = (&mut rng).sample_iter(Standard).take(2 * n).collect();

    samples
        .chunks_exact(2)
        .map(|rand_chunk| (rand_chunk[0], rand_chunk[1]))
        .unzip()
}

fn generate_complex_numbers<T: Float + Default>(n: usize) -> Vec<Complex<T>>
where
    Standard: Distribution<T>,
{
    let (reals, imags) = generate_numbers::<T>(n);
    reals
        .into_iter()
        .zip(imags)
        .map(|(re, im)| Complex::new(re, im))
        .collect()
}

fn benchmark_forward_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("Forward f64");

    for n in LENGTHS.iter() {
        let len = 1 << n;
        group.throughput(Throughput::Elements(len as u64));

        let id = "MatFFT single level";
        let options = Options::guess_options(len);

        group.bench_function(BenchmarkId::new(id, len), |b| {
            b.iter_batched(
                || generate_numbers::<f64>(len),
                |(reals, imags)| fft_with_opts(&reals, &imags, Direction::Forward, &options),
                BatchSize::SmallInput,
            );
        });

        let id = "MatFFT radix 16";
        let mut options = Options::guess_options(len);
        options.radix = Some(16);

        group.bench_function(BenchmarkId::new(id, len), |b| {
            b.iter_batched(
                || generate_numbers::<f64>(len),
                |(reals, imags)| fft_with_opts(&reals, &imags, Direction::Forward, &options),
                BatchSize::SmallInput,
            );
        });

        let id = "Direct DFT";
        group.bench_function(BenchmarkId::new(id, len), |b| {
            b.iter_batched(
                || generate_numbers::<f64>(len),
                |(reals, imags)| dft(&reals, &imags),
                BatchSize::SmallInput,
            );
        });

        let id = "RustFFT FFT Forward";
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(len);

        group.bench_function(BenchmarkId::new(id, len), |b| {
            b.iter_batched(
                || generate_complex_numbers::<f64>(len),
                |mut signal| {
                    fft.process(&mut signal);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn benchmark_forward_f32(c: &mut Criterion) {
    let mut group = c.benchmark_group("Forward f32");

    for n in LENGTHS.iter() {
        let len = 1 << n;
        group.throughput(Throughput::Elements(len as u64));

        let id = "MatFFT single level";
        let options = Options::guess_options(len);

        group.bench_function(BenchmarkId::new(id, len), |b| {
            b.iter_batched(
                || generate_numbers::<f32>(len),
                |(reals, imags)| fft_with_opts(&reals, &imags, Direction::Forward, &options),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn benchmark_batch_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("Batch f64");

    for n in LENGTHS.iter().take(6) {
        let len = 1 << n;
        group.throughput(Throughput::Elements((len * BATCH) as u64));

        let id = "MatFFT batch";
        let mut options = Options::guess_options(len);
        options.radix = Some(8.min(len / 2));

        group.bench_function(BenchmarkId::new(id, len), |b| {
            b.iter_batched(
                || {
                    (0..BATCH)
                        .map(|_| generate_numbers::<f64>(len))
                        .unzip::<_, _, Vec<_>, Vec<_>>()
                },
                |(reals, imags)| fft_batch(&reals, &imags, Direction::Forward, &options),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_forward_f64,
    benchmark_forward_f32,
    benchmark_batch_f64
);
criterion_main!(benches);
