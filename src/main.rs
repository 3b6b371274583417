use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use matfft::validate::{compare_complex, max_abs_error, naive_dft, Tolerance};
use matfft::{dft, fft_2d, fft_batch, fft_with_opts, Direction, FftError, Options, Plan, Scalar};
use tracing::{error, info};
use tracing_forest::{util::LevelFilter, ForestLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Length of the transformed vectors (rows and columns with --two-d)
    #[arg(short = 'n', long, default_value = "1024")]
    fft_size: usize,

    /// Number of vectors transformed together
    #[arg(short = 'b', long, default_value = "1")]
    batch_size: usize,

    /// Size of the direct DFT at the bottom of the recursion (default or 0: half the FFT size)
    #[arg(short = 'r', long)]
    radix: Option<usize>,

    /// Transform an fft-size x fft-size matrix
    #[arg(long)]
    two_d: bool,

    /// Number of row chunks for --two-d
    #[arg(short = 's', long, default_value = "1")]
    serialisation_factor: usize,

    /// Run the two real matrix products on separate threads
    #[arg(long)]
    threads: bool,

    /// Single precision instead of double
    #[arg(long)]
    f32: bool,
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .init();

    let args = Args::parse();

    let result = if args.f32 {
        run::<f32>(&args)
    } else {
        run::<f64>(&args)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run<T: Scalar>(args: &Args) -> Result<(), FftError> {
    let mut opts = Options::guess_options(args.fft_size);
    opts.radix = args.radix;
    opts.multithreaded_matmul |= args.threads;
    opts.serialisation_factor = args.serialisation_factor;

    if args.two_d {
        run_2d::<T>(args.fft_size, &opts)
    } else if args.batch_size > 1 {
        run_batch::<T>(args.fft_size, args.batch_size, &opts)
    } else {
        run_single::<T>(args.fft_size, &opts)
    }
}

/// Tolerance suited to the precision of `T` and the magnitude of the reference output.
fn tolerance_for<T: Scalar>(expected_re: &[T], expected_im: &[T]) -> Tolerance {
    let relative = 10.0 * T::epsilon().as_f64().sqrt();
    let peak = expected_re
        .iter()
        .chain(expected_im)
        .map(|x| x.as_f64().abs())
        .fold(0.0, f64::max);

    Tolerance {
        relative,
        absolute: relative * peak,
    }
}

fn check<T: Scalar>(label: &str, actual: &(Vec<T>, Vec<T>), expected: &(Vec<T>, Vec<T>)) -> Result<(), FftError> {
    let tolerance = tolerance_for(&expected.0, &expected.1);
    info!(
        "{label} max abs error: {:e}",
        max_abs_error(&actual.0, &actual.1, &expected.0, &expected.1)
    );
    compare_complex(&actual.0, &actual.1, &expected.0, &expected.1, &tolerance)
}

/// `y = x * (x + (1 - x) i)` with `x = k / n`
fn test_signal<T: Scalar>(n: usize) -> (Vec<T>, Vec<T>) {
    (0..n)
        .map(|k| {
            let x = k as f64 / n as f64;
            (T::from_f64(x * x), T::from_f64(x * (1.0 - x)))
        })
        .unzip()
}

/// `1, 2, 3, ...` in both the real and the imaginary part
fn counting_signal<T: Scalar>(len: usize) -> Vec<T> {
    (1..=len).map(T::from_usize).collect()
}

/// `a * b` as an element count, or an error naming `size` if it overflows
fn element_count(size: usize, a: usize, b: usize) -> Result<usize, FftError> {
    a.checked_mul(b).ok_or(FftError::InvalidSize {
        size,
        reason: "element count overflows usize",
    })
}

fn gflops(flops: usize, seconds: f64) -> f64 {
    flops as f64 / seconds / 1e9
}

fn run_single<T: Scalar>(n: usize, opts: &Options) -> Result<(), FftError> {
    let plan = Plan::new(n, Direction::Forward, opts)?;
    let (reals, imags) = test_signal::<T>(n);
    info!("FFT-1D size: {n}, levels: {:?}, base DFT size: {}", plan.levels(), plan.base_size());

    let expected = naive_dft(&reals, &imags)?;

    let now = Instant::now();
    let direct = dft(&reals, &imags)?;
    let dft_time = now.elapsed();

    let now = Instant::now();
    let fast = fft_with_opts(&reals, &imags, Direction::Forward, opts)?;
    let fft_time = now.elapsed();

    check("DFT", &direct, &expected)?;
    check("FFT", &fast, &expected)?;

    let flops = plan.flop_estimate(1);
    info!("DFT time: {dft_time:?}, FFT time: {fft_time:?}");
    info!(
        "FFT FLOPS: {flops}, {:.3} GFLOP/s",
        gflops(flops, fft_time.as_secs_f64())
    );
    Ok(())
}

fn run_batch<T: Scalar>(n: usize, batch: usize, opts: &Options) -> Result<(), FftError> {
    let plan = Plan::new(n, Direction::Forward, opts)?;
    let signal = counting_signal::<T>(element_count(n, n, batch)?);
    let vectors: Vec<&[T]> = signal.chunks_exact(n).collect();
    info!("Batched FFT-1D input shape: [{batch}, {n}]");

    let now = Instant::now();
    let (out_re, out_im) = fft_batch(&vectors, &vectors, Direction::Forward, opts)?;
    let fft_time = now.elapsed();

    for (j, vector) in vectors.iter().enumerate() {
        let expected = naive_dft(vector, vector)?;
        check(&format!("FFT[{j}]"), &(out_re[j].clone(), out_im[j].clone()), &expected)?;
    }

    let flops = plan.flop_estimate(batch);
    info!("FFT time: {fft_time:?}");
    info!(
        "FFT FLOPS: {flops}, {:.3} GFLOP/s",
        gflops(flops, fft_time.as_secs_f64())
    );
    Ok(())
}

/// Row transforms then column transforms through the naive reference
fn reference_2d<T: Scalar>(reals: &[T], imags: &[T], dim: usize) -> Result<(Vec<T>, Vec<T>), FftError> {
    let mut re = reals.to_vec();
    let mut im = imags.to_vec();

    for r in 0..dim {
        let row = r * dim..(r + 1) * dim;
        let (row_re, row_im) = naive_dft(&re[row.clone()], &im[row.clone()])?;
        re[row.clone()].copy_from_slice(&row_re);
        im[row].copy_from_slice(&row_im);
    }

    for c in 0..dim {
        let col_re: Vec<T> = (0..dim).map(|r| re[r * dim + c]).collect();
        let col_im: Vec<T> = (0..dim).map(|r| im[r * dim + c]).collect();
        let (out_re, out_im) = naive_dft(&col_re, &col_im)?;
        for r in 0..dim {
            re[r * dim + c] = out_re[r];
            im[r * dim + c] = out_im[r];
        }
    }

    Ok((re, im))
}

fn run_2d<T: Scalar>(dim: usize, opts: &Options) -> Result<(), FftError> {
    let plan = Plan::new(dim, Direction::Forward, opts)?;
    let signal = counting_signal::<T>(element_count(dim, dim, dim)?);

    let now = Instant::now();
    let fast = fft_2d(&signal, &signal, dim, Direction::Forward, opts)?;
    let fft_time = now.elapsed();

    let expected = reference_2d(&signal, &signal, dim)?;
    check("FFT-2D", &fast, &expected)?;

    // rows and columns: `dim` vectors per pass, two passes
    let flops = 2 * plan.flop_estimate(dim);
    info!("FFT-2D time: {fft_time:?}");
    info!(
        "FFT-2D FLOPS: {flops}, {:.3} GFLOP/s",
        gflops(flops, fft_time.as_secs_f64())
    );
    Ok(())
}
