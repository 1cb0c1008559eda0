//! tilegemm-bench: times the GEMM kernels on random square matrices.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tilegemm::{multiply, simd, Kernel, Matrix, MilliTimer};

/// Largest size for which `--print` dumps the matrices.
const PRINT_LIMIT: usize = 16;

#[derive(Parser)]
#[command(name = "tilegemm-bench")]
#[command(about = "Benchmark dense f32 matrix multiplication kernels")]
#[command(version)]
struct Cli {
    /// Rows and columns of the square operands (multiple of 4 for the blocked kernel)
    #[arg(short, long, default_value = "1024")]
    size: usize,

    /// Random seed for reproducible inputs
    #[arg(long)]
    seed: Option<u64>,

    /// Also time the scalar reference kernel
    #[arg(long)]
    reference: bool,

    /// Also time the rayon-parallel blocked kernel
    #[arg(long)]
    parallel: bool,

    /// Print the operands and every result (sizes up to 16 only)
    #[arg(long)]
    print: bool,
}

/// Clears `out`, runs `kernel` under the timer and reports the sampled element.
fn run_kernel(
    kernel: Kernel,
    out: &mut Matrix,
    a: &Matrix,
    rhs: &Matrix,
    sample: usize,
    print: bool,
) -> Result<()> {
    let mut timer = MilliTimer::new();

    out.clear();
    timer.start();
    multiply(kernel, out, a, rhs).with_context(|| format!("{kernel} kernel failed"))?;
    timer.stop();

    info!("{kernel}: {} ms", timer.elapsed_ms());
    timer.show_gap();
    println!("\n{:.6}", out.as_slice()[sample]);

    if print {
        println!("C ({kernel}):");
        out.print();
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let n = cli.size;
    if n == 0 {
        bail!("--size must be at least 1");
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!("{n}x{n} f32 GEMM, simd backend: {}", simd::BACKEND);

    let mut a = Matrix::new(n, n)?;
    let mut b = Matrix::new(n, n)?;
    let mut c = Matrix::new(n, n)?;

    let sample = rng.random_range(0..n * n);

    a.random_with(&mut rng);
    b.random_with(&mut rng);

    let print = cli.print && n <= PRINT_LIMIT;
    if cli.print && !print {
        info!("--print ignored for size {n} (limit {PRINT_LIMIT})");
    }
    if print {
        println!("A:");
        a.print();
        println!("B:");
        b.print();
    }

    if cli.reference {
        run_kernel(Kernel::Reference, &mut c, &a, &b, sample, print)?;
    }

    run_kernel(Kernel::Blocked, &mut c, &a, &b, sample, print)?;

    if cli.parallel {
        run_kernel(Kernel::ParallelBlocked, &mut c, &a, &b, sample, print)?;
    }

    b.transpose()?;
    run_kernel(Kernel::Vectorized, &mut c, &a, &b, sample, print)?;

    Ok(())
}
