//! Benchmark kernel: deterministic fill, timed multiply loop, throughput.

use std::time::{Duration, Instant};

use crate::Error;

/// Size and repetition count for one benchmark run.
///
/// `size` is the edge length N of the square matrices; `iterations` is how
/// many times the multiply is repeated with the output fed back as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    pub size: u32,
    pub iterations: u32,
}

/// Outcome of one benchmark run.
///
/// `elapsed` covers the multiply loop only; allocation and initialization are
/// excluded. `checksum` is the sum of the first and last elements of the final
/// output buffer and must be reported by callers so the computation stays
/// observable.
#[derive(Debug, Clone, Copy)]
pub struct BenchResult {
    pub config: BenchConfig,
    pub elapsed: Duration,
    pub checksum: f64,
}

impl BenchResult {
    pub fn elapsed_nanos(&self) -> u64 {
        self.elapsed.as_nanos() as u64
    }

    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }

    /// Throughput in GFLOPS: 2·N³·iterations floating-point operations
    /// (one multiply and one add per inner-loop step) over the elapsed time.
    pub fn gflops(&self) -> f64 {
        let n = self.config.size as f64;
        let ops = 2.0 * n * n * n * self.config.iterations as f64;
        ops / self.elapsed.as_secs_f64() / 1e9
    }
}

/// Runs the benchmark described by `config`.
///
/// Allocates three N×N buffers, fills A and B with the fixed modular pattern,
/// then times `iterations` rounds of `C = A × B` with A and C swapped after
/// each round. B is never rotated, so every round multiplies the previous
/// output by the original B.
pub fn run(config: &BenchConfig) -> Result<BenchResult, Error> {
    if config.size == 0 || config.iterations == 0 {
        return Err(Error::InvalidConfig(config.size, config.iterations));
    }

    let n = config.size as usize;
    let mut a = vec![0.0; n * n];
    let mut b = vec![0.0; n * n];
    let mut c = vec![0.0; n * n];
    fill_inputs(&mut a, &mut b);

    let start = Instant::now();
    for _ in 0..config.iterations {
        multiply(&a, &b, &mut c, n);
        std::mem::swap(&mut a, &mut c);
    }
    let elapsed = start.elapsed();

    // After the final swap, `a` holds the last round's output.
    let checksum = a[0] + a[n * n - 1];

    Ok(BenchResult {
        config: *config,
        elapsed,
        checksum,
    })
}

/// Naive row-major multiply: `c[i][j] = Σ_k a[i][k] * b[k][j]`.
///
/// All three slices must have length `n * n`. Intentionally unblocked and
/// untiled; the benchmark measures scalar throughput, not a tuned kernel.
pub fn multiply(a: &[f64], b: &[f64], c: &mut [f64], n: usize) {
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                sum += a[i * n + k] * b[k * n + j];
            }
            c[i * n + j] = sum;
        }
    }
}

/// Fixed reproducible fill: A[i] = (i % 17) + 0.5, B[i] = (i % 13) + 0.5.
fn fill_inputs(a: &mut [f64], b: &mut [f64]) {
    for (i, elem) in a.iter_mut().enumerate() {
        *elem = (i % 17) as f64 + 0.5;
    }
    for (i, elem) in b.iter_mut().enumerate() {
        *elem = (i % 13) as f64 + 0.5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_2x2() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut c = [0.0; 4];
        multiply(&a, &b, &mut c, 2);
        assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn rotation_feeds_output_back_as_input() {
        // Two iterations must equal multiplying the first result by the
        // unchanged B a second time.
        let mut a = vec![1.0, 2.0, 3.0, 4.0];
        let b = vec![5.0, 6.0, 7.0, 8.0];
        let mut c = vec![0.0; 4];

        multiply(&a, &b, &mut c, 2);
        std::mem::swap(&mut a, &mut c);
        multiply(&a, &b, &mut c, 2);

        let first = [19.0, 22.0, 43.0, 50.0];
        let mut expected = [0.0; 4];
        multiply(&first, &b, &mut expected, 2);
        assert_eq!(c, expected);
    }

    #[test]
    fn fill_pattern_is_fixed() {
        let mut a = vec![0.0; 20];
        let mut b = vec![0.0; 20];
        fill_inputs(&mut a, &mut b);
        assert_eq!(a[0], 0.5);
        assert_eq!(a[16], 16.5);
        assert_eq!(a[17], 0.5);
        assert_eq!(b[12], 12.5);
        assert_eq!(b[13], 0.5);
    }

    #[test]
    fn run_is_deterministic() {
        let config = BenchConfig {
            size: 4,
            iterations: 1,
        };
        let first = run(&config).unwrap();
        let second = run(&config).unwrap();
        assert_eq!(first.checksum, second.checksum);
    }

    #[test]
    fn run_rejects_zero_size() {
        let config = BenchConfig {
            size: 0,
            iterations: 1,
        };
        assert!(matches!(run(&config), Err(Error::InvalidConfig(0, 1))));
    }

    #[test]
    fn run_rejects_zero_iterations() {
        let config = BenchConfig {
            size: 2,
            iterations: 0,
        };
        assert!(matches!(run(&config), Err(Error::InvalidConfig(2, 0))));
    }

    #[test]
    fn elapsed_is_nonnegative_for_small_sizes() {
        for size in 1..=4 {
            let result = run(&BenchConfig {
                size,
                iterations: 1,
            })
            .unwrap();
            assert!(result.elapsed_millis() >= 0.0);
        }
    }

    #[test]
    fn gflops_matches_formula() {
        let result = BenchResult {
            config: BenchConfig {
                size: 64,
                iterations: 100,
            },
            elapsed: Duration::from_secs(1),
            checksum: 0.0,
        };
        let expected = 2.0 * 64.0_f64.powi(3) * 100.0 / 1e9;
        assert!((result.gflops() - expected).abs() < 1e-9);
    }
}
