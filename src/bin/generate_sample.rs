use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};

/// Per-workload timing profile: (base seconds, jitter std-dev, warm-up spike).
const WORKLOADS: [(&str, f64, f64, f64); 6] = [
    ("A", 0.000_020, 0.000_003, 0.000_050),
    ("B", 0.000_140, 0.000_012, 0.000_200),
    ("C", 0.000_090, 0.000_015, 0.000_120),
    ("D", 0.000_110, 0.000_020, 0.000_150),
    ("E", 0.000_650, 0.000_060, 0.000_900),
    ("F", 0.000_300, 0.000_040, 0.000_400),
];

const ITERATIONS: usize = 100;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One workload's iteration timings; the first iterations pay a warm-up cost
/// that decays away.
fn workload_timings(base: f64, jitter: f64, spike: f64, rng: &mut SimpleRng) -> Vec<f64> {
    (0..ITERATIONS)
        .map(|i| {
            let warmup = spike * (-(i as f64) / 3.0).exp();
            (rng.gauss(base, jitter) + warmup).max(0.000_001)
        })
        .collect()
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "data.txt";

    let file = File::create(output_path).with_context(|| format!("creating {output_path}"))?;
    let mut out = BufWriter::new(file);

    for &(label, base, jitter, spike) in &WORKLOADS {
        for t in workload_timings(base, jitter, spike, &mut rng) {
            writeln!(out, "{t:.6}").with_context(|| format!("writing workload {label}"))?;
        }
    }
    out.flush().context("flushing output")?;

    println!(
        "Wrote {} samples ({} workloads x {ITERATIONS}) to {output_path}",
        WORKLOADS.len() * ITERATIONS,
        WORKLOADS.len()
    );
    Ok(())
}
