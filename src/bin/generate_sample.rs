//! Writes a synthetic survey CSV to the app's fixed data path.
//!
//! The shape mirrors the published NFHS state factsheets: one row per
//! state and survey round, a handful of indicator columns, `NA` where a
//! round did not report a value, and one deliberately malformed cell so
//! the loader's silent-coercion path stays exercisable.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

const OUTPUT_PATH: &str = "data/nfhs.csv";

const STATES: [&str; 12] = [
    "Andhra Pradesh",
    "Assam",
    "Bihar",
    "Goa",
    "Gujarat",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Punjab",
    "Rajasthan",
    "Tamil Nadu",
    "West Bengal",
];

const ROUNDS: [&str; 2] = ["NFHS-4", "NFHS-5"];

/// (header, baseline, spread)
const INDICATORS: [(&str, f64, f64); 5] = [
    ("Sex ratio (females per 1000 males)", 1000.0, 60.0),
    ("Women who are literate (%)", 72.0, 14.0),
    ("Institutional births (%)", 82.0, 12.0),
    ("Children under 5 years who are stunted (%)", 32.0, 9.0),
    ("Households with an improved drinking-water source (%)", 90.0, 7.0),
];

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
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut out = String::new();

    let mut headers = vec!["STATE", "nfhs"];
    headers.extend(INDICATORS.iter().map(|(name, _, _)| *name));
    writeln!(&mut out, "{}", headers.join(","))?;

    for state in STATES {
        for round in ROUNDS {
            let mut row = vec![state.to_string(), round.to_string()];
            for (_, base, spread) in INDICATORS {
                // roughly 6% of cells carry the NA sentinel, as in the
                // source sheets
                if rng.next_f64() < 0.06 {
                    row.push("NA".to_string());
                    continue;
                }
                let round_shift = if round == "NFHS-5" { spread * 0.15 } else { 0.0 };
                let value = base + (rng.next_f64() - 0.5) * 2.0 * spread + round_shift;
                row.push(format!("{value:.1}"));
            }
            writeln!(&mut out, "{}", row.join(","))?;
        }
    }

    // One cell that is neither numeric nor the sentinel; the loader turns
    // it into an absent value rather than an error.
    writeln!(&mut out, "Lakshadweep,NFHS-5,979.0,91.8,99.2,n/a,94.6")?;

    if let Some(parent) = Path::new(OUTPUT_PATH).parent() {
        fs::create_dir_all(parent).context("creating data directory")?;
    }
    fs::write(OUTPUT_PATH, &out).with_context(|| format!("writing {OUTPUT_PATH}"))?;

    println!(
        "Wrote {} states x {} rounds (+1 edge-case row) to {OUTPUT_PATH}",
        STATES.len(),
        ROUNDS.len()
    );
    Ok(())
}
