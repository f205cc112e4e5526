//! End-to-end demo: synthesize a sweep carrying a redox peak in each scan
//! direction, detect the baseline, and print what a report layer would
//! consume. Run with `RUST_LOG=debug` to watch the pipeline stages.

use anyhow::Result;
use cvbaseline::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let n_half = 200;
    let up: Vec<f64> = (0..n_half)
        .map(|i| -0.5 + i as f64 / (n_half - 1) as f64)
        .collect();
    let voltage: Vec<f64> = up.iter().chain(up.iter().rev()).copied().collect();

    // Ohmic background plus one oxidation peak per direction.
    let peak = |i: usize, center: usize| {
        let d = i as f64 - center as f64;
        5.0e-6 * (-d * d / (2.0 * 8.0 * 8.0)).exp()
    };
    let current: Vec<f64> = voltage
        .iter()
        .enumerate()
        .map(|(i, &v)| 2.0e-6 * v + 5.0e-6 + peak(i, 120) + peak(i, 280))
        .collect();

    let trace = Trace::new(voltage, current)?;
    println!("trace: {:?}", trace.summary());

    let detector = BaselineDetector::default();
    let result = detector.detect(&trace);

    for (direction, segment) in [
        ("forward", &result.forward_segment),
        ("reverse", &result.reverse_segment),
    ] {
        match segment {
            Some(s) => println!(
                "{direction}: samples [{}..{}], slope {:.3e} A/V, r2 {:.4}",
                s.start_idx, s.end_idx, s.slope, s.r2
            ),
            None => println!("{direction}: fallback baseline used"),
        }
    }

    let corrected = result.corrected(&trace);
    let peak_height = corrected.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    println!("peak height after baseline subtraction: {peak_height:.3e} A");

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
