//! Write a demo `master.csv` and matching `.dpt` spectra into a directory,
//! ready to upload to a test Nextcloud folder.
//!
//! ```bash
//! cargo run --bin generate_sample -- sample_data
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use bcviz::synthetic::{generate_spectrum, SimpleRng};

struct Sample {
    code: &'static str,
    bet: f64,
    ph: f64,
    yield_pct: f64,
    pore_size: f64,
    pore_volume: f64,
    /// (centre, width, amplitude) of the main absorption bands
    peaks: Vec<(f64, f64, f64)>,
}

fn samples() -> Vec<Sample> {
    vec![
        Sample {
            code: "BC01",
            bet: 512.4,
            ph: 9.1,
            yield_pct: 28.5,
            pore_size: 2.4,
            pore_volume: 0.31,
            peaks: vec![(3400.0, 80.0, 0.8), (1590.0, 30.0, 0.6), (1050.0, 40.0, 0.5)],
        },
        Sample {
            code: "BC02",
            bet: 301.0,
            ph: 8.3,
            yield_pct: 34.2,
            pore_size: 3.1,
            pore_volume: 0.22,
            peaks: vec![(3200.0, 60.0, 0.6), (1700.0, 25.0, 0.7), (1200.0, 35.0, 0.4)],
        },
        Sample {
            code: "AC01",
            bet: 1120.7,
            ph: 7.2,
            yield_pct: 18.9,
            pore_size: 1.9,
            pore_volume: 0.68,
            peaks: vec![(3600.0, 70.0, 0.9), (1580.0, 45.0, 0.4), (870.0, 25.0, 0.5)],
        },
    ]
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data"));
    let spectra_dir = out_dir.join("processed");
    std::fs::create_dir_all(&spectra_dir)
        .with_context(|| format!("creating {}", spectra_dir.display()))?;

    let mut rng = SimpleRng::new(42);

    // Wavenumbers: 4000 → 400, step 2
    let wavenumbers: Vec<f64> = (0..1801).map(|i| 4000.0 - i as f64 * 2.0).collect();

    let samples = samples();
    write_master(&out_dir.join("master.csv"), &samples)?;

    for sample in &samples {
        let y = generate_spectrum(&wavenumbers, &sample.peaks, 0.005, &mut rng);
        let path = spectra_dir.join(format!("{}.dpt", sample.code));
        write_dpt(&path, &wavenumbers, &y)?;
    }

    println!(
        "Wrote master.csv and {} spectra ({} wavenumbers each) to {}",
        samples.len(),
        wavenumbers.len(),
        out_dir.display()
    );
    Ok(())
}

fn write_master(path: &Path, samples: &[Sample]) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    w.write_record(["Code", "BET", "pH", "Yield", "pore size", "pore volume"])?;
    for s in samples {
        w.write_record([
            s.code.to_string(),
            s.bet.to_string(),
            s.ph.to_string(),
            s.yield_pct.to_string(),
            s.pore_size.to_string(),
            s.pore_volume.to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

fn write_dpt(path: &Path, x: &[f64], y: &[f64]) -> Result<()> {
    let mut w = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for (xi, yi) in x.iter().zip(y) {
        w.write_record([format!("{xi:.2}"), format!("{yi:.6}")])?;
    }
    w.flush()?;
    Ok(())
}
