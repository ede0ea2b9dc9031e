//! Writes a synthetic `tomates_calidad.csv` for trying out the dashboard.
//!
//! Usage: `generate_sample [OUTPUT] [ROWS]`

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

/// (lot, mean diameter mm, defect probability)
const LOTS: [(&str, f64, f64); 4] = [
    ("L01", 64.0, 0.06),
    ("L02", 60.0, 0.10),
    ("L03", 57.0, 0.22),
    ("L04", 62.0, 0.08),
];

const SHIFTS: [&str; 3] = ["Mañana", "Tarde", "Noche"];

fn quality_for(diameter: f64, defective: bool) -> &'static str {
    if defective {
        "Descarte"
    } else if diameter >= 65.0 {
        "Primera"
    } else if diameter >= 57.0 {
        "Segunda"
    } else {
        "Tercera"
    }
}

/// Day `n` counted from 2024-03-01, as ISO text.
fn date_for(day: usize) -> String {
    const MONTHS: [(u32, usize); 4] = [(3, 31), (4, 30), (5, 31), (6, 30)];
    let mut rest = day % 122;
    for (month, len) in MONTHS {
        if rest < len {
            return format!("2024-{month:02}-{:02}", rest + 1);
        }
        rest -= len;
    }
    unreachable!("day index is reduced modulo the covered range")
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output_path = args.next().unwrap_or_else(|| "tomates_calidad.csv".to_string());
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid row count '{n}'"))?,
        None => 500,
    };

    let mut rng = StdRng::seed_from_u64(42);
    let weight_noise = Normal::new(0.0, 8.0)?;
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "id_tomate",
        "fecha",
        "turno",
        "lote_proveedor",
        "categoria_calidad",
        "defecto",
        "diametro_mm",
        "peso_g",
    ])?;

    for i in 0..rows {
        let (lot, mean_diameter, defect_p) = LOTS[i % LOTS.len()];
        let diameter = rng.sample(Normal::new(mean_diameter, 5.5)?).max(35.0);
        // Roughly linear weight/diameter relation with noise.
        let weight = (2.4 * diameter - 40.0 + rng.sample(weight_noise)).max(20.0);
        let defective = rng.gen_bool(defect_p);
        let shift = SHIFTS.choose(&mut rng).copied().unwrap_or(SHIFTS[0]);

        writer.write_record([
            (i + 1).to_string(),
            date_for(i / 8),
            shift.to_string(),
            lot.to_string(),
            quality_for(diameter, defective).to_string(),
            if defective { "Sí" } else { "No" }.to_string(),
            format!("{diameter:.1}"),
            format!("{weight:.1}"),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {rows} tomatoes to {output_path}");
    Ok(())
}
