use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

struct SampleRow {
    site: &'static str,
    class: i64,
    payload_mass_kg: f64,
    booster: &'static str,
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // (site, number of launches)
    let sites: [(&str, usize); 4] = [
        ("CCAFS LC-40", 26),
        ("KSC LC-39A", 13),
        ("VAFB SLC-4E", 10),
        ("CCAFS SLC-40", 7),
    ];

    // (booster version category, payload band in kg, success rate)
    let boosters: [(&str, (f64, f64), f64); 5] = [
        ("v1.0", (0.0, 2500.0), 0.40),
        ("v1.1", (500.0, 4000.0), 0.60),
        ("FT", (1500.0, 7000.0), 0.85),
        ("B4", (2000.0, 9600.0), 0.80),
        ("B5", (3000.0, 9600.0), 0.95),
    ];

    let mut rows: Vec<SampleRow> = Vec::new();

    for (site, launches) in sites {
        for _ in 0..launches {
            let (booster, (lo, hi), success_rate) =
                boosters[(rng.next_u64() % boosters.len() as u64) as usize];

            let mid = (lo + hi) / 2.0;
            let spread = (hi - lo) / 4.0;
            let payload = rng.gauss(mid, spread).clamp(lo, hi);
            let payload = (payload * 10.0).round() / 10.0;

            let class = i64::from(rng.next_f64() < success_rate);

            rows.push(SampleRow {
                site,
                class,
                payload_mass_kg: payload,
                booster,
            });
        }
    }

    write_csv("sample_launches.csv", &rows);
    write_parquet("sample_launches.parquet", &rows);

    println!(
        "Wrote {} launch records to sample_launches.csv / sample_launches.parquet",
        rows.len()
    );
}

fn write_csv(path: &str, rows: &[SampleRow]) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    writer
        .write_record([
            "Flight Number",
            "Launch Site",
            "class",
            "Payload Mass (kg)",
            "Booster Version Category",
        ])
        .expect("Failed to write CSV header");

    for (i, row) in rows.iter().enumerate() {
        writer
            .write_record([
                (i + 1).to_string(),
                row.site.to_string(),
                row.class.to_string(),
                format!("{:.1}", row.payload_mass_kg),
                row.booster.to_string(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");
}

fn write_parquet(path: &str, rows: &[SampleRow]) {
    let site_array = StringArray::from(rows.iter().map(|r| r.site).collect::<Vec<_>>());
    let payload_array = Float64Array::from(
        rows.iter().map(|r| r.payload_mass_kg).collect::<Vec<_>>(),
    );
    let class_array = Int64Array::from(rows.iter().map(|r| r.class).collect::<Vec<_>>());
    let booster_array = StringArray::from(rows.iter().map(|r| r.booster).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(site_array),
            Arc::new(payload_array),
            Arc::new(class_array),
            Arc::new(booster_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}
