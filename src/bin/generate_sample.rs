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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Launch {
    site: &'static str,
    payload: f64,
    booster: &'static str,
    class: i64,
}

/// Booster generations in flight order, with a rough success probability and
/// the heaviest payload they typically carried.
const BOOSTERS: [(&str, f64, f64); 5] = [
    ("v1.0", 0.2, 700.0),
    ("v1.1", 0.35, 4500.0),
    ("FT", 0.7, 9600.0),
    ("B4", 0.6, 7000.0),
    ("B5", 0.95, 15600.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

fn main() {
    let mut rng = SimpleRng::new(42);
    let mut launches = Vec::new();

    for (generation, &(booster, success_rate, max_payload)) in BOOSTERS.iter().enumerate() {
        let flights = 6 + generation * 3;
        for _ in 0..flights {
            // Early boosters only flew from the original pads.
            let site = if generation < 2 {
                rng.pick(&SITES[..2])
            } else {
                rng.pick(&SITES)
            };
            // Round to whole kilograms like the public manifests.
            let payload = (rng.next_f64() * max_payload).round();
            let class = i64::from(rng.next_f64() < success_rate);
            launches.push(Launch {
                site,
                payload,
                booster,
                class,
            });
        }
    }

    write_csv("sample_launches.csv", &launches);
    write_parquet("sample_launches.parquet", &launches);

    println!("Wrote {} launches to sample_launches.{{csv,parquet}}", launches.len());
}

fn write_csv(path: &str, launches: &[Launch]) {
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
    for (i, l) in launches.iter().enumerate() {
        writer
            .write_record([
                (i + 1).to_string(),
                l.site.to_string(),
                l.class.to_string(),
                format!("{:.1}", l.payload),
                l.booster.to_string(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");
}

fn write_parquet(path: &str, launches: &[Launch]) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                launches.iter().map(|l| l.site).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                launches.iter().map(|l| l.payload).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                launches.iter().map(|l| l.booster).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                launches.iter().map(|l| l.class).collect::<Vec<_>>(),
            )),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}
