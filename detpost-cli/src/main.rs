use clap::Parser;
use detpost::{Detection, Rect, SuppressConfig, Suppressor};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Per-class NMS for detection candidates (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct NmsConfigJson {
    iou_threshold: f32,
    num_classes: usize,
    min_score: Option<f32>,
    parallel: bool,
}

impl Default for NmsConfigJson {
    fn default() -> Self {
        let cfg = SuppressConfig::default();
        Self {
            iou_threshold: cfg.iou_threshold,
            num_classes: cfg.num_classes,
            min_score: cfg.min_score,
            parallel: cfg.parallel,
        }
    }
}

impl From<NmsConfigJson> for SuppressConfig {
    fn from(value: NmsConfigJson) -> Self {
        Self {
            iou_threshold: value.iou_threshold,
            num_classes: value.num_classes,
            min_score: value.min_score,
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    input_path: String,
    output_path: Option<String>,
    labels: Vec<String>,
    nms: NmsConfigJson,
}

#[derive(Debug, Deserialize)]
struct CandidateRecord {
    rect: [f32; 4],
    score: f32,
    class_id: usize,
}

impl From<CandidateRecord> for Detection {
    fn from(value: CandidateRecord) -> Self {
        Detection::new(Rect::from(value.rect), value.score, value.class_id)
    }
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    rect: [f32; 4],
    score: f32,
    class_id: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl DetectionRecord {
    fn new(det: Detection, labels: &[String]) -> Self {
        Self {
            rect: det.rect.into(),
            score: det.score,
            class_id: det.class_id,
            label: labels.get(det.class_id).cloned(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    count: usize,
    detections: Vec<DetectionRecord>,
}

impl Output {
    fn new(survivors: Vec<Detection>, labels: &[String]) -> Self {
        let detections: Vec<DetectionRecord> = survivors
            .into_iter()
            .map(|det| DetectionRecord::new(det, labels))
            .collect();
        Self {
            count: detections.len(),
            detections,
        }
    }
}

fn check_config(config: &Config) -> Result<(), String> {
    if config.input_path.is_empty() {
        return Err("input_path must be set in the config".to_string());
    }
    if !config.labels.is_empty() && config.labels.len() != config.nms.num_classes {
        return Err(format!(
            "labels has {} entries but nms.num_classes is {}",
            config.labels.len(),
            config.nms.num_classes
        ));
    }
    Ok(())
}

/// Parses candidates from `input_text` and runs suppression with `config`.
fn process(config: Config, input_text: &str) -> Result<Output, Box<dyn std::error::Error>> {
    check_config(&config)?;
    let records: Vec<CandidateRecord> = serde_json::from_str(input_text)?;
    let candidates: Vec<Detection> = records.into_iter().map(Detection::from).collect();

    let start = Instant::now();
    let suppressor = Suppressor::new(config.nms.into())?;
    let survivors = suppressor.run(&candidates)?;
    tracing::info!(
        candidates = candidates.len(),
        survivors = survivors.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "suppression finished"
    );

    Ok(Output::new(survivors, &config.labels))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive("detpost=info".parse()?)
                    .add_directive("detpost_cli=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    check_config(&config)?;
    let output_path = config.output_path.clone();
    let input_text = fs::read_to_string(&config.input_path)?;
    let output = process(config, &input_text)?;
    let json = serde_json::to_string_pretty(&output)?;

    match output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
