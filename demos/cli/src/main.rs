use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use symptom_core::ScoringConfig;
use symptom_engine::{format_markdown, generate_diagnosis_value, DiagnosisEngine};

#[derive(Parser, Debug)]
#[command(
    name = "symptom-cli",
    about = "Đánh giá triệu chứng dựa trên danh mục bệnh tích hợp."
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tạo đánh giá từ file JSON yêu cầu.
    Diagnose {
        /// Đường dẫn tới file JSON yêu cầu.
        #[arg(short, long)]
        input: PathBuf,
        /// File JSON ghi đè cấu hình chấm điểm.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// In kết quả dạng markdown thay vì JSON.
        #[arg(long)]
        markdown: bool,
    },
    /// Gợi ý triệu chứng theo từ khóa.
    Suggest {
        text: String,
        /// File JSON ghi đè cấu hình (dùng `max_suggestions`).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Kiểm tra danh sách triệu chứng trong file JSON.
    Validate {
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Diagnose {
            input,
            config,
            markdown,
        } => {
            let request = read_json(&input)?;
            let config = read_config(config.as_deref())?;

            let result = generate_diagnosis_value(&request, &config)?;
            tracing::info!(
                condition = %result.primary_condition.name,
                urgency = result.urgency_level.label(),
                "diagnosis generated"
            );

            if markdown {
                print!("{}", format_markdown(&result));
            } else {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Suggest { text, config } => {
            let engine = DiagnosisEngine::with_config(read_config(config.as_deref())?);
            for suggestion in engine.suggestions(&text) {
                println!("{suggestion}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { input } => {
            let value = read_json(&input)?;
            let symptoms = value.get("symptoms").unwrap_or(&value);
            let outcome = symptom_engine::validate_symptoms(symptoms);
            println!("{}", outcome.message);
            Ok(if outcome.is_valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<ScoringConfig> {
    match path {
        Some(path) => serde_json::from_value::<ScoringConfig>(read_json(path)?)
            .with_context(|| format!("Cấu hình không hợp lệ {path:?}")),
        None => Ok(ScoringConfig::default()),
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Không đọc được file {path:?}"))?;
    serde_json::from_str(&data).with_context(|| format!("JSON không hợp lệ trong {path:?}"))
}
