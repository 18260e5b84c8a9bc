use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use serde_json::Value;

use visualizer_kit::data::loader;
use visualizer_kit::visualizer::{self, MatrixOptions, PcaOptions};
use visualizer_kit::LocalFileAccess;

/// Turn matrices, PCA scores and coordinates into visualizer JSON.
#[derive(Parser)]
#[command(name = "visualizer-kit", version, about)]
struct Cli {
    /// Write the JSON here instead of stdout.
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Single-line JSON.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Describe a file by type: `{type, value}` for images, `{type, url}` otherwise.
    TypedUrl {
        filename: String,
        /// Directory the filename is relative to.
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// URL prefix replacing `file://` URLs.
        #[arg(long)]
        url_prefix: Option<String>,
    },
    /// Matrix envelope from a `.json` or `.csv` matrix.
    Matrix {
        file: PathBuf,
        /// Comma-separated column labels.
        #[arg(long, value_delimiter = ',')]
        x_label: Vec<String>,
        /// Comma-separated row labels.
        #[arg(long, value_delimiter = ',')]
        y_label: Vec<String>,
    },
    /// Chart envelope from `{x, y, options}` JSON.
    Chart {
        file: PathBuf,
        /// Give each serie a distinct colour.
        #[arg(long)]
        palette: bool,
    },
    /// PCA score chart (or loading plot) from a PCA result.
    Pca {
        file: PathBuf,
        /// 1-based component for x.
        #[arg(long)]
        x_values: Option<usize>,
        /// 1-based component for y.
        #[arg(long)]
        y_values: Option<usize>,
        /// JSON array with one info object per row.
        #[arg(long)]
        infos: Option<PathBuf>,
        /// Emit a loading plot instead of a chart.
        #[arg(long)]
        loading: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Command::TypedUrl {
            filename,
            root,
            url_prefix,
        } => {
            let mut files = LocalFileAccess::new(root);
            if let Some(prefix) = url_prefix {
                files = files.with_url_prefix(prefix);
            }
            let typed = visualizer::get_typed_url(&files, filename)
                .with_context(|| format!("describing {filename}"))?;
            emit(&cli, &typed)
        }
        Command::Matrix {
            file,
            x_label,
            y_label,
        } => {
            let matrix = loader::load_matrix(file)?;
            let options = MatrixOptions {
                x_label: labels(x_label),
                y_label: labels(y_label),
            };
            emit(&cli, &visualizer::get_matrix(&matrix, &options)?)
        }
        Command::Chart { file, palette } => {
            let input = loader::load_chart_input(file)?;
            let mut chart = visualizer::get_chart(input.x, input.y, input.options);
            chart.validate().context("chart input")?;
            if *palette {
                chart.apply_palette();
            }
            emit(&cli, &chart)
        }
        Command::Pca {
            file,
            x_values,
            y_values,
            infos,
            loading,
        } => {
            let pca = loader::load_pca(file)?;
            let options = PcaOptions {
                x_values: *x_values,
                y_values: *y_values,
                infos: infos.as_deref().map(loader::load_infos).transpose()?,
            };
            if *loading {
                emit(&cli, &visualizer::get_pca_loading_plot(&pca, &options)?)
            } else {
                emit(&cli, &visualizer::get_pca_chart(&pca, &options)?)
            }
        }
    }
}

fn labels(raw: &[String]) -> Option<Vec<Value>> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.iter().cloned().map(Value::String).collect())
    }
}

fn emit<T: Serialize>(cli: &Cli, value: &T) -> Result<()> {
    let text = visualizer::to_json(value, !cli.compact)?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, text + "\n")
                .with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
