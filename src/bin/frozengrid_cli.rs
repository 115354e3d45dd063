//! CLI tool for frozengrid - renders one frame of a grid as text or JSON
//!
//! Usage:
//!   frozengrid_cli                                # default 1000x50 synthetic grid
//!   frozengrid_cli --scroll-top 400 --width 1024  # scrolled, wider container
//!   frozengrid_cli --csv data.csv --json          # CSV data, JSON frame

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use log::info;

use frozengrid::csv::load_path;
use frozengrid::{
    DataSource, FrozenGrid, GridConfig, GridError, ManualResizeHost, Overscan, RenderBackend,
    Result, SyntheticSource, TextRenderer, ViewportState,
};

#[derive(Parser)]
#[command(name = "frozengrid", about = "Render a frozen-pane grid frame as text or JSON")]
struct Cli {
    /// JSON config file (camelCase keys); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV or TSV file to display instead of synthetic data
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Number of data rows
    #[arg(long)]
    rows: Option<u32>,

    /// Number of columns
    #[arg(long)]
    cols: Option<u32>,

    /// Frozen columns on each side
    #[arg(long)]
    frozen: Option<u32>,

    /// Row height in px
    #[arg(long)]
    row_height: Option<f32>,

    /// Column width in px
    #[arg(long)]
    col_width: Option<f32>,

    /// Rows of overscan around the main pane
    #[arg(long)]
    overscan_rows: Option<u32>,

    /// Container width in px
    #[arg(long, default_value_t = frozengrid::config::DEFAULT_VIEWPORT_WIDTH)]
    width: f32,

    /// Container height in px
    #[arg(long, default_value_t = frozengrid::config::DEFAULT_VIEWPORT_HEIGHT)]
    height: f32,

    /// Vertical scroll offset of the main pane
    #[arg(long, default_value_t = 0.0)]
    scroll_top: f32,

    /// Horizontal scroll offset of the main pane
    #[arg(long, default_value_t = 0.0)]
    scroll_left: f32,

    /// Characters per cell in text output
    #[arg(long, default_value_t = 10)]
    cell_chars: usize,

    /// Print the frame as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn grid_config(&self) -> Result<GridConfig> {
        let base = match &self.config {
            Some(path) => GridConfig::from_json(&std::fs::read_to_string(path)?)?,
            None => GridConfig::default(),
        };
        let overscan = Overscan {
            main_rows: self.overscan_rows.unwrap_or(base.overscan().main_rows),
            ..base.overscan()
        };
        GridConfig::new(
            self.rows.unwrap_or(base.row_count()),
            self.cols.unwrap_or(base.col_count()),
            self.frozen.unwrap_or(base.frozen_count()),
            self.row_height.unwrap_or(base.row_height()),
            self.col_width.unwrap_or(base.col_width()),
        )
        .map(|config| config.with_overscan(overscan))
    }

    fn source(&self, config: &GridConfig) -> Result<Box<dyn DataSource>> {
        match &self.csv {
            Some(path) => {
                let matrix = load_path(path)?;
                info!(
                    "loaded {} ({} rows x {} cols)",
                    path.display(),
                    matrix.row_count(),
                    matrix.col_count()
                );
                Ok(Box::new(matrix))
            }
            None => Ok(Box::new(SyntheticSource::new(
                config.row_count(),
                config.col_count(),
            ))),
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let mut config = cli.grid_config()?;
    let source = cli.source(&config)?;

    // A CSV without explicit dimensions sizes the grid
    if cli.csv.is_some() && cli.rows.is_none() && cli.cols.is_none() {
        let (rows, cols) = source.dimensions();
        config = GridConfig::new(
            rows,
            cols,
            config.frozen_count(),
            config.row_height(),
            config.col_width(),
        )?
        .with_overscan(config.overscan());
    }

    let host = Rc::new(ManualResizeHost::new(ViewportState::new(cli.width, cli.height)));
    let mut grid = FrozenGrid::mount(config, source, host)?;
    let applied = grid.scroll_to(cli.scroll_top, cli.scroll_left);
    info!("scrolled to top={} left={}", applied.top, applied.left);

    let frame = grid.frame();
    if cli.json {
        return Ok(serde_json::to_string_pretty(&frame)?);
    }

    let mut renderer = TextRenderer::new(cli.cell_chars);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    renderer.resize(frame.viewport.width as u32, frame.viewport.height as u32, 1.0);
    renderer.render_to_string(&frame)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e @ GridError::InvalidConfig(_)) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
