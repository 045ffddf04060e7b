use std::path::PathBuf;

use badge_renderer::{
    BadgeBuilder, BadgeContext, BadgePosition, BadgeProfile, DisplayMetrics, FontdueText,
};
use clap::{Parser, ValueEnum};
use log::info;

/// Draw a count badge onto an image
#[derive(Parser, Debug)]
#[command(name = "badge")]
#[command(version, about, long_about = None)]
struct Args {
    /// Image to decorate
    input: PathBuf,

    /// Where to write the result (format from extension)
    output: PathBuf,

    /// TrueType/OpenType font used for the label
    #[arg(long)]
    font: PathBuf,

    /// JSON profile applied before the other flags
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Count to show; negative hides the badge, zero draws a dot
    #[arg(long, allow_hyphen_values = true)]
    count: Option<i32>,

    /// Counts above this are shown as "<ceiling>+"
    #[arg(long, allow_hyphen_values = true)]
    ceiling: Option<i32>,

    /// Draw a fixed-size circle instead of a pill
    #[arg(long)]
    circle: bool,

    /// Place the badge beside the image instead of over it
    #[arg(long)]
    outer: bool,

    #[arg(long, value_enum)]
    position: Option<PositionArg>,

    /// Badge size in dp
    #[arg(long)]
    badge_size: Option<f32>,

    /// Border width in dp
    #[arg(long)]
    border_size: Option<f32>,

    /// Display density (pixels per dp)
    #[arg(long, default_value_t = 1.0)]
    density: f32,

    /// Label color token
    #[arg(long)]
    text_color: Option<String>,

    /// Fill color token
    #[arg(long)]
    badge_color: Option<String>,

    /// Border color token
    #[arg(long)]
    border_color: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PositionArg {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl From<PositionArg> for BadgePosition {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::TopLeft => Self::TopLeft,
            PositionArg::TopRight => Self::TopRight,
            PositionArg::BottomLeft => Self::BottomLeft,
            PositionArg::BottomRight => Self::BottomRight,
        }
    }
}

fn run(args: Args) -> badge_renderer::Result<()> {
    let text = FontdueText::from_file(&args.font)?;
    let ctx = BadgeContext::new(text).with_metrics(DisplayMetrics::new(args.density));

    let profile = match &args.profile {
        Some(path) => BadgeProfile::from_json(&std::fs::read_to_string(path)?)?,
        None => BadgeProfile::default(),
    };

    let mut builder = BadgeBuilder::with_profile(ctx, &profile).source(args.input.clone());
    if let Some(count) = args.count {
        builder = builder.count(count);
    }
    if let Some(ceiling) = args.ceiling {
        builder = builder.count_ceiling(ceiling);
    }
    if args.circle {
        builder = builder.circle(true);
    }
    if args.outer {
        builder = builder.inner(false);
    }
    if let Some(position) = args.position {
        builder = builder.badge_position(position.into());
    }
    if let Some(size) = args.badge_size {
        builder = builder.badge_size(size);
    }
    if let Some(size) = args.border_size {
        builder = builder.badge_border_size(size);
    }
    if let Some(token) = args.text_color {
        builder = builder.text_color(token);
    }
    if let Some(token) = args.badge_color {
        builder = builder.badge_color(token);
    }
    if let Some(token) = args.border_color {
        builder = builder.badge_border_color(token);
    }

    let output = builder.build()?;
    output.save(&args.output)?;
    info!(
        "wrote {}x{} image to {}",
        output.width(),
        output.height(),
        args.output.display()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("badge: {}", e);
        std::process::exit(1);
    }
}
