use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cakewalk::{
    CakeScene, CakewalkResult, DrawTarget as _, FrameRgba, NullPacer, Pacer, Palette,
    RasterTarget, SurfaceSize, Turtle,
};

#[derive(Parser, Debug)]
#[command(name = "cakewalk", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full scene and write the finished surface as a single PNG.
    Frame(FrameArgs),
    /// Run the full scene and dump a PNG per suspension point.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// TTF/OTF font used for captions.
    #[arg(long)]
    font: PathBuf,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 600)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 500)]
    height: u32,

    /// Confetti seed; omit for a time-derived one.
    #[arg(long)]
    seed: Option<u32>,

    /// Optional palette overrides (JSON, partial entries allowed).
    #[arg(long)]
    palette: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output directory for frame_NNNNN.png files.
    #[arg(long)]
    out: PathBuf,

    /// Keep one frame out of every N suspension points.
    #[arg(long, default_value_t = 1)]
    every: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn read_palette(path: &Path) -> anyhow::Result<Palette> {
    let f = File::open(path).with_context(|| format!("open palette '{}'", path.display()))?;
    let r = BufReader::new(f);
    let palette: Palette = serde_json::from_reader(r).with_context(|| "parse palette JSON")?;
    Ok(palette)
}

fn build_scene(args: &SceneArgs) -> anyhow::Result<CakeScene<RasterTarget>> {
    let size = SurfaceSize::new(args.width, args.height)?;
    let font_bytes = std::fs::read(&args.font)
        .with_context(|| format!("read font '{}'", args.font.display()))?;

    let target = RasterTarget::new(size)?
        .with_background(cakewalk::Rgba8::rgb(0xd3, 0xda, 0xe8))
        .with_typeface(font_bytes)?;

    let palette = match &args.palette {
        Some(path) => read_palette(path)?,
        None => Palette::default(),
    };

    let turtle = Turtle::with_palette(target, palette);
    Ok(match args.seed {
        Some(seed) => CakeScene::with_seed(turtle, seed),
        None => CakeScene::new(turtle),
    })
}

fn save_png(path: &Path, frame: &FrameRgba) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut scene = build_scene(&args.scene)?;
    scene.animate(&mut NullPacer)?;

    let frame = scene.turtle_mut().target_mut().snapshot()?;
    save_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.every > 0, "--every must be at least 1");

    let mut scene = build_scene(&args.scene)?;
    let mut pacer = FrameDumpPacer {
        dir: args.out.clone(),
        every: args.every,
        seen: 0,
        written: 0,
        error: None,
    };
    scene.animate(&mut pacer)?;
    if let Some(e) = pacer.error {
        return Err(e);
    }

    // Final frame, so the sequence always ends on the finished surface.
    let frame = scene.turtle_mut().target_mut().snapshot()?;
    save_png(&pacer.dir.join(format!("frame_{:05}.png", pacer.written)), &frame)?;

    eprintln!("wrote {} frames to {}", pacer.written + 1, args.out.display());
    Ok(())
}

/// Writes every Nth pre-suspension snapshot as a numbered PNG. IO failures
/// are stashed and surfaced after the run instead of panicking mid-scene.
struct FrameDumpPacer {
    dir: PathBuf,
    every: u32,
    seen: u32,
    written: u32,
    error: Option<anyhow::Error>,
}

impl Pacer for FrameDumpPacer {
    fn suspend(&mut self, _hold: std::time::Duration) -> std::ops::ControlFlow<()> {
        // Offline rendering never waits and never cancels.
        std::ops::ControlFlow::Continue(())
    }

    fn wants_frames(&self) -> bool {
        self.error.is_none()
    }

    fn frame(&mut self, frame: &FrameRgba) -> CakewalkResult<()> {
        let keep = self.seen % self.every == 0;
        self.seen += 1;
        if !keep {
            return Ok(());
        }

        let path = self.dir.join(format!("frame_{:05}.png", self.written));
        match save_png(&path, frame) {
            Ok(()) => self.written += 1,
            Err(e) => self.error = Some(e),
        }
        Ok(())
    }
}
