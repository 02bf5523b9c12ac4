use std::path::PathBuf;

use clap::{Parser, Subcommand};

use fadeloop::{load_gallery, render_ticks, Blender, PngSequenceSink, TickRate};

#[derive(Parser, Debug)]
#[command(name = "fadeloop", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a folder of images in a window (requires the `window` feature).
    Play(PlayArgs),
    /// Step the slideshow offline and write each frame as a PNG.
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Folder of images to play (png, jpg/jpeg, gif, bmp).
    folder: PathBuf,

    /// Seconds one crossfade takes.
    #[arg(long, default_value_t = 3)]
    transition_secs: u32,

    /// Logical ticks per second.
    #[arg(long, default_value_t = 60)]
    tick_rate: u32,

    /// Window title.
    #[arg(long, default_value = "fadeloop")]
    title: String,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Folder of images to load.
    folder: PathBuf,

    /// Output directory for frame PNGs.
    #[arg(long)]
    out: PathBuf,

    /// Number of ticks to step.
    #[arg(long, default_value_t = 240)]
    ticks: u64,

    /// Ticks one crossfade takes.
    #[arg(long, default_value_t = 60)]
    transition_ticks: u32,

    /// Logical ticks per second.
    #[arg(long, default_value_t = 60)]
    tick_rate: u32,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Play(args) => cmd_play(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_blender(folder: &PathBuf, transition_ticks: u32) -> anyhow::Result<Blender> {
    let (gallery, summary) = load_gallery(folder)?;
    if summary.skipped > 0 {
        eprintln!("skipped {} unreadable image(s)", summary.skipped);
    }
    eprintln!(
        "loaded {} image(s), canvas {}x{}",
        gallery.len(),
        gallery.width(),
        gallery.height()
    );
    Ok(Blender::new(gallery, transition_ticks)?)
}

#[cfg(feature = "window")]
fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    use fadeloop::{play_blocking, DriverConfig, WindowSink};

    let tick_rate = TickRate::new(args.tick_rate)?;
    let blender = load_blender(&args.folder, tick_rate.ticks_for_secs(args.transition_secs))?;
    let config = DriverConfig {
        tick_rate,
        ..DriverConfig::default()
    };
    // Runs on this thread until the window is closed or Escape is pressed.
    play_blocking(blender, WindowSink::new(&args.title), config)?;
    Ok(())
}

#[cfg(not(feature = "window"))]
fn cmd_play(_args: PlayArgs) -> anyhow::Result<()> {
    anyhow::bail!("this build has no window support; rebuild with `--features window`")
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let tick_rate = TickRate::new(args.tick_rate)?;
    let mut blender = load_blender(&args.folder, args.transition_ticks)?;
    let mut sink = PngSequenceSink::new(&args.out);
    render_ticks(&mut blender, &mut sink, args.ticks, tick_rate)?;
    eprintln!("wrote {} frame(s) to {}", args.ticks, args.out.display());
    Ok(())
}
