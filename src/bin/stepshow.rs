use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use stepshow::{FrameSlot, SequenceAssembler, ThemeCatalog, frame_file_name, list_themes};

#[derive(Parser, Debug)]
#[command(name = "stepshow", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List themes discovered in the image directory.
    Themes(ThemesArgs),
    /// Assemble the animated GIF for a theme.
    Gif(GifArgs),
    /// Extract one normalized frame as a PNG.
    Frame(FrameArgs),
    /// List all frames of a theme with their load status.
    Frames(FramesArgs),
}

#[derive(Parser, Debug)]
struct ThemesArgs {
    /// Image directory to scan.
    #[arg(long, default_value = "images")]
    dir: PathBuf,

    /// Emit the theme list as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct GifArgs {
    /// Image directory to read frames from.
    #[arg(long, default_value = "images")]
    dir: PathBuf,

    /// Theme to assemble.
    #[arg(long)]
    theme: String,

    /// Output GIF path. Defaults to `<theme>.gif`.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Image directory to read frames from.
    #[arg(long, default_value = "images")]
    dir: PathBuf,

    /// Theme the frame belongs to.
    #[arg(long)]
    theme: String,

    /// Step index (1-10).
    #[arg(long)]
    step: u8,

    /// Output PNG path. Defaults to the frame's own filename.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Image directory to read frames from.
    #[arg(long, default_value = "images")]
    dir: PathBuf,

    /// Theme to list.
    #[arg(long)]
    theme: String,

    /// Emit the listing as JSON.
    #[arg(long)]
    json: bool,

    /// Also write every loaded frame as a normalized PNG into this directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(serde::Serialize, Debug)]
struct FrameReport {
    step: u8,
    file: String,
    status: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Themes(args) => cmd_themes(args),
        Command::Gif(args) => cmd_gif(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn cmd_themes(args: ThemesArgs) -> anyhow::Result<()> {
    let themes = list_themes(&args.dir)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&themes)?);
    } else {
        for theme in themes {
            println!("{theme}");
        }
    }
    Ok(())
}

fn cmd_gif(args: GifArgs) -> anyhow::Result<()> {
    // Validate completeness upfront so a gap is reported before any decode
    // work instead of halfway through the build.
    let catalog = ThemeCatalog::scan(&args.dir)?;
    catalog.validate_complete(&args.theme)?;

    let assembler = SequenceAssembler::new(&args.dir);
    let gif = assembler.build_sequence(&args.theme)?;

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(format!("{}.gif", args.theme)));
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
    }
    std::fs::write(&out, &gif).with_context(|| format!("write gif '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let assembler = SequenceAssembler::new(&args.dir);
    let file_name = frame_file_name(&args.theme, args.step);

    let img = match assembler.fetch_frame(&args.theme, args.step) {
        Ok(img) => img,
        Err(e) if e.is_missing_frame() => {
            // A gap in one theme is a per-frame notice, not a process failure.
            eprintln!("image not found: {file_name}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let out = args.out.unwrap_or_else(|| PathBuf::from(&file_name));
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
    }
    img.save(&out)
        .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let assembler = SequenceAssembler::new(&args.dir);
    let listing = assembler.list_frames(&args.theme);

    if let Some(out_dir) = &args.out_dir {
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("create output dir '{}'", out_dir.display()))?;
        for entry in &listing {
            if let FrameSlot::Loaded(img) = &entry.slot {
                let out = out_dir.join(&entry.file_name);
                img.save(&out)
                    .with_context(|| format!("write png '{}'", out.display()))?;
            }
        }
    }

    let reports: Vec<FrameReport> = listing
        .iter()
        .map(|entry| FrameReport {
            step: entry.step,
            file: entry.file_name.clone(),
            status: match &entry.slot {
                FrameSlot::Loaded(img) => {
                    let (w, h) = img.dimensions();
                    format!("ok ({w}x{h})")
                }
                FrameSlot::Missing => "missing".to_string(),
                FrameSlot::Unreadable(reason) => format!("unreadable: {reason}"),
            },
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("step {:>2}  {}  {}", report.step, report.file, report.status);
        }
    }
    Ok(())
}
