use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotframe::{
    draw_text, save_bmp, CjkFont, CurveMode, FontSettings, Mirror, PixelFormat, Samples, Surface,
    QUAD_ALL,
};

use crate::console::preview;
mod console;

#[derive(Parser)]
#[command(name = "dotframe", about = "Embedded framebuffer graphics CLI")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Render text into a BMP file
    Render {
        #[arg(short, long)]
        text: String,
        #[arg(short, long)]
        out: PathBuf,
        #[arg(long, default_value = "160")]
        width: u16,
        #[arg(long, default_value = "64")]
        height: u16,
        #[arg(long, default_value = "gs8-v")]
        format: PixelFormat,
        /// Firmware style byte (0x11 = simple 12 px ... 0x44 = prop-alt 32 px)
        #[arg(long, default_value = "0x12", value_parser = parse_number)]
        style: u32,
        /// Quarter turns (0-3)
        #[arg(long, default_value = "0")]
        rotate: u8,
        /// Integer magnification (1-4)
        #[arg(long, default_value = "1")]
        scale: u8,
        #[arg(long)]
        inverse: bool,
        /// Background color; omit for transparent text
        #[arg(long, value_parser = parse_number)]
        background: Option<u32>,
        /// Foreground color
        #[arg(long, default_value = "0xff", value_parser = parse_number)]
        color: u32,
        /// CJK glyph-index font file
        #[arg(long)]
        font: Option<PathBuf>,
        /// Also print the surface to the terminal
        #[arg(long)]
        preview: bool,
    },
    /// Draw a primitive showcase into a BMP file
    Demo {
        #[arg(short, long)]
        out: PathBuf,
        #[arg(long, default_value = "160")]
        width: u16,
        #[arg(long, default_value = "120")]
        height: u16,
        #[arg(long, default_value = "gs8-v")]
        format: PixelFormat,
        /// Also print the surface to the terminal
        #[arg(long)]
        preview: bool,
    },
    /// Inspect a glyph-index font file's metadata
    Info {
        #[arg(short, long)]
        font: PathBuf,
    },
}

fn parse_number(s: &str) -> std::result::Result<u32, String> {
    let parsed = match s.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Cmd::Render {
            text,
            out,
            width,
            height,
            format,
            style,
            rotate,
            scale,
            inverse,
            background,
            color,
            font,
            preview: show,
        } => {
            let mut buf = vec![0u8; Surface::min_buffer_len(width, height, format, Mirror::default())];
            let mut surface = Surface::new(&mut buf, width, height, format)?;
            let settings = FontSettings::configure(style as u8, rotate, scale, inverse, background);
            let mut cjk = match &font {
                Some(path) => {
                    let file = File::open(path)
                        .with_context(|| format!("opening font file {}", path.display()))?;
                    Some(CjkFont::load(file)?)
                }
                None => None,
            };
            draw_text(&mut surface, &text, 2, 2, color, &settings, cjk.as_mut())?;
            write_bmp(&surface, &out)?;
            if show {
                print!("{}", preview(&surface));
            }
            eprintln!("Rendered {:?} -> {}", text, out.display());
        }
        Cmd::Demo {
            out,
            width,
            height,
            format,
            preview: show,
        } => {
            let mut buf = vec![0u8; Surface::min_buffer_len(width, height, format, Mirror::default())];
            let mut surface = Surface::new(&mut buf, width, height, format)?;
            demo(&mut surface)?;
            write_bmp(&surface, &out)?;
            if show {
                print!("{}", preview(&surface));
            }
            eprintln!("Demo scene -> {}", out.display());
        }
        Cmd::Info { font } => {
            let file = File::open(&font)
                .with_context(|| format!("opening font file {}", font.display()))?;
            let cjk = CjkFont::load(file)?;
            match cjk.kind() {
                Some(kind) => println!("Font kind: {kind:?}"),
                None => println!("Font kind: none (no CJK payload)"),
            }
            let bases = cjk.base_offsets();
            for (label, base) in ["12", "16", "24", "32"].iter().zip(bases) {
                if base > 0 {
                    println!("  {label} px glyphs at {base:#x}");
                } else {
                    println!("  {label} px glyphs absent");
                }
            }
        }
    }
    Ok(())
}

fn write_bmp(surface: &Surface<'_>, out: &PathBuf) -> Result<()> {
    let file =
        File::create(out).with_context(|| format!("creating output file {}", out.display()))?;
    let mut writer = BufWriter::new(file);
    save_bmp(surface, &mut writer, 0, 0, None, None)?;
    Ok(())
}

fn demo(surface: &mut Surface<'_>) -> Result<()> {
    let w = surface.width() as i32;
    let h = surface.height() as i32;
    let ink = surface.format().mask();
    surface.rect(0, 0, w, h, ink, false);
    surface.line(2, 2, w - 3, h - 3, ink);
    surface.line(w - 3, 2, 2, h - 3, ink);
    surface.ellipse(w / 2, h / 2, w / 3, h / 3, ink, false, QUAD_ALL);
    surface.poly(
        w / 2,
        h / 2,
        &[(0, -h / 5), (w / 6, 0), (0, h / 5), (-w / 6, 0)],
        ink,
        true,
    );
    let wave: Vec<u8> = (0..w)
        .map(|x| {
            let phase = (x % 40 - 20).unsigned_abs();
            (phase * 255 / 20) as u8
        })
        .collect();
    surface.curve(Samples::U8(&wave), CurveMode::Lines, ink, 0, h - h / 6, 1, h / 8);
    let settings = FontSettings::default();
    draw_text(
        surface,
        "dotframe",
        4,
        4,
        ink,
        &settings,
        None::<&mut CjkFont<File>>,
    )?;
    Ok(())
}
