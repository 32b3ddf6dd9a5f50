use argh::FromArgs;
use elma_gfx::{LetterCollection, Palette, Pcx, Sprite, Transparency, DEFAULT_PALETTE};
use image::{ImageFormat, RgbaImage};
use log::{debug, warn};
use std::{path::Path, str::FromStr};

/// Exports Elasto Mania pictures, sprites and fonts as PNG.
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Pcx(PcxToPng),
    Sprite(SpriteToPng),
    Letters(LettersToPng),
}

/// Converts a PCX picture to PNG.
#[derive(FromArgs)]
#[argh(subcommand, name = "pcx2png")]
struct PcxToPng {
    /// transparency rule: solid, palette, top-left, top-right, bottom-left or bottom-right
    #[argh(option, default = "TransparencyArg(Transparency::Solid)")]
    transparency: TransparencyArg,

    /// PCX file to take the palette from, defaults to the input's own palette
    #[argh(option)]
    palette: Option<String>,

    /// the input PCX file
    #[argh(positional)]
    input: String,
    /// the output PNG file
    #[argh(positional)]
    output: String,
}

/// Converts a sprite to PNG.
#[derive(FromArgs)]
#[argh(subcommand, name = "spr2png")]
struct SpriteToPng {
    /// PCX file to take the palette from, defaults to the LGR default palette
    #[argh(option)]
    palette: Option<String>,

    /// write palette indices as grey values instead of colors
    #[argh(switch)]
    greyscale: bool,

    /// the input sprite file
    #[argh(positional)]
    input: String,
    /// the output PNG file
    #[argh(positional)]
    output: String,
}

/// Writes every letter of a font as `<code>_<y>.png` into a directory.
#[derive(FromArgs)]
#[argh(subcommand, name = "abc2png")]
struct LettersToPng {
    /// PCX file to take the palette from, defaults to the LGR default palette
    #[argh(option)]
    palette: Option<String>,

    /// the input ABC file
    #[argh(positional)]
    input: String,
    /// the output directory, created if missing
    #[argh(positional)]
    output: String,
}

struct TransparencyArg(Transparency);

impl FromStr for TransparencyArg {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rule = match s.to_ascii_lowercase().as_str() {
            "solid" => Transparency::Solid,
            "palette" => Transparency::Palette,
            "top-left" => Transparency::TopLeft,
            "top-right" => Transparency::TopRight,
            "bottom-left" => Transparency::BottomLeft,
            "bottom-right" => Transparency::BottomRight,
            _ => return Err("invalid transparency rule"),
        };

        Ok(TransparencyArg(rule))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Cli { command } = argh::from_env();

    match command {
        Command::Pcx(options) => pcx_to_png(options),
        Command::Sprite(options) => sprite_to_png(options),
        Command::Letters(options) => letters_to_png(options),
    }
}

fn read_palette(path: &str) -> Result<Palette, Box<dyn std::error::Error>> {
    let pcx = Pcx::new(std::fs::read(path)?)?;
    Ok(pcx.palette()?)
}

fn palette_or_default(path: Option<&str>) -> Result<Palette, Box<dyn std::error::Error>> {
    match path {
        Some(path) => read_palette(path),
        None => Ok(DEFAULT_PALETTE),
    }
}

fn save_png(
    rgba: Vec<u8>,
    width: usize,
    height: usize,
    output: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.as_ref();
    RgbaImage::from_raw(width.try_into()?, height.try_into()?, rgba)
        .ok_or("RGBA buffer does not match the image dimensions")?
        .save_with_format(output, ImageFormat::Png)?;

    println!("Written {width}x{height} image to `{}`", output.display());

    Ok(())
}

fn pcx_to_png(options: PcxToPng) -> Result<(), Box<dyn std::error::Error>> {
    let PcxToPng {
        transparency: TransparencyArg(transparency),
        palette,
        input,
        output,
    } = options;

    let pcx = Pcx::new(std::fs::read(&input)?)?;
    debug!("{:?}", pcx.header());

    let palette = match palette {
        Some(path) => read_palette(&path)?,
        None => pcx.palette().unwrap_or_else(|err| {
            warn!("`{input}`: {err}, falling back to the default palette");
            DEFAULT_PALETTE
        }),
    };

    let rgba = pcx.image(&palette, transparency)?;
    save_png(rgba, pcx.width(), pcx.height(), &output)
}

fn sprite_to_png(options: SpriteToPng) -> Result<(), Box<dyn std::error::Error>> {
    let SpriteToPng {
        palette,
        greyscale,
        input,
        output,
    } = options;

    let sprite = Sprite::decode(&std::fs::read(&input)?)?;

    let rgba = if greyscale {
        sprite.image(None)?
    } else {
        let palette = palette_or_default(palette.as_deref())?;
        sprite.image(Some(&palette))?
    };

    save_png(
        rgba,
        usize::from(sprite.width),
        usize::from(sprite.height),
        &output,
    )
}

fn letters_to_png(options: LettersToPng) -> Result<(), Box<dyn std::error::Error>> {
    let LettersToPng {
        palette,
        input,
        output,
    } = options;

    let letters = LetterCollection::decode(&std::fs::read(&input)?)?;
    let palette = palette_or_default(palette.as_deref())?;

    println!("Exporting {} letters from `{input}`", letters.letters.len());

    let output = Path::new(&output);
    std::fs::create_dir_all(output)?;

    for letter in &letters.letters {
        let sprite = &letter.sprite;
        if sprite.pixel_count() == 0 {
            warn!("skipping empty glyph for code {}", letter.code);
            continue;
        }

        let rgba = sprite.image(Some(&palette))?;
        save_png(
            rgba,
            usize::from(sprite.width),
            usize::from(sprite.height),
            output.join(format!("{}_{}.png", letter.code, letter.y)),
        )?;
    }

    Ok(())
}
