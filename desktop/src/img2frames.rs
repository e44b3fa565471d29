use std::path::Path;
use std::process::ExitCode;

use argh::FromArgs;
use framepack_core::Threshold;
use framepack_core::fs::{Filesystem, Mode};
use framepack_desktop::{
    BatchOptions, Error, OutputFormat, PreviewConfig, ResizeFilter, SketchConfig, StdFilesystem,
    convert_directory, render, render_sheet, save_sheet,
};
use log::{error, info};

#[derive(FromArgs)]
/// Convert a folder of images into 1-bit frames for a small monochrome display
struct Args {
    /// directory containing the frame images, played back in filename order
    #[argh(positional)]
    input_dir: String,

    /// frame width in pixels
    #[argh(option, short = 'W')]
    width: u32,

    /// frame height in pixels
    #[argh(option, short = 'H')]
    height: u32,

    /// output file (default: frames.ino, or frames.rs with --format rust)
    #[argh(option, short = 'o')]
    output: Option<String>,

    /// output format: arduino or rust
    #[argh(option, short = 'f', default = "OutputFormat::Arduino")]
    format: OutputFormat,

    /// brightness a pixel must exceed to be lit (0-255)
    #[argh(option, short = 't', default = "128")]
    threshold: u8,

    /// swap lit and dark pixels
    #[argh(switch, short = 'i')]
    invert: bool,

    /// resize filter: triangle, catmull-rom, gaussian or lanczos3
    #[argh(option, default = "ResizeFilter::CatmullRom")]
    filter: ResizeFilter,

    /// delay between frames in milliseconds
    #[argh(option, short = 'd', default = "100")]
    delay: u32,

    /// display width in pixels
    #[argh(option, default = "128")]
    display_width: u32,

    /// display height in pixels
    #[argh(option, default = "64")]
    display_height: u32,

    /// display I2C address, e.g. 0x3C
    #[argh(option, default = "0x3C", from_str_fn(parse_address))]
    address: u8,

    /// frame x position on the display (default: centered)
    #[argh(option)]
    x: Option<u32>,

    /// frame y position on the display (default: centered)
    #[argh(option)]
    y: Option<u32>,

    /// also write a PNG contact sheet of the packed frames
    #[argh(option, short = 'p')]
    preview: Option<String>,

    /// frames per row in the preview sheet
    #[argh(option, default = "8")]
    columns: u32,
}

fn parse_address(value: &str) -> Result<u8, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u8::from_str_radix(digits, 16).map_err(|_| format!("invalid I2C address '{value}'"))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let options = BatchOptions {
        width: args.width,
        height: args.height,
        threshold: Threshold {
            level: args.threshold,
            invert: args.invert,
        },
        filter: args.filter,
    };
    let sketch = SketchConfig {
        display_width: args.display_width,
        display_height: args.display_height,
        i2c_address: args.address,
        frame_delay_ms: args.delay,
        x: args.x,
        y: args.y,
    };

    let fs = StdFilesystem::new_with_base_path(".".into());
    let batch = convert_directory(&fs, &args.input_dir, &options)?;

    let code = render(&batch, args.format, &sketch)?;
    // The preview goes first so a failure there leaves no sketch behind.
    if let Some(preview) = &args.preview {
        let config = PreviewConfig {
            columns: args.columns,
            ..PreviewConfig::default()
        };
        let sheet = render_sheet(&batch, &config)?;
        save_sheet(&sheet, Path::new(preview))?;
    }

    let output = args
        .output
        .as_deref()
        .unwrap_or(args.format.default_file_name());
    let mut out = fs
        .open_file(output, Mode::Write)
        .map_err(|kind| Error::Write {
            path: output.to_owned(),
            kind,
        })?;
    embedded_io::Write::write_all(&mut out, code.as_bytes()).map_err(|err| Error::Write {
        path: output.to_owned(),
        kind: embedded_io::Error::kind(&err),
    })?;
    info!(
        "Wrote {} frames ({} bytes each) to {output}",
        batch.len(),
        batch.bytes_per_frame()
    );
    Ok(())
}
