//! Emits a frame batch as firmware source: an Arduino sketch driving an
//! SSD1306 over I2C, or a Rust module of static tables.

use std::str::FromStr;

use framepack_core::{FrameBatch, FrameRecord};

use crate::error::{Error, Result};

const BYTES_PER_LINE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Arduino,
    Rust,
}

impl OutputFormat {
    pub fn default_file_name(self) -> &'static str {
        match self {
            OutputFormat::Arduino => "frames.ino",
            OutputFormat::Rust => "frames.rs",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "arduino" | "ino" => Ok(OutputFormat::Arduino),
            "rust" | "rs" => Ok(OutputFormat::Rust),
            other => Err(format!("unknown format '{other}', expected arduino or rust")),
        }
    }
}

/// Target display and playback settings baked into the generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SketchConfig {
    pub display_width: u32,
    pub display_height: u32,
    pub i2c_address: u8,
    pub frame_delay_ms: u32,
    /// Frame position on the display, centered when unset.
    pub x: Option<u32>,
    pub y: Option<u32>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            display_width: 128,
            display_height: 64,
            i2c_address: 0x3C,
            frame_delay_ms: 100,
            x: None,
            y: None,
        }
    }
}

impl SketchConfig {
    /// Top-left corner for a frame of the given size.
    pub fn origin(&self, frame_width: u32, frame_height: u32) -> (u32, u32) {
        let x = self
            .x
            .unwrap_or(self.display_width.saturating_sub(frame_width) / 2);
        let y = self
            .y
            .unwrap_or(self.display_height.saturating_sub(frame_height) / 2);
        (x, y)
    }
}

/// Renders `batch` as source text in the requested format.
pub fn render(batch: &FrameBatch, format: OutputFormat, config: &SketchConfig) -> Result<String> {
    // A frame under 8 pixels packs to nothing and would declare a zero-length array.
    if batch.is_empty() || batch.bytes_per_frame() == 0 {
        return Err(Error::NothingToEmit);
    }
    Ok(match format {
        OutputFormat::Arduino => render_arduino(batch, config),
        OutputFormat::Rust => render_rust(batch, config),
    })
}

fn render_arduino(batch: &FrameBatch, config: &SketchConfig) -> String {
    let (width, height) = batch.frame_size().unwrap_or_default();
    let (x, y) = config.origin(width, height);
    let bytes = batch.bytes_per_frame();

    let mut code = String::new();
    code.push_str(&header(batch));
    code.push_str("#include <Wire.h>\n");
    code.push_str("#include <Adafruit_GFX.h>\n");
    code.push_str("#include <Adafruit_SSD1306.h>\n\n");
    code.push_str(&format!("#define SCREEN_WIDTH {}\n", config.display_width));
    code.push_str(&format!("#define SCREEN_HEIGHT {}\n", config.display_height));
    code.push_str(&format!("#define SCREEN_ADDRESS 0x{:02X}\n", config.i2c_address));
    code.push_str("#define OLED_RESET -1\n\n");
    code.push_str(&format!("#define FRAME_WIDTH {width}\n"));
    code.push_str(&format!("#define FRAME_HEIGHT {height}\n"));
    code.push_str(&format!("#define FRAME_COUNT {}\n", batch.len()));
    code.push_str(&format!("#define FRAME_DELAY {}\n", config.frame_delay_ms));
    code.push_str(&format!("#define FRAME_X {x}\n"));
    code.push_str(&format!("#define FRAME_Y {y}\n\n"));
    code.push_str("Adafruit_SSD1306 display(SCREEN_WIDTH, SCREEN_HEIGHT, &Wire, OLED_RESET);\n\n");

    code.push_str(&format!(
        "const unsigned char PROGMEM frames[FRAME_COUNT][{bytes}] = {{\n"
    ));
    for record in batch.frames() {
        push_frame(&mut code, record, "  ", "{", "}");
    }
    code.push_str("};\n\n");

    code.push_str(ARDUINO_LOOP);
    code
}

const ARDUINO_LOOP: &str = "\
int frame = 0;

void setup() {
  if (!display.begin(SSD1306_SWITCHCAPVCC, SCREEN_ADDRESS)) {
    for (;;);
  }
  display.clearDisplay();
  display.display();
}

void loop() {
  display.clearDisplay();
  display.drawBitmap(FRAME_X, FRAME_Y, frames[frame], FRAME_WIDTH, FRAME_HEIGHT, 1);
  display.display();
  frame = (frame + 1) % FRAME_COUNT;
  delay(FRAME_DELAY);
}
";

fn render_rust(batch: &FrameBatch, config: &SketchConfig) -> String {
    let (width, height) = batch.frame_size().unwrap_or_default();
    let bytes = batch.bytes_per_frame();

    let mut code = String::new();
    code.push_str(&header(batch));
    code.push_str(&format!("pub const FRAME_WIDTH: u32 = {width};\n"));
    code.push_str(&format!("pub const FRAME_HEIGHT: u32 = {height};\n"));
    code.push_str(&format!("pub const FRAME_COUNT: usize = {};\n", batch.len()));
    code.push_str(&format!(
        "pub const FRAME_DELAY_MS: u32 = {};\n\n",
        config.frame_delay_ms
    ));
    code.push_str(&format!(
        "pub static FRAMES: [[u8; {bytes}]; FRAME_COUNT] = [\n"
    ));
    for record in batch.frames() {
        push_frame(&mut code, record, "    ", "[", "]");
    }
    code.push_str("];\n");
    code
}

fn header(batch: &FrameBatch) -> String {
    let (width, height) = batch.frame_size().unwrap_or_default();
    let mut text = String::new();
    text.push_str("// Auto-generated by img2frames\n");
    text.push_str(&format!(
        "// {} frames, {width}x{height} pixels, {} bytes per frame\n",
        batch.len(),
        batch.bytes_per_frame()
    ));
    text.push_str("// 1 bit per pixel, 8 pixels per byte, most significant bit first, rows not padded\n\n");
    text
}

fn push_frame(code: &mut String, record: &FrameRecord, indent: &str, open: &str, close: &str) {
    code.push_str(&format!("{indent}// {}\n", comment_safe(&record.filename)));
    code.push_str(&format!("{indent}{open}\n"));
    for line in record.frame.as_bytes().chunks(BYTES_PER_LINE) {
        let bytes: Vec<String> = line.iter().map(|b| format!("0x{b:02X}")).collect();
        code.push_str(&format!("{indent}{indent}{},\n", bytes.join(", ")));
    }
    code.push_str(&format!("{indent}{close},\n"));
}

fn comment_safe(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
