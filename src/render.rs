//! Frequency-weighted word cloud rendering.
//!
//! The renderer counts words in a corpus blob, sizes each word by its
//! frequency, and lays the words out on an Archimedean spiral from the
//! canvas center, skipping positions whose bounding box would overlap an
//! already placed word. Output is a standalone SVG document with the font
//! embedded as a base64 `@font-face`, so the image renders the same on
//! machines that lack the font.
//!
//! Layout is fully deterministic: the same corpus and options always
//! produce byte-identical output.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::path::Path;
use tracing::{debug, info};

use crate::config::WordCloudConfig;
use crate::normalize::is_rtl;

/// Family name the embedded font is registered under.
const FONT_FAMILY: &str = "WordCloudFont";

/// Approximate advance width of one character, relative to font size.
///
/// The same estimate applies to every script and the embedded font's
/// metrics are never read, so the no-overlap guarantee of the layout holds
/// for these estimated boxes only. Wide glyph runs (Persian ligatures, CJK)
/// can still touch visually.
const CHAR_WIDTH_RATIO: f64 = 0.6;

/// Spiral parameters: angle increment per step and radius growth per radian.
const SPIRAL_STEP: f64 = 0.1;
const SPIRAL_GROWTH: f64 = 1.5;
const MAX_SPIRAL_STEPS: usize = 20_000;

const PALETTE: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#17becf",
];

/// Turns a corpus blob into a rendered word cloud.
pub trait FrequencyRenderer {
    fn generate(&self, text: &str) -> Result<WordCloud>;
}

/// Font file read once and embedded into every rendered image.
#[derive(Debug, Clone)]
pub struct FontAsset {
    data: Vec<u8>,
    mime: &'static str,
    format: &'static str,
}

impl FontAsset {
    pub fn load(path: &Path) -> Result<Self> {
        info!("loading font from {}", path.display());
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read font: {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        Ok(Self::from_bytes(data, &ext))
    }

    pub fn from_bytes(data: Vec<u8>, extension: &str) -> Self {
        let (mime, format) = match extension {
            "otf" => ("font/otf", "opentype"),
            "woff" => ("font/woff", "woff"),
            "woff2" => ("font/woff2", "woff2"),
            _ => ("font/ttf", "truetype"),
        };
        Self { data, mime, format }
    }

    fn css(&self) -> String {
        format!(
            "@font-face {{ font-family: '{}'; src: url(data:{};base64,{}) format('{}'); }}",
            FONT_FAMILY,
            self.mime,
            STANDARD.encode(&self.data),
            self.format
        )
    }
}

/// A word placed on the canvas. `x`/`y` is the center of its box.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    pub font_size: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacedWord {
    fn overlaps(&self, other: &PlacedWord) -> bool {
        (self.x - other.x).abs() * 2.0 < self.width + other.width
            && (self.y - other.y).abs() * 2.0 < self.height + other.height
    }
}

/// A rendered word cloud, ready to be written to disk.
#[derive(Debug, Clone)]
pub struct WordCloud {
    svg: String,
    words: Vec<PlacedWord>,
}

impl WordCloud {
    pub fn words(&self) -> &[PlacedWord] {
        &self.words
    }

    pub fn as_svg(&self) -> &str {
        &self.svg
    }

    /// Write the image to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, &self.svg)
            .with_context(|| format!("Failed to write word cloud: {}", path.display()))?;
        info!(
            "saved word cloud with {} words to {}",
            self.words.len(),
            path.display()
        );
        Ok(())
    }
}

/// SVG word cloud renderer.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    options: WordCloudConfig,
    font: Option<FontAsset>,
}

impl SvgRenderer {
    pub fn new(options: WordCloudConfig, font: Option<FontAsset>) -> Self {
        Self { options, font }
    }

    fn font_size(&self, count: usize, max_count: usize) -> u32 {
        let min = self.options.min_font_size as f64;
        let max = self.options.max_font_size as f64;
        let scale = count as f64 / max_count.max(1) as f64;
        (min + (max - min) * scale).round() as u32
    }

    fn layout(&self, frequencies: &[(String, usize)]) -> Vec<PlacedWord> {
        let width = self.options.width as f64;
        let height = self.options.height as f64;
        let (cx, cy) = (width / 2.0, height / 2.0);
        let aspect = height / width;
        let max_count = frequencies.first().map(|(_, c)| *c).unwrap_or(1);

        let mut placed: Vec<PlacedWord> = Vec::new();
        for (word, count) in frequencies.iter().take(self.options.max_words) {
            let font_size = self.font_size(*count, max_count);
            let mut candidate = PlacedWord {
                word: word.clone(),
                count: *count,
                font_size,
                x: cx,
                y: cy,
                width: word.chars().count() as f64 * font_size as f64 * CHAR_WIDTH_RATIO,
                height: font_size as f64,
            };
            if candidate.width > width || candidate.height > height {
                debug!(word = %word, "word larger than canvas, skipped");
                continue;
            }

            let mut fitted = false;
            for step in 0..MAX_SPIRAL_STEPS {
                let theta = step as f64 * SPIRAL_STEP;
                let r = SPIRAL_GROWTH * theta;
                candidate.x = cx + r * theta.cos();
                candidate.y = cy + r * theta.sin() * aspect;

                let inside = candidate.x - candidate.width / 2.0 >= 0.0
                    && candidate.x + candidate.width / 2.0 <= width
                    && candidate.y - candidate.height / 2.0 >= 0.0
                    && candidate.y + candidate.height / 2.0 <= height;
                if inside && !placed.iter().any(|p| p.overlaps(&candidate)) {
                    fitted = true;
                    break;
                }
            }

            if fitted {
                placed.push(candidate);
            } else {
                debug!(word = %word, "no free position, skipped");
            }
        }
        placed
    }

    fn write_svg(&self, svg: &mut String, words: &[PlacedWord]) -> fmt::Result {
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.options.width,
            h = self.options.height
        )?;
        let family = match &self.font {
            Some(font) => {
                writeln!(svg, "<style>{}</style>", font.css())?;
                format!("'{}', sans-serif", FONT_FAMILY)
            }
            None => "sans-serif".to_string(),
        };
        writeln!(
            svg,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            escape_xml(&self.options.background)
        )?;
        writeln!(
            svg,
            r#"<g font-family="{}" text-anchor="middle" dominant-baseline="central">"#,
            escape_xml(&family)
        )?;
        for (i, w) in words.iter().enumerate() {
            let direction = if is_rtl(&w.word) {
                r#" direction="rtl""#
            } else {
                ""
            };
            writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" font-size="{}" fill="{}"{}>{}</text>"#,
                w.x,
                w.y,
                w.font_size,
                PALETTE[i % PALETTE.len()],
                direction,
                escape_xml(&w.word)
            )?;
        }
        svg.push_str("</g>\n</svg>\n");
        Ok(())
    }
}

impl FrequencyRenderer for SvgRenderer {
    fn generate(&self, text: &str) -> Result<WordCloud> {
        let frequencies = word_frequencies(text);
        debug!(distinct = frequencies.len(), "counted word frequencies");
        let words = self.layout(&frequencies);
        let mut svg = String::new();
        self.write_svg(&mut svg, &words)
            .context("Failed to format word cloud SVG")?;
        Ok(WordCloud { svg, words })
    }
}

/// Count whitespace-separated words of at least two characters that
/// contain an alphanumeric character. Sorted by descending count, ties by
/// first occurrence.
pub fn word_frequencies(text: &str) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for word in text.split_whitespace() {
        if word.chars().count() < 2 || !word.chars().any(char::is_alphanumeric) {
            continue;
        }
        match positions.get(word) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(word, counts.len());
                counts.push((word.to_string(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
