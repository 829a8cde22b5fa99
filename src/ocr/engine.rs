use anyhow::{anyhow, Context, Result};
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;

use super::setup::{find_tessdata_dir, find_tesseract_executable};

/// Reads text out of an image region.
///
/// Implementations return the recognized tokens in reading order (left to
/// right, top to bottom). Tokens carry no positions or confidences.
pub trait TextRecognizer {
    fn recognize(&self, region: &RgbImage) -> Result<Vec<String>>;
}

/// A single word row from Tesseract's TSV output
#[derive(Debug, Clone, PartialEq)]
pub struct TsvWord {
    pub block: i32,
    pub paragraph: i32,
    pub line: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
    pub text: String,
}

impl TsvWord {
    fn same_line(&self, other: &TsvWord) -> bool {
        self.block == other.block && self.paragraph == other.paragraph && self.line == other.line
    }
}

/// Tesseract invoked as an external process.
pub struct TesseractEngine {
    executable: PathBuf,
    tessdata: Option<PathBuf>,
    language: String,
}

impl TesseractEngine {
    /// Locates Tesseract and its language data.
    pub fn new(language: &str, configured_exe: Option<&Path>) -> Result<Self> {
        let executable = find_tesseract_executable(configured_exe)?;
        let tessdata = find_tessdata_dir(language);

        crate::log(&format!(
            "Tesseract: {} (tessdata: {}, language: {})",
            executable.display(),
            tessdata
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "default".to_string()),
            language
        ));

        Ok(Self {
            executable,
            tessdata,
            language: language.to_string(),
        })
    }
}

impl TextRecognizer for TesseractEngine {
    fn recognize(&self, region: &RgbImage) -> Result<Vec<String>> {
        let temp_input = NamedTempFile::with_suffix(".png")?;
        region
            .save(temp_input.path())
            .context("Failed to write OCR input image")?;

        let mut command = Command::new(&self.executable);
        command.arg(temp_input.path()).arg("stdout");
        if let Some(tessdata) = &self.tessdata {
            command.arg("--tessdata-dir").arg(tessdata);
        }
        let output = command
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg("6") // Assume single uniform block of text
            .arg("tsv")
            .output()
            .context("Failed to run Tesseract")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr));
        }

        let tsv = String::from_utf8_lossy(&output.stdout);
        Ok(group_tokens(&parse_tsv_words(&tsv)))
    }
}

/// Parses Tesseract TSV output, keeping only non-empty word rows.
pub fn parse_tsv_words(tsv: &str) -> Vec<TsvWord> {
    let mut words = Vec::new();

    for line in tsv.lines().skip(1) {
        // TSV fields: level, page_num, block_num, par_num, line_num, word_num,
        //             left, top, width, height, conf, text
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 12 {
            continue;
        }

        let int = |i: usize| fields[i].trim().parse::<i32>().unwrap_or(-1);
        let conf: f32 = fields[10].trim().parse().unwrap_or(-1.0);
        let text = fields[11].trim();

        // Level 5 = word
        if int(0) != 5 || text.is_empty() || conf < 0.0 {
            continue;
        }

        words.push(TsvWord {
            block: int(2),
            paragraph: int(3),
            line: int(4),
            left: int(6),
            width: int(8),
            height: int(9),
            text: text.to_string(),
        });
    }

    words
}

/// Groups words into tokens.
///
/// Neighbouring words on the same text line are joined with a space unless
/// the gap between them is wider than the taller of the two words, which is
/// how a name and its score sit apart on one row.
pub fn group_tokens(words: &[TsvWord]) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut prev: Option<&TsvWord> = None;

    for word in words {
        let joins = prev.is_some_and(|p| {
            let gap = word.left - (p.left + p.width);
            word.same_line(p) && gap <= p.height.max(word.height)
        });

        match tokens.last_mut() {
            Some(token) if joins => {
                token.push(' ');
                token.push_str(&word.text);
            }
            _ => tokens.push(word.text.clone()),
        }
        prev = Some(word);
    }

    tokens
}
