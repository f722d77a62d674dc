//! Tesseract OCR through its command-line executable.
//!
//! Image bytes go to `tesseract stdin stdout ... tsv` on stdin and the TSV
//! report comes back on stdout. The TSV rows carry a level per row:
//!
//! ```text
//! level  meaning     builds
//! 1      page        (ignored)
//! 2      block       Block
//! 3      paragraph   Paragraph
//! 4      line        Line (bbox)
//! 5      word        Line text
//! ```

use super::progress::{Progress, STATUS_RECOGNIZING};
use super::OcrEngine;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::geometry::BoundingBox;
use crate::intake::ImageInput;
use crate::recognition::{Block, Line, Paragraph, RecognitionResult};
use std::io::{self, Write};
use std::process::{Command, Stdio};

/// Minimum TSV columns; the 12th (text) may be absent on non-word rows.
const MIN_TSV_COLUMNS: usize = 11;

/// OCR engine backed by the `tesseract` executable.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    config: EngineConfig,
    version: String,
}

impl TesseractEngine {
    /// Check the executable and its installed languages.
    ///
    /// # Errors
    ///
    /// [`Error::EngineUnavailable`] when the executable cannot be run and
    /// [`Error::LanguageUnavailable`] for the first requested language that is
    /// not installed.
    pub fn initialize(config: EngineConfig) -> Result<Self> {
        let version = tesseract_version(&config.executable)?;
        let installed = list_languages(&config.executable)?;
        if let Some(missing) = config.languages.iter().find(|l| !installed.contains(l)) {
            return Err(Error::LanguageUnavailable(missing.clone()));
        }
        log::info!("Using {} with languages {}", version, config.language_spec());
        Ok(Self { config, version })
    }

    /// Version line reported by the executable, e.g. `tesseract 5.3.4`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.executable);
        cmd.arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(self.config.language_spec());
        if self.config.preserve_interword_spaces {
            cmd.arg("-c").arg("preserve_interword_spaces=1");
        }
        cmd.arg("tsv");
        cmd
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(
        &self,
        image: &ImageInput,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<RecognitionResult> {
        progress(Progress::new(STATUS_RECOGNIZING, 0.0));

        let mut child = self
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(&self.config.executable, e))?;

        // tesseract reads all input before writing, so feeding stdin first cannot stall
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&image.bytes),
            None => Ok(()),
        };
        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Engine(format!("tesseract failed: {}", stderr.trim())));
        }
        written?;

        let tsv = String::from_utf8_lossy(&output.stdout);
        let result = parse_tsv(&tsv, self.config.preserve_interword_spaces)?;
        log::debug!("Recognized {} lines", result.line_count());

        progress(Progress::new(STATUS_RECOGNIZING, 1.0));
        Ok(result)
    }

    fn terminate(&self) {
        // one process per call; nothing stays running
        log::debug!("Released {}", self.version);
    }
}

/// Languages the executable has traineddata for.
pub fn list_languages(executable: &str) -> Result<Vec<String>> {
    let stdout = run_for_text(executable, "--list-langs")?;
    // first line is the "List of available languages in ..." header
    Ok(stdout
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// First line of `tesseract --version`.
pub fn tesseract_version(executable: &str) -> Result<String> {
    let text = run_for_text(executable, "--version")?;
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::EngineUnavailable(format!("{} reported no version", executable)))
}

fn run_for_text(executable: &str, flag: &str) -> Result<String> {
    let output = Command::new(executable)
        .arg(flag)
        .output()
        .map_err(|e| spawn_error(executable, e))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::EngineUnavailable(format!(
            "{} {} failed: {}",
            executable,
            flag,
            stderr.trim()
        )));
    }
    // older releases print informational output on stderr
    let stdout = String::from_utf8_lossy(&output.stdout);
    if stdout.trim().is_empty() {
        Ok(String::from_utf8_lossy(&output.stderr).into_owned())
    } else {
        Ok(stdout.into_owned())
    }
}

fn spawn_error(executable: &str, err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        Error::EngineUnavailable(format!("{} not found (is Tesseract installed?)", executable))
    } else {
        Error::Io(err)
    }
}

struct Word {
    text: String,
    bbox: BoundingBox,
}

/// Build the block/paragraph/line tree from Tesseract TSV output.
///
/// Line text is the line's words joined by spaces and ends with `\n`. With
/// `preserve_interword_spaces`, wide gaps between words become several
/// spaces, estimated from the line's average glyph width. Lines without
/// words, and paragraphs and blocks left empty by that, are dropped.
///
/// # Examples
///
/// ```
/// use ocr_indent::engine::tesseract::parse_tsv;
///
/// let tsv = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
///            2\t1\t1\t0\t0\t0\t20\t10\t60\t12\t-1\t\n\
///            3\t1\t1\t1\t0\t0\t20\t10\t60\t12\t-1\t\n\
///            4\t1\t1\t1\t1\t0\t20\t10\t60\t12\t-1\t\n\
///            5\t1\t1\t1\t1\t1\t20\t10\t20\t12\t96.1\tlet\n\
///            5\t1\t1\t1\t1\t2\t50\t10\t10\t12\t95.0\tx\n";
/// let result = parse_tsv(tsv, false)?;
/// let line = result.lines().next().unwrap();
/// assert_eq!(line.text, "let x\n");
/// assert_eq!(line.bbox.x0, 20.0);
/// # Ok::<(), ocr_indent::Error>(())
/// ```
pub fn parse_tsv(tsv: &str, preserve_interword_spaces: bool) -> Result<RecognitionResult> {
    let mut result = RecognitionResult::default();
    let mut lines_words: Vec<Vec<Word>> = Vec::new();

    for (idx, row) in tsv.lines().enumerate() {
        let line_no = idx + 1;
        if row.trim().is_empty() || row.starts_with("level") {
            continue;
        }
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < MIN_TSV_COLUMNS {
            return Err(Error::Tsv {
                line: line_no,
                reason: format!("expected at least {} columns, found {}", MIN_TSV_COLUMNS, cols.len()),
            });
        }

        let level: u8 = parse_field(&cols, 0, "level", line_no)?;
        let bbox = BoundingBox::from_ltwh(
            parse_field(&cols, 6, "left", line_no)?,
            parse_field(&cols, 7, "top", line_no)?,
            parse_field(&cols, 8, "width", line_no)?,
            parse_field(&cols, 9, "height", line_no)?,
        );

        match level {
            1 => {},
            2 => result.blocks.push(Block::default()),
            3 => current_block(&mut result).paragraphs.push(Paragraph::default()),
            4 => {
                current_paragraph(&mut result).lines.push(Line::new(String::new(), bbox));
                lines_words.push(Vec::new());
            },
            5 => {
                let text = cols.get(11).map(|t| t.trim()).unwrap_or("");
                if text.is_empty() {
                    continue;
                }
                if lines_words.is_empty() {
                    // word before any line row: give it a line of its own
                    current_paragraph(&mut result).lines.push(Line::new(String::new(), bbox));
                    lines_words.push(Vec::new());
                }
                if let Some(words) = lines_words.last_mut() {
                    words.push(Word {
                        text: text.to_string(),
                        bbox,
                    });
                }
            },
            other => {
                return Err(Error::Tsv {
                    line: line_no,
                    reason: format!("unknown level {}", other),
                });
            },
        }
    }

    let mut words_iter = lines_words.into_iter();
    for block in &mut result.blocks {
        for paragraph in &mut block.paragraphs {
            for line in &mut paragraph.lines {
                let words = words_iter.next().unwrap_or_default();
                line.text = join_words(&words, preserve_interword_spaces);
            }
            paragraph.lines.retain(|line| !line.text.is_empty());
        }
        block.paragraphs.retain(|p| !p.lines.is_empty());
    }
    result.blocks.retain(|b| !b.paragraphs.is_empty());

    Ok(result)
}

fn parse_field<T: std::str::FromStr>(cols: &[&str], index: usize, name: &str, line: usize) -> Result<T> {
    cols[index].trim().parse().map_err(|_| Error::Tsv {
        line,
        reason: format!("invalid {} '{}'", name, cols[index]),
    })
}

fn current_block(result: &mut RecognitionResult) -> &mut Block {
    if result.blocks.is_empty() {
        result.blocks.push(Block::default());
    }
    let last = result.blocks.len() - 1;
    &mut result.blocks[last]
}

fn current_paragraph(result: &mut RecognitionResult) -> &mut Paragraph {
    let block = current_block(result);
    if block.paragraphs.is_empty() {
        block.paragraphs.push(Paragraph::default());
    }
    let last = block.paragraphs.len() - 1;
    &mut block.paragraphs[last]
}

/// Join a line's words; empty when there are none, otherwise `\n`-terminated.
fn join_words(words: &[Word], preserve_interword_spaces: bool) -> String {
    if words.is_empty() {
        return String::new();
    }

    let glyphs: usize = words.iter().map(|w| w.text.chars().count()).sum();
    let ink: f64 = words.iter().map(|w| w.bbox.width().max(0.0)).sum();
    let char_width = if glyphs > 0 { ink / glyphs as f64 } else { 0.0 };

    let mut text = String::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            let gap = word.bbox.x0 - words[i - 1].bbox.x1;
            let spaces = if preserve_interword_spaces && char_width > 0.0 && gap > 0.0 {
                ((gap / char_width).round() as usize).max(1)
            } else {
                1
            };
            text.extend(std::iter::repeat(' ').take(spaces));
        }
        text.push_str(&word.text);
    }
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn tsv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.push('\n');
        out
    }

    #[test]
    fn test_empty_report() {
        let result = parse_tsv(&tsv(&["1\t1\t0\t0\t0\t0\t0\t0\t640\t480\t-1\t"]), false).unwrap();
        assert!(result.blocks.is_empty());
    }

    #[test]
    fn test_builds_hierarchy() {
        let result = parse_tsv(
            &tsv(&[
                "1\t1\t0\t0\t0\t0\t0\t0\t640\t480\t-1\t",
                "2\t1\t1\t0\t0\t0\t0\t0\t200\t30\t-1\t",
                "3\t1\t1\t1\t0\t0\t0\t0\t200\t30\t-1\t",
                "4\t1\t1\t1\t1\t0\t0\t0\t90\t12\t-1\t",
                "5\t1\t1\t1\t1\t1\t0\t0\t90\t12\t91\tfn",
                "4\t1\t1\t1\t2\t0\t40\t16\t80\t12\t-1\t",
                "5\t1\t1\t1\t2\t1\t40\t16\t80\t12\t93\tbody",
                "2\t1\t2\t0\t0\t0\t0\t40\t200\t30\t-1\t",
                "3\t1\t2\t1\t0\t0\t0\t40\t200\t30\t-1\t",
                "4\t1\t2\t1\t1\t0\t0\t40\t30\t12\t-1\t",
                "5\t1\t2\t1\t1\t1\t0\t40\t30\t12\t88\t}",
            ]),
            false,
        )
        .unwrap();

        assert_eq!(result.blocks.len(), 2);
        assert_eq!(result.blocks[0].paragraphs[0].lines.len(), 2);
        let texts: Vec<&str> = result.lines().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["fn\n", "body\n", "}\n"]);
        assert_eq!(result.blocks[0].paragraphs[0].lines[1].bbox, BoundingBox::new(40.0, 16.0, 120.0, 28.0));
    }

    #[test]
    fn test_drops_wordless_lines_and_blocks() {
        let result = parse_tsv(
            &tsv(&[
                "2\t1\t1\t0\t0\t0\t0\t0\t200\t30\t-1\t",
                "3\t1\t1\t1\t0\t0\t0\t0\t200\t30\t-1\t",
                "4\t1\t1\t1\t1\t0\t0\t0\t90\t12\t-1\t",
                "5\t1\t1\t1\t1\t1\t0\t0\t90\t12\t-1\t ",
                "2\t1\t2\t0\t0\t0\t0\t40\t200\t30\t-1\t",
                "3\t1\t2\t1\t0\t0\t0\t40\t200\t30\t-1\t",
                "4\t1\t2\t1\t1\t0\t0\t40\t30\t12\t-1\t",
                "5\t1\t2\t1\t1\t1\t0\t40\t30\t12\t88\tok",
            ]),
            false,
        )
        .unwrap();
        assert_eq!(result.blocks.len(), 1);
        assert_eq!(result.line_count(), 1);
        assert_eq!(result.lines().next().unwrap().text, "ok\n");
    }

    #[test]
    fn test_missing_text_column_allowed() {
        let result = parse_tsv(&tsv(&["2\t1\t1\t0\t0\t0\t0\t0\t200\t30\t-1"]), false).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_short_row_is_error() {
        let err = parse_tsv(&tsv(&["2\t1\t1\t0"]), false).unwrap_err();
        assert!(matches!(err, Error::Tsv { line: 2, .. }));
    }

    #[test]
    fn test_bad_number_is_error() {
        let err = parse_tsv(&tsv(&["x\t1\t1\t0\t0\t0\t0\t0\t200\t30\t-1\t"]), false).unwrap_err();
        assert!(format!("{}", err).contains("invalid level"));
    }

    #[test]
    fn test_unknown_level_is_error() {
        let err = parse_tsv(&tsv(&["9\t1\t1\t0\t0\t0\t0\t0\t200\t30\t-1\t"]), false).unwrap_err();
        assert!(format!("{}", err).contains("unknown level 9"));
    }

    #[test]
    fn test_interword_spacing() {
        // glyph width 10px; 40px gap -> 4 spaces when preserving
        let rows = [
            "4\t1\t1\t1\t1\t0\t0\t0\t120\t12\t-1\t",
            "5\t1\t1\t1\t1\t1\t0\t0\t40\t12\t90\tname",
            "5\t1\t1\t1\t1\t2\t80\t0\t40\t12\t90\tsize",
        ];
        let preserved = parse_tsv(&tsv(&rows), true).unwrap();
        assert_eq!(preserved.lines().next().unwrap().text, "name    size\n");

        let collapsed = parse_tsv(&tsv(&rows), false).unwrap();
        assert_eq!(collapsed.lines().next().unwrap().text, "name size\n");
    }

    #[test]
    fn test_touching_words_keep_one_space() {
        let words = vec![
            Word {
                text: "a".to_string(),
                bbox: BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            },
            Word {
                text: "b".to_string(),
                bbox: BoundingBox::new(8.0, 0.0, 18.0, 10.0),
            },
        ];
        assert_eq!(join_words(&words, true), "a b\n");
    }

    #[test]
    fn test_missing_executable_is_unavailable() {
        let err = tesseract_version("ocr-indent-no-such-binary").unwrap_err();
        assert!(matches!(err, Error::EngineUnavailable(_)));
    }
}
