//! Extract text from images with layout indentation.
//!
//! Usage:
//!   ocr_indent screenshot.png
//!   ocr_indent --plain --lang eng+deu scan1.png scan2.jpg
//!   xclip -selection clipboard -t image/png -o | ocr_indent -
//!   ocr_indent --from-json result.json
//!   ocr_indent --set formatOutput=false --set languages=eng+fra
//!   ocr_indent --show-settings

use ocr_indent::config::{EngineConfig, DEFAULT_TESSERACT};
use ocr_indent::converters::converter_for;
use ocr_indent::engine::tesseract::{list_languages, parse_tsv};
use ocr_indent::engine::{Progress, TesseractEngine};
use ocr_indent::intake::{ImageInput, ImageSource};
use ocr_indent::options::{OptionKey, Options};
use ocr_indent::recognition::RecognitionResult;
use ocr_indent::session::{ImageToText, TextBuffer};
use ocr_indent::storage::{default_settings_path, SettingsStore};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

const USAGE: &str = "\
Usage: ocr_indent [OPTIONS] [IMAGE|-]...

Options:
  --settings FILE      Settings file (default: $OCR_INDENT_SETTINGS or .ocr_indent.json)
  --set KEY=VALUE      Change and save a setting (repeatable)
  --show-settings      Print the effective settings
  --list-langs         Print languages the OCR engine has installed
  --plain              Do not re-indent output for this run
  --indent             Re-indent output for this run
  --lang LANGS         Recognition languages for this run, e.g. eng+deu
  --tesseract PATH     Tesseract executable (default: tesseract)
  --from-json FILE     Reconstruct a saved recognition result instead of running OCR
  --from-tsv FILE      Reconstruct saved Tesseract TSV output instead of running OCR
  -v, --verbose        Debug logging
  -h, --help           Show this help

An IMAGE of '-' reads image bytes from stdin as a clipboard paste.";

struct CliConfig {
    settings_path: PathBuf,
    updates: Vec<(OptionKey, String)>,
    show_settings: bool,
    list_langs: bool,
    format_output: Option<bool>,
    languages: Option<String>,
    executable: String,
    from_json: Vec<PathBuf>,
    from_tsv: Vec<PathBuf>,
    images: Vec<String>,
    verbose: bool,
}

impl CliConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut config = Self {
            settings_path: default_settings_path(),
            updates: Vec::new(),
            show_settings: false,
            list_langs: false,
            format_output: None,
            languages: None,
            executable: DEFAULT_TESSERACT.to_string(),
            from_json: Vec::new(),
            from_tsv: Vec::new(),
            images: Vec::new(),
            verbose: false,
        };

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--settings" => config.settings_path = PathBuf::from(value(&mut iter, &arg)?),
                "--set" => {
                    let pair = value(&mut iter, &arg)?;
                    let (key, raw) = pair
                        .split_once('=')
                        .ok_or_else(|| format!("--set expects KEY=VALUE, got '{}'", pair))?;
                    let key = key.trim().parse::<OptionKey>().map_err(|e| format!("{}", e))?;
                    config.updates.push((key, raw.to_string()));
                },
                "--show-settings" => config.show_settings = true,
                "--list-langs" => config.list_langs = true,
                "--plain" => config.format_output = Some(false),
                "--indent" => config.format_output = Some(true),
                "--lang" => config.languages = Some(value(&mut iter, &arg)?),
                "--tesseract" => config.executable = value(&mut iter, &arg)?,
                "--from-json" => config.from_json.push(PathBuf::from(value(&mut iter, &arg)?)),
                "--from-tsv" => config.from_tsv.push(PathBuf::from(value(&mut iter, &arg)?)),
                "--verbose" | "-v" => config.verbose = true,
                "--help" | "-h" => {
                    println!("{}", USAGE);
                    std::process::exit(0);
                },
                "-" => config.images.push("-".to_string()),
                flag if flag.starts_with('-') => return Err(format!("unknown option '{}'", flag)),
                image => config.images.push(image.to_string()),
            }
        }

        Ok(config)
    }

    fn has_work(&self) -> bool {
        !(self.images.is_empty() && self.from_json.is_empty() && self.from_tsv.is_empty())
    }
}

fn value(iter: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    iter.next().ok_or_else(|| format!("{} needs a value", flag))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = match CliConfig::from_args() {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("Error: {}\n\n{}", msg, USAGE);
            std::process::exit(2);
        },
    };

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut store = SettingsStore::open(&cli.settings_path)?;
    if !cli.updates.is_empty() {
        let mut options = store.load_options();
        for (key, raw) in &cli.updates {
            options.set(*key, raw)?;
        }
        store.save_options(&options)?;
        eprintln!("Options saved to {}", store.path().display());
    }

    let mut options = store.load_options();
    if let Some(format_output) = cli.format_output {
        options.format_output = format_output;
    }
    if let Some(languages) = &cli.languages {
        options.set(OptionKey::Languages, languages)?;
    }

    if cli.show_settings {
        println!("{}", serde_json::to_string_pretty(&options)?);
    }

    if cli.list_langs {
        for language in list_languages(&cli.executable)? {
            println!("{}", language);
        }
    }

    if !cli.has_work() {
        if cli.updates.is_empty() && !cli.show_settings && !cli.list_langs {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
        return Ok(());
    }

    let mut buffer = TextBuffer::new();
    reconstruct_saved(&cli, &options, &mut buffer)?;
    recognize_images(&cli, options, &mut buffer)?;

    print!("{}", buffer.value());
    Ok(())
}

fn reconstruct_saved(
    cli: &CliConfig,
    options: &Options,
    buffer: &mut TextBuffer,
) -> Result<(), Box<dyn std::error::Error>> {
    let converter = converter_for(options);

    for path in &cli.from_json {
        let result = RecognitionResult::from_json(&fs::read_to_string(path)?)?;
        log::info!("{}: {} lines", path.display(), result.line_count());
        buffer.append(&converter.convert(&result));
    }

    for path in &cli.from_tsv {
        let result = parse_tsv(&fs::read_to_string(path)?, true)?;
        log::info!("{}: {} lines", path.display(), result.line_count());
        buffer.append(&converter.convert(&result));
    }

    Ok(())
}

fn recognize_images(
    cli: &CliConfig,
    options: Options,
    buffer: &mut TextBuffer,
) -> Result<(), Box<dyn std::error::Error>> {
    if cli.images.is_empty() {
        return Ok(());
    }

    let executable = cli.executable.clone();
    let session = ImageToText::new(options, move |options| {
        TesseractEngine::initialize(
            EngineConfig::from_options(options).with_executable(executable.clone()),
        )
    });

    let verbose = cli.verbose;
    let mut report = |progress: Progress| {
        if verbose {
            eprintln!("{}", progress.label());
        }
    };

    let mut failures = 0;
    for image in &cli.images {
        let input = if image == "-" {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes)?;
            ImageInput::from_bytes(ImageSource::Paste, bytes)
        } else {
            ImageInput::from_path(image)
        };

        let outcome = input.and_then(|input| session.handle(&input, buffer, &mut report));
        if let Err(e) = outcome {
            eprintln!("Error: {}: {}", image, e);
            failures += 1;
        }
    }
    session.shutdown();

    if failures == cli.images.len() {
        return Err(format!("no text extracted from {} image(s)", failures).into());
    }
    Ok(())
}
