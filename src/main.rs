// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;

use proptrans::app_config::{self, Config, TranslationProvider};
use proptrans::app_controller::Controller;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Ollama,
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a property file, a directory of them, or text (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for proptrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct TranslateArgs {
    /// Input file or directory; `-` reads text from stdin
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Translate this text instead of a file
    #[arg(long, conflicts_with = "input_path")]
    text: Option<String>,

    /// Source language code (e.g., 'pl', 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'pl')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name for LLM providers
    #[arg(short, long)]
    model: Option<String>,

    /// Dictionary file path
    #[arg(short, long)]
    dictionary: Option<String>,

    /// Directory for translated files
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Translation attempts per value
    #[arg(short, long)]
    retries: Option<u32>,

    /// Print the translation to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// proptrans - key=value property file translator
///
/// Translates the values of property files between languages, using a
/// user-supplied dictionary first and a machine translation service for
/// everything else.
#[derive(Parser, Debug)]
#[command(name = "proptrans")]
#[command(version)]
#[command(about = "Dictionary-first translator for key=value property files")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "proptrans translates the values of key=value property files.

Each value is looked up in the dictionary first (exact, then case-insensitive).
Values without a dictionary entry go to the translation provider, which is
retried on failure; values that still cannot be translated are kept as they are.

EXAMPLES:
    proptrans input/messages.txt                  # Translate using conf.json
    proptrans -s en -t pl input/messages.txt      # English to Polish
    proptrans --text 'title=Hello' --stdout       # Translate pasted text
    cat messages.txt | proptrans - --stdout       # Read from stdin
    proptrans -p ollama -m llama3.2:3b input/     # Whole directory via Ollama
    proptrans completions bash > proptrans.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    file with --config-path. If the file doesn't exist, a default one is created.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "proptrans", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.translate).await,
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Apply command line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, options: &TranslateArgs) {
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }

    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }

    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        config.translation.active_provider_config_mut().model = model.clone();
    }

    if let Some(dictionary) = &options.dictionary {
        config.dictionary.path = dictionary.clone();
    }

    if let Some(output_dir) = &options.output_dir {
        config.output.directory = output_dir.clone();
    }

    if let Some(retries) = options.retries {
        config.translation.common.retry_count = retries;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}

/// Where the text to translate comes from
enum InputSource {
    Text(String),
    File(PathBuf),
    Folder(PathBuf),
}

fn resolve_input(options: &TranslateArgs) -> Result<InputSource> {
    if let Some(text) = &options.text {
        return Ok(InputSource::Text(text.clone()));
    }

    let input_path = options
        .input_path
        .clone()
        .ok_or_else(|| anyhow!("INPUT_PATH or --text is required"))?;

    if input_path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read text from stdin")?;
        return Ok(InputSource::Text(text));
    }

    if input_path.is_file() {
        Ok(InputSource::File(input_path))
    } else if input_path.is_dir() {
        Ok(InputSource::Folder(input_path))
    } else {
        Err(anyhow!("Input path does not exist: {:?}", input_path))
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // Apply a command line log level before anything gets logged
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;
    apply_overrides(&mut config, &options);

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    let input = resolve_input(&options)?;
    let show_progress = !options.quiet && !options.stdout && std::io::stderr().is_terminal();
    let controller = Controller::with_config(config)?.show_progress(show_progress);

    if options.stdout {
        let output = match input {
            InputSource::Text(text) => controller.translate_text(&text).await?,
            InputSource::File(path) => controller.translate_file(&path).await?,
            InputSource::Folder(_) => {
                return Err(anyhow!("--stdout cannot be used with a directory input"));
            }
        };
        let mut stdout = std::io::stdout();
        stdout
            .write_all(output.text().as_bytes())
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    match input {
        InputSource::Text(text) => {
            controller.run_text(&text).await?;
        }
        InputSource::File(path) => {
            controller.run(path).await?;
        }
        InputSource::Folder(dir) => {
            let summary = controller.run_folder(dir).await?;
            if !summary.failed.is_empty() {
                return Err(anyhow!("{} file(s) could not be translated", summary.failed.len()));
            }
        }
    }

    info!("Done");
    Ok(())
}
