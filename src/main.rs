// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use csvtrad::app_config::{self, Config, NumberTreatment, ProviderKind};
use csvtrad::app_controller::Controller;

/// CLI Wrapper for ProviderKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliProvider {
    Google,
    Ollama,
}

impl From<CliProvider> for ProviderKind {
    fn from(cli_provider: CliProvider) -> Self {
        match cli_provider {
            CliProvider::Google => ProviderKind::Google,
            CliProvider::Ollama => ProviderKind::Ollama,
        }
    }
}

/// CLI Wrapper for NumberTreatment to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliNumberTreatment {
    Preserve,
    ConvertCurrency,
    ChangeSymbol,
}

impl From<CliNumberTreatment> for NumberTreatment {
    fn from(cli_treatment: CliNumberTreatment) -> Self {
        match cli_treatment {
            CliNumberTreatment::Preserve => NumberTreatment::Preserve,
            CliNumberTreatment::ConvertCurrency => NumberTreatment::ConvertCurrency,
            CliNumberTreatment::ChangeSymbol => NumberTreatment::ChangeSymbol,
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
    /// Translate the data row of a CSV file (default command)
    Translate(TranslateArgs),

    /// Write a default configuration file
    InitConfig {
        /// Where to write the configuration
        #[arg(value_name = "PATH", default_value = "conf.json")]
        path: PathBuf,

        /// Replace an existing file
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Generate shell completions for csvtrad
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args, Debug, Clone)]
struct TranslateArgs {
    /// CSV file with a header row and a data row
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Output file, defaults to <name>_translated_<target>.csv next to the input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Source language code (e.g., 'pt', 'es', 'auto')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// How numbers and prices are handled
    #[arg(long, value_enum)]
    number_treatment: Option<CliNumberTreatment>,

    /// Conversion rate applied with convert-currency
    #[arg(long)]
    rate: Option<f64>,

    /// Currency symbol used by the source data
    #[arg(long)]
    source_currency: Option<String>,

    /// Currency symbol written into the translation
    #[arg(long)]
    target_currency: Option<String>,

    /// Translate URLs instead of keeping them
    #[arg(long)]
    no_preserve_urls: bool,

    /// Translate e-mail addresses instead of keeping them
    #[arg(long)]
    no_preserve_emails: bool,

    /// Let numbers go through translation
    #[arg(long)]
    no_preserve_numbers: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliProvider>,

    /// Model name to use for translation (Ollama)
    #[arg(short, long)]
    model: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Quote every field of the output
    #[arg(long)]
    quote_all: bool,
}

/// csvtrad - CSV row translator
///
/// Translates the data row of a CSV file while keeping URLs, e-mail
/// addresses, numbers and prices intact.
#[derive(Parser, Debug)]
#[command(name = "csvtrad")]
#[command(version)]
#[command(about = "Translate the data row of a CSV file")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "csvtrad reads a CSV file, translates its data row field by field and writes
the header, the original row and the translated row to a new file.

EXAMPLES:
    csvtrad menu.csv                                  # Translate using default config
    csvtrad -f menu.csv                               # Force overwrite existing output
    csvtrad -s pt -t es menu.csv                      # Translate from Portuguese to Spanish
    csvtrad --number-treatment convert-currency --rate 0.18 menu.csv
    csvtrad -p ollama -m llama3.2:3b menu.csv         # Use a local Ollama model
    csvtrad init-config                               # Write conf.json with defaults
    csvtrad completions bash > csvtrad.bash           # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: Option<TranslateArgs>,
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

    // @returns: ANSI colour for a level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with("csvtrad")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "csvtrad", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::InitConfig { path, force_overwrite }) => init_config(&path, force_overwrite),
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            let args = cli
                .translate
                .ok_or_else(|| anyhow!("INPUT_FILE is required when no subcommand is specified"))?;
            run_translate(args).await
        }
    }
}

// @writes: Default configuration file
fn init_config(path: &Path, force_overwrite: bool) -> Result<()> {
    if path.exists() && !force_overwrite {
        return Err(anyhow!("{:?} already exists (use -f to overwrite)", path));
    }
    write_config(path, &Config::default())?;
    info!("Default configuration written to {:?}", path);
    Ok(())
}

fn write_config(path: &Path, config: &Config) -> Result<()> {
    let config_json = serde_json::to_string_pretty(config).context("Failed to serialize config to JSON")?;
    std::fs::write(path, config_json).with_context(|| format!("Failed to write config to file: {:?}", path))
}

// @loads: Config file, creating a default one when missing
fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        let file = File::open(path).with_context(|| format!("Failed to open config file: {:?}", path))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    } else {
        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        write_config(path, &config)?;
        Ok(config)
    }
}

// @applies: Command line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, options: &TranslateArgs) {
    if let Some(source_language) = &options.source_language {
        config.source_language = source_language.clone();
    }
    if let Some(target_language) = &options.target_language {
        config.target_language = target_language.clone();
    }
    if let Some(treatment) = &options.number_treatment {
        config.currency.number_treatment = treatment.clone().into();
    }
    if let Some(rate) = options.rate {
        config.currency.conversion_rate = rate;
    }
    if let Some(symbol) = &options.source_currency {
        config.currency.source_symbol = symbol.clone();
    }
    if let Some(symbol) = &options.target_currency {
        config.currency.target_symbol = symbol.clone();
    }
    if options.no_preserve_urls {
        config.preservation.preserve_urls = false;
    }
    if options.no_preserve_emails {
        config.preservation.preserve_emails = false;
    }
    if options.no_preserve_numbers {
        config.preservation.preserve_numbers = false;
    }
    if let Some(provider) = &options.provider {
        config.provider.provider_type = provider.clone().into();
    }
    if let Some(model) = &options.model {
        config.provider.model = model.clone();
    }
    if options.quote_all {
        config.output.quote_all = true;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(level) = &options.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = load_config(&options.config_path)?;
    apply_overrides(&mut config, &options);
    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    if !controller.test_connection().await {
        warn!("Provider check failed; fields may be left untranslated");
    }

    let output = controller
        .run(&options.input_file, options.output.clone(), options.force_overwrite)
        .await?;
    info!("Saved {:?}", output);

    Ok(())
}
