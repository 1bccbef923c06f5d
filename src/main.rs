use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use ai_translator::core::{read_input, TranslatorError};
use ai_translator::env::{self, EnvVar};
use ai_translator::translation::language::{is_preset_model, is_supported_language};
use ai_translator::translation::{
    ConfigManager, SettingsDraft, TranslationResponse, TranslationService, MODEL_OPTIONS,
    TARGET_LANGUAGES,
};

#[derive(Parser, Debug)]
#[command(
    name = "ai-translator",
    version,
    about = "Translate e-mail bodies with a hosted or local language model"
)]
struct Cli {
    /// Settings file [default: ~/.config/ai-translator/settings.toml]
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Charset of the input document
    #[arg(short = 'E', long, global = true, value_name = "LABEL")]
    encoding: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate the plain text of a document as a whole
    Text {
        /// Input file, or - for stdin
        #[arg(default_value = "-")]
        input: String,
    },
    /// Translate an HTML document paragraph by paragraph
    Html {
        /// Input file, or - for stdin
        #[arg(default_value = "-")]
        input: String,
    },
    /// Show or change translator settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List supported target languages and model presets
    Languages,
    /// Print documentation for supported environment variables
    Env,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective settings
    Show,
    /// Save one or more settings
    Set(SetArgs),
}

#[derive(Args, Debug)]
struct SetArgs {
    /// Backend: gemini or ollama
    #[arg(long)]
    provider: Option<String>,
    #[arg(long)]
    api_key: Option<String>,
    /// Hosted model name
    #[arg(long)]
    model: Option<String>,
    /// Target language code, e.g. zh-CN
    #[arg(long)]
    target_language: Option<String>,
    /// Local backend base URL
    #[arg(long)]
    ollama_host: Option<String>,
    /// Local model name
    #[arg(long)]
    ollama_model: Option<String>,
}

impl From<SetArgs> for SettingsDraft {
    fn from(args: SetArgs) -> Self {
        SettingsDraft {
            provider: args.provider,
            api_key: args.api_key,
            model: args.model,
            target_language: args.target_language,
            ollama_host: args.ollama_host,
            ollama_model: args.ollama_model,
        }
    }
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {}", error);
            1
        }
    };

    process::exit(code);
}

fn init_tracing() {
    let (level, invalid) = match env::core::LogLevel::get() {
        Ok(level) => (level, None),
        Err(error) => ("info".to_string(), Some(error)),
    };

    tracing_subscriber::fmt()
        .with_max_level(level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO))
        .with_writer(std::io::stderr)
        .init();

    if let Some(error) = invalid {
        tracing::warn!("{}", error);
    }
}

fn run(cli: Cli) -> Result<i32, TranslatorError> {
    match cli.command {
        Command::Languages => {
            print_languages();
            Ok(0)
        }
        Command::Env => {
            print!("{}", env::generate_env_docs());
            Ok(0)
        }
        Command::Config { action } => {
            let manager = load_config_manager(cli.settings)?;
            match action {
                ConfigAction::Show => {
                    print_config(&manager)?;
                    Ok(0)
                }
                ConfigAction::Set(args) => {
                    if let Some(code) = args.target_language.as_deref() {
                        if !is_supported_language(code.trim()) {
                            tracing::warn!("未知的目标语言代码: {}", code);
                        }
                    }

                    if !manager.save_config(&args.into()) {
                        eprintln!("Settings could not be saved in this environment.");
                        return Ok(1);
                    }
                    print_config(&manager)?;
                    Ok(0)
                }
            }
        }
        Command::Text { input } => {
            let text = read_input(&input, cli.encoding.as_deref())?;
            let service = build_service(cli.settings)?;
            let response = block_on(service.translate(&text))?;
            print_response(&response)
        }
        Command::Html { input } => {
            let html = read_input(&input, cli.encoding.as_deref())?;
            let service = build_service(cli.settings)?;
            let response = block_on(service.translate_html_by_paragraph(&html))?;
            print_response(&response)
        }
    }
}

fn load_config_manager(settings: Option<PathBuf>) -> Result<ConfigManager, TranslatorError> {
    let settings = match settings {
        Some(path) => Some(path),
        None => env::core::SettingsPath::lookup()
            .map_err(|e| TranslatorError::new(&e.to_string()))?
            .map(PathBuf::from),
    };

    Ok(ConfigManager::load(settings.as_deref())?.with_env_overrides()?)
}

fn build_service(settings: Option<PathBuf>) -> Result<TranslationService, TranslatorError> {
    let manager = load_config_manager(settings)?;
    Ok(TranslationService::new(Arc::new(manager)))
}

// 段落翻译的 future 持有 Rc 文档树，在当前线程上驱动
fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, TranslatorError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| TranslatorError::new(&format!("Unable to start async runtime: {}", e)))?;

    Ok(runtime.block_on(future))
}

fn print_response(response: &TranslationResponse) -> Result<i32, TranslatorError> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| TranslatorError::new(&e.to_string()))?;
    println!("{}", json);

    Ok(if response.success { 0 } else { 1 })
}

fn print_config(manager: &ConfigManager) -> Result<(), TranslatorError> {
    let config = manager.get_config();
    let output = serde_json::json!({
        "provider": config.provider,
        "apiKey": config.masked_api_key(),
        "model": config.model,
        "presetModel": is_preset_model(&config.model),
        "targetLanguage": config.target_language,
        "languageName": config.language_name(),
        "ollamaHost": config.ollama_host,
        "ollamaModel": config.ollama_model,
    });

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| TranslatorError::new(&e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn print_languages() {
    println!("Target languages:");
    for language in TARGET_LANGUAGES {
        println!(
            "  {:<6} {:<24} {}",
            language.code, language.label, language.native_label
        );
    }

    println!();
    println!("Hosted model presets:");
    for option in MODEL_OPTIONS {
        println!("  {:<40} {}", option.value, option.label);
    }
}
