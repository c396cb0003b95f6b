use clap::{Args, Parser, Subcommand};
use sitegen_preview::{
    bundle, compose, extract, response, sandbox, strip_fences, Config, SiteGenError,
    SiteGenResult,
};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(
    name = "sitegen-preview",
    version,
    about = "Extract code blocks from an assistant reply and build a website preview"
)]
struct Cli {
    /// YAML config file
    #[arg(long, global = true, env = "SITEGEN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the extracted artifacts as JSON
    Extract(InputArgs),
    /// Write the composed preview document
    Preview {
        #[command(flatten)]
        input: InputArgs,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit a sandboxed <iframe srcdoc> instead of the bare document
        #[arg(long)]
        iframe: bool,
    },
    /// Package the artifacts into a zip archive
    Bundle {
        #[command(flatten)]
        input: InputArgs,
        /// Archive path (defaults to the configured archive name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the reply with code blocks removed
    Strip(InputArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Reply text file, or `-` for stdin
    input: PathBuf,
    /// Input is a chat-completion JSON body rather than plain text
    #[arg(long)]
    completion_json: bool,
}

fn main() {
    let cli = Cli::parse();

    let config = match cli.config.as_deref().map(Config::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("✗ {}", e);
            process::exit(2);
        }
    };

    let default_level = config.log_level.as_deref().unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run(cli.command, &config) {
        log::error!("{}", e);
        eprintln!("✗ {}", e);
        process::exit(1);
    }
}

fn run(command: Command, config: &Config) -> SiteGenResult<()> {
    match command {
        Command::Extract(input) => {
            let artifacts = extract(&read_reply(&input)?);
            println!("{}", serde_json::to_string_pretty(&artifacts)?);
        }
        Command::Preview {
            input,
            output,
            iframe,
        } => {
            let document = compose(&extract(&read_reply(&input)?));
            if document.is_fallback() {
                log::warn!("No HTML block found; writing the fallback document");
            }
            let html = if iframe {
                sandbox::embed_srcdoc(&document, &config.sandbox, "Preview")
            } else {
                document.into_string()
            };
            match output {
                Some(path) => {
                    fs::write(&path, html)?;
                    println!("✓ wrote {}", path.display());
                }
                None => println!("{}", html),
            }
        }
        Command::Bundle { input, output } => {
            let artifacts = extract(&read_reply(&input)?);
            let path = output.unwrap_or_else(|| PathBuf::from(&config.bundle.archive_name));
            bundle::write_zip_file(&artifacts, &path, &config.bundle)?;
            println!("✓ wrote {} files to {}", artifacts.len(), path.display());
        }
        Command::Strip(input) => {
            println!("{}", strip_fences(&read_reply(&input)?));
        }
    }
    Ok(())
}

fn read_reply(args: &InputArgs) -> SiteGenResult<String> {
    let raw = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.input).map_err(|e| {
            SiteGenError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", args.input.display(), e),
            ))
        })?
    };

    if args.completion_json {
        Ok(response::assistant_text(&raw)?)
    } else {
        Ok(raw)
    }
}
