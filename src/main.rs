use std::io::{IsTerminal as _, Read as _};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context as _, Result};
use clap::{Parser, ValueEnum};
use qrcopy::helper::to_terminal_string;
use qrcopy::hosting::github_pages_url;
use qrcopy::submission::{write_copy_page, write_qr};
use qrcopy::{DeliveryMode, EncodingPolicy, ErrorCorrection, Submission};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "qrcopy", version)]
#[command(about = "Turn text into a QR code that opens a one-tap copy page", long_about = None)]
struct Cli {
    /// Text to encode (read from stdin when omitted)
    text: Option<String>,

    /// What the QR code carries
    #[arg(long, short = 'm', value_enum, env = "QRCOPY_MODE", default_value_t = Mode::DataUrl)]
    mode: Mode,

    /// URL where copy.html is published (external mode)
    #[arg(long, env = "QRCOPY_HOSTED_URL")]
    hosted_url: Option<String>,

    /// GitHub user whose Pages site hosts copy.html (external mode)
    #[arg(long, requires = "github_repo")]
    github_user: Option<String>,

    /// Repository serving copy.html on GitHub Pages (external mode)
    #[arg(long, requires = "github_user")]
    github_repo: Option<String>,

    /// Error correction level: low, medium, quartile or high
    #[arg(long, short = 'e', env = "QRCOPY_EC_LEVEL", default_value = "low")]
    ec_level: ErrorCorrection,

    /// Fixed symbol version 1-40 (smallest fitting version when omitted)
    #[arg(long, env = "QRCOPY_VERSION")]
    symbol_version: Option<u8>,

    /// Pixels per module
    #[arg(long, env = "QRCOPY_MODULE_SIZE", default_value_t = EncodingPolicy::DEFAULT_MODULE_SIZE)]
    module_size: u32,

    /// Quiet zone width, in modules
    #[arg(long, env = "QRCOPY_BORDER", default_value_t = EncodingPolicy::DEFAULT_BORDER)]
    border: u32,

    /// Directory receiving copy.html and qr-code.png
    #[arg(long, short = 'o', env = "QRCOPY_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Also write qr-code.svg
    #[arg(long)]
    svg: bool,

    /// Draw the QR code in the terminal
    #[arg(long, short = 'p')]
    preview: bool,

    /// Print the encoded payload to stdout
    #[arg(long)]
    print_payload: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Encode the text itself
    Direct,
    /// Encode the copy page as a data: URL
    DataUrl,
    /// Encode the URL of a published copy page
    External,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_text(cli: &Cli) -> Result<String> {
    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("no text given; pass it as an argument or pipe it on stdin");
    }
    let mut text = String::new();
    stdin.read_to_string(&mut text).context("failed to read text from stdin")?;
    // Drop the newline most shells append.
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}

fn delivery_mode(cli: &Cli, text: &str) -> DeliveryMode {
    match cli.mode {
        Mode::Direct => DeliveryMode::DirectEmbed,
        Mode::DataUrl => DeliveryMode::DataUrlEmbed,
        Mode::External => {
            let url = cli
                .hosted_url
                .clone()
                .or_else(|| {
                    let user = cli.github_user.as_deref()?;
                    let repo = cli.github_repo.as_deref()?;
                    github_pages_url(user, repo, text)
                })
                .unwrap_or_default();
            DeliveryMode::ExternalUrl(url)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let text = read_text(cli)?;
    if text.is_empty() {
        bail!("enter some text to generate a QR code");
    }

    let submission = Submission::new(&text);
    let page = write_copy_page(&cli.out_dir, &submission)?;
    info!(path = %page.display(), "wrote copy page");

    let mode = delivery_mode(cli, &text);
    if let DeliveryMode::ExternalUrl(url) = &mode {
        if !url.is_empty() {
            info!(%url, "QR code will link to the hosted copy page; publish copy.html there");
        }
    }
    let policy = EncodingPolicy {
        ec_level: cli.ec_level,
        version: cli.symbol_version,
        module_size: cli.module_size,
        border: cli.border,
    };
    debug!(?policy, "encoding policy");

    let output = submission.qr(&mode, &policy)?;
    let svg_border = cli.svg.then_some(cli.border);
    for path in write_qr(&cli.out_dir, &output, svg_border)? {
        info!(path = %path.display(), "wrote QR code");
    }

    if cli.preview {
        print!("{}", to_terminal_string(output.image.symbol(), cli.border));
    }
    if cli.print_payload {
        println!("{}", output.payload);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<qrcopy::Error>() {
                Some(qr_err) => eprintln!("error: {qr_err}\nhint: {}", qr_err.hint()),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::from(2)
        }
    }
}
