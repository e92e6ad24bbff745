//! create-pywire-app - interactive scaffolder for PyWire applications

mod logging;

use clap::Parser;
use colored::Colorize;
use scaffolder_core::{FlowError, ProductConfig, Settings};
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

const LOGO: &str = r"
██████╗ ██╗   ██╗██╗    ██╗██╗██████╗ ███████╗
██╔══██╗╚██╗ ██╔╝██║    ██║██║██╔══██╗██╔════╝
██████╔╝ ╚████╔╝ ██║ █╗ ██║██║██████╔╝█████╗
██╔═══╝   ╚██╔╝  ██║███╗██║██║██╔══██╗██╔══╝
██║        ██║   ╚███╔███╔╝██║██║  ██║███████╗
╚═╝        ╚═╝    ╚══╝╚══╝ ╚═╝╚═╝  ╚═╝╚══════╝
";

/// PyWire product configuration
#[derive(Clone)]
pub struct PyWireConfig;

impl ProductConfig for PyWireConfig {
    fn name(&self) -> &'static str {
        "create-pywire-app"
    }

    fn display_name(&self) -> &'static str {
        "PyWire"
    }

    fn framework_package(&self) -> &'static str {
        "pywire"
    }

    fn local_mode_env(&self) -> &'static str {
        "USE_LOCAL_PYWIRE"
    }

    fn editor_extension(&self) -> &'static str {
        "pywire.pywire"
    }

    fn dev_command(&self) -> &'static [&'static str] {
        &["pywire", "dev"]
    }

    fn banner(&self) -> &'static str {
        LOGO
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-pywire-app")]
#[command(about = "Create a new PyWire application")]
#[command(version)]
pub struct Args {
    /// Specify a specific version of pywire to install
    #[arg(long = "pywire-version", value_name = "VERSION")]
    pub pywire_version: Option<String>,

    /// Local pywire checkout used when USE_LOCAL_PYWIRE=1
    #[arg(long = "local-path", value_name = "PATH", env = "PYWIRE_LOCAL_PATH")]
    pub local_path: Option<PathBuf>,

    /// Increase diagnostic output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn abort() -> ! {
    let _ = console::Term::stderr().show_cursor();
    eprintln!("\n{}", "System aborted.".red().bold());
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Ctrl+C outside a prompt (prompts report it as a cancelled answer)
    ctrlc::set_handler(|| abort()).ok();

    let args = Args::parse();

    if let Err(e) = logging::init_logging(args.verbose) {
        eprintln!("{}", e);
    }

    let config = PyWireConfig;
    let settings = Settings::resolve(&config, args.pywire_version, args.local_path);
    tracing::debug!(?settings, "resolved settings");

    let result = scaffolder_core::run(&config, settings, CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.downcast_ref::<FlowError>().is_some() => ExitCode::from(1),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::from(1)
        }
    }
}
