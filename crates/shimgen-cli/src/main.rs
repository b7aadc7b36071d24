use clap::{Parser, Subcommand};
use miette::Result;
use shimgen_driver::Driver;
use shimgen_model::{available_modules, dependencies, Platform};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shimgen")]
#[command(author, version, about = "C++ binding glue generator for framework class models")]
struct Cli {
    /// Enable debug logging (overridden by SHIMGEN_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate C++ glue for the selected modules
    Generate {
        /// Class model description (JSON)
        #[arg(long)]
        model: PathBuf,

        /// Generator configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Module to generate (repeatable; default: all available)
        #[arg(short = 'm', long = "module")]
        modules: Vec<String>,

        /// Generate for the meta-object compiler
        #[arg(long)]
        moc: bool,

        /// Restrict output to the minimal build
        #[arg(long)]
        minimal: bool,

        /// Output directory
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Write per-class dumps into this directory
        #[arg(long)]
        dump: Option<PathBuf>,
    },

    /// List the modules available for a platform
    Modules {
        /// Target platform (default: host)
        #[arg(long)]
        platform: Option<String>,

        /// Framework version
        #[arg(long, default_value = "5.8.0")]
        qt_version: String,
    },

    /// Print the transitive dependencies of a module
    Deps {
        /// Module short name, e.g. Widgets
        module: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env("SHIMGEN_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            model,
            config,
            modules,
            moc,
            minimal,
            out,
            dump,
        } => {
            let mut driver = match config {
                Some(path) => Driver::from_config_file(&path)?,
                None => Driver::new(),
            };

            // Flags override the file.
            let config = driver.config_mut();
            if !modules.is_empty() {
                config.generator.modules = modules;
            }
            config.generator.moc |= moc;
            config.generator.minimal |= minimal;
            if let Some(out) = out {
                config.output.dir = out;
            }
            if dump.is_some() {
                config.output.dump_dir = dump;
            }
            config.validate()?;

            let summary = driver.run(&model)?;
            for path in &summary.sources {
                println!("Wrote {}", path.display());
            }
            if !summary.dumps.is_empty() {
                println!("Dumped {} classes", summary.dumps.len());
            }
            if summary.diagnostics > 0 {
                eprintln!("{} model entries need review", summary.diagnostics);
            }
        }

        Commands::Modules {
            platform,
            qt_version,
        } => {
            let platform = match platform {
                Some(name) => Platform::from_name(&name)
                    .ok_or_else(|| miette::miette!("Unknown platform: {}", name))?,
                None => Platform::current(),
            };
            for module in available_modules(platform, &qt_version) {
                println!("{}", module);
            }
        }

        Commands::Deps { module } => {
            for dep in dependencies(&module)? {
                println!("{}", dep);
            }
        }
    }

    Ok(())
}
