use clap::{Parser, Subcommand};
use downsize::imaging::RustBackend;
use downsize::{config, output, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "downsize")]
#[command(about = "Shrink oversized images into JPEGs that fit a size limit")]
#[command(long_about = "\
Shrink oversized images into JPEGs that fit a size limit

Every file in the source directory larger than the limit (0.9 MB by default)
is resized and re-encoded as JPEG, stepping the long edge down until the
result fits:

  images/
  ├── config.toml          # Optional settings (see gen-config)
  ├── beach.png            # 1.4 MB → resized/beach-2.jpeg
  ├── logo.png             # 120 KB, under the limit → left alone
  └── resized/
      └── beach-2.jpeg     # attempt 2: long edge 2000px

Files that already have an output are skipped, so reruns only pick up new
images. Delete an output to shrink its source again.

Run 'downsize gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory of images to scan
    #[arg(long, default_value = "images", global = true)]
    source: PathBuf,

    /// Directory the shrunk JPEGs are written to
    #[arg(long, default_value = "images/resized", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Shrink every oversized image in the source directory
    Run,
    /// Show what a run would do without writing anything
    Check {
        /// Print the scan result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run => {
            let config = config::load_config(&cli.source)?;
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_shrink_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = scan::run(
                &RustBackend::new(),
                &cli.source,
                &cli.output,
                &config,
                Some(tx),
            );
            printer.join().map_err(|_| "progress printer panicked")?;
            output::print_run_summary(&result?.stats);
        }
        Command::Check { json } => {
            let config = config::load_config(&cli.source)?;
            let report = scan::scan(&cli.source, &cli.output, &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_scan_output(&report);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
