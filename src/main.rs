use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use subnet_terraform_gen::cli::Cli;
use subnet_terraform_gen::config::Config;
use subnet_terraform_gen::run;

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    if let Err(e) = log4rs::init_file(&cli.log_config, Default::default()) {
        eprintln!(
            "Warning: logging disabled, cannot load {}: {e}",
            cli.log_config.display()
        );
    }
    log::info!("#Start main()");

    match run(&Config::from(cli)) {
        Ok(generated) => {
            log::info!(
                "Wrote {} file(s) to {}",
                generated.files.len(),
                generated.outdir.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("{} {err}", "Error:".red());
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
