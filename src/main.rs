use std::path::PathBuf;
use std::process::ExitCode;

use indicatif::{ProgressBar, ProgressStyle};

use adresnik::config::AppConfig;
use adresnik::core::pipeline::AddressPipeline;
use adresnik::io::{export, reader};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("{} v{} starting", adresnik::NAME, adresnik::VERSION);

    let mut args = std::env::args().skip(1);
    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        eprintln!("usage: adresnik <input.csv> <output.csv|output.json>");
        return ExitCode::FAILURE;
    };

    match run(PathBuf::from(input), PathBuf::from(output)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(input: PathBuf, output: PathBuf) -> adresnik::core::error::Result<()> {
    let config = AppConfig::load();
    let pipeline = AddressPipeline::new(config.normalizer);

    let table = reader::read_csv_table(&input)?;

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}% {msg}")
            .expect("progress template is static"),
    );
    let result = pipeline.process_table_with(&table, |percent| bar.set_position(percent as u64), None);
    bar.finish_with_message("done");

    if output.extension().is_some_and(|e| e == "json") {
        export::write_results_json(&result, &output)?;
    } else {
        export::write_results_csv(&result, &output)?;
    }
    println!(
        "{} normalized, {} rejected, {} rows total",
        result.success.len(),
        result.errors.len(),
        result.total
    );
    Ok(())
}
