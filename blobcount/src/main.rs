use blobcount::{CountReport, count_files, load_config};
use serde::Serialize;
use std::env;

#[derive(Serialize)]
struct JsonLine<'a> {
    image: &'a str,
    #[serde(flatten)]
    report: CountReport,
}

fn usage() -> String {
    "usage: blobcount [--json] <config.json> <image>...".to_string()
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let json = match args.iter().position(|a| a == "--json") {
        Some(i) => {
            args.remove(i);
            true
        }
        None => false,
    };
    let (config_path, images) = args.split_first().ok_or_else(usage)?;
    if images.is_empty() {
        return Err(usage());
    }

    let config = load_config(config_path).map_err(|e| e.to_string())?;
    let results = count_files(images, &config).map_err(|e| e.to_string())?;
    let mut failed = 0usize;
    for (image, result) in images.iter().zip(results) {
        match result {
            Ok(out) if json => {
                let line = JsonLine {
                    image,
                    report: out.report,
                };
                println!(
                    "{}",
                    serde_json::to_string(&line).map_err(|e| e.to_string())?
                );
            }
            Ok(out) => println!("{image}: {}", out.report),
            Err(err) => {
                eprintln!("{image}: {err}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!("{failed} of {} images failed", images.len()));
    }
    Ok(())
}
