//! Background render command

use colored::Colorize;

use crate::config::BackgroundConfig;
use crate::interfaces::cli::CliError;
use crate::services::BackgroundGenerator;

pub async fn render_background(
    config: &BackgroundConfig,
    seed: Option<u32>,
    width: Option<u32>,
    height: Option<u32>,
    output: Option<String>,
) -> Result<(), CliError> {
    let generator = BackgroundGenerator::new(config);
    let seed = seed.unwrap_or_else(|| rand::random_range(0..1_000_000));
    let (width, height) = generator.resolve_size(width, height);

    let (info, svg) = generator.render_svg(seed, width, height);

    match output {
        Some(path) => {
            std::fs::write(&path, svg)
                .map_err(|e| CliError::CommandError(format!("Unable to write {}: {}", path, e)))?;
            // 输出到文件时才打印描述信息，避免污染 stdout
            println!(
                "{} {} {} {}",
                "Rendered".green(),
                info.pattern.name().cyan(),
                format!("seed={} {}x{}", info.seed, info.width, info.height).dimmed(),
                path.blue()
            );
        }
        None => println!("{}", svg),
    }
    Ok(())
}
