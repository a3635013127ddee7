use clap::Parser;

use folio::cli::Cli;
use folio::config::{get_config, init_config, validate_static_config};
use folio::runtime::modes::{self, Mode};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config(cli.config.as_deref());

    match modes::detect_mode(cli.command.as_ref()) {
        Mode::Server => {
            let config = get_config();
            if let Err(e) = validate_static_config(&config) {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }

            // guard 在进程结束前必须保持存活
            let _guard = folio::system::init_logging(&config.logging)?;
            modes::run_server().await
        }
        Mode::Cli => {
            let Some(command) = cli.command else {
                return Ok(());
            };
            if let Err(e) = modes::run_cli(command).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
