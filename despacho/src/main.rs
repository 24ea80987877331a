use clap::Parser;
use despacho::cli::{self, Cli};
use despacho::{AppConfig, AppContext, init_logger_with_file};
use shared::Notice;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env first so clap sees its variables, then logging
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logger_with_file(cli.log_level.as_deref(), cli.log_dir.as_deref())?;

    // 2. Config (never fatal) and context
    let config = AppConfig::load(cli.config.as_deref());
    let ctx = AppContext::new(config);

    // 3. One action, one notice
    let json = cli.json;
    let (notice, body) = match cli::run(&ctx, cli.command).await {
        Ok(outcome) => (Notice::success(outcome.message, outcome.data), outcome.body),
        Err(err) => {
            tracing::error!(
                code = %err.code,
                category = err.code.category().name(),
                error = %err,
                "Action failed"
            );
            (Notice::from(err), None)
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&notice)?);
    } else {
        if notice.is_success() {
            println!("{}", notice.message);
        } else {
            eprintln!("error {}: {}", notice.code, notice.message);
        }
        if let Some(body) = body {
            println!("{}", body);
        }
    }

    if !notice.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
