// src/main.rs

use contentdag::{cli, load_dotenv, log_dotenv_outcome, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("contentdag error: {err:?}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    let dotenv = load_dotenv();
    logging::init_logging(args.log_level)?;
    log_dotenv_outcome(&dotenv);
    run(args).await
}
