use anyhow::Result;
use readmegen::cli::{log_level, parse_args, run};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = parse_args();
    let env = env_logger::Env::default().default_filter_or(log_level(cli.verbose));
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .init();
    run(cli).await
}
