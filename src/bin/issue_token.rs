//! Issue an access token for local testing
//!
//! Usage:
//!   cargo run --bin issue_token -- <username> [--env dev]
//!
//! Prints a bearer token signed with `token.symmetric_key`, valid for
//! `token.access_token_duration_secs`.

use anyhow::{Context, bail};
use chrono::Duration;
use simple_bank::auth::JwtMaker;
use simple_bank::config::AppConfig;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut env = "dev".to_string();
    let mut username = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--env" | "-e" => {
                env = iter.next().context("--env needs a value")?.clone();
            }
            other => username = Some(other.to_string()),
        }
    }
    let Some(username) = username else {
        bail!("usage: issue_token <username> [--env <env>]");
    };

    let config = AppConfig::load(&env)?;
    let maker = JwtMaker::new(&config.token.symmetric_key).context("Invalid token.symmetric_key")?;
    let (token, payload) = maker.create_token(
        &username,
        Duration::seconds(config.token.access_token_duration_secs),
    )?;

    eprintln!("token for {} expires at {}", payload.username, payload.expired_at);
    println!("{}", token);
    Ok(())
}
