//! `refs shell`: log in once, then search and edit at a prompt.

mod parse;
mod render;
mod state;

use anyhow::Context;
use ref_auth::{AuthError, AuthGate, AuthenticatedUser};
use ref_config::RefConfig;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use crate::cli::GlobalFlags;
use crate::context::open_service;
use state::{Reply, Session};

type Input = Lines<BufReader<Stdin>>;

pub async fn handle(config: RefConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let gate = AuthGate::from_config(&config.auth);
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut from_flags = flags.user.clone().zip(flags.password.clone());

    loop {
        let Some(user) = login(&gate, &mut input, from_flags.take()).await? else {
            return Ok(());
        };
        println!("Welcome, {}. Type help for commands.", user.username);

        let (service, load_error) = open_service(&config).await?;
        if let Some(error) = &load_error {
            eprintln!("warning: refs file could not be loaded ({error}); writes are disabled until reload succeeds");
        } else {
            println!("{} references loaded.", service.records().len());
        }

        let mut session = Session::new(
            service,
            user.username,
            config.general.case_sensitive,
            load_error,
        );
        match repl(&mut session, &mut input).await? {
            Reply::Logout => println!("Logged out."),
            _ => return Ok(()),
        }
    }
}

/// Ask for credentials until they match. `None` means stdin closed.
async fn login(
    gate: &AuthGate,
    input: &mut Input,
    mut preset: Option<(String, String)>,
) -> anyhow::Result<Option<AuthenticatedUser>> {
    loop {
        let (username, password) = match preset.take() {
            Some(pair) => pair,
            None => {
                let Some(username) = prompt(input, "username: ").await? else {
                    return Ok(None);
                };
                let Some(password) = prompt(input, "password: ").await? else {
                    return Ok(None);
                };
                (username, password)
            }
        };

        match gate.check(username.trim(), &password) {
            Ok(user) => return Ok(Some(user)),
            Err(AuthError::NotConfigured) => return Err(AuthError::NotConfigured.into()),
            Err(error) if error.is_user_visible() => eprintln!("{error}"),
            Err(_) => {}
        }
    }
}

/// Run commands until logout, quit, or end of input.
async fn repl<B: ref_store::RemoteFileBackend>(
    session: &mut Session<B>,
    input: &mut Input,
) -> anyhow::Result<Reply> {
    while let Some(line) = prompt(input, "refs> ").await? {
        let command = match parse::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                eprintln!("{error:#}");
                continue;
            }
        };

        match session.execute(command).await {
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(reply) => return Ok(reply),
            Err(error) => eprintln!("error: {error:#}"),
        }
    }
    Ok(Reply::Quit)
}

async fn prompt(input: &mut Input, label: &str) -> anyhow::Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;
    input.next_line().await.context("failed to read from stdin")
}
