use std::io::Write;

use followgap_core::{
    collector,
    config::{Config, DataPaths},
    domain::{Relation, UserList, UserRecord},
    errors::Error,
    ports::{GraphProvider, Session},
    reconcile::reconcile,
    session::SessionStore,
    store,
};
use followgap_instagram::IgClient;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    followgap_core::logging::init("followgap")?;

    match std::env::args().nth(1).as_deref() {
        Some("collect") => run_collect().await,
        Some("reconcile") => run_reconcile(),
        _ => {
            eprintln!("usage: followgap <collect | reconcile>");
            std::process::exit(2);
        }
    }
}

/// Stage 1: fetch both relations and persist the snapshots.
async fn run_collect() -> Result<(), Error> {
    let cfg = Config::load()?;
    let provider = IgClient::new(&cfg.ig_username);
    let sessions = SessionStore::new(cfg.paths.session_file.clone());

    let session = establish_session(&provider, &sessions, &cfg).await?;

    let (followers, followees) = match collect_both(&provider, &session).await {
        Ok(lists) => lists,
        Err(Error::AuthExpired) => {
            warn!("session expired; discarding it so the next run re-authenticates");
            sessions.discard()?;
            return Err(Error::AuthExpired);
        }
        Err(e) => return Err(e),
    };

    // Persist only once both listings completed; a failed run leaves the
    // previous snapshots untouched.
    store::save_list(&cfg.paths.followers_file, &followers)?;
    store::save_list(&cfg.paths.followees_file, &followees)?;

    println!("followers of {} ({}): {:?}", cfg.ig_username, followers.len(), handles(&followers));
    println!("followees of {} ({}): {:?}", cfg.ig_username, followees.len(), handles(&followees));
    Ok(())
}

/// Stage 2: read the snapshots and report the follow-back gap.
fn run_reconcile() -> Result<(), Error> {
    let paths = DataPaths::load();
    let followers = store::load_list(&paths.followers_file)?;
    let followees = store::load_list(&paths.followees_file)?;

    let r = reconcile(&followers, &followees);

    println!("followers count: {}", r.followers);
    println!("followees count: {}", r.followees);
    println!("not following back count: {}", r.gap);
    println!("not following back: {:?}", handles(&r.not_following_back));
    Ok(())
}

async fn collect_both(
    provider: &IgClient,
    session: &Session,
) -> Result<(UserList, UserList), Error> {
    let followers = collector::collect(provider, session, Relation::Followers).await?;
    let followees = collector::collect(provider, session, Relation::Followees).await?;
    Ok((followers, followees))
}

/// Reuse the persisted session if one exists; otherwise log in (with one
/// 2FA prompt if challenged) and save the fresh session for later runs.
async fn establish_session(
    provider: &IgClient,
    sessions: &SessionStore,
    cfg: &Config,
) -> Result<Session, Error> {
    if let Some(blob) = sessions.load()? {
        let session = provider.restore_session(blob)?;
        info!("logged in using the saved session");
        return Ok(session);
    }

    let session = match provider.login(&cfg.ig_username, &cfg.ig_password).await {
        Ok(s) => s,
        Err(Error::TwoFactorRequired { identifier }) => {
            info!("two-factor authentication required");
            let code = prompt("Enter 2FA code: ")?;
            provider.two_factor_login(&identifier, code.trim()).await?
        }
        Err(e) => return Err(e),
    };
    info!("logged in successfully");

    sessions.save(&provider.serialize_session(&session)?)?;
    info!("session saved");
    Ok(session)
}

fn prompt(label: &str) -> Result<String, Error> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line)
}

fn handles(list: &[UserRecord]) -> Vec<&str> {
    list.iter().map(|u| u.handle.as_str()).collect()
}
