use std::io::Write;

use anyhow::{Context, Result, anyhow, bail};
use futures::StreamExt;
use marquee_core::repository::require_signed_in;
use marquee_core::{ApiResult, Fetch, MovieRepository, Pager, TmdbRepository};
use serde::Serialize;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::cli::{Command, ListKind, SessionArgs};

const SESSION_ENV: &str = "TMDB_SESSION_ID";

pub async fn run(repo: &TmdbRepository, command: Command) -> Result<()> {
    match command {
        Command::Config => {
            repo.tmdb_configuration()
                .await
                .context("failed to fetch TMDB configuration")?;
            print_json(&repo.config().current())
        }
        Command::Trending { kind } => match kind {
            ListKind::Movie => emit(repo.movies_trending()).await,
            ListKind::Tv => emit(repo.tv_trending()).await,
            ListKind::Person => emit(repo.people_trending()).await,
        },
        Command::Popular { kind, page } => match kind {
            ListKind::Movie => emit(repo.movies_popular(page)).await,
            ListKind::Tv => emit(repo.tv_popular(page)).await,
            // person/popular takes no page parameter
            ListKind::Person => emit(repo.popular_people()).await,
        },
        Command::NowPlaying { page } => {
            emit(repo.movies_now_playing(page)).await
        }
        Command::AiringToday { page } => emit(repo.tv_airing_today(page)).await,
        Command::Discover { kind, pages } => {
            let source = repo.discovery_paging_source(kind.into());
            let items = collect_pages(Pager::new(source).max_pages(pages).stream())
                .await?;
            print_json(&items)
        }
        Command::Details { kind, id } => emit(repo.details(kind.into(), id)).await,
        Command::Images { kind, id } => emit(repo.images(kind.into(), id)).await,
        Command::Person { id, credits } => {
            if credits {
                emit(repo.people_credits(id)).await
            } else {
                emit(repo.people_details(id)).await
            }
        }
        Command::Search { query, pages } => {
            let source = repo.search_paging_source(&query);
            let items = collect_pages(Pager::new(source).max_pages(pages).stream())
                .await?;
            print_json(&items)
        }
        Command::Login => login(repo).await,
        Command::AccountState { session, kind, id } => {
            let session_id = session_id(&session)?;
            emit(repo.account_state(id, &session_id, kind.into())).await
        }
        Command::Favorite {
            session,
            kind,
            id,
            remove,
        } => {
            let session_id = session_id(&session)?;
            let account_id = account_id(repo, &session_id).await?;
            let ok = outcome(repo.mark_as_favorite(
                account_id,
                &session_id,
                kind.into(),
                id,
                !remove,
            ))
            .await?;
            print_json(&json!({ "success": ok, "favorite": !remove }))
        }
        Command::Watchlist {
            session,
            kind,
            id,
            remove,
        } => {
            let session_id = session_id(&session)?;
            let account_id = account_id(repo, &session_id).await?;
            let ok = outcome(repo.add_to_watchlist(
                account_id,
                &session_id,
                kind.into(),
                id,
                !remove,
            ))
            .await?;
            print_json(&json!({ "success": ok, "watchlist": !remove }))
        }
        Command::Logout { session } => {
            let session_id = session_id(&session)?;
            let ok = outcome(repo.sign_out(&session_id)).await?;
            print_json(&json!({ "success": ok }))
        }
        Command::Theme { mode } => {
            repo.update_dark_theme(mode.into())
                .await
                .context("failed to save theme preference")?;
            print_json(&repo.config().current().preferences())
        }
        Command::DynamicTheme { state } => {
            repo.update_dynamic_theme(state.enabled())
                .await
                .context("failed to save theme preference")?;
            print_json(&repo.config().current().preferences())
        }
        Command::ImageUrl { size, path } => {
            repo.tmdb_configuration()
                .await
                .context("failed to fetch TMDB configuration")?;
            let url = repo
                .config()
                .current()
                .image_url(size, Some(&path))
                .ok_or_else(|| anyhow!("image path must not be blank"))?;
            print_json(&json!({ "size": size.to_string(), "url": url }))
        }
    }
}

async fn login(repo: &TmdbRepository) -> Result<()> {
    let token = outcome(repo.request_token()).await?;

    let mut stderr = std::io::stderr();
    writeln!(
        stderr,
        "Approve access in your browser, then press Enter:\n  {}",
        token.approval_url()
    )?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read confirmation from stdin")?;

    if !outcome(repo.refresh_user_data(&token.request_token)).await? {
        bail!("TMDB did not create a session; was the request approved?");
    }
    let session = require_signed_in(repo.session())?;
    info!(account_id = session.account_id(), "session created");

    print_json(&json!({
        "session_id": session.session_id,
        "account_id": session.account_id(),
        "username": session.user.username,
        "name": session.user.display_name(),
    }))
}

async fn account_id(repo: &TmdbRepository, session_id: &str) -> Result<u64> {
    let user = repo
        .client()
        .account(session_id)
        .await
        .context("failed to load account for session")?;
    Ok(user.id)
}

fn session_id(args: &SessionArgs) -> Result<String> {
    args.session
        .clone()
        .or_else(|| std::env::var(SESSION_ENV).ok())
        .filter(|id| !id.trim().is_empty())
        .with_context(|| {
            format!("no session: pass --session or set {SESSION_ENV} (see `marqueectl login`)")
        })
}

async fn outcome<T: Send + 'static>(fetch: Fetch<T>) -> Result<T> {
    let label = fetch.label();
    let result = fetch
        .outcome()
        .await
        .with_context(|| format!("{label} was cancelled"))?;
    Ok(result?)
}

async fn emit<T>(fetch: Fetch<T>) -> Result<()>
where
    T: Serialize + Send + 'static,
{
    let value = outcome(fetch).await?;
    print_json(&value)
}

async fn collect_pages<T>(
    pages: impl futures::Stream<Item = ApiResult<Vec<T>>>,
) -> Result<Vec<T>> {
    let mut pages = std::pin::pin!(pages);
    let mut items = Vec::new();
    while let Some(page) = pages.next().await {
        items.extend(page?);
    }
    Ok(items)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}")?;
    Ok(())
}
