//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `forum_core` linkage and store wiring end to end.
//! - Seed a small demo forum into an empty store and print entity counts.
//!   Re-running against the same `FORUM_DB_PATH` leaves the counts unchanged.
//!
//! Reads `FORUM_LOG_LEVEL`, `FORUM_LOG_DIR` and `FORUM_DB_PATH`.

use forum_core::{
    open_configured_db, CoreConfig, ForumService, ForumStore, RepoResult, SqliteForumStore,
};
use log::{error, info};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("forum_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    println!("forum_core ping={}", forum_core::ping());
    println!("forum_core version={}", forum_core::core_version());

    let config = CoreConfig::from_env()?;
    if let Some(dir) = config.log_dir.as_deref().and_then(|dir| dir.to_str()) {
        forum_core::init_logging(&config.log_level, dir)?;
    }

    let conn = open_configured_db(&config)?;
    let mut service = ForumService::new(SqliteForumStore::try_new(&conn)?);

    let seeded = seed_demo_forum(&mut service)?;
    info!("event=cli_seed module=cli status=ok seeded={seeded}");
    println!("{}", summary_line(&service)?);
    Ok(())
}

/// Inserts the demo forum unless the store already holds industries.
/// Returns whether anything was written.
fn seed_demo_forum<S: ForumStore>(service: &mut ForumService<S>) -> RepoResult<bool> {
    if service.store().count_industries()? > 0 {
        return Ok(false);
    }
    let aviation = service.create_industry("Aviation")?;
    let technology = service.create_industry("Technology")?;
    service.create_company("American Airlines", aviation.uuid)?;
    let amazon = service.create_company("Amazon", technology.uuid)?;
    let user = service.register_user("demo", "not-a-real-hash", "demo@forum.local")?;
    let post = service.publish_post(user.uuid, Some(amazon.uuid), "Fast shipping.")?;
    service.comment_on(post.uuid, user.uuid, "Agreed.", true)?;
    Ok(true)
}

fn summary_line<S: ForumStore>(service: &ForumService<S>) -> RepoResult<String> {
    let store = service.store();
    Ok(format!(
        "industries={} companies={} users={} posts={} aviation_companies={}",
        store.count_industries()?,
        store.count_companies()?,
        store.count_users()?,
        store.count_posts()?,
        service.companies_in_industry("Aviation")?.len()
    ))
}
