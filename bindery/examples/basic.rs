//! Basic example of the bindery container.
//!
//! Run with `RUST_LOG=bindery=trace cargo run -p bindery --example basic`.

use std::sync::Arc;
use std::time::Duration;

use bindery::logging::init_tracing;
use bindery::prelude::*;

struct Config {
    database_url: String,
    debug: bool,
}

struct Database {
    url: String,
}

impl Database {
    fn query(&self, sql: &str) -> String {
        format!("{sql} @ {}", self.url)
    }
}

struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    fn find_user(&self, id: u64) -> String {
        self.db.query(&format!("SELECT * FROM users WHERE id = {id}"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("bindery=debug");

    let container = Container::builder().warn_on_rebind(true).build();

    // Config: a plain value
    container.bind("config").to_value(Config {
        database_url: "postgres://localhost/myapp".to_string(),
        debug: true,
    });

    // Database: shared, built asynchronously from config
    container
        .bind("db")
        .depends_on("config")
        .to_factory(|_, deps| async move {
            let config = deps.get::<Config>(0)?;
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok(Database {
                url: config.database_url.clone(),
            })
        });

    // Repository: a new one per request
    container
        .bind("users")
        .depends_on("db")
        .shared(false)
        .to_factory(|_, deps| async move {
            let db = deps.get::<Database>(0)?;
            Ok(UserRepository { db })
        });

    // Clock: reports through a completion handle
    container.bind("clock").shared(false).to_callback(|_, done, _| {
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            done.succeed(std::time::SystemTime::now());
        });
    });

    println!("{container:?}");

    let config = container.get_as::<Config>("config").await?;
    println!("config: database_url={}, debug={}", config.database_url, config.debug);

    let resolved = container.get(["users", "clock"]).await?;
    let users = resolved.get::<UserRepository>(0)?;
    let now = resolved.get::<std::time::SystemTime>(1)?;
    println!("{} (at {now:?})", users.find_user(42));

    match container.get("userz").await {
        Err(err) => println!("expected failure:\n{err}"),
        Ok(_) => println!("unexpected success"),
    }

    Ok(())
}
