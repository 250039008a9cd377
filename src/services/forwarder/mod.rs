//! Lot state notification forwarder
//!
//! Subscribes to a channel pattern on redis and turns every matching message into a
//! [`Notification`] carrying the lot identifier, which is the channel name without its prefix.
//! Notifications are written to stdout as JSON lines.
//!
//! The subscription runs on a dedicated thread. When it terminates the process shuts down with
//! an error so that the supervisor can restart it.

use super::SharedOptions;
use crate::libraries::{
    helpers::parse_seconds,
    lifecycle::{DeathReason, Heart, HeartStone},
    resources::{
        keyspace_notifications_enabled, requires_keyspace_notifications, ConnectionPool, RedisPool,
    },
};
use anyhow::{bail, Context, Result};
use futures::channel::mpsc::unbounded;
use log::{info, warn};
use std::{thread, time::Duration};
use structopt::StructOpt;

mod consumer;
mod forwarding;
mod notification;

pub use forwarding::{domain_identifier, NotificationHandler, SubscriptionForwarder, Termination};
pub use notification::{Notification, NotificationReceiver, NotificationSender};

#[derive(Debug, StructOpt)]
pub struct Options {
    /// Prefix that is removed from channel names to obtain the lot identifier
    #[structopt(long, env, value_name = "prefix")]
    pub pattern_prefix: String,

    /// Channel pattern to subscribe to, e.g. `__keyspace@0__:lots:*`
    #[structopt(long, env, value_name = "pattern")]
    pub pattern_wildcard: String,

    /// Maximum number of idle connections kept for reuse
    #[structopt(long, env, default_value = "2", value_name = "count")]
    pub max_idle: usize,

    /// Timeout for a single connection attempt to redis
    #[structopt(long, env, default_value = "4", parse(try_from_str = parse_seconds), value_name = "seconds")]
    pub connect_timeout: Duration,
}

pub async fn run(shared_options: SharedOptions, options: Options) -> Result<()> {
    let (mut heart, stone) = Heart::new();

    let pool = RedisPool::new(
        &shared_options.redis,
        options.max_idle,
        options.connect_timeout,
    )
    .context("unable to create redis connection pool")?;

    let (sender, receiver) = unbounded();
    let handler = NotificationHandler::new(options.pattern_prefix, sender);

    spawn_subscriber(pool, options.pattern_wildcard, handler, stone)?;
    tokio::spawn(consumer::emit(receiver, tokio::io::stdout()));

    let death_reason = heart.death().await;
    info!("Heart died: {}", death_reason);

    match death_reason {
        DeathReason::Killed(reason) => bail!(reason),
        DeathReason::Terminated => Ok(()),
    }
}

fn spawn_subscriber(
    pool: RedisPool,
    wildcard: String,
    handler: NotificationHandler,
    mut stone: HeartStone,
) -> Result<()> {
    thread::Builder::new()
        .name("subscriber".to_owned())
        .spawn(move || {
            let reason = match subscribe(pool, wildcard, handler) {
                Ok(termination) => termination.to_string(),
                Err(e) => format!("{:#}", e),
            };

            stone.kill_blocking(format!("subscriber terminated: {}", reason));
        })
        .context("unable to spawn subscriber thread")?;

    Ok(())
}

fn subscribe(
    pool: RedisPool,
    wildcard: String,
    handler: NotificationHandler,
) -> Result<Termination> {
    verify_notification_config(&pool, &wildcard)?;

    let forwarder = SubscriptionForwarder::new(pool, wildcard, handler)
        .context("unable to acquire subscription connection")?;

    Ok(forwarder.start())
}

fn verify_notification_config(pool: &RedisPool, pattern: &str) -> Result<()> {
    if !requires_keyspace_notifications(pattern) {
        return Ok(());
    }

    let mut connection = pool
        .acquire()
        .context("unable to acquire connection for config verification")?;

    match keyspace_notifications_enabled(&mut connection, pattern) {
        Ok(true) => {}
        Ok(false) => warn!(
            "Redis server config does not publish the keyspace events required by {}, check 'notify-keyspace-events'",
            pattern
        ),
        Err(e) => warn!("Unable to verify keyspace notification config: {}", e),
    }

    pool.release(connection);

    Ok(())
}
