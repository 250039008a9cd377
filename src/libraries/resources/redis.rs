use super::{ConnectionPool, PatternSubscriber, PoolError, SubscriptionError};
use crate::libraries::subscription::{
    dispatch, SubscriptionEvent, SubscriptionHandler, SubscriptionState,
};
use log::{debug, warn};
use redis::{cmd, Client, Connection, ConnectionLike, RedisResult};
use std::{
    sync::{Mutex, PoisonError},
    thread::sleep,
    time::Duration,
};

const RETRY_INTERVAL: Duration = Duration::from_secs(2);

/// Keyspace event classes as documented for `notify-keyspace-events`
const EVENT_CLASSES: &str = "g$lshzxetmndA";

/// Pool of standalone redis connections
///
/// Connections are opened on demand and kept around for reuse when they are handed back in a
/// usable state.
pub struct RedisPool {
    client: Client,
    idle: Mutex<Vec<Connection>>,
    max_idle: usize,
    connect_timeout: Duration,
}

impl RedisPool {
    /// Creates a new pool for the redis server at the given url
    pub fn new(url: &str, max_idle: usize, connect_timeout: Duration) -> Result<Self, PoolError> {
        let client = Client::open(url).map_err(PoolError::InvalidUrl)?;

        Ok(Self {
            client,
            idle: Mutex::new(Vec::new()),
            max_idle,
            connect_timeout,
        })
    }

    fn connect(&self) -> Connection {
        let mut warn = true;

        loop {
            match self.client.get_connection_with_timeout(self.connect_timeout) {
                Ok(connection) => return connection,
                Err(e) => {
                    if warn {
                        warn = false;
                        if e.is_timeout() {
                            warn!("Timed out while connecting to redis! ({})", e)
                        } else {
                            warn!("Unable to connect to redis server! ({})", e)
                        }
                    }
                }
            }

            sleep(RETRY_INTERVAL);
        }
    }
}

impl ConnectionPool for RedisPool {
    type Connection = RedisConnection;

    fn acquire(&self) -> Result<Self::Connection, PoolError> {
        let reused = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();

        let con = match reused {
            Some(con) => {
                debug!("Reusing idle redis connection");
                con
            }
            None => self.connect(),
        };

        Ok(RedisConnection {
            con,
            subscribed: false,
        })
    }

    fn release(&self, connection: Self::Connection) {
        let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);

        if retainable(
            connection.con.is_open(),
            connection.subscribed,
            idle.len(),
            self.max_idle,
        ) {
            idle.push(connection.con);
        } else {
            debug!("Dropping released redis connection");
        }
    }
}

fn retainable(open: bool, subscribed: bool, idle: usize, max_idle: usize) -> bool {
    open && !subscribed && idle < max_idle
}

/// Redis connection handed out by the [`RedisPool`]
pub struct RedisConnection {
    con: Connection,
    // Connections in subscriber mode only accept subscription commands
    subscribed: bool,
}

impl PatternSubscriber for RedisConnection {
    fn psubscribe(
        &mut self,
        handler: &mut dyn SubscriptionHandler,
        pattern: &str,
    ) -> Result<(), SubscriptionError> {
        self.con.set_read_timeout(None)?;

        let command = cmd("PSUBSCRIBE").arg(pattern).get_packed_command();
        self.con.send_packed_command(&command)?;
        self.subscribed = true;

        loop {
            let frame = self.con.recv_response()?;

            match SubscriptionEvent::from_value(&frame) {
                Some(event) => {
                    if dispatch(handler, event) == SubscriptionState::Closed {
                        self.subscribed = false;
                        return Ok(());
                    }
                }
                None => debug!("Skipping unexpected subscription frame {:?}", frame),
            }
        }
    }
}

/// Verifies that the server publishes the keyspace notifications a pattern relies on
///
/// Patterns outside of the `__keyspace@` and `__keyevent@` namespaces don't depend on the
/// server configuration and are always considered enabled.
pub fn keyspace_notifications_enabled(
    connection: &mut RedisConnection,
    pattern: &str,
) -> RedisResult<bool> {
    let flag = match notification_flag(pattern) {
        Some(flag) => flag,
        None => return Ok(true),
    };

    let (_key, flags) = cmd("CONFIG")
        .arg("GET")
        .arg("notify-keyspace-events")
        .query::<(String, String)>(&mut connection.con)?;

    Ok(flags_cover(&flags, flag))
}

/// Whether subscribing to the pattern relies on the server publishing keyspace notifications
pub fn requires_keyspace_notifications(pattern: &str) -> bool {
    notification_flag(pattern).is_some()
}

fn notification_flag(pattern: &str) -> Option<char> {
    if pattern.starts_with("__keyspace@") {
        Some('K')
    } else if pattern.starts_with("__keyevent@") {
        Some('E')
    } else {
        None
    }
}

fn flags_cover(flags: &str, flag: char) -> bool {
    flags.contains(flag) && flags.chars().any(|c| EVENT_CLASSES.contains(c))
}
