//! Request dispatch for the sensor/scoreboard surface
//!
//! Transport-agnostic: the host web server hands over a path, a raw query
//! string and the current time, then writes the [`Reply`] and pushes the
//! [`Outbound`] messages to connected clients.

use serde::{Deserialize, Serialize};

use super::ingest::{LogEntry, LogMessage, SampleLog};
use crate::highscores::{Leaderboard, ScoreEntry};
use crate::settings::{RouteLogging, Settings};

/// Page unknown routes are redirected to
pub const NOT_FOUND_PAGE: &str = "/404.html";

/// Known endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Sensor ingestion (`/api`)
    Ingest,
    /// Data dump (`/view`)
    View,
    Scoreboard,
    Clear,
    NotFound(String),
}

impl Route {
    /// Match a request path; each route also covers its sub-paths
    pub fn parse(path: &str) -> Self {
        let routes = [
            ("/api", Route::Ingest),
            ("/view", Route::View),
            ("/scoreboard", Route::Scoreboard),
            ("/clear", Route::Clear),
        ];
        for (prefix, route) in routes {
            if let Some(rest) = path.strip_prefix(prefix) {
                if rest.is_empty() || rest.starts_with('/') {
                    return route;
                }
            }
        }
        Route::NotFound(path.to_string())
    }
}

/// Response to write back to the requester
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ok(String),
    Redirect(String),
}

/// Message to push to every connected client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum Outbound {
    /// Input channel: a freshly ingested sample
    Data(LogEntry),
    Log(LogMessage),
}

/// Result of dispatching one request
#[derive(Debug, Clone, PartialEq)]
pub struct Handled {
    pub reply: Reply,
    pub broadcast: Vec<Outbound>,
}

impl Handled {
    fn reply(reply: Reply) -> Self {
        Self {
            reply,
            broadcast: Vec::new(),
        }
    }
}

/// Server-side state behind the boundary routes
#[derive(Debug, Clone, Default)]
pub struct Backend {
    pub samples: SampleLog,
    pub leaderboard: Leaderboard,
    clear_leaderboard: bool,
    logging: RouteLogging,
}

impl Backend {
    pub fn new(settings: &Settings) -> Self {
        Self {
            samples: SampleLog::new(),
            leaderboard: Leaderboard::new(),
            clear_leaderboard: settings.clear_leaderboard_on_clear,
            logging: settings.route_logging.clone(),
        }
    }

    /// Greeting pushed to a newly connected client
    pub fn on_connect(&self) -> LogMessage {
        LogMessage::info("connection successful")
    }

    /// Dispatch a request
    pub fn handle(&mut self, path: &str, query: &str, now_ms: u64) -> Handled {
        let params: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

        match Route::parse(path) {
            Route::Ingest => {
                let entry = self.samples.ingest(params, now_ms);
                let json = entry.to_json();
                let mut broadcast = Vec::new();
                if self.logging.ingest {
                    broadcast.push(Outbound::Log(LogMessage::data(&entry)));
                    log::info!("/api:\t\t{}", json);
                }
                broadcast.insert(0, Outbound::Data(entry));
                Handled {
                    reply: Reply::Ok(json),
                    broadcast,
                }
            }
            Route::View => {
                let interval = params
                    .iter()
                    .find(|(k, _)| k == "interval")
                    .map(|(_, v)| v.as_str());
                let (body, count) = self.samples.render_dump(interval, now_ms);
                if self.logging.view {
                    log::info!("/view:\t\t(interval = {:?}) {} output line(s)", interval, count);
                }
                Handled::reply(Reply::Ok(body))
            }
            Route::Scoreboard => {
                if self.logging.scoreboard {
                    log::info!("/scoreboard:\t\t{} output line(s)", self.leaderboard.len());
                }
                Handled::reply(Reply::Ok(self.leaderboard.render()))
            }
            Route::Clear => {
                self.samples.clear();
                if self.clear_leaderboard {
                    self.leaderboard.clear();
                }
                if self.logging.clear {
                    log::info!("/clear:\t\tdata cleared");
                }
                Handled::reply(Reply::Ok("data cleared".to_string()))
            }
            Route::NotFound(path) => {
                if self.logging.not_found {
                    log::info!("{}:\t\t404 not found", path);
                }
                Handled::reply(Reply::Redirect(NOT_FOUND_PAGE.to_string()))
            }
        }
    }

    /// Handle a `score` push message; returns the rank achieved
    pub fn submit_score(&mut self, payload: &str) -> Result<usize, serde_json::Error> {
        let entry: ScoreEntry = serde_json::from_str(payload).inspect_err(|e| {
            log::warn!("Rejected score submission {:?}: {}", payload, e);
        })?;
        if self.logging.score {
            log::info!("score: {} : {}", entry.name, entry.score);
        }
        Ok(self.leaderboard.submit(entry.name, entry.score))
    }
}
