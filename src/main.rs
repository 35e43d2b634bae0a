mod app;
mod args;
mod config;
mod entry;
mod error;
mod http;
mod logger;
mod metrics;
mod shutdown;
mod shutdown_handlers;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
