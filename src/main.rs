#![warn(clippy::all)]

use clap::Parser;

use crate::opts::{Opts, Subcommand};
use crate::prelude::*;

mod auth;
mod helpers;
mod landing;
mod opts;
mod prelude;
mod records;
mod resource;
mod web;

#[tokio::main]
async fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = helpers::tracing::init(opts.sentry_dsn.clone(), opts.traces_sample_rate)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting…");

    let result = match opts.subcommand {
        Subcommand::Web(opts) => web::run(opts).await,
    };
    if let Err(error) = &result {
        error!("{:#}", error);
    }
    result
}
