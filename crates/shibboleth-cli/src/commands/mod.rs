//! CLI command implementations.

pub mod challenge;
pub mod init;
pub mod insert;
pub mod remove;
pub mod respond;
pub mod stats;

use anyhow::Result;
use shibboleth_engine::prelude::Session;

use crate::config::{data_dir, Config};

/// Open the current project's session with the configured judge settings.
pub fn open_session() -> Result<Session> {
    let config = Config::load()?;
    let session = Session::open(data_dir()?, config.session_config())?;
    Ok(session)
}
