use anyhow::Result;

use super::modes::{GlobalOptions, connect};
use crate::workbench::Session;

pub struct SessionOptions {
    pub language: Option<String>,
    pub to: Option<String>,
}

pub async fn run_session(global: &GlobalOptions, options: SessionOptions) -> Result<()> {
    let (config, assistant) = connect(global, options.language, options.to)?;
    let mut session = Session::new(config, assistant);
    session.run().await
}
