use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::context;
use crate::db::DataAccess;

pub fn init_data_dir(ctx: &context::Context) -> Result<()> {
    let data_dir = PathBuf::from(&ctx.config.data_dir);
    std::fs::create_dir_all(&data_dir)?;
    Ok(())
}

pub fn init_data_access(ctx: &context::Context) -> Result<Arc<DataAccess>> {
    let db_path = PathBuf::from(&ctx.config.data_dir).join("portier.sqlite");
    let data_access = DataAccess::new(&db_path);
    if ctx.config.reset {
        data_access.reset_all().context("resetting database")?;
    }
    Ok(Arc::new(data_access))
}
