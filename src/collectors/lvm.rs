use crate::config::CommandsConfig;
use crate::error::{InventoryError, Result};
use crate::models::volume::Report;
use crate::runner::CommandRunner;
use log::debug;

/// Run `lvs` and parse its JSON report. Kept apart from the lsblk tree.
pub fn lvs_report(runner: &dyn CommandRunner, commands: &CommandsConfig) -> Result<Report> {
    let out = runner.run_line(&commands.lvs)?;
    let report = parse_report(&out)?;
    debug!("lvs reported {} logical volumes", report.volumes().count());
    Ok(report)
}

pub fn parse_report(out: &[u8]) -> Result<Report> {
    serde_json::from_slice(out).map_err(InventoryError::malformed("lvs"))
}
