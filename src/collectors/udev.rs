use crate::config::CommandsConfig;
use crate::error::Result;
use crate::runner::CommandRunner;

/// Run the udev property query for `/dev/<name>` and return the serial it prints.
pub fn lookup_serial(runner: &dyn CommandRunner, commands: &CommandsConfig, name: &str) -> Result<String> {
    let out = runner.run_shell(&commands.serial_pipeline(name))?;
    Ok(parse_serial(&out))
}

/// The pipeline already filters down to the value; only whitespace is left to strip.
pub fn parse_serial(out: &[u8]) -> String {
    String::from_utf8_lossy(out).trim().to_string()
}
