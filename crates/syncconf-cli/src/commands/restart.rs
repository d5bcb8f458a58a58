use anyhow::Result;
use syncconf_core::agent::AgentControl;

/// Restart the installed agent. The strategy (service manager vs direct
/// signaling) is resolved inside the controller; an ambiguous process
/// table is the only error that aborts the program.
pub fn run() -> Result<()> {
    AgentControl::default().restart()?;
    Ok(())
}
