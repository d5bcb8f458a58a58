//! Agent restart controller.
//!
//! Two mutually exclusive strategies, resolved once by probing for the
//! launchd service descriptor: service-managed (launchctl unload/load) or
//! direct process signaling (SIGTERM, wait, relaunch).

use crate::constants;
use crate::error::AgentError;
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use sysinfo::{ProcessesToUpdate, System};
use tracing::{error, info};

/// How the agent will be restarted, decided once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartStrategy {
    /// A service descriptor exists; go through the service manager.
    Service,
    /// No descriptor; stop and start the process directly.
    Direct,
}

/// External resources the controller touches. Defaults point at the
/// installed agent; tests substitute their own paths and names.
#[derive(Debug, Clone)]
pub struct AgentControl {
    pub service_descriptor: PathBuf,
    pub executable: PathBuf,
    pub process_name: String,
    pub poll_interval: Duration,
}

impl Default for AgentControl {
    fn default() -> Self {
        Self {
            service_descriptor: PathBuf::from(constants::SERVICE_DESCRIPTOR_PATH),
            executable: PathBuf::from(constants::AGENT_EXECUTABLE_PATH),
            process_name: constants::AGENT_PROCESS_NAME.to_string(),
            poll_interval: constants::STOP_POLL_INTERVAL,
        }
    }
}

impl AgentControl {
    pub fn strategy(&self) -> RestartStrategy {
        if self.service_descriptor.is_file() {
            RestartStrategy::Service
        } else {
            RestartStrategy::Direct
        }
    }

    /// Restart the agent using whichever strategy the descriptor probe
    /// selected.
    pub fn restart(&self) -> Result<(), AgentError> {
        match self.strategy() {
            RestartStrategy::Service => self.restart_service(),
            RestartStrategy::Direct => {
                self.stop_process()?;
                self.start_process()
            }
        }
    }

    /// Service-managed restart. The stop outcome is deliberately not
    /// checked before issuing the start (known gap carried over from the
    /// tool this replaces).
    fn restart_service(&self) -> Result<(), AgentError> {
        info!("Stopping agent service");
        let _ = Command::new("sudo")
            .args(["launchctl", "unload", "-w"])
            .arg(&self.service_descriptor)
            .status()?;
        info!("Done.");

        info!("Starting agent service");
        let _ = Command::new("sudo")
            .args(["launchctl", "load", "-w"])
            .arg(&self.service_descriptor)
            .status()?;
        info!("Done. The agent should start within 90 seconds");
        Ok(())
    }

    /// Stop the running agent process, waiting (unbounded) for it to exit.
    /// No running process is fine; more than one is the only condition
    /// that aborts the whole program.
    fn stop_process(&self) -> Result<(), AgentError> {
        let pids = self.find_pids();
        if pids.len() > 1 {
            error!("Several PIDs found! Can't stop the agent");
            return Err(AgentError::AmbiguousProcess { count: pids.len() });
        }
        let Some(&pid) = pids.first() else {
            return Ok(());
        };

        kill(Pid::from_raw(pid as i32), Signal::SIGTERM)
            .map_err(|source| AgentError::Signal { pid, source })?;

        while !self.find_pids().is_empty() {
            info!("Waiting for the agent to quit...");
            std::thread::sleep(self.poll_interval);
        }
        info!("Done.");
        Ok(())
    }

    /// Launch the agent executable detached and confirm it came up.
    /// A missing PID after launch is logged, not retried.
    fn start_process(&self) -> Result<(), AgentError> {
        Command::new(&self.executable).spawn()?;

        match self.find_pids().first() {
            Some(pid) => info!("Started the agent. PID {}", pid),
            None => error!("Failed to start the agent"),
        }
        Ok(())
    }

    /// PIDs of processes matching the agent's exact name. An empty result
    /// means "not running", never an error.
    pub fn find_pids(&self) -> Vec<u32> {
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::All, true);
        sys.processes_by_exact_name(OsStr::new(self.process_name.as_str()))
            .map(|p| p.pid().as_u32())
            .collect()
    }
}
