use std::time::Duration;

/// Key of the nested object holding management-server-scoped settings.
pub const MANAGEMENT_SERVER_KEY: &str = "management_server";

/// Parameter names routed into the `management_server` sub-object
/// instead of the top level of the document.
pub const MANAGEMENT_SERVER_PARAMS: &[&str] = &[
    "bootstrap_token",
    "cert_authority_fingerprint",
    "disable_cert_check",
    "host",
];

/// launchd service descriptor for the agent. Its presence selects the
/// service-managed restart strategy.
pub const SERVICE_DESCRIPTOR_PATH: &str = "/Library/LaunchDaemons/com.resilio.agent.plist";

/// Installed agent binary, launched directly when no service descriptor exists.
pub const AGENT_EXECUTABLE_PATH: &str =
    "/Applications/Resilio Connect Agent.app/Contents/MacOS/Resilio Connect Agent";

/// Exact process name the agent runs under.
pub const AGENT_PROCESS_NAME: &str = "Resilio Connect";

/// Interval between checks while waiting for the agent process to exit.
pub const STOP_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Log file used when `--log` redirects output away from the console.
pub const LOG_FILE_NAME: &str = "update-syncconf.log";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_set_matches_management_server_schema() {
        assert!(MANAGEMENT_SERVER_PARAMS.contains(&"host"));
        assert!(MANAGEMENT_SERVER_PARAMS.contains(&"bootstrap_token"));
        assert!(MANAGEMENT_SERVER_PARAMS.contains(&"cert_authority_fingerprint"));
        assert!(MANAGEMENT_SERVER_PARAMS.contains(&"disable_cert_check"));
        assert!(!MANAGEMENT_SERVER_PARAMS.contains(&"use_gui"));
        assert!(!MANAGEMENT_SERVER_PARAMS.contains(&"folders_storage_path"));
    }
}
