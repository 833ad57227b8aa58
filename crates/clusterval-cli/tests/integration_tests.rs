//! End-to-end tests for the clusterval binary.

use std::io::Write;
use std::net::TcpListener;

use assert_cmd::Command;
use predicates::prelude::*;

fn clusterval() -> Command {
    let mut cmd = Command::cargo_bin("clusterval").unwrap();
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_no_arguments_shows_usage() {
    clusterval()
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("usage: clusterval\n"))
        .stderr(predicate::str::contains("[bmc stonith <node> <bmc_ip> <bmc_user> <bmc_passwd>]"))
        .stderr(predicate::str::contains("[pacemaker corosync]"));
}

#[test]
fn test_unknown_domain_shows_usage() {
    clusterval()
        .arg("bogus-domain")
        .assert()
        .success()
        .stderr(predicate::str::contains("usage:"))
        .stderr(predicate::str::contains("error:").not());
}

#[test]
fn test_help_lists_domains() {
    clusterval()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("network"))
        .stdout(predicate::str::contains("pacemaker"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_version() {
    clusterval()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_domain_help() {
    clusterval()
        .args(["bmc", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accessible"))
        .stdout(predicate::str::contains("bmc stonith <node> <bmc_ip> <bmc_user> <bmc_passwd>"));
}

#[test]
fn test_unknown_domain_before_known_one_shows_usage() {
    clusterval()
        .args(["bogus-domain", "network"])
        .assert()
        .success()
        .stderr(predicate::str::contains("usage: clusterval"))
        .stderr(predicate::str::contains("error:").not());
}

#[test]
fn test_service_accepting_connections_passes() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port().to_string();

    clusterval()
        .args(["consul", "service", "127.0.0.1", &port])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_closed_service_port_fails() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port().to_string()
    };

    clusterval()
        .args(["elasticsearch", "service", "127.0.0.1", &port])
        .assert()
        .code(22)
        .stderr(predicate::str::contains("Elasticsearch service is not reachable"))
        .stderr(predicate::str::contains("ECONNREFUSED(111)"));
}

#[cfg(unix)]
#[test]
fn test_ping_program_from_config_file() {
    let config = config_file("[probes]\nping_program = \"true\"\n");

    clusterval()
        .arg("--config")
        .arg(config.path())
        .args(["network", "connectivity", "10.0.0.1", "10.0.0.2"])
        .assert()
        .success();
}

#[cfg(unix)]
#[test]
fn test_ping_program_from_environment() {
    clusterval()
        .env("CLUSTERVAL_PROBES__PING_PROGRAM", "false")
        .args(["network", "connectivity", "10.0.0.1", "10.0.0.2"])
        .assert()
        .code(22)
        .stderr(predicate::str::contains(
            "Ping failed for IP(s): 10.0.0.1, 10.0.0.2",
        ));
}

#[test]
fn test_verbose_logs_pass() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port().to_string();

    clusterval()
        .args(["-v", "consul", "service", "127.0.0.1", &port])
        .assert()
        .success()
        .stderr(predicate::str::contains("Validation passed"));
}

// Needs a working `ping` and permission to send ICMP.
#[test]
#[ignore]
fn test_loopback_connectivity() {
    clusterval()
        .args(["network", "connectivity", "127.0.0.1"])
        .assert()
        .success();
}
