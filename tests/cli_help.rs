//! All subcommands have help.

use assert_cmd::Command;

fn hostblock() -> Command {
    Command::cargo_bin("hostblock").unwrap()
}

#[test]
fn help_main() {
    hostblock().arg("--help").assert().success();
}

#[test]
fn help_subcommands() {
    for cmd in [
        "shell",
        "block",
        "block-file",
        "list",
        "unblock",
        "backup",
        "clear",
        "restore",
    ] {
        hostblock().args([cmd, "--help"]).assert().success();
    }
}
