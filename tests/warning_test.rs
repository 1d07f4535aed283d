use gitx::warning::WorkflowWarning;

#[test]
fn test_tolerated_failure_display() {
    let warning = WorkflowWarning::ToleratedFailure {
        command: "git branch -D prototype".to_string(),
        reason: "exit status: 1".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("git branch -D prototype"),
        "Message should contain the command, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("exit status: 1"),
        "Message should contain the reason, got: {}",
        display_msg
    );
}

#[test]
fn test_deprecated_command_display() {
    let warning = WorkflowWarning::DeprecatedCommand {
        used: "promote".to_string(),
        replacement: "integrate staging".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.starts_with("DEPRECATED"),
        "Message should start with 'DEPRECATED', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("integrate staging"),
        "Message should name the replacement, got: {}",
        display_msg
    );
}

#[test]
fn test_orphaned_branches_display() {
    let warning = WorkflowWarning::OrphanedBranches {
        reset: "prototype".to_string(),
        branches: vec!["dev-bar".to_string(), "dev-baz".to_string()],
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("prototype"),
        "Message should name the reset branch, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("dev-bar, dev-baz"),
        "Message should list the branches, got: {}",
        display_msg
    );
}
