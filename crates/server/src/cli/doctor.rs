use mn_domain::config::{Config, ConfigSeverity};
use mn_graph::GraphGateway;

/// Run all diagnostic checks and print a summary.
///
/// Returns `Ok(true)` when every check passes, `Ok(false)` when at least
/// one check failed.
pub async fn run(config: &Config) -> anyhow::Result<bool> {
    println!("mnemosyne doctor");
    println!("================\n");

    let mut all_passed = true;

    check_config_validation(config, &mut all_passed);
    check_store(config, &mut all_passed).await;

    println!();
    if all_passed {
        println!("All checks passed.");
    } else {
        println!("Some checks failed. Review the output above.");
    }

    Ok(all_passed)
}

// ── Individual checks ─────────────────────────────────────────────────

fn check_config_validation(config: &Config, all_passed: &mut bool) {
    let issues = config.validate();
    let error_count = issues
        .iter()
        .filter(|i| i.severity == ConfigSeverity::Error)
        .count();

    if issues.is_empty() {
        print_check("Config validation", true, "no issues".into());
    } else {
        print_check(
            "Config validation",
            error_count == 0,
            format!("{} issue(s) ({} error(s))", issues.len(), error_count),
        );
        for issue in &issues {
            println!("      {issue}");
        }
        if error_count > 0 {
            *all_passed = false;
        }
    }

    print_check(
        "Multi-tenant mode",
        true,
        if config.store.multi_tenant {
            "enabled".into()
        } else {
            "disabled".into()
        },
    );
}

async fn check_store(config: &Config, all_passed: &mut bool) {
    // Connecting also installs the schema, so a passing check means the
    // store is fully usable, not just reachable.
    match GraphGateway::connect(&config.store).await {
        Ok(_) => {
            print_check(
                "Graph store reachable",
                true,
                format!("{} (schema installed)", config.store.uri),
            );
        }
        Err(e) => {
            print_check(
                "Graph store reachable",
                false,
                format!("{} ({e})", config.store.uri),
            );
            *all_passed = false;
        }
    }
}

// ── Formatting helper ─────────────────────────────────────────────────

fn print_check(name: &str, passed: bool, detail: String) {
    let status = if passed { "PASS" } else { "FAIL" };
    println!("  [{status}] {name}: {detail}");
}
