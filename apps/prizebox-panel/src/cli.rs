use anyhow::{Result, bail};

use crate::AppState;

pub async fn run_setup(state: &AppState) -> Result<()> {
    let report = state.setup_service.setup_report().await;
    if !report.success() {
        for failure in &report.failures {
            eprintln!("  {}", failure);
        }
        bail!("Database setup failed with {} error(s)", report.failures.len());
    }
    println!("Database setup completed successfully.");
    Ok(())
}

pub async fn redeem(state: &AppState, code: &str) -> Result<()> {
    let result = state.redeem_service.redeem(code).await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    if !result.success {
        bail!(
            "{}",
            result.message.unwrap_or_else(|| "Redemption failed".to_string())
        );
    }
    Ok(())
}
