/// Record an operator action. Called explicitly in handlers after mutations.
pub fn log_event(action: &str, resource_id: Option<&str>, details: Option<serde_json::Value>) {
    let details = details.map(|d| d.to_string()).unwrap_or_default();
    tracing::info!(
        target: "lander::audit",
        action,
        resource_id = resource_id.unwrap_or("-"),
        details = %details,
        "Audit event"
    );
}
