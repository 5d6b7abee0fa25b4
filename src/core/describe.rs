use crate::domain::model::StackEvent;
use crate::domain::ports::StackOps;
use crate::utils::error::Result;
use crate::utils::render;
use colored::Colorize;
use std::collections::HashMap;
use tabled::Tabled;

#[derive(Tabled)]
pub struct EventRow {
    #[tabled(rename = "LogicalResourceId")]
    logical_id: String,
    #[tabled(rename = "PhysicalResourceId")]
    physical_id: String,
    #[tabled(rename = "ResourceType")]
    resource_type: String,
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "ResourceStatus")]
    status: String,
    #[tabled(rename = "ResourceStatusReason")]
    reason: String,
    #[tabled(rename = "ResourceProperties")]
    properties: String,
}

/// Keeps only the newest event per physical resource id, drops resources
/// whose latest word is DELETE_COMPLETE, and orders by timestamp.
pub fn latest_events(events: Vec<StackEvent>) -> Vec<StackEvent> {
    let mut latest: HashMap<String, StackEvent> = HashMap::new();
    for event in events {
        match latest.get(&event.physical_id) {
            Some(seen) if seen.timestamp >= event.timestamp => {}
            _ => {
                latest.insert(event.physical_id.clone(), event);
            }
        }
    }

    let mut events: Vec<StackEvent> = latest
        .into_values()
        .filter(|e| e.status != "DELETE_COMPLETE")
        .collect();
    events.sort_by_key(|e| e.timestamp);
    events
}

fn event_rows(events: Vec<StackEvent>) -> Vec<EventRow> {
    events
        .into_iter()
        .map(|e| EventRow {
            logical_id: e.logical_id.bold().to_string(),
            physical_id: e.physical_id,
            resource_type: e.resource_type,
            timestamp: e.timestamp.to_string(),
            status: render::color_resource_status(&e.status),
            reason: e.reason.unwrap_or_default(),
            properties: e.properties.unwrap_or_default(),
        })
        .collect()
}

fn detail_rows(fields: Vec<(String, serde_json::Value)>) -> Vec<(String, String)> {
    fields
        .into_iter()
        .filter_map(|(key, value)| {
            let rendered = match &value {
                serde_json::Value::Null => return None,
                serde_json::Value::String(s) if s.is_empty() => return None,
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Array(a) if a.is_empty() => return None,
                other => serde_json::to_string_pretty(other).unwrap_or_default(),
            };
            Some((key, rendered))
        })
        .collect()
}

pub async fn run(ops: &dyn StackOps, stack_name: &str) -> Result<()> {
    let detail = ops.describe_stack(stack_name).await?;
    render::print_pairs("Stack Detail", detail_rows(detail.fields), 50);

    let events = latest_events(ops.stack_events(stack_name).await?);
    tracing::debug!("{} current events for {}", events.len(), stack_name);
    render::print_table("Events", event_rows(events), 20);
    Ok(())
}
