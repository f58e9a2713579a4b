//! Tests for the tool system.

use std::sync::Arc;

use roc_bridge::tools::*;
use serde_json::json;

#[test]
fn tool_arguments_collect_from_pairs() {
    let args: ToolArguments = vec![
        ("city".to_string(), json!("Bangalore")),
        ("days".to_string(), json!(3)),
    ]
    .into_iter()
    .collect();

    assert_eq!(args.len(), 2);
    assert_eq!(args.get_str("city").unwrap(), "Bangalore");
    assert_eq!(args.get_i64("days").unwrap(), 3);
    assert_eq!(args.to_value(), json!({"city": "Bangalore", "days": 3}));
}

#[test]
fn registry_from_shared_tools() {
    let tools: Vec<Arc<dyn Tool>> = vec![
        Arc::new(AgentTool::from_sync("a", "first", |_, _| Ok(json!(1)))),
        Arc::new(AgentTool::new("b", "second", |_, _| async { Ok(json!(2)) })),
    ];

    let registry: ToolRegistry = tools.into_iter().collect();

    assert_eq!(registry.names(), vec!["a", "b"]);
    assert!(registry.contains("b"));
    assert!(!registry.is_empty());
}

#[tokio::test]
async fn registered_tool_executes_through_trait_object() {
    let registry = ToolRegistry::new().with(AgentTool::new(
        "greet",
        "Greet a traveller",
        |args, _ctx| async move {
            let name = args.get_str("name")?;
            Ok(json!({"greeting": format!("Hello, {}!", name)}))
        },
    ));
    let tool = registry.get("greet").unwrap();
    let mut args = ToolArguments::new();
    args.insert("name", json!("World"));

    let result = tool
        .execute(&args, &ToolExecutionContext::default())
        .await
        .unwrap();

    assert_eq!(tool.description(), "Greet a traveller");
    assert_eq!(result["greeting"], "Hello, World!");
}
