//! Host-facing node description.
//!
//! A node-graph host needs to know the node's name, where to list it, which
//! inputs it takes (and their defaults and bounds), what it returns, and
//! whether its results may be cached between graph executions.

use serde::Serialize;
use serde_json::{json, Value};

use super::defaults;

/// Whether the host may reuse a previous result instead of re-invoking.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cacheability {
    /// Results depend only on inputs and may be cached.
    Cacheable,
    /// Every invocation must run; the node carries state between calls.
    Never,
}

/// Value type of a node input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputKind {
    /// Free text.
    String,
    /// Integer.
    Int,
    /// Boolean toggle.
    Boolean,
    /// Host-assigned node identity.
    UniqueId,
}

/// Which section of the host's input schema an input belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputGroup {
    /// Must be connected or filled in.
    Required,
    /// Falls back to its default.
    Optional,
    /// Supplied by the host, never shown to the user.
    Hidden,
}

/// Value type of a node output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputKind {
    /// Image batch tensor.
    Image,
    /// Integer.
    Int,
    /// Boolean.
    Boolean,
}

/// One node input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSpec {
    /// Input name as the host sees it.
    pub name: &'static str,
    /// Schema section.
    pub group: InputGroup,
    /// Value type.
    pub kind: InputKind,
    /// Default value, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Minimum for integer inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Step for integer inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<i64>,
    /// Labels for the on and off states of boolean inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<(&'static str, &'static str)>,
}

impl InputSpec {
    const fn new(name: &'static str, group: InputGroup, kind: InputKind) -> Self {
        Self {
            name,
            group,
            kind,
            default: None,
            min: None,
            step: None,
            labels: None,
        }
    }

    fn int(name: &'static str, default: usize, min: i64) -> Self {
        Self {
            default: Some(json!(default)),
            min: Some(min),
            step: Some(1),
            ..Self::new(name, InputGroup::Optional, InputKind::Int)
        }
    }

    fn toggle(name: &'static str, default: bool) -> Self {
        Self {
            default: Some(json!(default)),
            labels: Some(("Yes", "No")),
            ..Self::new(name, InputGroup::Optional, InputKind::Boolean)
        }
    }
}

/// One node output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutputSpec {
    /// Output name as the host sees it.
    pub name: &'static str,
    /// Value type.
    pub kind: OutputKind,
}

/// Full description of a node for registration with a host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDescriptor {
    /// Node type name.
    pub name: &'static str,
    /// Menu category.
    pub category: &'static str,
    /// Entry point the host calls.
    pub function: &'static str,
    /// Inputs in declaration order.
    pub inputs: Vec<InputSpec>,
    /// Outputs in return order.
    pub outputs: Vec<OutputSpec>,
    /// Whether results may be cached.
    pub cacheability: Cacheability,
}

impl NodeDescriptor {
    /// Describes the queued batch image loader node.
    #[must_use]
    pub fn queued_batch_images() -> Self {
        Self {
            name: "LoadQueuedBatchImages",
            category: "Queue Tools",
            function: "mainLoadImages",
            inputs: vec![
                InputSpec {
                    default: Some(json!("")),
                    ..InputSpec::new("directory", InputGroup::Required, InputKind::String)
                },
                InputSpec::int("batchSize", defaults::BATCH_SIZE, 1),
                InputSpec::toggle("preFrame", defaults::PRE_FRAME),
                InputSpec::toggle("reset", defaults::RESET),
                InputSpec::int("resetStartAt", defaults::RESET_START_AT, 0),
                InputSpec::new("uniqueId", InputGroup::Hidden, InputKind::UniqueId),
            ],
            outputs: vec![
                OutputSpec {
                    name: "IMAGE",
                    kind: OutputKind::Image,
                },
                OutputSpec {
                    name: "preFramed",
                    kind: OutputKind::Int,
                },
                OutputSpec {
                    name: "index",
                    kind: OutputKind::Int,
                },
                OutputSpec {
                    name: "hasNext",
                    kind: OutputKind::Boolean,
                },
            ],
            cacheability: Cacheability::Never,
        }
    }

    /// Looks up an input by name.
    #[must_use]
    pub fn input(&self, name: &str) -> Option<&InputSpec> {
        self.inputs.iter().find(|i| i.name == name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_is_never_cached() {
        let node = NodeDescriptor::queued_batch_images();
        assert_eq!(node.cacheability, Cacheability::Never);
        assert_eq!(node.category, "Queue Tools");
    }

    #[test]
    fn test_input_defaults() {
        let node = NodeDescriptor::queued_batch_images();
        assert_eq!(node.input("batchSize").unwrap().default, Some(json!(8)));
        assert_eq!(node.input("batchSize").unwrap().min, Some(1));
        assert_eq!(node.input("preFrame").unwrap().default, Some(json!(true)));
        assert_eq!(node.input("reset").unwrap().default, Some(json!(false)));
        assert_eq!(node.input("resetStartAt").unwrap().min, Some(0));
        assert_eq!(node.input("uniqueId").unwrap().group, InputGroup::Hidden);
    }

    #[test]
    fn test_output_order() {
        let node = NodeDescriptor::queued_batch_images();
        let names: Vec<_> = node.outputs.iter().map(|o| o.name).collect();
        assert_eq!(names, ["IMAGE", "preFramed", "index", "hasNext"]);
    }

    #[test]
    fn test_serialized_kinds_use_host_names() {
        let value = serde_json::to_value(NodeDescriptor::queued_batch_images()).unwrap();
        assert_eq!(value["inputs"][5]["kind"], "UNIQUE_ID");
        assert_eq!(value["outputs"][0]["kind"], "IMAGE");
        assert_eq!(value["cacheability"], "never");
        assert_eq!(value["inputs"][2]["labels"], json!(["Yes", "No"]));
        assert!(value["inputs"][5].get("default").is_none());
    }
}
