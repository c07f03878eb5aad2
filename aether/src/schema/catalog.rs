//! Response schemas for every structured model call
//!
//! Field names match what the model is asked to return (camelCase); the
//! feature modules deserialize into their own types from these shapes.

use super::SchemaNode;

fn string_list() -> SchemaNode {
    SchemaNode::string_list()
}

/// Goal breakdown: goal, critical path summary, milestones with tasks and risks
pub fn goal_plan() -> SchemaNode {
    let task = SchemaNode::object([
        ("task", SchemaNode::string()),
        ("isCritical", SchemaNode::boolean()),
        ("duration", SchemaNode::string()),
    ])
    .all_required();

    let risk_analysis = SchemaNode::object([
        ("potentialObstacles", string_list()),
        ("mitigationStrategies", string_list()),
    ])
    .all_required();

    let milestone = SchemaNode::object([
        ("milestone", SchemaNode::string()),
        ("keyResults", string_list()),
        ("tasks", SchemaNode::array(task)),
        ("riskAnalysis", risk_analysis),
    ])
    .all_required();

    SchemaNode::object([
        ("goal", SchemaNode::string()),
        ("criticalPathSummary", SchemaNode::string()),
        ("milestones", SchemaNode::array(milestone)),
    ])
    .all_required()
}

/// Daily briefing task list
pub fn daily_tasks() -> SchemaNode {
    let task = SchemaNode::object([
        ("task", SchemaNode::string()),
        ("isCritical", SchemaNode::boolean()),
        ("strategicAlignment", SchemaNode::string()),
    ])
    .all_required();

    SchemaNode::object([("tasks", SchemaNode::array(task))]).all_required()
}

/// Decision analysis: recommendation, confidence and the three lists
pub fn decision_analysis() -> SchemaNode {
    SchemaNode::object([
        ("recommendation", SchemaNode::string()),
        ("confidenceScore", SchemaNode::integer()),
        ("pros", string_list()),
        ("cons", string_list()),
        ("potentialPitfalls", string_list()),
    ])
    .all_required()
}

/// Suggested decision factor names
pub fn decision_factors() -> SchemaNode {
    let factor = SchemaNode::object([("name", SchemaNode::string())]).all_required();
    SchemaNode::object([("factors", SchemaNode::array(factor))]).all_required()
}

/// Friction audit report items
pub fn friction_report() -> SchemaNode {
    let item = SchemaNode::object([
        ("inefficiency", SchemaNode::string()),
        ("analysis", SchemaNode::string()),
        ("recommendation", SchemaNode::string()),
        ("impact", SchemaNode::integer()),
        ("effort", SchemaNode::integer()),
    ])
    .all_required();

    SchemaNode::object([("report", SchemaNode::array(item))]).all_required()
}

/// Black swan simulation: three named outcomes
pub fn black_swan_report() -> SchemaNode {
    let outcome = || {
        SchemaNode::object([("outcome", SchemaNode::string()), ("indicators", string_list())]).all_required()
    };

    SchemaNode::object([
        ("bestCase", outcome()),
        ("worstCase", outcome()),
        ("mostLikely", outcome()),
    ])
    .all_required()
}
