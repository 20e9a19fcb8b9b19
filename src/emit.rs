//! Artifact rendering.
//!
//! Two renderers, both pure functions of the configuration (and, for the
//! table, the descriptor set): [`emit_interface`] produces the fixed
//! interface header, [`emit_table`] produces the table/bootstrap source.
//! Output is byte-deterministic for a fixed input. Table rows are
//! rendered in declaration order; the entry-point include list is
//! deduplicated and sorted lexicographically so it is stable under
//! reordering of unrelated descriptors.

use std::collections::BTreeSet;

use crate::config::GenConfig;
use crate::error::Error;
use crate::model::{PriorityTier, StackClass, TaskEntry, TaskSet};

const BANNER: &str = "// AUTO-GENERATED FILE BY \"taskgen\".\n// EDIT AT YOUR OWN RISK.\n";

/// Render the interface header (artifact A).
///
/// Independent of the descriptor set: it carries only the derived
/// priority and stack-size constants, the result-code enumeration, and
/// the bootstrap declaration.
pub fn emit_interface(cfg: &GenConfig) -> Result<String, Error> {
    cfg.validate()?;

    let mut out = String::new();
    out.push_str(BANNER);
    out.push_str("\n#pragma once\n\n");
    out.push_str("#include \"third_party/freertos_kernel/include/FreeRTOS.h\"\n");
    out.push_str("#include \"third_party/freertos_kernel/include/task.h\"\n\n");
    out.push_str("#include <cstdio>\n\n");
    out.push_str(&format!("namespace {} {{\n\n", cfg.namespace));

    out.push_str(&format!(
        "// Task priorities (configMAX_PRIORITIES = {})\n",
        cfg.max_priorities
    ));
    for (tier, label) in [
        (PriorityTier::High, "TASK_PRIORITY_HIGH  "),
        (PriorityTier::Medium, "TASK_PRIORITY_MEDIUM"),
        (PriorityTier::Low, "TASK_PRIORITY_LOW   "),
    ] {
        out.push_str(&format!(
            "constexpr int {label} = (configMAX_PRIORITIES - {});  // {}\n",
            tier.offset(),
            tier.level(cfg.max_priorities)
        ));
    }

    out.push_str(&format!(
        "\n// Stack sizes (configMINIMAL_STACK_SIZE = {})\n",
        cfg.minimal_stack_size
    ));
    for (class, label) in [
        (StackClass::Large, "STACK_SIZE_LARGE "),
        (StackClass::Medium, "STACK_SIZE_MEDIUM"),
        (StackClass::Small, "STACK_SIZE_SMALL "),
    ] {
        out.push_str(&format!(
            "constexpr int {label} = (configMINIMAL_STACK_SIZE * {});  // {} bytes\n",
            class.factor(),
            class.size(cfg.minimal_stack_size)
        ));
    }

    out.push_str("\n// Task interface\n");
    out.push_str("enum class TaskErr_t {\n    OK = 0,\n    CREATE_FAILED,\n};\n\n");
    out.push_str("// Function to create all tasks\n");
    out.push_str("TaskErr_t CreateAllTasks();\n\n");
    out.push_str(&format!("}} // namespace {}\n", cfg.namespace));
    Ok(out)
}

/// Render the table/bootstrap source (artifact B).
///
/// `header_name` is the file name of artifact A, referenced from the
/// generated `#include` so the two artifacts stay paired however the
/// caller names them.
pub fn emit_table(cfg: &GenConfig, tasks: &TaskSet, header_name: &str) -> Result<String, Error> {
    cfg.validate()?;

    let mut out = String::new();
    out.push_str(BANNER);
    out.push_str(&format!("\n#include \"{header_name}\"\n"));

    // One include per distinct entry point, in lexicographic order so the
    // list is stable even if unrelated descriptors are reordered.
    let includes: BTreeSet<String> = tasks
        .iter()
        .map(|e| entry_point_include(&e.descriptor.entry_point))
        .collect();
    if !includes.is_empty() {
        out.push_str("\n// Task implementations\n");
        for include in &includes {
            out.push_str(&format!("#include \"{include}\"\n"));
        }
    }

    out.push_str(&format!("\nnamespace {} {{\nnamespace {{\n\n", cfg.namespace));
    out.push_str(
        "struct TaskConfig {
    TaskFunction_t taskFunction;
    const char* taskName;
    uint32_t stackSize;
    void* parameters;
    UBaseType_t priority;
    TaskHandle_t* handle;
};

",
    );

    let rows: Vec<String> = tasks.iter().map(|e| render_row(cfg, e)).collect();
    out.push_str("constexpr TaskConfig kTaskConfigs[] = {\n");
    out.push_str(&rows.join(",\n"));
    if !rows.is_empty() {
        out.push('\n');
    }
    out.push_str("};\n\n} // namespace\n\n");

    out.push_str(
        r#"TaskErr_t CreateAllTasks() {
    TaskErr_t status = TaskErr_t::OK;

    for (const auto& config : kTaskConfigs) {
        BaseType_t ret = xTaskCreate(
            config.taskFunction,
            config.taskName,
            config.stackSize,
            config.parameters,
            config.priority,
            config.handle
        );

        if (ret != pdPASS) {
            printf("Failed to create task: %s\r\n", config.taskName);
            status = TaskErr_t::CREATE_FAILED;
            break;
        }
    }

    return status;
}

"#,
    );
    out.push_str(&format!("}} // namespace {}\n", cfg.namespace));
    Ok(out)
}

fn render_row(cfg: &GenConfig, entry: &TaskEntry) -> String {
    let d = &entry.descriptor;
    format!(
        r#"    {{
        {},
        "{}",
        {},
        {},
        {},
        {}
    }}"#,
        d.entry_point,
        escape_cpp_string(&d.name),
        d.stack_size.resolve(cfg.minimal_stack_size),
        d.parameters.as_deref().unwrap_or("nullptr"),
        d.priority.level(cfg.max_priorities),
        d.handle.as_deref().unwrap_or("nullptr"),
    )
}

/// Header implementing an entry point: `<base>_task.hh`, where `base` is
/// the entry-point name with a trailing `_task` stripped.
fn entry_point_include(entry_point: &str) -> String {
    let base = entry_point.strip_suffix("_task").unwrap_or(entry_point);
    format!("{base}_task.hh")
}

fn escape_cpp_string(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            '"' | '\\' => vec!['\\', c],
            _ => vec![c],
        })
        .collect()
}
