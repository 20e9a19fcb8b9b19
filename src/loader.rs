//! TOML descriptor loading with eager validation.
//!
//! The document is one `[tasks.<id>]` table per task. Document order is
//! semantically meaningful (it becomes the creation order at startup), so
//! the `tasks` table is deserialized through a map visitor into a `Vec`
//! rather than through the `toml` crate's default map type, which sorts
//! keys. Every field is checked here, at load time; the emitters only
//! ever see fully validated descriptors.

use std::fmt;

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};

use crate::error::Error;
use crate::model::{PriorityTier, StackClass, StackSize, TaskDescriptor, TaskSet};

/// Top-level document shape.
#[derive(Deserialize)]
struct RawDocument {
    #[serde(default, deserialize_with = "ordered_tasks")]
    tasks: Vec<(String, RawTask)>,
}

/// One task entry as written, before validation.
///
/// Required fields are `Option` so a missing field surfaces as a
/// [`Error::MissingField`] naming the task, not as an opaque serde error.
#[derive(Deserialize)]
struct RawTask {
    entry_point: Option<String>,
    name: Option<String>,
    stack_size: Option<toml::Value>,
    priority: Option<String>,
    parameters: Option<String>,
    handle: Option<String>,
}

fn ordered_tasks<'de, D>(deserializer: D) -> Result<Vec<(String, RawTask)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedVisitor;

    impl<'de> Visitor<'de> for OrderedVisitor {
        type Value = Vec<(String, RawTask)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a table of task descriptors")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::new();
            while let Some((id, task)) = map.next_entry::<String, RawTask>()? {
                entries.push((id, task));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(OrderedVisitor)
}

/// Parse and validate a descriptor document.
///
/// Returns the descriptors in document order. An empty document is a
/// valid empty set.
pub fn parse(text: &str) -> Result<TaskSet, Error> {
    let raw: RawDocument = toml::from_str(text).map_err(Error::Parse)?;

    let mut set = TaskSet::new();
    for (id, task) in raw.tasks {
        let descriptor = validate_task(&id, task)?;
        set.insert(id, descriptor)?;
    }
    Ok(set)
}

fn validate_task(id: &str, raw: RawTask) -> Result<TaskDescriptor, Error> {
    let missing = |field| Error::MissingField {
        task: id.into(),
        field,
    };

    let entry_point = raw.entry_point.ok_or_else(|| missing("entry_point"))?;
    let name = raw.name.ok_or_else(|| missing("name"))?;
    let stack_value = raw.stack_size.ok_or_else(|| missing("stack_size"))?;
    let priority_tag = raw.priority.ok_or_else(|| missing("priority"))?;

    let priority = PriorityTier::parse(&priority_tag).ok_or_else(|| Error::UnknownPriority {
        task: id.into(),
        value: priority_tag.clone(),
    })?;

    let stack_size = parse_stack_size(id, &stack_value)?;

    Ok(TaskDescriptor {
        entry_point,
        name,
        stack_size,
        parameters: raw.parameters,
        priority,
        handle: raw.handle,
    })
}

fn parse_stack_size(id: &str, value: &toml::Value) -> Result<StackSize, Error> {
    match value {
        toml::Value::String(tag) => {
            if let Some(class) = StackClass::parse(tag) {
                return Ok(StackSize::Class(class));
            }
        }
        toml::Value::Integer(n) if *n > 0 && *n <= i64::from(u32::MAX) => {
            return Ok(StackSize::Exact(*n as u32));
        }
        _ => {}
    }
    Err(Error::UnknownStackClass {
        task: id.into(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_task_document_parses_in_order() {
        let set = parse(
            r#"
            [tasks.sensor]
            entry_point = "sensor_task"
            name = "Sensor"
            stack_size = "small"
            priority = "high"

            [tasks.logger]
            entry_point = "logger_task"
            name = "Logger"
            stack_size = "medium"
            priority = "low"
            "#,
        )
        .expect("document should parse");

        let ids: Vec<&str> = set.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["sensor", "logger"]);

        let sensor = &set.iter().next().unwrap().descriptor;
        assert_eq!(sensor.entry_point, "sensor_task");
        assert_eq!(sensor.priority, PriorityTier::High);
        assert_eq!(sensor.stack_size, StackSize::Class(StackClass::Small));
        assert_eq!(sensor.parameters, None);
        assert_eq!(sensor.handle, None);
    }

    #[test]
    fn document_order_wins_over_lexical_order() {
        let set = parse(
            r#"
            [tasks.zeta]
            entry_point = "zeta_task"
            name = "Zeta"
            stack_size = "small"
            priority = "low"

            [tasks.alpha]
            entry_point = "alpha_task"
            name = "Alpha"
            stack_size = "small"
            priority = "low"
            "#,
        )
        .unwrap();

        let ids: Vec<&str> = set.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["zeta", "alpha"]);
    }

    #[test]
    fn optional_references_carried_through() {
        let set = parse(
            r#"
            [tasks.motor]
            entry_point = "motor_task"
            name = "Motor"
            stack_size = "large"
            priority = "medium"
            parameters = "&g_motor_cfg"
            handle = "&g_motor_handle"
            "#,
        )
        .unwrap();

        let motor = &set.iter().next().unwrap().descriptor;
        assert_eq!(motor.parameters.as_deref(), Some("&g_motor_cfg"));
        assert_eq!(motor.handle.as_deref(), Some("&g_motor_handle"));
    }

    #[test]
    fn integer_stack_override_accepted() {
        let set = parse(
            r#"
            [tasks.dsp]
            entry_point = "dsp_task"
            name = "DSP"
            stack_size = 32768
            priority = "high"
            "#,
        )
        .unwrap();

        let dsp = &set.iter().next().unwrap().descriptor;
        assert_eq!(dsp.stack_size, StackSize::Exact(32768));
    }

    #[test]
    fn missing_field_names_the_task() {
        let err = parse(
            r#"
            [tasks.sensor]
            entry_point = "sensor_task"
            name = "Sensor"
            stack_size = "small"
            "#,
        )
        .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("'sensor'"), "unexpected error: {msg}");
        assert!(msg.contains("'priority'"), "unexpected error: {msg}");
    }

    #[test]
    fn unknown_priority_rejected_at_load() {
        let err = parse(
            r#"
            [tasks.sensor]
            entry_point = "sensor_task"
            name = "Sensor"
            stack_size = "small"
            priority = "urgent"
            "#,
        )
        .unwrap_err();

        assert!(
            matches!(err, Error::UnknownPriority { ref task, ref value }
                if task == "sensor" && value == "urgent"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn unknown_stack_class_rejected_at_load() {
        let err = parse(
            r#"
            [tasks.sensor]
            entry_point = "sensor_task"
            name = "Sensor"
            stack_size = "huge"
            priority = "high"
            "#,
        )
        .unwrap_err();

        assert!(
            matches!(err, Error::UnknownStackClass { ref task, .. } if task == "sensor"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn negative_stack_override_rejected() {
        let err = parse(
            r#"
            [tasks.sensor]
            entry_point = "sensor_task"
            name = "Sensor"
            stack_size = -64
            priority = "high"
            "#,
        )
        .unwrap_err();

        assert!(
            matches!(err, Error::UnknownStackClass { .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = parse("[tasks.sensor\nentry_point = ").unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "unexpected error: {err}");
    }

    #[test]
    fn empty_document_is_an_empty_set() {
        let set = parse("").unwrap();
        assert!(set.is_empty());
    }
}
