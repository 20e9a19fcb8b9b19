//! Strongly-typed task descriptor model.
//!
//! Priority tiers and stack-size classes are closed enumerations whose
//! numeric meaning is derived from the generator configuration (priority
//! ceiling and stack base unit), never hardcoded. [`TaskSet`] holds
//! descriptors in declaration order, which becomes the runtime creation
//! order, and rejects duplicate ids on insertion.

use crate::error::Error;

/// Scheduler priority tier of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityTier {
    /// Ceiling - 1.
    High,
    /// Ceiling - 2.
    Medium,
    /// Ceiling - 3.
    Low,
}

impl PriorityTier {
    /// Parse a lowercase tier tag from the descriptor document.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    /// Distance below the priority ceiling.
    pub fn offset(self) -> u32 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Numeric scheduler priority level for a given ceiling.
    ///
    /// The ceiling must have passed configuration validation (>= 4).
    pub fn level(self, max_priorities: u32) -> u32 {
        max_priorities - self.offset()
    }
}

/// Stack-size class of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackClass {
    /// 4x the base unit.
    Large,
    /// 3x the base unit.
    Medium,
    /// 2x the base unit.
    Small,
}

impl StackClass {
    /// Parse a lowercase class tag from the descriptor document.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "large" => Some(Self::Large),
            "medium" => Some(Self::Medium),
            "small" => Some(Self::Small),
            _ => None,
        }
    }

    /// Multiplier applied to the stack base unit.
    pub fn factor(self) -> u32 {
        match self {
            Self::Large => 4,
            Self::Medium => 3,
            Self::Small => 2,
        }
    }

    /// Resolved stack size for a given base unit.
    pub fn size(self, minimal_stack_size: u32) -> u32 {
        minimal_stack_size * self.factor()
    }
}

/// Stack size of a task: an enumerated class or an explicit override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackSize {
    /// One of the enumerated classes, resolved against the base unit.
    Class(StackClass),
    /// Explicit size in the scheduler's native stack units.
    Exact(u32),
}

impl StackSize {
    /// Resolved numeric stack size for a given base unit.
    pub fn resolve(self, minimal_stack_size: u32) -> u32 {
        match self {
            Self::Class(class) => class.size(minimal_stack_size),
            Self::Exact(n) => n,
        }
    }
}

/// One declared task, fully validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescriptor {
    /// Name of the task's entry-point function.
    pub entry_point: String,
    /// Human-readable task name, passed verbatim to the kernel.
    pub name: String,
    /// Stack size class or override.
    pub stack_size: StackSize,
    /// Optional expression for the creation parameter; `None` emits the
    /// null sentinel.
    pub parameters: Option<String>,
    /// Priority tier.
    pub priority: PriorityTier,
    /// Optional expression for where to store the task handle; `None`
    /// emits the null sentinel.
    pub handle: Option<String>,
}

/// A descriptor paired with its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    /// Unique task id from the descriptor document.
    pub id: String,
    /// The validated descriptor.
    pub descriptor: TaskDescriptor,
}

/// Ordered set of task descriptors.
///
/// Insertion order is the table row order and therefore the creation
/// order at firmware startup. Ids are unique by construction: the only
/// way to add an entry is [`TaskSet::insert`], which rejects repeats.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskSet {
    entries: Vec<TaskEntry>,
}

impl TaskSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor, rejecting a repeated id.
    pub fn insert(&mut self, id: String, descriptor: TaskDescriptor) -> Result<(), Error> {
        if self.entries.iter().any(|e| e.id == id) {
            return Err(Error::DuplicateId(id));
        }
        self.entries.push(TaskEntry { id, descriptor });
        Ok(())
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &TaskEntry> {
        self.entries.iter()
    }

    /// Number of declared tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no tasks are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
